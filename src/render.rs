use crate::error::{Error, Result};
use crate::shared::ansi;
use crate::store::{Annotations, Store};
use std::io::Write;

use yansi::Style;

/// Minimum number of spaces between the widest filename and its note.
pub const MIN_GAP: usize = 2;

const NOTE_STYLE: Style = Style::new().blue();

/// Finds the filename token in one line of listing output.
pub trait LineSplitter {
    /// Returns `(prefix, name)` where `name` is the raw, possibly colored
    /// filename, or `None` when the line carries no filename.
    fn split<'a>(&self, line: &'a [u8]) -> Option<(&'a [u8], &'a [u8])>;
}

/// Takes everything after the last space as the filename.
///
/// This matches `ls -l` only while the name is the last column and contains
/// no spaces. Names with spaces, symlink targets (`a -> b`) and the
/// `total N` header are all cut at the last space.
#[derive(Clone, Copy, Default)]
pub struct LastSpace;

impl LineSplitter for LastSpace {
    fn split<'a>(&self, line: &'a [u8]) -> Option<(&'a [u8], &'a [u8])> {
        let pos = line.iter().rposition(|&b| b == b' ')?;
        let (prefix, name) = (&line[..pos], &line[pos + 1..]);
        (!name.is_empty()).then_some((prefix, name))
    }
}

/// Spaces to put after a name of `width` so notes start in one column.
pub fn padding(max_width: usize, width: usize) -> usize {
    max_width.saturating_sub(width) + MIN_GAP
}

pub struct Renderer<S = LastSpace> {
    splitter: S,
    use_color: bool,
}

impl Renderer<LastSpace> {
    pub fn new(use_color: bool) -> Self {
        Self::with_splitter(LastSpace, use_color)
    }
}

impl<S: LineSplitter> Renderer<S> {
    pub fn with_splitter(splitter: S, use_color: bool) -> Self {
        Self { splitter, use_color }
    }

    /// Widest plain filename across the batch, in chars.
    pub fn column_width(&self, lines: &[Vec<u8>]) -> usize {
        lines
            .iter()
            .filter_map(|line| self.splitter.split(line))
            .map(|(_, name)| ansi::display_len(name))
            .max()
            .unwrap_or(0)
    }

    /// Each line's note, already padded and styled. Every lookup happens
    /// here, before anything is written.
    fn annotate(
        &self,
        lines: &[Vec<u8>],
        notes: &Annotations,
    ) -> Result<Vec<Vec<u8>>> {
        let max_width = self.column_width(lines);
        let mut suffixes = Vec::with_capacity(lines.len());
        for line in lines {
            let mut suffix = Vec::new();
            if let Some((_, name)) = self.splitter.split(line) {
                let plain = ansi::strip(name);
                let note = notes.get(&plain)?.filter(|n| !n.is_empty());
                if let Some(note) = note {
                    let pad = padding(max_width, ansi::text_width(&plain));
                    suffix.resize(pad, b' ');
                    self.push_note(&mut suffix, &note);
                }
            }
            suffixes.push(suffix);
        }
        Ok(suffixes)
    }

    /// Write every line followed by its note, if one is stored. The store is
    /// read once per call. A failed lookup aborts before any output.
    pub fn render<W: Write>(
        &self,
        lines: &[Vec<u8>],
        store: &Store,
        out: &mut W,
    ) -> Result<()> {
        let notes = store.load()?;
        let suffixes = self.annotate(lines, &notes)?;
        for (line, suffix) in lines.iter().zip(&suffixes) {
            out.write_all(line)
                .and_then(|()| out.write_all(suffix))
                .and_then(|()| out.write_all(b"\n"))
                .map_err(Error::Output)?;
        }
        out.flush().map_err(Error::Output)
    }

    fn push_note(&self, buf: &mut Vec<u8>, note: &[u8]) {
        if self.use_color {
            buf.extend_from_slice(NOTE_STYLE.prefix().as_bytes());
            buf.extend_from_slice(note);
            buf.extend_from_slice(NOTE_STYLE.suffix().as_bytes());
        } else {
            buf.extend_from_slice(note);
        }
    }
}

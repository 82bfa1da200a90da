use crate::error::{Error, Result};
use crate::listing::ListingCommand;
use std::io::Write;

mod content;

#[derive(Clone, Copy)]
pub(crate) struct HelpRow<'a> {
    pub label: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub options: &'a [HelpRow<'a>],
    pub environment: &'a [HelpRow<'a>],
    pub examples: &'a [&'a str],
    pub footer: &'a [&'a str],
}

/// Print lsn's help followed by the listing program's own `--help`.
pub fn run<W: Write>(listing: &ListingCommand, out: &mut W) -> Result<()> {
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    let lines = HelpPrinter::new(width).render(&content::book());
    for line in lines {
        writeln!(out, "{line}").map_err(Error::Output)?;
    }
    writeln!(out, "{} command help:", listing.program())
        .map_err(Error::Output)?;
    listing.print_help(out)
}

fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
}

struct HelpPrinter {
    width: usize,
}

impl HelpPrinter {
    fn new(width: usize) -> Self {
        Self { width }
    }

    fn render(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = Vec::new();
        out.push(book.title.to_string());
        out.push(String::new());
        out.extend(self.wrap(book.summary, self.width));
        out.push(String::new());
        out.push(format!("usage: {}", book.usage));
        out.push(String::new());

        out.extend(self.render_block("Options", book.options));
        out.extend(self.render_block("Environment", book.environment));

        if !book.examples.is_empty() {
            out.push("Examples:".to_string());
            for ex in book.examples {
                out.push(format!("  {ex}"));
            }
            out.push(String::new());
        }

        for line in book.footer {
            out.extend(self.wrap(line, self.width));
        }
        out.push(String::new());
        out
    }

    fn render_block(&self, title: &str, rows: &[HelpRow<'_>]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let min_desc = self.width / 2;
        let mut label_width =
            rows.iter().map(|r| r.label.len()).max().unwrap_or(0).min(38);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width =
            self.width.saturating_sub(2 + label_width + 2).max(min_desc);

        out.push(format!("{title}:"));
        for row in rows {
            let label_lines = self.wrap(row.label, label_width);
            let desc_lines = self.wrap(row.desc, desc_width);
            let count = label_lines.len().max(desc_lines.len());
            for idx in 0..count {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                out.push(format!("  {l:label_width$}  {d}"));
            }
        }
        out.push(String::new());
        out
    }

    fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(line);
                line = word.to_string();
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
        if out.is_empty() {
            out.push(String::new());
        }
        out
    }
}

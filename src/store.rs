//! Flat-file annotation store.
//!
//! One record per line: `<encoded name>|<encoded description>\n`. Names and
//! descriptions are raw bytes, since filenames need not be UTF-8. Rewrites go
//! through a temp file in the same directory and an atomic rename, so readers
//! see either the old store or the new one.

use crate::error::{Error, Result};
use crate::shared::codec::{decode, encode};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const DEFAULT_STORE_FILE: &str = ".descriptions";
const SEPARATOR: u8 = b'|';

pub struct Store {
    path: PathBuf,
}

/// Records read from the store in one pass, names already decoded.
/// Descriptions stay encoded until they are asked for.
#[derive(Debug, Default)]
pub struct Annotations {
    records: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Annotations {
    /// First record named `key`. A description that does not decode is an
    /// error.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match self.records.iter().find(|(name, _)| name.as_slice() == key) {
            Some((_, desc)) => decode(desc).map(Some),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw store contents, or `None` when the store has not been created yet.
    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store not found");
                Ok(None)
            }
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }

    /// Read every record once. A missing store is the same as an empty one.
    /// Records whose name field does not decode are skipped, as are lines
    /// without a separator.
    pub fn load(&self) -> Result<Annotations> {
        let Some(raw) = self.read_raw()? else {
            return Ok(Annotations::default());
        };
        let mut records = Vec::new();
        for (idx, line) in lines(&raw).enumerate() {
            let Some((name, desc)) = split_record(line) else {
                continue;
            };
            match decode(name) {
                Ok(name) => records.push((name, desc.to_vec())),
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "skipping store record");
                }
            }
        }
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "store loaded"
        );
        Ok(Annotations { records })
    }

    /// Find the description stored for `key` (a literal filename).
    pub fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.load()?.get(key)
    }

    /// Set the description for `key`, replacing an existing record in place
    /// or appending a new one.
    pub fn upsert(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.stage(key, value)?.commit()
    }

    /// Write the rewritten store to a temp file next to the real one without
    /// replacing it yet. Dropping the returned value discards the rewrite.
    pub fn stage(&self, key: &[u8], value: &[u8]) -> Result<StagedRewrite> {
        let raw = self.read_raw()?.unwrap_or_default();
        let record = format!("{}|{}\n", encode(key), encode(value));

        let mut out: Vec<u8> = Vec::with_capacity(raw.len() + record.len());
        let mut replaced = false;
        for line in lines(&raw) {
            if line.is_empty() {
                continue;
            }
            if !replaced && record_key_is(line, key) {
                out.extend_from_slice(record.as_bytes());
                replaced = true;
            } else {
                out.extend_from_slice(line);
                out.push(b'\n');
            }
        }
        if !replaced {
            out.extend_from_slice(record.as_bytes());
        }

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let prefix = format!(
            "{}.",
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(DEFAULT_STORE_FILE)
        );
        let existing = fs::metadata(&self.path).ok().map(|m| m.permissions());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        if let (None, Some(perms)) = (&existing, fresh_permissions()) {
            builder.permissions(perms);
        }
        let mut tmp =
            builder.tempfile_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(&out).map_err(|e| Error::io(tmp.path(), e))?;
        tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
        if let Some(perms) = existing {
            tmp.as_file()
                .set_permissions(perms)
                .map_err(|e| Error::io(tmp.path(), e))?;
        }
        debug!(
            path = %self.path.display(),
            replaced,
            bytes = out.len(),
            "staged store rewrite"
        );
        Ok(StagedRewrite { tmp, dest: self.path.clone() })
    }
}

/// A new store gets the mode a plain `File::create` would: 0666 minus the
/// umask.
#[cfg(unix)]
fn fresh_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn fresh_permissions() -> Option<fs::Permissions> {
    None
}

/// A fully written replacement store waiting to be renamed into place.
pub struct StagedRewrite {
    tmp: NamedTempFile,
    dest: PathBuf,
}

impl StagedRewrite {
    pub fn commit(self) -> Result<()> {
        let dest = self.dest;
        self.tmp
            .persist(&dest)
            .map_err(|e| Error::io(&dest, e.error))?;
        debug!(path = %dest.display(), "store rewrite committed");
        Ok(())
    }
}

fn lines(raw: &[u8]) -> impl Iterator<Item = &[u8]> {
    raw.split(|&b| b == b'\n')
}

fn split_record(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = line.iter().position(|&b| b == SEPARATOR)?;
    Some((&line[..pos], &line[pos + 1..]))
}

fn record_key_is(line: &[u8], key: &[u8]) -> bool {
    split_record(line)
        .and_then(|(name, _)| decode(name).ok())
        .is_some_and(|name| name == key)
}

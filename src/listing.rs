use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Flags always passed ahead of the forwarded arguments.
const BASE_ARGS: &[&str] = &["--color=always", "-l"];

/// Captured stdout of one listing run, one entry per line without its
/// terminator. Bytes are kept as printed.
pub struct Listing {
    pub lines: Vec<Vec<u8>>,
    pub status: ExitStatus,
}

/// An `ls`-compatible program invoked in long format with color forced on.
pub struct ListingCommand {
    program: String,
    forward: Vec<OsString>,
}

impl ListingCommand {
    pub fn new(program: impl Into<String>, forward: Vec<OsString>) -> Self {
        Self { program: program.into(), forward }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> Vec<&OsStr> {
        BASE_ARGS
            .iter()
            .map(OsStr::new)
            .chain(self.forward.iter().map(OsString::as_os_str))
            .collect()
    }

    /// Run the listing to completion and split its stdout into lines.
    /// Stderr goes straight to the terminal.
    pub fn run(&self) -> Result<Listing> {
        let args = self.args();
        debug!(program = %self.program, ?args, "running listing");
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;
        let lines = split_lines(&output.stdout);
        debug!(lines = lines.len(), status = %output.status, "listing finished");
        Ok(Listing { lines, status: output.status })
    }

    /// Pass `--help` through to the listing program, writing its stdout to
    /// `out`.
    pub fn print_help<W: Write>(&self, out: &mut W) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("--help")
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;
        out.write_all(&output.stdout).map_err(Error::Output)
    }
}

/// Split on `\n`, dropping one trailing `\r` per line. A final line with no
/// terminator is kept; the empty tail after the last `\n` is not.
fn split_lines(stdout: &[u8]) -> Vec<Vec<u8>> {
    if stdout.is_empty() {
        return Vec::new();
    }
    let body = stdout.strip_suffix(b"\n").unwrap_or(stdout);
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

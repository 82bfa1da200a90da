use crate::error::{Error, Result};
use std::ffi::OsString;

const SET_SHORT: &str = "-e";
const SET_LONG: &str = "--extended-description";
const HELP_LONG: &str = "--help";
const END_OF_FLAGS: &str = "--";

/// What one `lsn` run should do.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Help,
    SetDescription { file: OsString, description: OsString },
    List { forward: Vec<OsString> },
}

/// Works on `OsString`s so filenames that are not valid UTF-8 reach the
/// store and the listing program unchanged.
pub struct ArgParser {
    iter: std::vec::IntoIter<OsString>,
}

impl ArgParser {
    pub fn new(args: Vec<OsString>) -> Self {
        Self { iter: args.into_iter() }
    }

    /// Pick out lsn's own flags; everything else is kept in order for the
    /// listing program. Flags are only recognized before `--`, and `-h` is
    /// left alone because `ls` uses it.
    pub fn parse(self) -> Result<Invocation> {
        let mut set_mode = false;
        let mut forward = Vec::new();
        let mut operands = Vec::new();
        let mut literal = false;

        for arg in self.iter {
            if literal {
                operands.push(arg.clone());
                forward.push(arg);
                continue;
            }
            match arg.to_str() {
                Some(HELP_LONG) => return Ok(Invocation::Help),
                Some(SET_SHORT | SET_LONG) => set_mode = true,
                Some(END_OF_FLAGS) => {
                    literal = true;
                    forward.push(arg);
                }
                _ => {
                    operands.push(arg.clone());
                    forward.push(arg);
                }
            }
        }

        if !set_mode {
            return Ok(Invocation::List { forward });
        }
        let mut operands = operands.into_iter();
        match (operands.next(), operands.next(), operands.next()) {
            (Some(file), Some(description), None) => {
                Ok(Invocation::SetDescription { file, description })
            }
            _ => Err(Error::Usage(
                "Missing filename and/or description for setting description \
                 (usage: lsn -e <file> <description>)"
                    .into(),
            )),
        }
    }
}

pub fn parse(args: Vec<OsString>) -> Result<Invocation> {
    ArgParser::new(args).parse()
}

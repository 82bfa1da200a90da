//! `lsn`: run `ls -l` and print a stored description after each entry.
//!
//! Descriptions live in a flat file (`.descriptions` in the working
//! directory by default), one percent-encoded `name|text` record per line.

pub mod args;
pub mod config;
pub mod error;
pub mod help;
pub mod listing;
pub mod render;
pub mod shared;
pub mod store;

use crate::args::Invocation;
use crate::config::{Config, LOG_ENV};
use crate::listing::ListingCommand;
use crate::render::Renderer;
use crate::store::Store;
use std::env;
use std::ffi::OsString;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use crate::error::{Error, Result};

/// Send diagnostics to stderr, filtered by `LSN_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn entry() -> Result<()> {
    run(env::args_os().skip(1).collect(), &Config::from_env())
}

pub fn run(args: Vec<OsString>, config: &Config) -> Result<()> {
    let invocation = args::parse(args)?;
    debug!(?invocation, ?config, "parsed arguments");
    let store = Store::new(config.store_path.clone());

    match invocation {
        Invocation::Help => {
            let listing =
                ListingCommand::new(&config.listing_program, Vec::new());
            help::run(&listing, &mut io::stdout().lock())
        }
        Invocation::SetDescription { file, description } => {
            store.upsert(
                file.as_encoded_bytes(),
                description.as_encoded_bytes(),
            )
        }
        Invocation::List { forward } => {
            let listing =
                ListingCommand::new(&config.listing_program, forward);
            list(&listing, &store, config.use_color)
        }
    }
}

fn list(
    listing: &ListingCommand,
    store: &Store,
    use_color: bool,
) -> Result<()> {
    let output = listing.run()?;
    Renderer::new(use_color).render(
        &output.lines,
        store,
        &mut io::stdout().lock(),
    )?;
    if output.status.success() {
        Ok(())
    } else {
        Err(Error::ListingStatus {
            program: listing.program().to_string(),
            code: output.status.code().unwrap_or(1),
        })
    }
}

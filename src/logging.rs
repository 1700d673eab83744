//! Logger setup.
//!
//! The game owns the terminal's alternate screen, so log lines written to
//! stderr would land on top of the frame.  By default only warnings go to
//! stderr; pass a log file to capture anything more verbose.  `RUST_LOG`
//! overrides the level either way.

use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::{GameError, Result};

const DEFAULT_FILTER: &str = "warn";
const FILE_FILTER: &str = "debug";

pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let mut b = Builder::from_env(Env::default().default_filter_or(FILE_FILTER));
            b.target(Target::Pipe(Box::new(file)));
            b
        }
        None => Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)),
    };
    builder
        .try_init()
        .map_err(|e| GameError::Logger(e.to_string()))
}

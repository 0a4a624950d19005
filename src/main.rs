//! Headless Veggie Saga runner (default binary).
//!
//! Reads commands from stdin and writes one JSON reply per line to stdout.
//! Log lines go to stderr.

use std::io::{self, BufWriter};

use anyhow::{Context, Result};

use veggie_saga::driver::{run, Driver, DriverConfig};
use veggie_saga::logger::init_logger;

fn main() -> Result<()> {
    let config = DriverConfig::from_env();
    init_logger(config.log_prefix.clone());

    let mut driver = Driver::new(config.game).context("invalid game configuration")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut driver, stdin.lock(), BufWriter::new(stdout.lock()))
}

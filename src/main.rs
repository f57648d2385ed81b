//! # fibertrace CLI
//!
//! Command-line front end of the fiber sensing visualization data core.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a demo run and write the visualization bundle
//! fibertrace demo fiber_demo.json --seed 42
//!
//! # Inspect the derived grid dimensions of a configuration
//! fibertrace info --config fibertrace.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbosity());
    cli::dispatch(args)
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use fibertrace::grid::DataOrder;

mod config;
mod demo;
mod info;

/// fibertrace - Fiber Sensing Visualization Data Generator
#[derive(Parser)]
#[command(name = "fibertrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Heat map buffer orientation.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DataOrderArg {
    /// Consecutive values share a row (time step)
    #[default]
    Rows,
    /// Consecutive values share a column (distance point)
    Columns,
}

impl From<DataOrderArg> for DataOrder {
    fn from(arg: DataOrderArg) -> Self {
        match arg {
            DataOrderArg::Rows => DataOrder::Rows,
            DataOrderArg::Columns => DataOrder::Columns,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a demo sensing run and write the visualization bundle
    Demo {
        /// Output JSON bundle path
        #[arg(value_name = "OUTPUT", default_value = "fiber_demo.json")]
        output: PathBuf,

        /// Load run parameters from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Fix the generator seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Heat map buffer orientation
        #[arg(long, default_value = "rows", value_enum)]
        data_order: DataOrderArg,
    },

    /// Display the derived dimensions of a run configuration
    Info {
        /// Load run parameters from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            output,
            config,
            seed,
            data_order,
        } => demo::run(output, config, seed, DataOrder::from(data_order)),
        Commands::Info { config } => info::run(config),
    }
}

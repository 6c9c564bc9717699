//! CLI interface for strike-edge
//!
//! Provides subcommands for:
//! - `quote`: Price a single strike
//! - `replay`: Feed a price file through the engine and print the signal
//! - `config`: Show effective configuration

mod quote;
mod replay;

pub use quote::QuoteArgs;
pub use replay::{parse_price_line, OutputFormat, OverrideArg, ReplayArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "strike-edge")]
#[command(about = "Mispricing and position-sizing engine for BTC strike-ladder binary contracts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price YES and NO for one strike
    Quote(QuoteArgs),
    /// Replay a price file through the engine
    Replay(ReplayArgs),
    /// Show configuration
    Config,
}

//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::{run::RunArgs, serve::ServeArgs};

#[derive(Parser)]
#[command(name = "autolinear")]
#[command(about = "Linear issue picker and file saver exposed as MCP tools", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./autolinear.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP tool host
    Serve(ServeArgs),

    /// Fetch one issue with its comments and save it locally
    Run(RunArgs),

    /// Print the usage prompt offered to MCP clients
    Prompt,
}

//! CLI module for the Botdeck API
//!
//! Provides subcommands for running the backend:
//! - `serve`: HTTP API server
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Botdeck API - chatbot SaaS backend
#[derive(Parser)]
#[command(name = "botdeck-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default mode)
    Serve,

    /// Apply pending database migrations and exit
    Migrate {
        /// Revert the most recently applied migration instead
        #[arg(long)]
        revert: bool,
    },
}

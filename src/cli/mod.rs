//! Command line interface
//!
//! - `verify`: fact-check text from an argument, a file or stdin
//! - `serve`: run the HTTP API

pub mod serve;
pub mod verify;

use clap::{Parser, Subcommand};

/// Truthio - claim extraction and web-backed fact checking
#[derive(Parser)]
#[command(name = "truthio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify the claims in a piece of text
    Verify(verify::VerifyArgs),

    /// Run the HTTP API server
    Serve,
}

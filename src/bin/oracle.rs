//! Oracle CLI - perfect-play Tic-Tac-Toe
//!
//! This CLI provides:
//! - An interactive game against the exhaustively solved engine
//! - Inspection of the evaluated game tree and per-move evaluations

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oracle")]
#[command(version, about = "Perfect-play Tic-Tac-Toe engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the engine
    Play(oracle::cli::commands::play::PlayArgs),

    /// Inspect the evaluated game tree
    Analyze(oracle::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => oracle::cli::commands::play::execute(args),
        Commands::Analyze(args) => oracle::cli::commands::analyze::execute(args),
    }
}

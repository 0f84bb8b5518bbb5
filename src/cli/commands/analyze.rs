//! Analyze command - statistics and evaluations over the evaluated tree

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    Board, GameTree,
    board::{Outcome, Side},
    cache::DEFAULT_CACHE_FILE,
    cli::output::{format_number, print_kv, print_section},
    minimax::best_moves,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect the evaluated game tree")]
pub struct AnalyzeArgs {
    /// Board layout to analyze instead of the empty board, e.g. "11.22...."
    #[arg(long, short = 'p')]
    pub position: Option<String>,

    /// Export the analysis as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Path to the evaluated-tree cache
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Rebuild and re-cache the tree even if a cache file exists
    #[arg(long)]
    pub fresh: bool,
}

#[derive(Serialize)]
struct Analysis {
    position: String,
    side_to_move: &'static str,
    total_nodes: usize,
    transposition_entries: usize,
    value: i32,
    outcomes: OutcomeCounts,
    moves: Vec<MoveEvaluation>,
}

#[derive(Serialize)]
struct OutcomeCounts {
    in_progress: usize,
    draws: usize,
    first_wins: usize,
    second_wins: usize,
}

#[derive(Serialize)]
struct MoveEvaluation {
    cell: usize,
    value: i32,
    best: bool,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let tree = match &args.position {
        None => super::load_or_build(&args.cache, args.fresh)?,
        Some(layout) => {
            let board = Board::from_layout(layout)?;
            // The first side always opens, so the mover falls out of the counts
            let side = if board.occupied_count() % 2 == 0 {
                Side::First
            } else {
                Side::Second
            };
            GameTree::build_from(board, side)?
        }
    };

    let analysis = analyze_tree(&tree)?;

    print_section("Game tree");
    print_kv("Position", &analysis.position);
    print_kv("Side to move", analysis.side_to_move);
    print_kv("Distinct positions", &format_number(analysis.total_nodes));
    print_kv(
        "Transposition entries",
        &format_number(analysis.transposition_entries),
    );
    print_kv("In progress", &format_number(analysis.outcomes.in_progress));
    print_kv("Draws", &format_number(analysis.outcomes.draws));
    print_kv("First-side wins", &format_number(analysis.outcomes.first_wins));
    print_kv(
        "Second-side wins",
        &format_number(analysis.outcomes.second_wins),
    );
    print_kv("Evaluation", &analysis.value.to_string());

    if !analysis.moves.is_empty() {
        print_section("Moves");
        for entry in &analysis.moves {
            let marker = if entry.best { "  (best)" } else { "" };
            println!("  cell {} -> {}{}", entry.cell, entry.value, marker);
        }
    }

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create export file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &analysis)
            .context("failed to serialize analysis")?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}

fn analyze_tree(tree: &GameTree) -> Result<Analysis> {
    let root = tree.node(tree.root());

    let mut outcomes = OutcomeCounts {
        in_progress: 0,
        draws: 0,
        first_wins: 0,
        second_wins: 0,
    };
    for (_, node) in tree.nodes() {
        match node.outcome() {
            Outcome::InProgress => outcomes.in_progress += 1,
            Outcome::Draw => outcomes.draws += 1,
            Outcome::Win(Side::First) => outcomes.first_wins += 1,
            Outcome::Win(Side::Second) => outcomes.second_wins += 1,
        }
    }

    let moves = if root.outcome().is_terminal() {
        Vec::new()
    } else {
        let best = best_moves(tree, tree.root())?;
        let mut entries = Vec::new();
        for &child in root.children() {
            let (row, col) = root
                .board()
                .diff(&tree.node(child).board())
                .expect("a move changes exactly one cell");
            entries.push(MoveEvaluation {
                cell: row * 3 + col + 1,
                value: tree.node(child).minimax_value()?,
                best: best.contains(&child),
            });
        }
        entries
    };

    Ok(Analysis {
        position: root.board().encode(),
        side_to_move: match root.side_to_move() {
            Side::First => "first",
            Side::Second => "second",
        },
        total_nodes: tree.len(),
        transposition_entries: tree.table_len(),
        value: root.minimax_value()?,
        outcomes,
        moves,
    })
}

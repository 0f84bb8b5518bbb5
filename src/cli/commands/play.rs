//! Play command - interactive game against the perfect-play engine

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::SmallRng};

use crate::{
    GameTree, NodeId, Symbols,
    board::{Outcome, Side},
    cache::DEFAULT_CACHE_FILE,
    minimax::best_moves,
};

/// Which symbol the human plays
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SymbolChoice {
    X,
    O,
    Random,
}

/// Who makes the first move
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FirstMover {
    Human,
    Computer,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play against the perfect-play engine")]
pub struct PlayArgs {
    /// Symbol the human plays
    #[arg(long, short = 's', value_enum, default_value = "random")]
    pub side: SymbolChoice,

    /// Who makes the first move
    #[arg(long, short = 'f', value_enum, default_value = "random")]
    pub first: FirstMover,

    /// Show the evaluation of the current position and of each candidate move
    #[arg(long)]
    pub show_eval: bool,

    /// Path to the evaluated-tree cache
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Rebuild and re-cache the tree even if a cache file exists
    #[arg(long)]
    pub fresh: bool,

    /// Random seed for side assignment and tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let human_symbol = match args.side {
        SymbolChoice::X => 'X',
        SymbolChoice::O => 'O',
        SymbolChoice::Random => {
            if rng.random_bool(0.5) {
                'X'
            } else {
                'O'
            }
        }
    };
    let computer_symbol = if human_symbol == 'X' { 'O' } else { 'X' };

    let human_first = match args.first {
        FirstMover::Human => true,
        FirstMover::Computer => false,
        FirstMover::Random => rng.random_bool(0.5),
    };

    // The engine only knows first/second; the symbols follow whoever opens
    let human_side = if human_first { Side::First } else { Side::Second };
    let symbols = if human_first {
        Symbols::new(human_symbol, computer_symbol)
    } else {
        Symbols::new(computer_symbol, human_symbol)
    };

    println!("Let's play Tic-Tac-Toe!");
    println!("You play {human_symbol} and the computer plays {computer_symbol}.");
    println!(
        "{} will begin.",
        if human_first { "You" } else { "The computer" }
    );
    if args.show_eval {
        println!(
            "Evaluations are shown from the opening side's point of view: positive \
             means a win for the side that moved first, negative a win for the second \
             side, and larger magnitudes mean faster wins."
        );
    }
    println!();

    let tree = super::load_or_build(&args.cache, args.fresh)?;
    let mut current = tree.root();

    loop {
        let node = tree.node(current);
        println!("{}", node.render(symbols));
        if args.show_eval {
            println!("Eval: {}", node.minimax_value()?);
        }

        match node.outcome() {
            Outcome::Win(side) => {
                println!();
                if side == human_side {
                    println!("You win!");
                } else {
                    println!("The computer wins.");
                }
                break;
            }
            Outcome::Draw => {
                println!();
                println!("The game is a draw.");
                break;
            }
            Outcome::InProgress => {}
        }

        println!();
        let next = if node.side_to_move() != human_side {
            let candidates = best_moves(&tree, current)?;
            let choice = *candidates
                .choose(&mut rng)
                .expect("best_moves never returns an empty set");
            let (row, col) = node
                .board()
                .diff(&tree.node(choice).board())
                .expect("a move changes exactly one cell");
            println!("The computer plays cell {}.", row * 3 + col + 1);
            choice
        } else if node.children().len() == 1 {
            println!("Your last move is forced.");
            node.children()[0]
        } else {
            prompt_for_move(&tree, current, args.show_eval)?
        };
        println!();
        current = next;
    }

    Ok(())
}

/// Prompt until the human enters a legal cell number (1-9, row-major), then
/// return the matching child node.
fn prompt_for_move(tree: &GameTree, current: NodeId, show_eval: bool) -> Result<NodeId> {
    let node = tree.node(current);
    let board = node.board();
    let stdin = io::stdin();

    let open: Vec<String> = if show_eval {
        let mut entries = Vec::new();
        for &child in node.children() {
            let (row, col) = board
                .diff(&tree.node(child).board())
                .expect("a move changes exactly one cell");
            entries.push(format!(
                "{}:{}",
                row * 3 + col + 1,
                tree.node(child).minimax_value()?
            ));
        }
        entries
    } else {
        board
            .empty_cells()
            .map(|(row, col)| (row * 3 + col + 1).to_string())
            .collect()
    };

    loop {
        if show_eval {
            println!("Available moves and their evaluations: {}", open.join("  "));
        } else {
            println!("Available moves: {}", open.join(" "));
        }
        print!("Your move (1-9): ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read move input")?;
        if read == 0 {
            bail!("input closed before the game finished");
        }

        let Ok(number) = line.trim().parse::<usize>() else {
            println!("Please enter a number between 1 and 9.");
            continue;
        };
        if !(1..=9).contains(&number) {
            println!("Please enter a number between 1 and 9.");
            continue;
        }

        let (row, col) = ((number - 1) / 3, (number - 1) % 3);
        let target = match board.apply(row, col, node.side_to_move()) {
            Ok(board) => board,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let child = node
            .children()
            .iter()
            .copied()
            .find(|&c| tree.node(c).board() == target)
            .expect("every legal move has a child in the expanded tree");
        return Ok(child);
    }
}

//! Perfect-play Tic-Tac-Toe oracle
//!
//! This crate provides:
//! - An immutable 3x3 position model with win/draw classification
//! - Exhaustive game-tree construction with transposition-based subtree sharing
//! - Depth-adjusted minimax evaluation (faster wins, slower losses)
//! - Move selection that surfaces every minimax-equivalent move
//! - A cached, reloadable tree blob so later runs skip the build

pub mod board;
pub mod cache;
pub mod cli;
pub mod error;
pub mod lines;
pub mod minimax;
pub mod tree;

pub use board::{Board, Cell, Outcome, Side, Symbols};
pub use error::{Error, Result};
pub use minimax::{WIN_SCORE, best_move, best_moves, evaluate};
pub use tree::{GameTree, Node, NodeId, TreeBuilder};

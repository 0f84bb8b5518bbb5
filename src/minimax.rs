//! Minimax evaluation and move selection over a built game tree
//!
//! Evaluation is one post-order pass: every node's value is computed from
//! its children and stored exactly once. Shared subtrees are evaluated the
//! first time the pass reaches them and reused afterwards.

use crate::{
    board::{Outcome, Side},
    tree::{GameTree, NodeId},
};

/// Score of a win before depth adjustment.
///
/// Must exceed the deepest possible game (9 plies) so the sign of a value
/// always dominates its depth component.
pub const WIN_SCORE: i32 = 10;

/// Evaluate the whole tree from its root and return the root value.
///
/// # Errors
///
/// Returns [`Error::MissingChildren`](crate::Error::MissingChildren) if an
/// in-progress node without built children is reached.
pub fn evaluate(tree: &mut GameTree) -> Result<i32, crate::Error> {
    let root = tree.root();
    evaluate_subtree(tree, root, 0)
}

/// Evaluate the subtree below `id`, with `depth` plies between `id` and the
/// root of this evaluation.
///
/// A first-side win at depth d scores `WIN_SCORE - d` and a second-side win
/// `d - WIN_SCORE`, so wins are taken as early as possible and losses
/// delayed as long as possible. Draws score 0. Non-terminal nodes take the
/// maximum of their children's values when the first side moves and the
/// minimum when the second side moves; every child is visited, there is no
/// pruning. Already-evaluated nodes return their stored value unchanged.
pub fn evaluate_subtree(tree: &mut GameTree, id: NodeId, depth: i32) -> Result<i32, crate::Error> {
    if let Some(value) = tree.node(id).evaluation() {
        return Ok(value);
    }

    let value = match tree.node(id).outcome() {
        Outcome::Win(Side::First) => WIN_SCORE - depth,
        Outcome::Win(Side::Second) => depth - WIN_SCORE,
        Outcome::Draw => 0,
        Outcome::InProgress => {
            let children = tree.node(id).children().to_vec();
            if children.is_empty() {
                return Err(crate::Error::MissingChildren {
                    board: tree.node(id).board().encode(),
                });
            }

            let mover = tree.node(id).side_to_move();
            let mut best = match mover {
                Side::First => i32::MIN,
                Side::Second => i32::MAX,
            };
            for child in children {
                let value = evaluate_subtree(tree, child, depth + 1)?;
                best = match mover {
                    Side::First => best.max(value),
                    Side::Second => best.min(value),
                };
            }
            best
        }
    };

    tree.node_mut(id).set_minimax(value);
    Ok(value)
}

/// All children of `id` whose value is optimal for the side to move.
///
/// The first side maximizes, the second minimizes. Every tied child is
/// returned; callers wanting a single move pick the first or sample
/// uniformly among them.
///
/// # Errors
///
/// Returns [`Error::NoMoves`](crate::Error::NoMoves) on a terminal node,
/// [`Error::MissingChildren`](crate::Error::MissingChildren) on an
/// unexpanded one, and [`Error::NotEvaluated`](crate::Error::NotEvaluated)
/// if any child has no stored value.
pub fn best_moves(tree: &GameTree, id: NodeId) -> Result<Vec<NodeId>, crate::Error> {
    let node = tree.node(id);
    if node.children().is_empty() {
        return Err(match node.outcome() {
            Outcome::InProgress => crate::Error::MissingChildren {
                board: node.board().encode(),
            },
            _ => crate::Error::NoMoves {
                board: node.board().encode(),
            },
        });
    }

    let mut best_value = match node.side_to_move() {
        Side::First => i32::MIN,
        Side::Second => i32::MAX,
    };
    let mut best = Vec::new();

    for &child in node.children() {
        let value = tree.node(child).minimax_value()?;
        let improves = match node.side_to_move() {
            Side::First => value > best_value,
            Side::Second => value < best_value,
        };
        if improves {
            best_value = value;
            best.clear();
            best.push(child);
        } else if value == best_value {
            best.push(child);
        }
    }

    Ok(best)
}

/// First entry of [`best_moves`]; a convenience for callers that do not
/// care which of the tied moves is played.
pub fn best_move(tree: &GameTree, id: NodeId) -> Result<NodeId, crate::Error> {
    let moves = best_moves(tree, id)?;
    Ok(moves[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Board, tree::TreeBuilder};

    fn evaluated(layout: &str, side: Side) -> GameTree {
        GameTree::build_from(Board::from_layout(layout).unwrap(), side).unwrap()
    }

    #[test]
    fn test_terminal_scores_are_depth_adjusted() {
        let mut first_win = evaluated("111 22. ...", Side::Second);
        let root = first_win.root();
        assert_eq!(evaluate_subtree(&mut first_win, root, 0).unwrap(), WIN_SCORE);
        // Idempotent: asking again at any depth returns the stored value
        assert_eq!(evaluate_subtree(&mut first_win, root, 5).unwrap(), WIN_SCORE);

        let second_win = evaluated("22.211.11", Side::Second);
        // Second wins in one move: value is one ply below the root
        assert_eq!(
            second_win.node(second_win.root()).minimax_value().unwrap(),
            1 - WIN_SCORE
        );

        let draw = evaluated("112 221 112", Side::First);
        assert_eq!(draw.node(draw.root()).minimax_value().unwrap(), 0);
    }

    #[test]
    fn test_terminal_scores_at_arbitrary_depth() {
        let mut builder = TreeBuilder::new();
        let win = builder.intern(Side::Second, Board::from_layout("111 22. ...").unwrap());
        let mut tree = builder.finish(win);
        assert_eq!(evaluate_subtree(&mut tree, win, 3).unwrap(), WIN_SCORE - 3);

        let mut builder = TreeBuilder::new();
        let loss = builder.intern(Side::First, Board::from_layout("222 11. 1..").unwrap());
        let mut tree = builder.finish(loss);
        assert_eq!(evaluate_subtree(&mut tree, loss, 4).unwrap(), 4 - WIN_SCORE);
    }

    #[test]
    fn test_win_score_exceeds_max_depth() {
        assert!(WIN_SCORE > 9);
    }

    #[test]
    fn test_evaluate_requires_built_children() {
        let mut builder = TreeBuilder::new();
        let root = builder.intern(Side::First, Board::new());
        // No expand: the root is in progress with no children
        let mut tree = builder.finish(root);

        let err = evaluate(&mut tree).unwrap_err();
        assert!(matches!(err, crate::Error::MissingChildren { .. }));
    }

    #[test]
    fn test_faster_win_is_preferred() {
        // First can win immediately at (0,2) or dawdle; the immediate win
        // scores WIN_SCORE - 1 and must be chosen
        let tree = evaluated("11. 22. ...", Side::First);
        assert_eq!(tree.node(tree.root()).minimax_value().unwrap(), WIN_SCORE - 1);

        let best = best_moves(&tree, tree.root()).unwrap();
        assert_eq!(best.len(), 1);
        let board = tree.node(tree.root()).board();
        assert_eq!(board.diff(&tree.node(best[0]).board()), Some((0, 2)));
    }

    #[test]
    fn test_best_moves_returns_every_tie_for_first() {
        // Two immediate wins: completing the top row at (0,2) or the left
        // column at (2,0). Both score WIN_SCORE - 1 and both must appear.
        let tree = evaluated("11.122.2.", Side::First);
        let best = best_moves(&tree, tree.root()).unwrap();

        let board = tree.node(tree.root()).board();
        let mut cells: Vec<_> = best
            .iter()
            .map(|&id| board.diff(&tree.node(id).board()).unwrap())
            .collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 2), (2, 0)]);
    }

    #[test]
    fn test_best_moves_returns_every_tie_for_second() {
        // Mirror case: Second has two immediate wins and minimizes
        let tree = evaluated("22.211.11", Side::Second);
        let best = best_moves(&tree, tree.root()).unwrap();

        let board = tree.node(tree.root()).board();
        let mut cells: Vec<_> = best
            .iter()
            .map(|&id| board.diff(&tree.node(id).board()).unwrap())
            .collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 2), (2, 0)]);
        for &id in &best {
            assert_eq!(tree.node(id).minimax_value().unwrap(), 1 - WIN_SCORE);
        }
    }

    #[test]
    fn test_best_move_is_first_of_best_moves() {
        let tree = evaluated("11.122.2.", Side::First);
        let all = best_moves(&tree, tree.root()).unwrap();
        assert_eq!(best_move(&tree, tree.root()).unwrap(), all[0]);
    }

    #[test]
    fn test_best_moves_rejects_terminal_node() {
        let tree = evaluated("111 22. ...", Side::Second);
        let err = best_moves(&tree, tree.root()).unwrap_err();
        assert!(matches!(err, crate::Error::NoMoves { .. }));
    }

    #[test]
    fn test_best_moves_requires_evaluated_children() {
        let mut builder = TreeBuilder::new();
        let root = builder.intern(Side::First, Board::new());
        builder.expand(root);
        let tree = builder.finish(root);

        let err = best_moves(&tree, root).unwrap_err();
        assert!(matches!(err, crate::Error::NotEvaluated { .. }));
    }
}

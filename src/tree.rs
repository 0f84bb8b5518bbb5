//! Game tree construction with transposition-based subtree sharing
//!
//! The tree is stored as an arena: nodes live in a flat `Vec` and refer to
//! their children by [`NodeId`] index. The transposition table maps each
//! distinct grid to the one node built for it, so positions reached through
//! different move orders share a single subtree. Index equality doubles as
//! the sharing check.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Outcome, Side, Symbols};

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One point in the game tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    side_to_move: Side,
    board: Board,
    outcome: Outcome,
    children: Vec<NodeId>,
    minimax: Option<i32>,
}

impl Node {
    fn new(side_to_move: Side, board: Board) -> Self {
        Node {
            side_to_move,
            board,
            outcome: board.classify(),
            children: Vec::new(),
            minimax: None,
        }
    }

    /// Whose turn it is in this position
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// The board at this node
    pub fn board(&self) -> Board {
        self.board
    }

    /// Terminal classification, computed once at construction
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Child nodes, one per legal move in row-major order.
    ///
    /// Empty iff the node is terminal.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The game-theoretic value of this node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEvaluated`](crate::Error::NotEvaluated) if the
    /// evaluator has not reached this node yet. There is deliberately no
    /// default: a made-up value would corrupt move selection.
    pub fn minimax_value(&self) -> Result<i32, crate::Error> {
        self.minimax.ok_or_else(|| crate::Error::NotEvaluated {
            board: self.board.encode(),
        })
    }

    /// The stored value, or None when the node is not evaluated yet
    pub fn evaluation(&self) -> Option<i32> {
        self.minimax
    }

    pub(crate) fn set_minimax(&mut self, value: i32) {
        debug_assert!(self.minimax.is_none(), "minimax value is write-once");
        self.minimax = Some(value);
    }

    /// Render the board through the caller's symbol assignment
    pub fn render(&self, symbols: Symbols) -> String {
        self.board.render(symbols)
    }
}

/// Build-session state for one exhaustive expansion.
///
/// Owns the arena and the transposition table for the duration of a single
/// build; nothing is shared between builds and nothing is global. `finish`
/// hands the completed tree back to the caller.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    table: HashMap<Board, NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node for `board` and register it in the transposition
    /// table. The caller must have checked the table first.
    pub fn intern(&mut self, side_to_move: Side, board: Board) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(side_to_move, board));
        self.table.insert(board, id);
        id
    }

    /// Recursively expand every legal continuation below `id`.
    ///
    /// Terminal nodes are left without children. For each empty cell in
    /// row-major order the mover's mark is applied; a grid already in the
    /// transposition table is linked as-is (its subtree was expanded when it
    /// was first interned), otherwise the child is interned and expanded.
    /// Recursion depth is bounded by the 9 cells of the board.
    pub fn expand(&mut self, id: NodeId) {
        if self.nodes[id.index()].outcome.is_terminal() {
            return;
        }

        let board = self.nodes[id.index()].board;
        let mover = self.nodes[id.index()].side_to_move;

        for (row, col) in board.empty_cells() {
            let next = board
                .apply(row, col, mover)
                .expect("empty-cell enumeration only yields legal moves");

            let child = match self.table.get(&next) {
                Some(&existing) => existing,
                None => {
                    let child = self.intern(mover.opponent(), next);
                    self.expand(child);
                    child
                }
            };

            self.nodes[id.index()].children.push(child);
        }
    }

    /// Freeze the session into a read-only tree rooted at `root`
    pub fn finish(self, root: NodeId) -> GameTree {
        GameTree {
            nodes: self.nodes,
            table: self.table,
            root,
        }
    }
}

/// A fully expanded game tree.
///
/// Built once, read-only during play. Serializing the arena keeps children
/// as indices, so a reloaded tree reproduces the shared-subtree topology
/// exactly; no node is ever duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTree {
    nodes: Vec<Node>,
    table: HashMap<Board, NodeId>,
    root: NodeId,
}

impl GameTree {
    /// Build and evaluate the full tree for a fresh game: empty board,
    /// first side to move.
    ///
    /// # Examples
    ///
    /// ```
    /// use oracle::GameTree;
    ///
    /// let tree = GameTree::build().unwrap();
    /// // Perfect play from the empty board is a draw
    /// assert_eq!(tree.node(tree.root()).minimax_value().unwrap(), 0);
    /// ```
    pub fn build() -> Result<Self, crate::Error> {
        Self::build_from(Board::new(), Side::First)
    }

    /// Build and evaluate the tree of every position reachable from
    /// `board` with `side_to_move` to play.
    pub fn build_from(board: Board, side_to_move: Side) -> Result<Self, crate::Error> {
        let mut builder = TreeBuilder::new();
        let root = builder.intern(side_to_move, board);
        builder.expand(root);

        let mut tree = builder.finish(root);
        crate::minimax::evaluate(&mut tree)?;
        Ok(tree)
    }

    /// Root of the tree
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of distinct positions in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of transposition table entries
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Find the node built for a grid, if the grid is in this tree
    pub fn lookup(&self, board: &Board) -> Option<NodeId> {
        self.table.get(board).copied()
    }

    /// Iterate over all nodes with their ids
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

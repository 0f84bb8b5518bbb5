//! Persistence of the evaluated game tree
//!
//! The whole arena is written as one MessagePack blob. Children are stored
//! as arena indices, so a reload reproduces the shared-subtree topology
//! exactly: a grid reachable through several move orders comes back as the
//! same single node it was saved as.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::tree::GameTree;

/// Default cache file name in the working directory
pub const DEFAULT_CACHE_FILE: &str = "tree-cache.bin";

/// Current save format version
const VERSION: u32 = 1;

/// Versioned wrapper around the persisted tree
#[derive(Debug, Serialize, Deserialize)]
struct SavedTree<T> {
    version: u32,
    tree: T,
}

/// Save an evaluated tree to `path`.
pub fn save_tree<P: AsRef<Path>>(tree: &GameTree, path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create cache file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);

    let saved = SavedTree {
        version: VERSION,
        tree,
    };
    rmp_serde::encode::write(&mut writer, &saved).context("failed to serialize game tree")?;

    Ok(())
}

/// Load a previously saved tree from `path`.
pub fn load_tree<P: AsRef<Path>>(path: P) -> Result<GameTree> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("failed to open cache file: {}", path.as_ref().display()))?;
    let reader = BufReader::new(file);

    let saved: SavedTree<GameTree> =
        rmp_serde::decode::from_read(reader).context("failed to deserialize game tree")?;

    if saved.version != VERSION {
        bail!(
            "unsupported cache format version: {} (expected {})",
            saved.version,
            VERSION
        );
    }

    Ok(saved.tree)
}

/// Load the cached tree if it exists and decodes cleanly.
///
/// Every failure (missing file, truncated or corrupt blob, version
/// mismatch) counts as a cache miss so the caller falls back to a fresh
/// build. The engine itself never learns why the cache was unusable.
pub fn load_cached<P: AsRef<Path>>(path: P) -> Option<GameTree> {
    load_tree(path).ok()
}

//! CLI commands

pub mod analyze;
pub mod play;

use std::path::Path;

use anyhow::Result;

use crate::{GameTree, cache, cli::output};

/// Load the cached evaluated tree, or build one and cache it.
///
/// An unreadable or corrupt cache file is treated as absent. With `fresh`
/// set, any cache is ignored and overwritten by the new build.
pub fn load_or_build(path: &Path, fresh: bool) -> Result<GameTree> {
    if !fresh {
        if let Some(tree) = cache::load_cached(path) {
            println!("Loaded evaluated tree from {}", path.display());
            return Ok(tree);
        }
    }

    let spinner = output::build_spinner("Building and evaluating the game tree...");
    let tree = GameTree::build()?;
    spinner.finish_and_clear();

    cache::save_tree(&tree, path)?;
    println!("Cached evaluated tree at {}", path.display());
    Ok(tree)
}

//! # The TerraBlock Generator
//!
//! Transforms the visual editor's block workspace into declarative
//! infrastructure configuration text.
//!
//! ## Pipeline
//!
//! 1. **Catalog readiness**: the block library is loaded once and verified;
//!    nothing proceeds against an unloaded catalog
//! 2. **Tree building**: the native workspace is lowered into the plain
//!    block forest, enforcing the child-acceptance rule table
//! 3. **Primary render**: pre-order traversal with per-type dispatch,
//!    collecting aggregate facts
//! 4. **Ancillary synthesis**: variables, outputs, and per-function sources
//!    derived from the collected facts
//!
//! Every phase is synchronous; a full regeneration runs on each mutation
//! and there is no incremental diffing.

pub mod catalog;
pub mod generation;
pub mod tree_builder;
pub mod validation;

#[cfg(test)]
mod tests;

use tracing::{debug, info, warn};

use crate::graph::WorkspaceDescription;
use crate::model::BlockTree;

pub use generation::GeneratedOutput;

/// Error returned while the block catalog is unavailable.
const CATALOG_NOT_READY: &str = "block catalog is not ready - the block library failed to load";

/// Generate all configuration files for a native workspace.
///
/// Unrecognized or misplaced blocks are skipped with warnings rather than
/// failing the run; the only hard error is an unavailable block catalog.
pub fn generate_workspace(workspace: &WorkspaceDescription) -> Result<GeneratedOutput, String> {
    info!("starting generation for workspace '{}'", workspace.metadata.name);

    // Phase 1: catalog readiness
    let catalog = catalog::get_block_catalog();
    if catalog.is_empty() {
        return Err(CATALOG_NOT_READY.to_string());
    }

    // Phase 2: lower the native workspace into a block forest
    let (tree, warnings) = tree_builder::build_forest(workspace, catalog);
    debug!(
        nodes = tree.len(),
        roots = tree.roots().len(),
        warnings = warnings.len(),
        "built block forest"
    );
    for warning in validation::check_references(&tree) {
        warn!("{warning}");
    }

    // Phases 3 + 4: primary render and ancillary synthesis
    let output = generation::generate_tree(&tree);
    info!(files = output.files.len(), "generation complete");
    Ok(output)
}

/// Generate all configuration files for an already-built forest.
///
/// This is the rendering boundary for callers that hold a [`BlockTree`]
/// directly (live editing) rather than a persisted native workspace.
pub fn render_tree(tree: &BlockTree) -> Result<GeneratedOutput, String> {
    if !catalog::catalog_ready() {
        return Err(CATALOG_NOT_READY.to_string());
    }
    Ok(generation::generate_tree(tree))
}

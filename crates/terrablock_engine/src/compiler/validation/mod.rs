//! # Output and Tree Validation
//!
//! The validity signal exposed to the editor is a **heuristic**: generated
//! text is treated as valid when it is non-empty and free of the reserved
//! error marker. It is not a parse check and makes no structural guarantee
//! about the configuration — callers must not present it as one.
//!
//! Tree checks are advisory too: they produce warnings for structures that
//! will generate ambiguous references, never hard failures.

use itertools::Itertools;

use crate::compiler::generation::formatting::resource_id;
use crate::model::BlockTree;

/// Reserved marker substring; its presence flags generated text as invalid.
pub const ERROR_MARKER: &str = "Error:";

/// Heuristic validity check over generated text: non-empty and free of
/// [`ERROR_MARKER`]. Not a syntax validation.
pub fn is_output_valid(text: &str) -> bool {
    !text.trim().is_empty() && !text.contains(ERROR_MARKER)
}

/// Block types other blocks reference by name. A duplicated name among
/// these makes cross-references ambiguous.
const REFERENCE_TARGET_TYPES: &[&str] = &["vpc", "subnet", "iam_role"];

/// Structural warnings for a built forest.
pub fn check_references(tree: &BlockTree) -> Vec<String> {
    let targets: Vec<(String, String)> = tree
        .pre_order()
        .into_iter()
        .filter_map(|id| {
            let node = tree.get(id)?;
            REFERENCE_TARGET_TYPES
                .contains(&node.block_type.as_str())
                .then(|| (node.block_type.clone(), resource_id(tree, id)))
        })
        .collect();

    targets
        .iter()
        .duplicates()
        .map(|(block_type, name)| {
            format!(
                "multiple '{block_type}' blocks share the name '{name}'; references to it are ambiguous"
            )
        })
        .collect()
}

//! # Primary File Generator
//!
//! Walks the block forest in pre-order and concatenates each node's rendered
//! HCL into the primary configuration file, collecting the aggregate facts
//! that drive ancillary file synthesis along the way.
//!
//! Attachment-kind children (IAM roles) are excluded from the traversal:
//! their host renders them adjacently, and visiting them here as well would
//! emit them twice.

use terrablock_std::BlockKind;

use crate::compiler::catalog::get_block_catalog;
use crate::model::{BlockId, BlockTree};

use super::formatting::{prop, resource_id};
use super::registry;

/// Header prepended to a non-empty primary file.
pub const GENERATED_HEADER: &str =
    "# Generated Terraform Configuration\n# Auto-updated from visual blocks\n\n";

/// The primary file's entire content for an empty forest.
pub const EMPTY_WORKSPACE_PLACEHOLDER: &str =
    "# Drag blocks to start building your infrastructure.\n";

/// Aggregate facts collected during the primary traversal. Ancillary files
/// are synthesized from these alone — never from a second tree walk.
#[derive(Debug, Clone, Default)]
pub struct RenderFacts {
    /// Sanitized vpc identifiers, in traversal order.
    pub networks: Vec<String>,
    /// Sanitized instance identifiers, in traversal order.
    pub instances: Vec<String>,
    /// One entry per lambda block.
    pub functions: Vec<FunctionFact>,
    /// Number of non-empty resource renderings.
    pub resource_blocks: usize,
}

#[derive(Debug, Clone)]
pub struct FunctionFact {
    /// Sanitized function name; keys the generated source file.
    pub name: String,
    pub runtime: String,
}

/// Render the primary configuration text for a forest.
pub fn generate_primary(tree: &BlockTree) -> (String, RenderFacts) {
    let mut facts = RenderFacts::default();
    let mut body = String::new();

    for root in tree.roots() {
        emit_block(tree, *root, &mut body, &mut facts);
    }

    if body.is_empty() {
        return (EMPTY_WORKSPACE_PLACEHOLDER.to_string(), facts);
    }

    let mut text = String::from(GENERATED_HEADER);
    text.push_str(body.trim_end());
    text.push('\n');
    (text, facts)
}

fn emit_block(tree: &BlockTree, id: BlockId, out: &mut String, facts: &mut RenderFacts) {
    let Some(node) = tree.get(id) else {
        return;
    };

    let rendered = registry::render_block(tree, id);
    if !rendered.is_empty() {
        facts.resource_blocks += 1;
    }
    out.push_str(&rendered);

    match node.block_type.as_str() {
        "vpc" => facts.networks.push(resource_id(tree, id)),
        "instance" => facts.instances.push(resource_id(tree, id)),
        "lambda" => facts.functions.push(FunctionFact {
            name: resource_id(tree, id),
            runtime: prop(tree, id, "runtime"),
        }),
        _ => {}
    }

    let catalog = get_block_catalog();
    for child in &node.children {
        let attachment = tree
            .get(*child)
            .and_then(|c| catalog.kind(&c.block_type))
            .map(|kind| kind == BlockKind::Attachment)
            .unwrap_or(false);
        if attachment {
            continue;
        }
        emit_block(tree, *child, out, facts);
    }
}

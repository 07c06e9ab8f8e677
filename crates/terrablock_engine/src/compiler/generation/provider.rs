//! Render strategy for the provider block.

use crate::model::{BlockId, BlockTree};

use super::formatting::prop;

pub fn render_provider(tree: &BlockTree, id: BlockId) -> String {
    let region = prop(tree, id, "region");
    format!("provider \"aws\" {{\n  region = \"{region}\"\n}}\n\n")
}

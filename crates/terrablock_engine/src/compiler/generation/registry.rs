//! Render dispatch table.
//!
//! Each block type maps to a render function; adding a resource type means
//! adding a table entry next to its strategy, not a new branch in the
//! traversal. Types without an entry render to the empty string so a tree
//! holding experimental blocks still produces valid output for the rest.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::model::{BlockId, BlockTree};

use super::{compute, identity, ml, network, provider, storage};

/// A per-type render strategy: the block's own HCL (plus any attachment it
/// hosts), excluding its generic children.
pub type RenderFn = fn(&BlockTree, BlockId) -> String;

static RENDER_REGISTRY: OnceLock<HashMap<&'static str, RenderFn>> = OnceLock::new();

pub fn render_registry() -> &'static HashMap<&'static str, RenderFn> {
    RENDER_REGISTRY.get_or_init(|| {
        let mut table: HashMap<&'static str, RenderFn> = HashMap::new();
        table.insert("provider", provider::render_provider as RenderFn);
        table.insert("vpc", network::render_vpc as RenderFn);
        table.insert("subnet", network::render_subnet as RenderFn);
        table.insert("security_group", network::render_security_group as RenderFn);
        table.insert("instance", compute::render_instance as RenderFn);
        table.insert("lambda", compute::render_lambda as RenderFn);
        table.insert("s3", storage::render_s3 as RenderFn);
        table.insert("rds", storage::render_rds as RenderFn);
        table.insert("iam_role", identity::render_iam_role as RenderFn);
        table.insert("bedrock_model", ml::render_bedrock_model as RenderFn);
        table.insert("glue_job", ml::render_glue_job as RenderFn);
        table.insert("transcribe_job", ml::render_transcribe_job as RenderFn);
        table
    })
}

/// Render one block through the dispatch table. Unknown types render to
/// nothing rather than failing the whole pass.
pub fn render_block(tree: &BlockTree, id: BlockId) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };
    match render_registry().get(node.block_type.as_str()) {
        Some(render) => render(tree, id),
        None => String::new(),
    }
}

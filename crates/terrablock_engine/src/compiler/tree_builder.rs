//! # Tree Builder
//!
//! Lowers the editor's native workspace representation into the internal
//! block forest.
//!
//! The native model knows about fields, input slots, and next-sibling
//! chains; none of that survives here. Each native block becomes one
//! [`BlockNode`] with lower-cased property keys, statement chains become
//! ordered child lists attached through the rule table, and value slots are
//! collapsed into plain properties on the host.
//!
//! ## Failure policy
//!
//! The build never aborts. An unrecognized block type, a value block in a
//! statement position, or a child rejected by the rule table is skipped
//! with a warning, and the rest of the workspace still builds — one bad
//! block must not block generation for everything else.

use terrablock_std::{BlockKind, NATIVE_TYPE_PREFIX};
use tracing::warn;

use crate::compiler::catalog::BlockCatalog;
use crate::graph::{BlockStub, PropertyValue, SlotInput, WorkspaceDescription};
use crate::model::{BlockId, BlockNode, BlockTree};

/// Build a block forest from a native workspace.
///
/// Returns the forest together with the warnings produced by skipped
/// blocks; warnings are also emitted through `tracing`.
pub fn build_forest(
    workspace: &WorkspaceDescription,
    catalog: &BlockCatalog,
) -> (BlockTree, Vec<String>) {
    let mut builder = TreeBuilder {
        catalog,
        tree: BlockTree::new(),
        warnings: Vec::new(),
    };

    for top in &workspace.blocks {
        // Top-level blocks chain like statements: each link is its own root.
        for stub in top.chain() {
            if let Some(id) = builder.build_block(stub) {
                builder.tree.add_root(id);
            }
        }
    }

    (builder.tree, builder.warnings)
}

/// Strip the editor's type-name prefix from a native type tag.
pub fn internal_tag(native_type: &str) -> &str {
    native_type
        .strip_prefix(NATIVE_TYPE_PREFIX)
        .unwrap_or(native_type)
}

struct TreeBuilder<'a> {
    catalog: &'a BlockCatalog,
    tree: BlockTree,
    warnings: Vec<String>,
}

impl TreeBuilder<'_> {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Build one native block (not its `next` siblings) into the tree.
    fn build_block(&mut self, stub: &BlockStub) -> Option<BlockId> {
        let tag = internal_tag(&stub.block_type);
        let def = match self.catalog.get(tag) {
            Some(def) => def,
            None => {
                self.warn(format!(
                    "skipping unrecognized block type '{}'",
                    stub.block_type
                ));
                return None;
            }
        };
        if def.kind == BlockKind::Value {
            self.warn(format!(
                "value block '{tag}' used in a statement position; skipping"
            ));
            return None;
        }

        let mut node = BlockNode::new(tag, "");
        for (key, value) in &stub.fields {
            node.properties.insert(key.to_lowercase(), value.clone());
        }

        // Value slots collapse into host properties; the nested block never
        // becomes part of the tree. A connected literal wins over an inline
        // field of the same name.
        for value_slot in def.value_slots {
            if let Some(SlotInput::Value(value_stub)) = stub.inputs.get(value_slot.slot) {
                if let Some(value) = self.resolve_value_stub(value_stub) {
                    node.properties.insert(value_slot.property.to_string(), value);
                }
            }
        }

        node.name = node
            .property_text("name")
            .or_else(|| def.default_value("name").map(str::to_string))
            .unwrap_or_default();

        let id = self.tree.insert(node);

        for (slot, input) in &stub.inputs {
            match input {
                SlotInput::Statement(head) => {
                    if !def.statement_slots.contains(&slot.as_str()) {
                        self.warn(format!(
                            "block '{tag}' has no statement slot '{slot}'; skipping its contents"
                        ));
                        continue;
                    }
                    for child_stub in head.chain() {
                        let Some(child_id) = self.build_block(child_stub) else {
                            continue;
                        };
                        if let Err(err) = self.tree.attach(id, child_id, self.catalog) {
                            self.warn(format!(
                                "dropping '{}' under '{tag}': {err}",
                                internal_tag(&child_stub.block_type)
                            ));
                            self.tree.remove(child_id);
                        }
                    }
                }
                SlotInput::Value(_) => {
                    if !def.value_slots.iter().any(|vs| vs.slot == *slot) {
                        self.warn(format!(
                            "block '{tag}' has no value slot '{slot}'; ignoring it"
                        ));
                    }
                }
            }
        }

        Some(id)
    }

    /// Resolve a value block into the scalar it produces.
    fn resolve_value_stub(&mut self, stub: &BlockStub) -> Option<PropertyValue> {
        let tag = internal_tag(&stub.block_type);
        let def = match self.catalog.get(tag) {
            Some(def) => def,
            None => {
                self.warn(format!(
                    "skipping unrecognized value block type '{}'",
                    stub.block_type
                ));
                return None;
            }
        };
        if def.kind != BlockKind::Value {
            self.warn(format!("block '{tag}' is not a value block; ignoring it"));
            return None;
        }

        // A value block carries exactly one meaningful field, declared as
        // its first default.
        let key = def.defaults.first().map(|(k, _)| *k)?;
        stub.fields
            .iter()
            .find(|(field, _)| field.to_lowercase() == key)
            .map(|(_, value)| value.clone())
            .or_else(|| {
                def.default_value(key)
                    .map(|v| PropertyValue::String(v.to_string()))
            })
    }
}

//! Native workspace model — the external block editor's save-state shape.
//!
//! The visual editor serializes its canvas as a list of top-level block
//! stubs. Each stub carries typed fields, named input slots (either a single
//! nested value block or the head of a statement chain), and an optional
//! `next` link chaining sibling blocks. Everything downstream of the tree
//! builder operates on the plain [`crate::model::BlockTree`] instead; this
//! module is the only place that knows the editor's native shape.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceDescription {
    /// Top-level blocks in canvas order. Order is significant: it drives
    /// both root ordering in the generated output and sibling chains.
    pub blocks: Vec<BlockStub>,
    pub metadata: WorkspaceMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockStub {
    pub id: String,
    /// Native type tag, e.g. `terraform_vpc`.
    pub block_type: String,
    pub position: Position,
    /// Field name → value, as exposed by the block's editable fields.
    #[serde(default)]
    pub fields: HashMap<String, PropertyValue>,
    /// Named input slots. Ordered map so repeated builds of the same
    /// workspace visit slots in a stable order.
    #[serde(default)]
    pub inputs: BTreeMap<String, SlotInput>,
    /// Next sibling in a statement chain (or next top-level block).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<BlockStub>>,
}

/// Contents of one input slot on a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SlotInput {
    /// Head of an ordered chain of child blocks (linked via `next`).
    Statement(Box<BlockStub>),
    /// A single nested value-producing block, collapsed at build time.
    Value(Box<BlockStub>),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    pub created_at: String,
    pub modified_at: String,
}

/// Scalar value held by a block field or a tree-node property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl PropertyValue {
    /// Render the value as plain text for templating.
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            PropertyValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            PropertyValue::Boolean(b) => b.to_string(),
        }
    }
}

impl WorkspaceDescription {
    pub fn new(name: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            blocks: Vec::new(),
            metadata: WorkspaceMetadata {
                name: name.to_string(),
                description: String::new(),
                version: "1.0.0".to_string(),
                created_at: now.clone(),
                modified_at: now,
            },
        }
    }

    pub fn add_block(&mut self, block: BlockStub) {
        self.blocks.push(block);
        self.metadata.modified_at = chrono::Utc::now().to_rfc3339();
    }

    pub fn remove_block(&mut self, block_id: &str) {
        self.blocks.retain(|b| b.id != block_id);
        self.metadata.modified_at = chrono::Utc::now().to_rfc3339();
    }
}

impl BlockStub {
    /// Create a stub of the given native type with a fresh id.
    pub fn new(block_type: &str, position: Position) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            block_type: block_type.to_string(),
            position,
            fields: HashMap::new(),
            inputs: BTreeMap::new(),
            next: None,
        }
    }

    pub fn set_field(&mut self, name: &str, value: PropertyValue) {
        self.fields.insert(name.to_string(), value);
    }

    /// Builder-style field assignment for test and template construction.
    pub fn with_field(mut self, name: &str, value: PropertyValue) -> Self {
        self.set_field(name, value);
        self
    }

    /// Place a value block into a slot, replacing any previous occupant.
    pub fn set_value_input(&mut self, slot: &str, value_block: BlockStub) {
        self.inputs
            .insert(slot.to_string(), SlotInput::Value(Box::new(value_block)));
    }

    /// Append a block to the end of a statement slot's chain.
    pub fn push_statement(&mut self, slot: &str, child: BlockStub) {
        if let Some(SlotInput::Statement(head)) = self.inputs.get_mut(slot) {
            head.push_next(child);
            return;
        }
        self.inputs
            .insert(slot.to_string(), SlotInput::Statement(Box::new(child)));
    }

    /// Append a sibling at the end of this block's `next` chain.
    pub fn push_next(&mut self, sibling: BlockStub) {
        match self.next {
            Some(ref mut next) => next.push_next(sibling),
            None => self.next = Some(Box::new(sibling)),
        }
    }

    /// Iterate this block and its `next` chain in order.
    pub fn chain(&self) -> impl Iterator<Item = &BlockStub> {
        let mut cursor = Some(self);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = current.next.as_deref();
            Some(current)
        })
    }
}

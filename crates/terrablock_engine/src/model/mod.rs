//! # Block Tree Model
//!
//! The internal representation every downstream pass operates on: a forest
//! of typed [`BlockNode`]s stored in an arena, with parent links kept as
//! plain ids rather than shared pointers. One node per placed infrastructure
//! element; children are ordered and insertion order is significant.
//!
//! Attach operations are validated against the block catalog's rule table —
//! a disallowed attach is rejected and leaves the tree untouched. Removing a
//! node removes its whole subtree.

use std::collections::HashMap;
use std::fmt;

use crate::compiler::catalog::BlockCatalog;
use crate::graph::PropertyValue;

/// Handle to a node inside a [`BlockTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

/// One placed infrastructure element.
#[derive(Debug, Clone)]
pub struct BlockNode {
    /// Internal type tag (`vpc`, `subnet`, `instance`, ...).
    pub block_type: String,
    /// User-supplied logical identifier; doubles as the emitted resource
    /// handle and as the target of cross-references.
    pub name: String,
    pub properties: HashMap<String, PropertyValue>,
    /// Ordered children. Order drives output ordering.
    pub children: Vec<BlockId>,
    /// Non-owning back-reference, used only for upward lookups.
    pub parent: Option<BlockId>,
}

impl BlockNode {
    pub fn new(block_type: &str, name: &str) -> Self {
        Self {
            block_type: block_type.to_string(),
            name: name.to_string(),
            properties: HashMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: &str, value: PropertyValue) {
        self.properties.insert(key.to_string(), value);
    }

    /// Property value rendered as text, if present.
    pub fn property_text(&self, key: &str) -> Option<String> {
        self.properties.get(key).map(PropertyValue::as_text)
    }
}

/// Rejected attach operation. The tree is unchanged when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachError {
    pub message: String,
}

impl AttachError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AttachError {}

/// Arena-backed forest of block nodes.
#[derive(Debug, Clone, Default)]
pub struct BlockTree {
    nodes: Vec<Option<BlockNode>>,
    roots: Vec<BlockId>,
}

impl BlockTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node into the arena and return its id.
    pub fn insert(&mut self, node: BlockNode) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    /// Promote a detached node to a root of the forest.
    pub fn add_root(&mut self, id: BlockId) {
        if self.get(id).is_some() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockNode> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut BlockNode> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    /// Number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach `child` under `parent`, enforcing the rule table.
    ///
    /// Fails — leaving the tree unchanged — when either node is gone, the
    /// child already has a parent, the attach would create a cycle, or the
    /// parent's allowed-children rule does not accept the child's type.
    pub fn attach(
        &mut self,
        parent: BlockId,
        child: BlockId,
        catalog: &BlockCatalog,
    ) -> Result<(), AttachError> {
        let parent_type = self
            .get(parent)
            .map(|n| n.block_type.clone())
            .ok_or_else(|| AttachError::new("parent block no longer exists"))?;
        let child_node = self
            .get(child)
            .ok_or_else(|| AttachError::new("child block no longer exists"))?;
        if child_node.parent.is_some() {
            return Err(AttachError::new("child block is already attached"));
        }
        let child_type = child_node.block_type.clone();

        // An ancestor of the parent sitting inside the child's subtree would
        // make the tree cyclic.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(AttachError::new("attach would create a cycle"));
            }
            cursor = self.get(id).and_then(|n| n.parent);
        }

        if !catalog.can_attach(&parent_type, &child_type) {
            return Err(AttachError::new(format!(
                "a '{parent_type}' block cannot contain a '{child_type}' block"
            )));
        }

        self.roots.retain(|r| *r != child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Detach a node from its parent, leaving it floating in the arena.
    pub fn detach(&mut self, child: BlockId) {
        let parent = match self.get(child).and_then(|n| n.parent) {
            Some(p) => p,
            None => return,
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|c| *c != child);
        }
        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = None;
        }
    }

    /// Remove a node and its whole subtree from the tree.
    pub fn remove(&mut self, id: BlockId) {
        self.detach(id);
        self.roots.retain(|r| *r != id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                stack.extend(node.children);
            }
        }
    }

    /// Nearest ancestor of the given type, walking parent links upward.
    pub fn ancestor_of_type(&self, id: BlockId, block_type: &str) -> Option<BlockId> {
        let mut cursor = self.get(id).and_then(|n| n.parent);
        while let Some(current) = cursor {
            let node = self.get(current)?;
            if node.block_type == block_type {
                return Some(current);
            }
            cursor = node.parent;
        }
        None
    }

    /// First immediate child of the given type (typed search, not
    /// statement-order traversal).
    pub fn child_of_type(&self, id: BlockId, block_type: &str) -> Option<BlockId> {
        self.get(id)?
            .children
            .iter()
            .copied()
            .find(|c| self.get(*c).map(|n| n.block_type == block_type).unwrap_or(false))
    }

    /// All live node ids in pre-order: each root before its descendants,
    /// roots in insertion order, children in attach order.
    pub fn pre_order(&self) -> Vec<BlockId> {
        let mut order = Vec::new();
        for root in &self.roots {
            self.collect_pre_order(*root, &mut order);
        }
        order
    }

    fn collect_pre_order(&self, id: BlockId, order: &mut Vec<BlockId>) {
        if let Some(node) = self.get(id) {
            order.push(id);
            for child in &node.children {
                self.collect_pre_order(*child, order);
            }
        }
    }
}

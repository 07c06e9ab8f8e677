//! Block catalog — the verified, queryable view of the block library.
//!
//! Definitions come from `terrablock_std` and are loaded exactly once. The
//! load step verifies the library (no duplicate tags, child rules only
//! referencing known tags); a library that fails verification yields an
//! empty catalog, and every entry point that needs the catalog checks
//! readiness before doing any work.

use std::collections::HashMap;
use std::sync::OnceLock;

use terrablock_std::{definitions, AllowedChildren, BlockDefinition, BlockKind};
use tracing::{error, info};

/// Verified lookup table over the block definitions.
pub struct BlockCatalog {
    defs: HashMap<&'static str, &'static BlockDefinition>,
}

impl BlockCatalog {
    /// Load and verify the block library.
    pub fn load() -> Result<Self, String> {
        let mut defs: HashMap<&'static str, &'static BlockDefinition> = HashMap::new();
        for def in definitions() {
            if defs.insert(def.type_tag, def).is_some() {
                return Err(format!("duplicate block definition '{}'", def.type_tag));
            }
        }
        for def in definitions() {
            if let AllowedChildren::Of(children) = def.allowed_children {
                for child in children {
                    if !defs.contains_key(child) {
                        return Err(format!(
                            "block '{}' allows unknown child type '{}'",
                            def.type_tag, child
                        ));
                    }
                }
            }
        }
        Ok(Self { defs })
    }

    fn empty() -> Self {
        Self { defs: HashMap::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn get(&self, type_tag: &str) -> Option<&'static BlockDefinition> {
        self.defs.get(type_tag).copied()
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.defs.contains_key(type_tag)
    }

    /// Kind of a known block type.
    pub fn kind(&self, type_tag: &str) -> Option<BlockKind> {
        self.get(type_tag).map(|d| d.kind)
    }

    /// Rule-table lookup: may a `child_tag` block live under a `parent_tag`
    /// block? The parent's declared set must contain the child's tag, or the
    /// parent must carry the universal wildcard. Unknown parents accept
    /// nothing.
    pub fn can_attach(&self, parent_tag: &str, child_tag: &str) -> bool {
        self.get(parent_tag)
            .map(|d| d.accepts_child(child_tag))
            .unwrap_or(false)
    }
}

/// Cached catalog, loaded from terrablock_std on first use.
static BLOCK_CATALOG: OnceLock<BlockCatalog> = OnceLock::new();

/// Get the shared block catalog, loading it if necessary.
///
/// On a verification failure the catalog stays empty; callers must treat an
/// empty catalog as "not ready" rather than generating against it.
pub fn get_block_catalog() -> &'static BlockCatalog {
    BLOCK_CATALOG.get_or_init(|| match BlockCatalog::load() {
        Ok(catalog) => {
            info!("loaded {} block definitions", catalog.len());
            catalog
        }
        Err(e) => {
            error!("failed to load block catalog: {e}");
            BlockCatalog::empty()
        }
    })
}

/// Whether the shared catalog is loaded and usable.
pub fn catalog_ready() -> bool {
    !get_block_catalog().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads_and_verifies() {
        let catalog = BlockCatalog::load().expect("library should verify");
        assert!(!catalog.is_empty());
        assert!(catalog.contains("vpc"));
        assert!(catalog.contains("iam_role"));
        assert!(!catalog.contains("terraform_vpc"), "catalog keys are stripped tags");
    }

    #[test]
    fn test_can_attach_follows_rule_table() {
        let catalog = BlockCatalog::load().unwrap();
        assert!(catalog.can_attach("vpc", "subnet"));
        assert!(catalog.can_attach("subnet", "instance"));
        assert!(catalog.can_attach("instance", "iam_role"));
        assert!(!catalog.can_attach("iam_role", "subnet"));
        assert!(!catalog.can_attach("s3", "vpc"));
        assert!(!catalog.can_attach("unknown", "vpc"));
    }

    #[test]
    fn test_wildcard_parent_accepts_any_tag() {
        let catalog = BlockCatalog::load().unwrap();
        assert!(catalog.can_attach("provider", "vpc"));
        assert!(catalog.can_attach("provider", "bedrock_model"));
    }

    #[test]
    fn test_shared_catalog_is_cached_and_ready() {
        let a = get_block_catalog();
        let b = get_block_catalog();
        assert!(std::ptr::eq(a, b));
        assert!(catalog_ready());
    }
}

//! Shared text helpers for the HCL render strategies.

use tracing::warn;

use crate::compiler::catalog::get_block_catalog;
use crate::model::{BlockId, BlockTree};

/// Reference emitted for a block that needs an enclosing vpc but has none.
pub const DEFAULT_VPC_REF: &str = "main_vpc";
/// Reference emitted for a block that needs an enclosing subnet but has none.
pub const DEFAULT_SUBNET_REF: &str = "main_subnet";

/// Turn a user-supplied name into a legal resource identifier: anything
/// outside `[A-Za-z0-9_]` becomes `_`, and a leading digit gets prefixed.
/// The raw name is still used verbatim inside tags.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() {
        out.push('_');
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Property value as text, falling back to the catalog default for the
/// node's type, then to the empty string.
pub fn prop(tree: &BlockTree, id: BlockId, key: &str) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };
    if let Some(text) = node.property_text(key) {
        return text;
    }
    get_block_catalog()
        .get(&node.block_type)
        .and_then(|def| def.default_value(key))
        .unwrap_or_default()
        .to_string()
}

/// The node's display name (logical identifier), defaulted per type.
pub fn display_name(tree: &BlockTree, id: BlockId) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };
    if !node.name.is_empty() {
        return node.name.clone();
    }
    get_block_catalog()
        .get(&node.block_type)
        .and_then(|def| def.default_value("name"))
        .unwrap_or_default()
        .to_string()
}

/// Sanitized resource identifier derived from the display name.
pub fn resource_id(tree: &BlockTree, id: BlockId) -> String {
    sanitize_identifier(&display_name(tree, id))
}

/// Sanitized name of the nearest ancestor of the given type.
///
/// When no such ancestor exists the documented default identifier is
/// substituted so the output stays parseable; the fallback is logged since
/// the result is then semantically questionable.
pub fn ancestor_ref(tree: &BlockTree, id: BlockId, ancestor_type: &str, default: &str) -> String {
    match tree.ancestor_of_type(id, ancestor_type) {
        Some(ancestor) => resource_id(tree, ancestor),
        None => {
            warn!(
                "block '{}' has no enclosing '{ancestor_type}'; using default reference '{default}'",
                display_name(tree, id)
            );
            default.to_string()
        }
    }
}

/// The standard `tags` sub-block carrying the display name.
pub fn tags_block(name: &str) -> String {
    format!("  tags = {{\n    Name = \"{name}\"\n  }}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("web-server"), "web_server");
        assert_eq!(sanitize_identifier("my.bucket name"), "my_bucket_name");
        assert_eq!(sanitize_identifier("plain_name"), "plain_name");
        assert_eq!(sanitize_identifier("2fast"), "_2fast");
        assert_eq!(sanitize_identifier(""), "_");
    }
}

//! # TerraBlock Standard Block Library
//!
//! Definitions for every infrastructure block the visual editor can place.
//!
//! Each block is described by a [`BlockDefinition`]: its type tag, palette
//! placement, the kinds of children it may contain, its default field values,
//! and the input slots the editor exposes on it. The engine loads these
//! definitions once into its block catalog and drives attach validation and
//! HCL generation from them — adding a new resource type means adding a new
//! entry here, not a new branch in the generator.
//!
//! ## Block Kinds
//!
//! - **Resource**: a normal statement block that becomes one resource block
//!   in the generated configuration (`vpc`, `instance`, `s3`, ...)
//! - **Attachment**: a block that is conceptually attached to its host rather
//!   than nested inside it (`iam_role`); rendered adjacent to the host and
//!   excluded from the generic child traversal
//! - **Value**: a literal-producing block (`cidr_block`, `key_name`) that is
//!   collapsed into a property of its host at build time and never appears
//!   in the block tree

// =============================================================================
// Core Types
// =============================================================================

/// How a block participates in the tree and in generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Statement block emitted as a resource in traversal order.
    Resource,
    /// Attached to a host block; emitted adjacent to it, exactly once.
    Attachment,
    /// Collapsed into a host property at build time.
    Value,
}

/// Palette category a block is presented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Core,
    Network,
    Compute,
    Storage,
    Security,
    MachineLearning,
}

impl Category {
    /// Display label used by the editor toolbox.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Network => "Network",
            Self::Compute => "Compute",
            Self::Storage => "Storage & DB",
            Self::Security => "Security",
            Self::MachineLearning => "AI & ML",
        }
    }

    /// Toolbox colour for this category.
    pub fn colour(&self) -> &'static str {
        match self {
            Self::Core => "#3b82f6",
            Self::Network => "#10b981",
            Self::Compute => "#f59e0b",
            Self::Storage => "#ec4899",
            Self::Security => "#ef4444",
            Self::MachineLearning => "#9333ea",
        }
    }
}

/// Which child types a block may legally contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedChildren {
    /// No children at all.
    None,
    /// Universal wildcard: any block type.
    Any,
    /// Only the listed type tags.
    Of(&'static [&'static str]),
}

impl AllowedChildren {
    /// Whether a child of `child_tag` is acceptable under this rule.
    pub fn accepts(&self, child_tag: &str) -> bool {
        match self {
            Self::None => false,
            Self::Any => true,
            Self::Of(tags) => tags.contains(&child_tag),
        }
    }
}

/// A value-input slot: the editor slot name and the property key the
/// connected literal collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSlot {
    pub slot: &'static str,
    pub property: &'static str,
}

/// Static description of one block type.
#[derive(Debug, Clone, Copy)]
pub struct BlockDefinition {
    /// Internal type tag (native editor tags carry [`NATIVE_TYPE_PREFIX`]).
    pub type_tag: &'static str,
    /// Human-readable palette label.
    pub label: &'static str,
    pub kind: BlockKind,
    pub category: Category,
    /// Rule-table entry: which child tags may be attached under this block.
    pub allowed_children: AllowedChildren,
    /// Default property values applied when a field is absent.
    pub defaults: &'static [(&'static str, &'static str)],
    /// Statement slots exposed on this block (ordered chains of children).
    pub statement_slots: &'static [&'static str],
    /// Value slots exposed on this block (single literal, collapsed).
    pub value_slots: &'static [ValueSlot],
}

impl BlockDefinition {
    /// Default for a property key, if one is declared.
    pub fn default_value(&self, key: &str) -> Option<&'static str> {
        self.defaults
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Whether this block accepts a child of the given type tag.
    pub fn accepts_child(&self, child_tag: &str) -> bool {
        self.allowed_children.accepts(child_tag)
    }
}

/// Prefix the external editor puts on native block type names.
pub const NATIVE_TYPE_PREFIX: &str = "terraform_";

// =============================================================================
// Block Definitions
// =============================================================================

/// All block definitions, in palette order.
pub fn definitions() -> &'static [BlockDefinition] {
    DEFINITIONS
}

static DEFINITIONS: &[BlockDefinition] = &[
    // --- Core ---
    BlockDefinition {
        type_tag: "provider",
        label: "Provider AWS",
        kind: BlockKind::Resource,
        category: Category::Core,
        allowed_children: AllowedChildren::Any,
        defaults: &[("region", "us-west-2")],
        statement_slots: &[],
        value_slots: &[],
    },
    BlockDefinition {
        type_tag: "vpc",
        label: "VPC",
        kind: BlockKind::Resource,
        category: Category::Core,
        allowed_children: AllowedChildren::Of(&["subnet", "security_group"]),
        defaults: &[("name", "main_vpc"), ("cidr", "10.0.0.0/16")],
        statement_slots: &["CHILDREN"],
        value_slots: &[ValueSlot { slot: "CIDR", property: "cidr" }],
    },
    // --- Network ---
    BlockDefinition {
        type_tag: "subnet",
        label: "Subnet",
        kind: BlockKind::Resource,
        category: Category::Network,
        allowed_children: AllowedChildren::Of(&["instance", "lambda", "rds"]),
        defaults: &[("name", "main_subnet"), ("cidr", "10.0.1.0/24")],
        statement_slots: &["CHILDREN"],
        value_slots: &[ValueSlot { slot: "CIDR", property: "cidr" }],
    },
    BlockDefinition {
        type_tag: "security_group",
        label: "Security Group",
        kind: BlockKind::Resource,
        category: Category::Network,
        allowed_children: AllowedChildren::None,
        defaults: &[("name", "web_sg"), ("description", "Managed by Visual Editor")],
        statement_slots: &[],
        value_slots: &[],
    },
    // --- Compute ---
    BlockDefinition {
        type_tag: "instance",
        label: "EC2 Instance",
        kind: BlockKind::Resource,
        category: Category::Compute,
        allowed_children: AllowedChildren::Of(&["iam_role"]),
        defaults: &[
            ("name", "web_server"),
            ("instance_type", "t2.micro"),
            ("ami", "ami-0c94855ba95b798c7"),
        ],
        statement_slots: &["IAM_ROLE"],
        value_slots: &[ValueSlot { slot: "KEY_NAME", property: "key_name" }],
    },
    BlockDefinition {
        type_tag: "lambda",
        label: "Lambda",
        kind: BlockKind::Resource,
        category: Category::Compute,
        allowed_children: AllowedChildren::Of(&["iam_role"]),
        defaults: &[
            ("name", "my_function"),
            ("runtime", "python3.9"),
            ("handler", "index.handler"),
        ],
        statement_slots: &["IAM_ROLE"],
        value_slots: &[],
    },
    // --- Storage & DB ---
    BlockDefinition {
        type_tag: "s3",
        label: "S3 Bucket",
        kind: BlockKind::Resource,
        category: Category::Storage,
        allowed_children: AllowedChildren::None,
        defaults: &[("name", "my_bucket"), ("bucket_name", "my-unique-bucket-name")],
        statement_slots: &[],
        value_slots: &[],
    },
    BlockDefinition {
        type_tag: "rds",
        label: "RDS Instance",
        kind: BlockKind::Resource,
        category: Category::Storage,
        allowed_children: AllowedChildren::None,
        defaults: &[
            ("name", "main_db"),
            ("identifier", "mydb"),
            ("engine", "mysql"),
            ("instance_class", "db.t3.micro"),
        ],
        statement_slots: &[],
        value_slots: &[],
    },
    // --- Security ---
    BlockDefinition {
        type_tag: "iam_role",
        label: "IAM Role",
        kind: BlockKind::Attachment,
        category: Category::Security,
        allowed_children: AllowedChildren::None,
        defaults: &[("name", "default_role"), ("service", "ec2.amazonaws.com")],
        statement_slots: &[],
        value_slots: &[],
    },
    // --- AI & ML ---
    BlockDefinition {
        type_tag: "bedrock_model",
        label: "Bedrock Model",
        kind: BlockKind::Resource,
        category: Category::MachineLearning,
        allowed_children: AllowedChildren::None,
        defaults: &[("name", "claude_model"), ("model_id", "anthropic.claude-v2")],
        statement_slots: &[],
        value_slots: &[],
    },
    BlockDefinition {
        type_tag: "glue_job",
        label: "Glue Job",
        kind: BlockKind::Resource,
        category: Category::MachineLearning,
        allowed_children: AllowedChildren::Of(&["iam_role"]),
        defaults: &[("name", "my_glue_job")],
        statement_slots: &["IAM_ROLE"],
        value_slots: &[],
    },
    BlockDefinition {
        type_tag: "transcribe_job",
        label: "Transcribe Job",
        kind: BlockKind::Resource,
        category: Category::MachineLearning,
        allowed_children: AllowedChildren::None,
        defaults: &[("name", "my_transcribe_job")],
        statement_slots: &[],
        value_slots: &[],
    },
    // --- Value literals ---
    BlockDefinition {
        type_tag: "cidr_block",
        label: "CIDR Block",
        kind: BlockKind::Value,
        category: Category::Network,
        allowed_children: AllowedChildren::None,
        defaults: &[("cidr", "10.0.0.0/16")],
        statement_slots: &[],
        value_slots: &[],
    },
    BlockDefinition {
        type_tag: "key_name",
        label: "Key Pair Name",
        kind: BlockKind::Value,
        category: Category::Compute,
        allowed_children: AllowedChildren::None,
        defaults: &[("key", "deployer")],
        statement_slots: &[],
        value_slots: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_tags_are_unique() {
        let mut seen = HashSet::new();
        for def in definitions() {
            assert!(seen.insert(def.type_tag), "duplicate tag: {}", def.type_tag);
        }
    }

    #[test]
    fn test_child_rules_reference_known_tags() {
        let tags: HashSet<_> = definitions().iter().map(|d| d.type_tag).collect();
        for def in definitions() {
            if let AllowedChildren::Of(children) = def.allowed_children {
                for child in children {
                    assert!(tags.contains(child), "{} allows unknown child {}", def.type_tag, child);
                }
            }
        }
    }

    #[test]
    fn test_vpc_child_rules() {
        let vpc = definitions().iter().find(|d| d.type_tag == "vpc").unwrap();
        assert!(vpc.accepts_child("subnet"));
        assert!(vpc.accepts_child("security_group"));
        assert!(!vpc.accepts_child("instance"));
        assert!(!vpc.accepts_child("iam_role"));
    }

    #[test]
    fn test_wildcard_accepts_everything() {
        let provider = definitions().iter().find(|d| d.type_tag == "provider").unwrap();
        assert!(provider.accepts_child("vpc"));
        assert!(provider.accepts_child("s3"));
        assert!(provider.accepts_child("iam_role"));
    }

    #[test]
    fn test_role_is_attachment_with_no_children() {
        let role = definitions().iter().find(|d| d.type_tag == "iam_role").unwrap();
        assert_eq!(role.kind, BlockKind::Attachment);
        assert!(!role.accepts_child("subnet"));
        assert!(!role.accepts_child("iam_role"));
    }

    #[test]
    fn test_defaults_lookup() {
        let instance = definitions().iter().find(|d| d.type_tag == "instance").unwrap();
        assert_eq!(instance.default_value("instance_type"), Some("t2.micro"));
        assert_eq!(instance.default_value("nonexistent"), None);
    }

    #[test]
    fn test_value_blocks_are_marked_value() {
        for tag in ["cidr_block", "key_name"] {
            let def = definitions().iter().find(|d| d.type_tag == tag).unwrap();
            assert_eq!(def.kind, BlockKind::Value, "{tag} should be a value block");
        }
    }

    #[test]
    fn test_category_colours() {
        assert_eq!(Category::Core.colour(), "#3b82f6");
        assert_eq!(Category::MachineLearning.label(), "AI & ML");
    }
}

//! Render strategy for IAM role attachments.
//!
//! Roles are attachment blocks: a host (instance, lambda, glue job) locates
//! its role via typed child search and renders it adjacent to its own
//! resource block. The generic traversal never visits attachments, so each
//! role is emitted exactly once.

use crate::model::{BlockId, BlockTree};

use super::formatting::{display_name, prop, resource_id, tags_block};

pub fn render_iam_role(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let service = prop(tree, id, "service");

    let mut hcl = format!("resource \"aws_iam_role\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  name = \"{name}\"\n"));
    hcl.push_str("  assume_role_policy = jsonencode({\n");
    hcl.push_str("    Version = \"2012-10-17\",\n");
    hcl.push_str("    Statement = [\n");
    hcl.push_str("      {\n");
    hcl.push_str("        Action = \"sts:AssumeRole\",\n");
    hcl.push_str("        Effect = \"Allow\",\n");
    hcl.push_str("        Principal = {\n");
    hcl.push_str(&format!("          Service = \"{service}\"\n"));
    hcl.push_str("        }\n");
    hcl.push_str("      }\n");
    hcl.push_str("    ]\n");
    hcl.push_str("  })\n");
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");
    hcl
}

/// Instance profile wrapping a role, emitted next to EC2 hosts.
pub fn render_instance_profile(tree: &BlockTree, role: BlockId) -> String {
    let rid = resource_id(tree, role);

    let mut hcl = format!("resource \"aws_iam_instance_profile\" \"{rid}_profile\" {{\n");
    hcl.push_str(&format!("  name = \"{rid}_profile\"\n"));
    hcl.push_str(&format!("  role = aws_iam_role.{rid}.name\n"));
    hcl.push_str("}\n\n");
    hcl
}

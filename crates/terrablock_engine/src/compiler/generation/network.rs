//! Render strategies for networking blocks: vpc, subnet, security group.
//!
//! Subnets and security groups reference their enclosing vpc by name; with
//! no vpc ancestor the documented default reference is substituted so the
//! output stays parseable.

use crate::model::{BlockId, BlockTree};

use super::formatting::{ancestor_ref, display_name, prop, resource_id, tags_block, DEFAULT_VPC_REF};

pub fn render_vpc(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let cidr = prop(tree, id, "cidr");

    let mut hcl = format!("resource \"aws_vpc\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  cidr_block           = \"{cidr}\"\n"));
    hcl.push_str("  enable_dns_hostnames = true\n");
    hcl.push_str("  enable_dns_support   = true\n");
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");
    hcl
}

pub fn render_subnet(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let cidr = prop(tree, id, "cidr");
    let vpc = ancestor_ref(tree, id, "vpc", DEFAULT_VPC_REF);

    let mut hcl = format!("resource \"aws_subnet\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  vpc_id     = aws_vpc.{vpc}.id\n"));
    hcl.push_str(&format!("  cidr_block = \"{cidr}\"\n"));
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");
    hcl
}

pub fn render_security_group(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let description = prop(tree, id, "description");
    let vpc = ancestor_ref(tree, id, "vpc", DEFAULT_VPC_REF);

    let mut hcl = format!("resource \"aws_security_group\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  name_prefix = \"{name}-\"\n"));
    hcl.push_str(&format!("  vpc_id      = aws_vpc.{vpc}.id\n"));
    hcl.push_str(&format!("  description = \"{description}\"\n"));
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");
    hcl
}

//! Render strategies for compute blocks: EC2 instances and Lambda functions.
//!
//! Both host an optional IAM role attachment, located via typed child
//! search and rendered adjacent to the host block (instances additionally
//! get an instance profile wrapping the role).

use crate::model::{BlockId, BlockTree};

use super::formatting::{
    ancestor_ref, display_name, prop, resource_id, tags_block, DEFAULT_SUBNET_REF,
};
use super::identity;

pub fn render_instance(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let ami = prop(tree, id, "ami");
    let instance_type = prop(tree, id, "instance_type");
    let subnet = ancestor_ref(tree, id, "subnet", DEFAULT_SUBNET_REF);
    let role = tree.child_of_type(id, "iam_role");

    let mut hcl = format!("resource \"aws_instance\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  ami           = \"{ami}\"\n"));
    hcl.push_str(&format!("  instance_type = \"{instance_type}\"\n"));
    hcl.push_str(&format!("  subnet_id     = aws_subnet.{subnet}.id\n"));
    if let Some(key) = tree.get(id).and_then(|n| n.property_text("key_name")) {
        hcl.push_str(&format!("  key_name      = \"{key}\"\n"));
    }
    if let Some(role_id) = role {
        let role_rid = resource_id(tree, role_id);
        hcl.push_str(&format!(
            "  iam_instance_profile = aws_iam_instance_profile.{role_rid}_profile.name\n"
        ));
    }
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");

    if let Some(role_id) = role {
        hcl.push_str(&identity::render_iam_role(tree, role_id));
        hcl.push_str(&identity::render_instance_profile(tree, role_id));
    }
    hcl
}

pub fn render_lambda(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let handler = prop(tree, id, "handler");
    let runtime = prop(tree, id, "runtime");
    let role = tree.child_of_type(id, "iam_role");

    let mut hcl = format!("resource \"aws_lambda_function\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  function_name = \"{name}\"\n"));
    if let Some(role_id) = role {
        let role_rid = resource_id(tree, role_id);
        hcl.push_str(&format!("  role          = aws_iam_role.{role_rid}.arn\n"));
    }
    hcl.push_str(&format!("  handler       = \"{handler}\"\n"));
    hcl.push_str(&format!("  runtime       = \"{runtime}\"\n"));
    hcl.push_str("  filename      = \"lambda.zip\"\n");
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");

    if let Some(role_id) = role {
        hcl.push_str(&identity::render_iam_role(tree, role_id));
    }
    hcl
}

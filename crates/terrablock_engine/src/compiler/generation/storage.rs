//! Render strategies for storage blocks: S3 buckets and RDS instances.

use crate::model::{BlockId, BlockTree};

use super::formatting::{display_name, prop, resource_id, tags_block};

pub fn render_s3(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let bucket = prop(tree, id, "bucket_name");

    let mut hcl = format!("resource \"aws_s3_bucket\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  bucket = \"{bucket}\"\n"));
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");
    hcl
}

pub fn render_rds(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let identifier = prop(tree, id, "identifier");
    let engine = prop(tree, id, "engine");
    let instance_class = prop(tree, id, "instance_class");

    let mut hcl = format!("resource \"aws_db_instance\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  identifier           = \"{identifier}\"\n"));
    hcl.push_str(&format!("  engine               = \"{engine}\"\n"));
    hcl.push_str(&format!("  instance_class       = \"{instance_class}\"\n"));
    hcl.push_str("  allocated_storage    = 20\n");
    hcl.push_str("  username             = \"admin\"\n");
    hcl.push_str("  password             = \"yourpassword\"\n");
    hcl.push_str("  skip_final_snapshot  = true\n");
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");
    hcl
}

//! Render strategies for AI & ML blocks: Bedrock models, Glue jobs,
//! Transcribe jobs.

use crate::model::{BlockId, BlockTree};

use super::formatting::{display_name, prop, resource_id, tags_block};
use super::identity;

pub fn render_bedrock_model(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let model_id = prop(tree, id, "model_id");

    let mut hcl = String::from("# Bedrock models are referenced as data sources,\n");
    hcl.push_str("# with access granted through IAM.\n");
    hcl.push_str(&format!("data \"aws_bedrock_foundation_model\" \"{rid}\" {{\n"));
    hcl.push_str(&format!("  model_id = \"{model_id}\"\n"));
    hcl.push_str("}\n\n");
    hcl
}

pub fn render_glue_job(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);
    let role = tree.child_of_type(id, "iam_role");

    let mut hcl = format!("resource \"aws_glue_job\" \"{rid}\" {{\n");
    hcl.push_str(&format!("  name     = \"{name}\"\n"));
    if let Some(role_id) = role {
        let role_rid = resource_id(tree, role_id);
        hcl.push_str(&format!("  role_arn = aws_iam_role.{role_rid}.arn\n"));
    }
    hcl.push_str("  command {\n");
    hcl.push_str("    script_location = \"s3://aws-glue-scripts/your-script.py\"\n");
    hcl.push_str("    python_version  = \"3\"\n");
    hcl.push_str("  }\n");
    hcl.push_str(&tags_block(&name));
    hcl.push_str("}\n\n");

    if let Some(role_id) = role {
        hcl.push_str(&identity::render_iam_role(tree, role_id));
    }
    hcl
}

pub fn render_transcribe_job(tree: &BlockTree, id: BlockId) -> String {
    let rid = resource_id(tree, id);
    let name = display_name(tree, id);

    let mut hcl = String::from("# Simplified transcription job resource.\n");
    hcl.push_str(&format!("resource \"aws_transcribe_transcription_job\" \"{rid}\" {{\n"));
    hcl.push_str(&format!("  transcription_job_name = \"{name}\"\n"));
    hcl.push_str("  language_code          = \"en-US\"\n");
    hcl.push_str("  media_format           = \"mp3\"\n");
    hcl.push_str("  media = {\n");
    hcl.push_str("    media_file_uri = \"s3://your-bucket/your-audio.mp3\"\n");
    hcl.push_str("  }\n");
    hcl.push_str("}\n\n");
    hcl
}

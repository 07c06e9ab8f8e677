//! # Ancillary File Synthesis
//!
//! The variables file, outputs file, and per-function source files. These
//! are driven only by the aggregate facts collected during the primary
//! traversal — a workspace with no matching resources still gets every
//! fixed file, holding its placeholder content.

use super::code_generator::{FunctionFact, RenderFacts};

/// Fixed placeholder when no resource produces an output.
pub const NO_OUTPUTS_PLACEHOLDER: &str = "# No resources defined yet.\n";

/// The variables file is fixed: the editor exposes no variable blocks.
pub fn variables_file() -> String {
    let mut text = String::from("# Variables for Terraform configuration\n\n");
    text.push_str("variable \"aws_region\" {\n");
    text.push_str("  description = \"AWS region\"\n");
    text.push_str("  type        = string\n");
    text.push_str("  default     = \"us-west-2\"\n");
    text.push_str("}\n\n");
    text.push_str("variable \"environment\" {\n");
    text.push_str("  description = \"Environment name\"\n");
    text.push_str("  type        = string\n");
    text.push_str("  default     = \"dev\"\n");
    text.push_str("}\n\n");
    text.push_str("variable \"project_name\" {\n");
    text.push_str("  description = \"Name of the project\"\n");
    text.push_str("  type        = string\n");
    text.push_str("  default     = \"terrablock\"\n");
    text.push_str("}\n");
    text
}

/// One id output per vpc and one public-ip output per instance, in the
/// order the primary traversal saw them.
pub fn outputs_file(facts: &RenderFacts) -> String {
    let mut text = String::from("# Outputs for Terraform configuration\n\n");

    if facts.networks.is_empty() && facts.instances.is_empty() {
        text.push_str(NO_OUTPUTS_PLACEHOLDER);
        return text;
    }

    for name in &facts.networks {
        text.push_str(&format!("output \"{name}_id\" {{\n"));
        text.push_str("  description = \"ID of the VPC\"\n");
        text.push_str(&format!("  value       = aws_vpc.{name}.id\n"));
        text.push_str("}\n\n");
    }
    for name in &facts.instances {
        text.push_str(&format!("output \"{name}_public_ip\" {{\n"));
        text.push_str(&format!("  description = \"Public IP of {name}\"\n"));
        text.push_str(&format!("  value       = aws_instance.{name}.public_ip\n"));
        text.push_str("}\n\n");
    }

    let mut trimmed = text.trim_end().to_string();
    trimmed.push('\n');
    trimmed
}

/// Python handler source for one lambda block.
pub fn function_source(function: &FunctionFact) -> String {
    let name = &function.name;
    let runtime = &function.runtime;
    format!(
        r#"import json

def handler(event, context):
    """
    Lambda function for {name}
    Runtime: {runtime}
    """

    print(f"Received event: {{json.dumps(event)}}")

    # Your business logic here
    response = {{
        'statusCode': 200,
        'body': json.dumps({{
            'message': 'Hello from {name}!',
            'requestId': context.aws_request_id
        }})
    }}

    return response
"#
    )
}

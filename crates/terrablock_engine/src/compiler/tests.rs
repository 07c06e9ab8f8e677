//! End-to-end tests for the workspace generation pipeline.

use crate::compiler::catalog::BlockCatalog;
use crate::compiler::generation::code_generator::EMPTY_WORKSPACE_PLACEHOLDER;
use crate::compiler::{generate_workspace, render_tree, validation};
use crate::graph::{BlockStub, Position, PropertyValue, WorkspaceDescription};
use crate::model::{BlockNode, BlockTree};

fn stub(native_type: &str) -> BlockStub {
    BlockStub::new(native_type, Position::default())
}

fn named(native_type: &str, name: &str) -> BlockStub {
    stub(native_type).with_field("NAME", PropertyValue::String(name.to_string()))
}

fn workspace_with(blocks: Vec<BlockStub>) -> WorkspaceDescription {
    let mut workspace = WorkspaceDescription::new("test_workspace");
    for block in blocks {
        workspace.add_block(block);
    }
    workspace
}

#[test]
fn test_vpc_with_subnet_resolves_parent_reference() {
    let mut vpc = named("terraform_vpc", "main_vpc");
    vpc.push_statement("CHILDREN", named("terraform_subnet", "web_subnet"));
    let workspace = workspace_with(vec![vpc]);

    let output = generate_workspace(&workspace).expect("generation should succeed");
    let main_tf = output.primary();

    assert!(main_tf.contains("resource \"aws_vpc\" \"main_vpc\""));
    assert!(main_tf.contains("resource \"aws_subnet\" \"web_subnet\""));
    assert!(main_tf.contains("vpc_id     = aws_vpc.main_vpc.id"));
    assert!(validation::is_output_valid(main_tf));
}

#[test]
fn test_attached_role_is_emitted_exactly_once() {
    let mut instance = named("terraform_instance", "web_server");
    instance.push_statement("IAM_ROLE", named("terraform_iam_role", "web_role"));
    let workspace = workspace_with(vec![instance]);

    let output = generate_workspace(&workspace).unwrap();
    let main_tf = output.primary();

    assert_eq!(
        main_tf.matches("resource \"aws_iam_role\" \"web_role\"").count(),
        1,
        "role must not be duplicated by the generic child loop"
    );
    assert_eq!(
        main_tf
            .matches("iam_instance_profile = aws_iam_instance_profile.web_role_profile.name")
            .count(),
        1
    );
    assert_eq!(
        main_tf
            .matches("resource \"aws_iam_instance_profile\" \"web_role_profile\"")
            .count(),
        1
    );
}

#[test]
fn test_glue_job_references_role_arn() {
    let mut job = named("terraform_glue_job", "etl_job");
    job.push_statement("IAM_ROLE", named("terraform_iam_role", "etl_role"));
    let workspace = workspace_with(vec![job]);

    let output = generate_workspace(&workspace).unwrap();
    let main_tf = output.primary();
    assert!(main_tf.contains("resource \"aws_glue_job\" \"etl_job\""));
    assert_eq!(main_tf.matches("role_arn = aws_iam_role.etl_role.arn").count(), 1);
    assert_eq!(main_tf.matches("resource \"aws_iam_role\" \"etl_role\"").count(), 1);
}

#[test]
fn test_empty_workspace_produces_placeholder_files() {
    let workspace = workspace_with(vec![]);
    let output = generate_workspace(&workspace).unwrap();

    assert_eq!(output.primary(), EMPTY_WORKSPACE_PLACEHOLDER);
    assert_eq!(output.files.len(), 3, "fixed files are present even when empty");

    let variables = output.file("variables.tf").unwrap();
    assert!(variables.contains("variable \"aws_region\""));

    let outputs = output.file("outputs.tf").unwrap();
    assert!(outputs.contains("# No resources defined yet."));
}

#[test]
fn test_disallowed_attach_is_rejected_and_tree_unchanged() {
    let catalog = BlockCatalog::load().unwrap();
    let mut tree = BlockTree::new();
    let role = tree.insert(BlockNode::new("iam_role", "web_role"));
    let subnet = tree.insert(BlockNode::new("subnet", "web_subnet"));
    tree.add_root(role);

    let before = tree.get(role).unwrap().children.clone();
    assert!(tree.attach(role, subnet, &catalog).is_err());
    assert_eq!(tree.get(role).unwrap().children, before);
    assert_eq!(tree.get(subnet).unwrap().parent, None);
}

#[test]
fn test_generation_is_deterministic() {
    let mut vpc = named("terraform_vpc", "net");
    vpc.push_statement("CHILDREN", named("terraform_subnet", "a"));
    vpc.push_statement("CHILDREN", named("terraform_security_group", "edge"));
    let mut lambda = named("terraform_lambda", "worker");
    lambda.push_statement("IAM_ROLE", named("terraform_iam_role", "worker_role"));
    let workspace = workspace_with(vec![vpc, lambda, named("terraform_s3", "assets")]);

    let first = generate_workspace(&workspace).unwrap();
    let second = generate_workspace(&workspace).unwrap();
    assert_eq!(first, second, "same tree must produce byte-identical output");
}

#[test]
fn test_missing_ancestors_fall_back_to_default_references() {
    // A subnet and an instance with no enclosing blocks at all.
    let workspace = workspace_with(vec![
        named("terraform_subnet", "orphan_subnet"),
        named("terraform_instance", "orphan_instance"),
    ]);

    let output = generate_workspace(&workspace).unwrap();
    let main_tf = output.primary();

    assert!(main_tf.contains("vpc_id     = aws_vpc.main_vpc.id"));
    assert!(main_tf.contains("subnet_id     = aws_subnet.main_subnet.id"));
    assert!(validation::is_output_valid(main_tf));
}

#[test]
fn test_unknown_block_type_does_not_block_the_rest() {
    let workspace = workspace_with(vec![
        stub("terraform_quantum_router"),
        named("terraform_s3", "assets"),
    ]);

    let output = generate_workspace(&workspace).unwrap();
    let main_tf = output.primary();
    assert!(main_tf.contains("resource \"aws_s3_bucket\" \"assets\""));
    assert!(validation::is_output_valid(main_tf));
}

#[test]
fn test_lambda_sources_are_keyed_by_function_name() {
    let mut first = named("terraform_lambda", "ingest");
    first.set_field("RUNTIME", PropertyValue::String("python3.11".into()));
    let second = named("terraform_lambda", "transform");
    let workspace = workspace_with(vec![first, second]);

    let output = generate_workspace(&workspace).unwrap();
    assert!(output.file("ingest.py").is_some());
    assert!(output.file("transform.py").is_some());

    let ingest = output.file("ingest.py").unwrap();
    assert!(ingest.contains("Lambda function for ingest"));
    assert!(ingest.contains("Runtime: python3.11"));
}

#[test]
fn test_identifiers_are_sanitized_but_display_names_kept() {
    let workspace = workspace_with(vec![named("terraform_instance", "web-server")]);

    let output = generate_workspace(&workspace).unwrap();
    let main_tf = output.primary();
    assert!(main_tf.contains("resource \"aws_instance\" \"web_server\""));
    assert!(main_tf.contains("Name = \"web-server\""));
}

#[test]
fn test_outputs_track_rendered_resources() {
    let mut vpc = named("terraform_vpc", "net");
    let mut subnet = named("terraform_subnet", "web");
    subnet.push_statement("CHILDREN", named("terraform_instance", "app"));
    vpc.push_statement("CHILDREN", subnet);
    let workspace = workspace_with(vec![vpc]);

    let output = generate_workspace(&workspace).unwrap();
    let outputs = output.file("outputs.tf").unwrap();
    assert!(outputs.contains("output \"net_id\""));
    assert!(outputs.contains("value       = aws_vpc.net.id"));
    assert!(outputs.contains("output \"app_public_ip\""));
}

#[test]
fn test_value_slot_literal_overrides_inline_field() {
    let mut vpc = named("terraform_vpc", "net")
        .with_field("CIDR", PropertyValue::String("10.0.0.0/16".into()));
    vpc.set_value_input(
        "CIDR",
        stub("terraform_cidr_block")
            .with_field("CIDR", PropertyValue::String("192.168.0.0/16".into())),
    );
    let workspace = workspace_with(vec![vpc]);

    let output = generate_workspace(&workspace).unwrap();
    assert!(output.primary().contains("cidr_block           = \"192.168.0.0/16\""));
}

#[test]
fn test_defaults_apply_when_fields_are_absent() {
    let workspace = workspace_with(vec![stub("terraform_provider"), stub("terraform_vpc")]);

    let output = generate_workspace(&workspace).unwrap();
    let main_tf = output.primary();
    assert!(main_tf.contains("provider \"aws\""));
    assert!(main_tf.contains("region = \"us-west-2\""));
    assert!(main_tf.contains("resource \"aws_vpc\" \"main_vpc\""));
    assert!(main_tf.contains("cidr_block           = \"10.0.0.0/16\""));
}

#[test]
fn test_render_tree_over_hand_built_forest() {
    let catalog = BlockCatalog::load().unwrap();
    let mut tree = BlockTree::new();
    let vpc = tree.insert(BlockNode::new("vpc", "direct_vpc"));
    let subnet = tree.insert(BlockNode::new("subnet", "direct_subnet"));
    tree.add_root(vpc);
    tree.attach(vpc, subnet, &catalog).unwrap();

    let output = render_tree(&tree).expect("catalog is ready");
    let main_tf = output.primary();
    assert!(main_tf.contains("resource \"aws_vpc\" \"direct_vpc\""));
    assert!(main_tf.contains("vpc_id     = aws_vpc.direct_vpc.id"));
}

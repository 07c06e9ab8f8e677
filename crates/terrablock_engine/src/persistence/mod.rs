//! # Persistence Adapter
//!
//! Serialization boundary between the generator core and the surrounding
//! project store. The store treats the workspace blob as opaque; this module
//! owns its shape.
//!
//! ## Document shapes
//!
//! The current shape nests the workspace under a `state` key. Older
//! documents stored the workspace JSON directly under a `workspace` key;
//! loads accept both and prefer `state` when both are present.
//!
//! ## Failure policy
//!
//! A malformed document is rejected wholesale: [`load_workspace`] returns an
//! error and the caller keeps its current tree. A load is never partially
//! applied.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::compiler::generation::GeneratedOutput;
use crate::graph::WorkspaceDescription;

/// Current document key holding the workspace state.
pub const STATE_KEY: &str = "state";
/// Older documents stored the workspace under this simpler key.
pub const LEGACY_WORKSPACE_KEY: &str = "workspace";

/// One stored project, as exchanged with the surrounding CRUD store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Opaque workspace blob, produced by [`save_workspace`].
    pub workspace_data: Value,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectDocument {
    pub fn new(
        name: &str,
        description: Option<&str>,
        workspace: &WorkspaceDescription,
    ) -> Result<Self> {
        let now = chrono::Utc::now().to_rfc3339();
        Ok(Self {
            id: None,
            name: name.to_string(),
            description: description.map(str::to_string),
            workspace_data: save_workspace(workspace)?,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Refresh the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Serialize a workspace into a storable document blob (current shape).
pub fn save_workspace(workspace: &WorkspaceDescription) -> Result<Value> {
    let state = serde_json::to_value(workspace).context("failed to serialize workspace")?;
    let mut doc = serde_json::Map::new();
    doc.insert(STATE_KEY.to_string(), state);
    Ok(Value::Object(doc))
}

/// Deserialize a workspace from a document blob.
///
/// Accepts the current `state` shape and the legacy `workspace` shape,
/// preferring `state` when both are present. Any malformed document is
/// rejected without touching the caller's current workspace.
pub fn load_workspace(blob: &Value) -> Result<WorkspaceDescription> {
    if let Some(state) = blob.get(STATE_KEY) {
        return parse_workspace(state).context("malformed workspace document ('state' shape)");
    }
    if let Some(state) = blob.get(LEGACY_WORKSPACE_KEY) {
        debug!("loading legacy workspace document shape");
        return parse_workspace(state).context("malformed workspace document (legacy shape)");
    }
    bail!("unrecognized workspace document: expected a '{STATE_KEY}' or '{LEGACY_WORKSPACE_KEY}' key");
}

fn parse_workspace(value: &Value) -> Result<WorkspaceDescription> {
    Ok(serde_json::from_value(value.clone())?)
}

/// Write every generated file into a directory. A single pending operation:
/// it either completes for all files or reports the first failure.
pub fn export_files(output: &GeneratedOutput, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    for (name, content) in &output.files {
        let path = dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Read one previously exported file back as text.
pub fn import_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BlockStub, Position, PropertyValue};

    fn sample_workspace() -> WorkspaceDescription {
        let mut vpc = BlockStub::new("terraform_vpc", Position { x: 10.0, y: 20.0 })
            .with_field("NAME", PropertyValue::String("main_vpc".into()));
        vpc.push_statement(
            "CHILDREN",
            BlockStub::new("terraform_subnet", Position::default())
                .with_field("NAME", PropertyValue::String("web_subnet".into())),
        );
        let mut workspace = WorkspaceDescription::new("round-trip");
        workspace.add_block(vpc);
        workspace
    }

    #[test]
    fn test_save_load_round_trip() {
        let workspace = sample_workspace();
        let blob = save_workspace(&workspace).unwrap();
        let loaded = load_workspace(&blob).unwrap();

        let original = serde_json::to_value(&workspace).unwrap();
        let round_tripped = serde_json::to_value(&loaded).unwrap();
        assert_eq!(original, round_tripped);
    }

    #[test]
    fn test_legacy_shape_loads() {
        let workspace = sample_workspace();
        let state = serde_json::to_value(&workspace).unwrap();
        let mut doc = serde_json::Map::new();
        doc.insert(LEGACY_WORKSPACE_KEY.to_string(), state);

        let loaded = load_workspace(&Value::Object(doc)).unwrap();
        assert_eq!(loaded.metadata.name, "round-trip");
    }

    #[test]
    fn test_current_shape_wins_over_legacy() {
        let current = sample_workspace();
        let mut legacy = sample_workspace();
        legacy.metadata.name = "stale-copy".to_string();

        let mut doc = serde_json::Map::new();
        doc.insert(STATE_KEY.to_string(), serde_json::to_value(&current).unwrap());
        doc.insert(
            LEGACY_WORKSPACE_KEY.to_string(),
            serde_json::to_value(&legacy).unwrap(),
        );

        let loaded = load_workspace(&Value::Object(doc)).unwrap();
        assert_eq!(loaded.metadata.name, "round-trip");
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        let malformed = serde_json::json!({ "state": { "blocks": 42 } });
        assert!(load_workspace(&malformed).is_err());

        let unknown_shape = serde_json::json!({ "garbage": true });
        assert!(load_workspace(&unknown_shape).is_err());
    }

    #[test]
    fn test_project_document_wraps_workspace() {
        let workspace = sample_workspace();
        let doc = ProjectDocument::new("demo", Some("a demo project"), &workspace).unwrap();
        assert_eq!(doc.name, "demo");
        assert!(doc.workspace_data.get(STATE_KEY).is_some());

        let loaded = load_workspace(&doc.workspace_data).unwrap();
        assert_eq!(loaded.metadata.name, "round-trip");
    }

    #[test]
    fn test_export_writes_all_files() {
        let workspace = sample_workspace();
        let output = crate::compiler::generate_workspace(&workspace).unwrap();

        let dir = tempfile::tempdir().unwrap();
        export_files(&output, dir.path()).unwrap();

        let main_tf = import_file(&dir.path().join("main.tf")).unwrap();
        assert!(main_tf.contains("resource \"aws_vpc\" \"main_vpc\""));
        assert!(dir.path().join("variables.tf").exists());
        assert!(dir.path().join("outputs.tf").exists());
    }
}

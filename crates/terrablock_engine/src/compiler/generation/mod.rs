//! # HCL Generation Phase
//!
//! Transforms a built block forest into the generated configuration files.
//!
//! ## Architecture
//!
//! Rendering is split by concern:
//!
//! - **Dispatch registry** (`registry.rs`): type tag → render strategy.
//!   Unknown tags render to nothing so partial trees still produce valid
//!   output for the known parts.
//! - **Render strategies** (`provider.rs`, `network.rs`, `compute.rs`,
//!   `storage.rs`, `identity.rs`, `ml.rs`): one fixed template per block
//!   type, resolving ancestor references with documented default fallbacks.
//! - **Primary walker** (`code_generator.rs`): pre-order traversal in
//!   workspace order, concatenating rendered text and collecting the
//!   aggregate facts.
//! - **Ancillary synthesis** (`ancillary.rs`): variables, outputs, and
//!   per-function sources, driven only by the collected facts.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────┐
//! │  Block Forest    │
//! └────────┬─────────┘
//!          │ pre-order walk, per-type dispatch
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │  main.tf text    │     │  RenderFacts     │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │  variables.tf    │
//!                          │  outputs.tf      │
//!                          │  <function>.py   │
//!                          └──────────────────┘
//! ```
//!
//! Given the same forest, the output is byte-identical across runs: roots
//! and children are ordered, the file map is a `BTreeMap`, and no clocks or
//! randomness reach the generated text.

pub mod ancillary;
pub mod code_generator;
pub mod compute;
pub mod formatting;
pub mod identity;
pub mod ml;
pub mod network;
pub mod provider;
pub mod registry;
pub mod storage;

use std::collections::BTreeMap;

use crate::model::BlockTree;

pub use code_generator::{FunctionFact, RenderFacts};

/// The primary configuration file.
pub const PRIMARY_FILE: &str = "main.tf";
/// Fixed ancillary files, always present.
pub const VARIABLES_FILE: &str = "variables.tf";
pub const OUTPUTS_FILE: &str = "outputs.tf";

/// Mapping from output-file name to rendered text. Regenerated in full on
/// every mutation; never persisted — only the source tree is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedOutput {
    pub files: BTreeMap<String, String>,
}

impl GeneratedOutput {
    /// The primary file's text.
    pub fn primary(&self) -> &str {
        self.file(PRIMARY_FILE).unwrap_or_default()
    }

    pub fn file(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Render a forest into the full set of generated files.
pub fn generate_tree(tree: &BlockTree) -> GeneratedOutput {
    let (primary, facts) = code_generator::generate_primary(tree);

    let mut files = BTreeMap::new();
    files.insert(PRIMARY_FILE.to_string(), primary);
    files.insert(VARIABLES_FILE.to_string(), ancillary::variables_file());
    files.insert(OUTPUTS_FILE.to_string(), ancillary::outputs_file(&facts));
    for function in &facts.functions {
        files.insert(
            format!("{}.py", function.name),
            ancillary::function_source(function),
        );
    }

    GeneratedOutput { files }
}

//! # TerraBlock Engine
//!
//! The generator core of the TerraBlock visual infrastructure editor:
//! everything between the graphical block canvas and the declarative
//! configuration text it produces.
//!
//! - [`graph`] — the editor's native workspace save-state shape
//! - [`model`] — the internal block forest with rule-table-enforced
//!   attach/detach operations
//! - [`compiler`] — catalog loading, tree building, and deterministic HCL
//!   generation across the primary and ancillary files
//! - [`persistence`] — workspace save/load and file export for the
//!   surrounding project store
//!
//! The editor UI and the project CRUD service live elsewhere; they interact
//! with this crate only through plain data (native workspaces in, generated
//! file maps out).
//!
//! Note that the "valid" signal computed over generated output is a
//! documented heuristic (non-empty, no error marker), not a syntax check —
//! see [`compiler::validation`].

pub mod compiler;
pub mod graph;
pub mod model;
pub mod persistence;

pub use compiler::generation::{GeneratedOutput, OUTPUTS_FILE, PRIMARY_FILE, VARIABLES_FILE};
pub use compiler::{generate_workspace, render_tree};
pub use graph::{BlockStub, Position, PropertyValue, SlotInput, WorkspaceDescription};
pub use model::{AttachError, BlockId, BlockNode, BlockTree};

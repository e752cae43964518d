//! Convoy - deployment manifest resolver and module dependency verifier
//!
//! Convoy resolves a declarative deployment manifest into a validated,
//! ordered set of module-loading instructions, verifies that every module's
//! declared dependencies are satisfied somewhere in the manifest, and hands
//! execution to pluggable runners (GraphQL servers, REST servers, anything
//! implementing the [`Runner`] contract).

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod models;
pub mod registry;
pub mod runner;
pub mod verify;

// Re-exports for convenience
pub use aggregate::{aggregate, AggregatedCommands};
pub use engine::DeployEngine;
pub use error::{ConvoyError, ConvoyResult};
pub use manifest::Manifest;
pub use models::{CommandSpec, Dependency, DeploymentEntry, ModuleDeclaration, ModuleRef};
pub use registry::{ModuleRegistry, DECLARATION_FILE};
pub use runner::{DirLoader, ModuleLoader, Runner, RunnerSet};
pub use verify::verify;

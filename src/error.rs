//! Error types for Convoy
//!
//! Uses `thiserror` for library errors. Every failure is fatal to the
//! current `run` invocation; nothing is retried internally.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Convoy operations
pub type ConvoyResult<T> = Result<T, ConvoyError>;

/// Main error type for Convoy operations
#[derive(Error, Debug)]
pub enum ConvoyError {
    /// Two module directories declare the same logical name
    #[error("module name '{name}' already registered - duplicate declaration in {path}")]
    ModuleConflict { name: String, path: PathBuf },

    /// A deployment entry references a template absent from the manifest
    #[error("deployment '{deployment}' references unknown template '{template}'")]
    MissingTemplate {
        deployment: String,
        template: String,
    },

    /// A deployment entry is missing a required field after template expansion
    #[error("deployment entry {entry} is missing required field '{field}'")]
    MissingField { entry: String, field: String },

    /// A deployment references a module the registry never scanned
    #[error("module '{name}' is not present in the module registry")]
    UnknownModule { name: String },

    /// A declared dependency's command is never loaded anywhere in the manifest
    #[error("module '{module}' requires command '{command}' of '{dependency}', but no deployment loads it")]
    UnsatisfiedDependency {
        module: String,
        dependency: String,
        command: String,
    },

    /// The named deployment entry does not exist in the manifest
    #[error("no deployment named '{name}' in manifest")]
    DeploymentNotFound { name: String },

    /// No runner was registered for the matched entry's type
    #[error("no runner registered for type '{kind}' (deployment '{deployment}')")]
    UnregisteredRunner { kind: String, deployment: String },

    /// A module does not expose the requested command directory
    #[error("module '{module}' has no command '{command}' at {path}")]
    CommandNotFound {
        module: String,
        command: String,
        path: PathBuf,
    },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("invalid YAML in {file}: {source}")]
    Yaml {
        file: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A runner load or run hook failed
    #[error("runner '{kind}' failed: {source}")]
    Runner {
        kind: String,
        #[source]
        source: anyhow::Error,
    },
}

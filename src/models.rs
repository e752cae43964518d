//! Core data models for Convoy
//!
//! Defines the structures parsed from module declarations and deployment
//! manifests:
//! - `ModuleDeclaration`: a module's identity and declared dependencies
//! - `DeploymentPatch` / `DeploymentEntry`: raw and template-expanded manifest entries
//! - Supporting types: `CommandSpec`, `Dependency`, `ModuleRef`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A command specification: one command or a sequence of commands.
///
/// Manifests and declarations may write `of: Query` or `of: [Query, Mutation]`;
/// both forms are accepted and normalization to a sequence is lossless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    /// A single command token
    One(String),
    /// A sequence of command tokens
    Many(Vec<String>),
}

impl CommandSpec {
    /// View the specification as a list of command tokens
    pub fn as_vec(&self) -> Vec<&str> {
        match self {
            CommandSpec::One(cmd) => vec![cmd.as_str()],
            CommandSpec::Many(cmds) => cmds.iter().map(String::as_str).collect(),
        }
    }
}

/// A dependency declared by a module: another module plus the command(s)
/// that module must expose somewhere in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Logical name of the module depended upon
    pub name: String,
    /// Command(s) the dependency must have loaded
    pub of: CommandSpec,
}

/// A module's declaration file (`module.yaml`)
///
/// Identity is the declared `name`, not the directory name. Declarations are
/// immutable once scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDeclaration {
    /// Declaration format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Logical module name (globally unique across the registry)
    pub name: String,

    /// Modules this module depends on
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

fn default_version() -> u32 {
    1
}

/// A module reference inside a deployment entry
///
/// Either a bare name (commands come from the entry's own `of` field) or an
/// override pair carrying its own command list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleRef {
    /// Bare module name; inherits the entry's default `of`
    Name(String),
    /// Module name with its own command override
    Override {
        name: String,
        of: CommandSpec,
    },
}

impl ModuleRef {
    /// The referenced module's logical name
    pub fn name(&self) -> &str {
        match self {
            ModuleRef::Name(name) => name,
            ModuleRef::Override { name, .. } => name,
        }
    }

    /// The commands this reference contributes, given the entry's default `of`.
    ///
    /// An override's own `of` replaces the entry default entirely; it is not
    /// merged with it.
    pub fn commands<'a>(&'a self, entry_of: Option<&'a CommandSpec>) -> Vec<&'a str> {
        match self {
            ModuleRef::Name(_) => entry_of.map(CommandSpec::as_vec).unwrap_or_default(),
            ModuleRef::Override { of, .. } => of.as_vec(),
        }
    }
}

/// A raw deployment entry or template, before template expansion
///
/// Every field is optional: templates are partial entries, and an entry that
/// names a `template` may rely on the template for any field. Shallow merge
/// semantics: a field set on the entry wins over the template's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPatch {
    /// Runner type tag
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Name identifying this entry for invocation
    pub name: Option<String>,

    /// Default command(s) applied to bare-string module references
    pub of: Option<CommandSpec>,

    /// Modules this deployment loads
    pub modules: Option<Vec<ModuleRef>>,

    /// Template to merge from (entry fields take precedence)
    pub template: Option<String>,
}

impl DeploymentPatch {
    /// Shallow merge: fields set on `self` override `base`'s.
    ///
    /// The result never carries a `template` field, so re-expansion is a no-op.
    pub fn merged_over(self, base: &DeploymentPatch) -> DeploymentPatch {
        DeploymentPatch {
            kind: self.kind.or_else(|| base.kind.clone()),
            name: self.name.or_else(|| base.name.clone()),
            of: self.of.or_else(|| base.of.clone()),
            modules: self.modules.or_else(|| base.modules.clone()),
            template: None,
        }
    }
}

/// A template-expanded, validated deployment entry
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentEntry {
    /// Runner type tag (selects the registered runner)
    pub kind: String,
    /// Entry name, matched by `run(name)`
    pub name: String,
    /// Default command(s) for bare module references
    pub of: Option<CommandSpec>,
    /// Modules to load, in manifest order
    pub modules: Vec<ModuleRef>,
}

/// Raw deployment manifest as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct RawManifest {
    /// Manifest format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Optional manifest name
    #[serde(default)]
    pub name: Option<String>,

    /// Reusable partial entries, merged into referencing deployments
    #[serde(default)]
    pub templates: BTreeMap<String, DeploymentPatch>,

    /// Deployment entries in manifest order
    pub deployment: Vec<DeploymentPatch>,
}

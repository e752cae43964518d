//! Deployment manifest loading and template expansion
//!
//! A manifest is parsed once, then every entry carrying a `template:` field
//! is replaced by a shallow merge where the entry's own fields win over the
//! template's. Expansion is synchronous, happens exactly once at load time,
//! and is idempotent: a merged entry never carries a `template` field.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConvoyError, ConvoyResult};
use crate::models::{DeploymentEntry, DeploymentPatch, ModuleRef, RawManifest};

/// A loaded, template-expanded deployment manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,
    /// Optional manifest name
    pub name: Option<String>,
    /// Expanded deployment entries, in manifest order
    pub deployment: Vec<DeploymentEntry>,
}

impl Manifest {
    /// Load and expand the manifest at `path`
    pub fn load(path: &Path) -> ConvoyResult<Self> {
        let text = fs::read_to_string(path)?;
        let raw: RawManifest = serde_yaml_ng::from_str(&text).map_err(|e| ConvoyError::Yaml {
            file: path.to_path_buf(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    /// Expand templates and validate every entry of a parsed manifest
    pub fn from_raw(raw: RawManifest) -> ConvoyResult<Self> {
        let mut deployment = Vec::with_capacity(raw.deployment.len());
        for (index, patch) in raw.deployment.into_iter().enumerate() {
            deployment.push(expand_entry(&raw.templates, patch, index)?);
        }

        Ok(Manifest {
            version: raw.version,
            name: raw.name,
            deployment,
        })
    }

    /// Find the deployment entry matching `name`
    pub fn find(&self, name: &str) -> Option<&DeploymentEntry> {
        self.deployment.iter().find(|entry| entry.name == name)
    }
}

/// Merge an entry with its template (if any) and validate required fields
fn expand_entry(
    templates: &std::collections::BTreeMap<String, DeploymentPatch>,
    patch: DeploymentPatch,
    index: usize,
) -> ConvoyResult<DeploymentEntry> {
    let label = entry_label(&patch, index);

    let merged = match patch.template.clone() {
        Some(template_name) => {
            let template =
                templates
                    .get(&template_name)
                    .ok_or_else(|| ConvoyError::MissingTemplate {
                        deployment: label.clone(),
                        template: template_name.clone(),
                    })?;
            debug!(entry = %label, template = %template_name, "expanding template");
            patch.merged_over(template)
        }
        None => patch,
    };

    validate_entry(merged, &label)
}

fn validate_entry(patch: DeploymentPatch, label: &str) -> ConvoyResult<DeploymentEntry> {
    let kind = patch.kind.ok_or_else(|| ConvoyError::MissingField {
        entry: label.to_string(),
        field: "type".to_string(),
    })?;
    let name = patch.name.ok_or_else(|| ConvoyError::MissingField {
        entry: label.to_string(),
        field: "name".to_string(),
    })?;

    Ok(DeploymentEntry {
        kind,
        name,
        of: patch.of,
        modules: patch.modules.unwrap_or_default(),
    })
}

/// Human-readable handle for an entry in errors: its name, or its position
fn entry_label(patch: &DeploymentPatch, index: usize) -> String {
    match &patch.name {
        Some(name) => format!("'{name}'"),
        None => format!("#{index}"),
    }
}

/// The commands a deployment entry loads for one of its module references
///
/// Bare-string references use the entry's default `of`; override references
/// use their own. This is the single rule shared by aggregation and execution.
pub fn entry_commands<'a>(entry: &'a DeploymentEntry, module: &'a ModuleRef) -> Vec<&'a str> {
    module.commands(entry.of.as_ref())
}

//! Deployment execution
//!
//! Drives a single deployment entry: resolves each module reference to its
//! command list, lowercases commands for loading, feeds artifacts to the
//! matched runner's load hook one at a time, then fires the run hook once.
//!
//! Ordering is the correctness property here, not throughput: load hooks are
//! awaited strictly sequentially in manifest module order then command order,
//! because runners accumulate state across calls (e.g. merging schema
//! fragments).

use tracing::info;

use crate::error::{ConvoyError, ConvoyResult};
use crate::manifest::{entry_commands, Manifest};
use crate::registry::ModuleRegistry;
use crate::runner::{ModuleLoader, RunnerSet};

/// Execute the deployment entry named `name`.
///
/// Fails with `DeploymentNotFound` if no entry matches, and with
/// `UnregisteredRunner` if no runner was registered for the entry's type.
pub async fn execute<L: ModuleLoader>(
    manifest: &Manifest,
    name: &str,
    registry: &ModuleRegistry,
    runners: &mut RunnerSet<L::Artifact>,
    loader: &L,
) -> ConvoyResult<()> {
    let entry = manifest
        .find(name)
        .ok_or_else(|| ConvoyError::DeploymentNotFound {
            name: name.to_string(),
        })?;

    let runner = runners
        .get_mut(&entry.kind)
        .ok_or_else(|| ConvoyError::UnregisteredRunner {
            kind: entry.kind.clone(),
            deployment: entry.name.clone(),
        })?;

    for module in &entry.modules {
        let module_name = module.name();
        let root = registry
            .path(module_name)
            .ok_or_else(|| ConvoyError::UnknownModule {
                name: module_name.to_string(),
            })?;

        for command in entry_commands(entry, module) {
            // Folder convention is lowercase; aggregation upstream is not.
            let command = command.to_lowercase();
            info!(module = %module_name, command = %command, "loading module command");
            let artifact = loader.load(module_name, root, &command)?;
            runner
                .load(artifact, entry)
                .await
                .map_err(|e| ConvoyError::Runner {
                    kind: entry.kind.clone(),
                    source: e,
                })?;
        }
    }

    info!(deployment = %entry.name, kind = %entry.kind, "starting runner");
    runner.run().await.map_err(|e| ConvoyError::Runner {
        kind: entry.kind.clone(),
        source: e,
    })
}

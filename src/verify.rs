//! Dependency verification
//!
//! Second pass of the two-pass satisfiability check: after aggregation has
//! built the global per-module command map, walk every module referenced by
//! every deployment entry and assert each declared dependency's commands are
//! present in the aggregate. Verification always runs over the entire
//! manifest before any runner is touched; it never partially verifies.

use tracing::debug;

use crate::aggregate::AggregatedCommands;
use crate::error::{ConvoyError, ConvoyResult};
use crate::manifest::Manifest;
use crate::registry::ModuleRegistry;

/// Check that every dependency declared by every referenced module is
/// satisfied by the aggregated command map.
///
/// Fails on the first missing command, naming the dependent module, the
/// dependency, and the command that no deployment loads.
pub fn verify(
    registry: &ModuleRegistry,
    manifest: &Manifest,
    aggregated: &AggregatedCommands,
) -> ConvoyResult<()> {
    for entry in &manifest.deployment {
        for module in &entry.modules {
            let name = module.name();
            let decl = registry
                .declaration(name)
                .ok_or_else(|| ConvoyError::UnknownModule {
                    name: name.to_string(),
                })?;

            if decl.dependencies.is_empty() {
                continue;
            }

            for dep in &decl.dependencies {
                let available = aggregated.get(&dep.name);
                for command in dep.of.as_vec() {
                    let satisfied = available.is_some_and(|set| set.contains(command));
                    if !satisfied {
                        return Err(ConvoyError::UnsatisfiedDependency {
                            module: name.to_string(),
                            dependency: dep.name.clone(),
                            command: command.to_string(),
                        });
                    }
                }
            }
            debug!(module = %name, "dependencies satisfied");
        }
    }

    Ok(())
}

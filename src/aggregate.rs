//! Command aggregation
//!
//! Computes, per module, the union of commands loaded by *any* deployment
//! entry in the manifest. A module's effective command set is global to the
//! whole manifest, not scoped to one deployment: dependency verification must
//! succeed when some entry loads the required command, regardless of which
//! deployment declared the dependency.
//!
//! Commands are compared case-sensitively here; lowercasing happens only at
//! load time in the executor.

use std::collections::{BTreeMap, BTreeSet};

use crate::manifest::{entry_commands, Manifest};

/// Per-module union of commands contributed across the whole manifest
pub type AggregatedCommands = BTreeMap<String, BTreeSet<String>>;

/// Union the commands every deployment entry contributes per module.
///
/// Union is order-independent: permuting the deployment list never changes
/// the result.
pub fn aggregate(manifest: &Manifest) -> AggregatedCommands {
    let mut aggregated = AggregatedCommands::new();
    for entry in &manifest.deployment {
        for module in &entry.modules {
            let set = aggregated.entry(module.name().to_string()).or_default();
            for command in entry_commands(entry, module) {
                set.insert(command.to_string());
            }
        }
    }
    aggregated
}

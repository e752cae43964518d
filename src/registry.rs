//! Module registry
//!
//! Scans a module root directory and indexes each module's declaration by
//! its declared logical name. The directory name is irrelevant to lookups;
//! only the `name` field inside the declaration matters.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConvoyError, ConvoyResult};
use crate::models::ModuleDeclaration;

/// File name of a module's declaration inside its directory
pub const DECLARATION_FILE: &str = "module.yaml";

/// Index of scanned module declarations and their on-disk roots
///
/// Two parallel indexes are kept: declaration-by-name (read by the
/// dependency verifier) and root-path-by-name (read by the executor).
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    declarations: BTreeMap<String, ModuleDeclaration>,
    paths: BTreeMap<String, PathBuf>,
}

impl ModuleRegistry {
    /// Scan `root`, reading the declaration of every immediate subdirectory.
    ///
    /// Subdirectories without a `module.yaml` are skipped. Two directories
    /// declaring the same logical name fail with `ModuleConflict` naming the
    /// duplicate and the second directory encountered.
    pub fn scan(root: &Path) -> ConvoyResult<Self> {
        if !root.is_dir() {
            return Err(ConvoyError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut registry = Self::default();
        for dent in fs::read_dir(root)? {
            let dent = dent?;
            if !dent.file_type()?.is_dir() {
                continue;
            }
            let dir = dent.path();
            let decl_path = dir.join(DECLARATION_FILE);
            if !decl_path.is_file() {
                debug!(path = %dir.display(), "skipping directory without declaration");
                continue;
            }

            let text = fs::read_to_string(&decl_path)?;
            let decl: ModuleDeclaration =
                serde_yaml_ng::from_str(&text).map_err(|e| ConvoyError::Yaml {
                    file: decl_path,
                    source: e,
                })?;

            if registry.declarations.contains_key(&decl.name) {
                return Err(ConvoyError::ModuleConflict {
                    name: decl.name,
                    path: dir,
                });
            }

            debug!(module = %decl.name, path = %dir.display(), "registered module");
            registry.paths.insert(decl.name.clone(), dir);
            registry.declarations.insert(decl.name.clone(), decl);
        }

        Ok(registry)
    }

    /// Look up a module's declaration by logical name
    pub fn declaration(&self, name: &str) -> Option<&ModuleDeclaration> {
        self.declarations.get(name)
    }

    /// Look up a module's on-disk root by logical name
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    /// Registered module names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the registry holds no modules
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

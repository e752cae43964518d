//! Runner and loader contracts
//!
//! Runners are external collaborators selected by a deployment entry's
//! `type` tag. The engine feeds each one loaded artifacts through its load
//! hook (strictly sequentially, in manifest order) and then invokes its run
//! hook exactly once. How a runner accumulates state between load calls is
//! its own business.
//!
//! Artifact loading is likewise injected: a `ModuleLoader` turns a module
//! root plus a command into whatever artifact type the registered runners
//! consume, so the resolution engine never touches real storage in tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{ConvoyError, ConvoyResult};
use crate::models::DeploymentEntry;

/// External component that loads module artifacts for one deployment type
/// and ultimately executes (e.g., starts a server).
#[async_trait]
pub trait Runner<A>: Send {
    /// Type tag this runner serves; matched against a deployment's `type`
    fn kind(&self) -> &str;

    /// Accept one loaded artifact for the active deployment entry.
    ///
    /// Calls arrive strictly sequentially, in manifest module order then
    /// command order, and each is awaited before the next is issued. Later
    /// calls may rely on state accumulated by earlier ones.
    async fn load(&mut self, artifact: A, entry: &DeploymentEntry) -> anyhow::Result<()>;

    /// Execute the deployment. Called exactly once, after every load hook
    /// for the matched entry has completed.
    async fn run(&mut self) -> anyhow::Result<()>;
}

/// Registry of runners keyed by type tag
///
/// Exactly one runner per tag; registering a tag twice overwrites the
/// previous binding.
pub struct RunnerSet<A> {
    runners: HashMap<String, Box<dyn Runner<A>>>,
}

impl<A> Default for RunnerSet<A> {
    fn default() -> Self {
        Self {
            runners: HashMap::new(),
        }
    }
}

impl<A> RunnerSet<A> {
    /// Create an empty runner set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runner under its own `kind` tag, overwriting any previous
    /// runner registered for that tag
    pub fn register(&mut self, runner: Box<dyn Runner<A>>) {
        self.runners.insert(runner.kind().to_string(), runner);
    }

    /// Borrow the runner registered for `kind`, if any
    pub fn get_mut(&mut self, kind: &str) -> Option<&mut Box<dyn Runner<A>>> {
        self.runners.get_mut(kind)
    }

    /// Whether any runner is registered
    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

/// Resolves a (module root, command) pair into a loadable artifact
pub trait ModuleLoader {
    /// Artifact type handed to runner load hooks
    type Artifact;

    /// Load the artifact for `command` under `module_root`.
    ///
    /// `command` arrives already lowercased; the filesystem convention keeps
    /// one lowercased directory per command.
    fn load(&self, module: &str, module_root: &Path, command: &str)
        -> ConvoyResult<Self::Artifact>;
}

/// Production loader: resolves the command directory under the module root
///
/// The artifact is the command directory's path; runners that need file
/// contents read them from there.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirLoader;

impl ModuleLoader for DirLoader {
    type Artifact = PathBuf;

    fn load(&self, module: &str, module_root: &Path, command: &str) -> ConvoyResult<PathBuf> {
        let path = module_root.join(command);
        if !path.is_dir() {
            return Err(ConvoyError::CommandNotFound {
                module: module.to_string(),
                command: command.to_string(),
                path,
            });
        }
        Ok(path)
    }
}

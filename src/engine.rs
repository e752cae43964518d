//! Top-level deployment engine
//!
//! Owns all state for one deployment run: the scanned module registry, the
//! template-expanded manifest, the registered runners, and the injected
//! artifact loader. `run` consumes the engine, so "one run per engine" is
//! enforced by ownership rather than by cache-clearing; state is dropped on
//! success and failure alike.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::aggregate::aggregate;
use crate::error::ConvoyResult;
use crate::executor::execute;
use crate::manifest::Manifest;
use crate::registry::ModuleRegistry;
use crate::runner::{DirLoader, ModuleLoader, Runner, RunnerSet};
use crate::verify::verify;

/// Resolves a deployment manifest and drives runners for one deployment
pub struct DeployEngine<L: ModuleLoader> {
    registry: ModuleRegistry,
    manifest: Manifest,
    runners: RunnerSet<L::Artifact>,
    loader: L,
    verify: bool,
}

impl<L: ModuleLoader> fmt::Debug for DeployEngine<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployEngine")
            .field("registry", &self.registry)
            .field("manifest", &self.manifest)
            .field("verify", &self.verify)
            .finish_non_exhaustive()
    }
}

impl<L: ModuleLoader> DeployEngine<L> {
    /// Scan `module_root` and load the manifest at `manifest_path`.
    ///
    /// Registry scanning and template expansion happen here, eagerly, so a
    /// broken module tree or manifest fails before any runner is registered.
    pub fn new(module_root: &Path, manifest_path: &Path, loader: L) -> ConvoyResult<Self> {
        let registry = ModuleRegistry::scan(module_root)?;
        let manifest = Manifest::load(manifest_path)?;
        debug!(
            modules = registry.len(),
            deployments = manifest.deployment.len(),
            "engine constructed"
        );
        Ok(Self {
            registry,
            manifest,
            runners: RunnerSet::new(),
            loader,
            verify: true,
        })
    }

    /// Register a runner, overwriting any previous runner with the same tag.
    /// Chainable.
    pub fn add_runner(mut self, runner: Box<dyn Runner<L::Artifact>>) -> Self {
        self.runners.register(runner);
        self
    }

    /// Enable or disable dependency verification before execution
    /// (enabled by default). Chainable.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// The template-expanded manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The scanned module registry
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Aggregate commands across the whole manifest and verify every
    /// referenced module's declared dependencies, without executing anything.
    pub fn check(&self) -> ConvoyResult<()> {
        let aggregated = aggregate(&self.manifest);
        verify(&self.registry, &self.manifest, &aggregated)
    }

    /// Verify (unless disabled) and execute the deployment named
    /// `deployment`.
    ///
    /// Verification runs to completion over the entire manifest before any
    /// load hook fires. Consumes the engine; running twice requires
    /// constructing a fresh one.
    pub async fn run(mut self, deployment: &str) -> ConvoyResult<()> {
        if self.verify {
            self.check()?;
        }
        execute(
            &self.manifest,
            deployment,
            &self.registry,
            &mut self.runners,
            &self.loader,
        )
        .await
    }
}

impl DeployEngine<DirLoader> {
    /// Construct an engine with the production filesystem loader
    pub fn open(module_root: &Path, manifest_path: &Path) -> ConvoyResult<Self> {
        Self::new(module_root, manifest_path, DirLoader)
    }
}

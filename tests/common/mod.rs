//! Shared test helpers - building module trees and manifests on disk.

#![allow(dead_code)]


use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tempfile::TempDir;

use convoy::{DeployEngine, DeploymentEntry, DirLoader, Runner, DECLARATION_FILE};

/// Write one module directory: declaration plus one lowercase directory per
/// command, each holding a placeholder entry artifact.
pub fn write_module(root: &Path, dir: &str, declaration: &str, commands: &[&str]) {
    let module_dir = root.join(dir);
    fs::create_dir_all(&module_dir).unwrap();
    fs::write(module_dir.join(DECLARATION_FILE), declaration).unwrap();
    for command in commands {
        let command_dir = module_dir.join(command);
        fs::create_dir_all(&command_dir).unwrap();
        fs::write(command_dir.join("schema.graphql"), "type Query { _: ID }\n").unwrap();
    }
}

/// Write a manifest file and return its path
pub fn write_manifest(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("deployment.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

/// Build a full engine over a temp module tree and manifest.
///
/// `modules` is (directory name, declaration YAML, command directories).
pub fn engine(
    modules: &[(&str, &str, &[&str])],
    manifest_yaml: &str,
) -> (TempDir, DeployEngine<DirLoader>) {
    let tmp = tempfile::tempdir().unwrap();
    let module_root = tmp.path().join("modules");
    fs::create_dir_all(&module_root).unwrap();
    for (dir, declaration, commands) in modules {
        write_module(&module_root, dir, declaration, commands);
    }
    let manifest_path = write_manifest(tmp.path(), manifest_yaml);
    let engine = DeployEngine::open(&module_root, &manifest_path).unwrap();
    (tmp, engine)
}

/// Runner that records every hook invocation as `load <module>/<command>`
/// (taken from the artifact path's last two components) or `run`.
pub struct RecordingRunner {
    kind: &'static str,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingRunner {
    pub fn new(kind: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                kind,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl Runner<PathBuf> for RecordingRunner {
    fn kind(&self) -> &str {
        self.kind
    }

    async fn load(&mut self, artifact: PathBuf, _entry: &DeploymentEntry) -> anyhow::Result<()> {
        let command = artifact.file_name().unwrap().to_string_lossy().to_string();
        let module = artifact
            .parent()
            .and_then(Path::file_name)
            .unwrap()
            .to_string_lossy()
            .to_string();
        self.calls
            .lock()
            .unwrap()
            .push(format!("load {module}/{command}"));
        Ok(())
    }

    async fn run(&mut self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push("run".to_string());
        Ok(())
    }
}

/// Runner whose run hook fails, for error-propagation tests
pub struct FailingRunner {
    kind: &'static str,
}

impl FailingRunner {
    pub fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl Runner<PathBuf> for FailingRunner {
    fn kind(&self) -> &str {
        self.kind
    }

    async fn load(&mut self, _artifact: PathBuf, _entry: &DeploymentEntry) -> anyhow::Result<()> {
        Ok(())
    }

    async fn run(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("listen failed")
    }
}

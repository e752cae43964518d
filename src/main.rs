//! Convoy CLI - deployment manifest resolver and dependency checker
//!
//! Usage: convoy <COMMAND>
//!
//! Commands:
//!   check   Resolve the manifest and verify module dependencies
//!   list    Print deployments with their modules and commands
//!
//! Runners are registered programmatically through the library API; the CLI
//! only exercises resolution and verification.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use convoy::manifest::entry_commands;
use convoy::DeployEngine;

/// Convoy - deployment manifest resolver and dependency checker
#[derive(Parser, Debug)]
#[command(name = "convoy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the manifest, aggregate commands, verify dependencies
    Check {
        /// Path to the module root directory
        #[arg(short, long, default_value = "modules")]
        modules: PathBuf,

        /// Path to the deployment manifest
        #[arg(short = 'f', long, default_value = "deployment.yaml")]
        manifest: PathBuf,
    },

    /// Print deployments with their modules and resolved commands
    List {
        /// Path to the module root directory
        #[arg(short, long, default_value = "modules")]
        modules: PathBuf,

        /// Path to the deployment manifest
        #[arg(short = 'f', long, default_value = "deployment.yaml")]
        manifest: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { modules, manifest } => check(&modules, &manifest),
        Commands::List { modules, manifest } => list(&modules, &manifest),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn check(modules: &Path, manifest: &Path) -> Result<()> {
    let engine = DeployEngine::open(modules, manifest)?;
    engine.check()?;
    println!(
        "ok: {} modules, {} deployments, all dependencies satisfied",
        engine.registry().len(),
        engine.manifest().deployment.len()
    );
    Ok(())
}

fn list(modules: &Path, manifest: &Path) -> Result<()> {
    let engine = DeployEngine::open(modules, manifest)?;
    for entry in &engine.manifest().deployment {
        println!("{} ({})", entry.name, entry.kind);
        for module in &entry.modules {
            let commands = entry_commands(entry, module).join(", ");
            println!("  {} [{}]", module.name(), commands);
        }
    }
    Ok(())
}

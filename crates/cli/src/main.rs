//! `medidoc` command line entry point.
//!
//! Without a subcommand the interactive TUI is launched. `run` analyzes a
//! single file headlessly, `init` scaffolds `.medidoc/`, and `workflows`
//! lists the available workflows.

mod console;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use console::ConsoleSink;
use mdc_core::config::loader::load_config;
use mdc_core::init::{generate_medidoc_structure, InitOptions};
use mdc_core::report::StaticReportProvider;
use mdc_core::state::{RunHandle, Workbench};
use mdc_protocol::stage_models::RunOutcome;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "medidoc",
    version,
    about = "Simulated medical document analysis workbench"
)]
struct Cli {
    /// Project root containing the `.medidoc/` directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one file without the interactive UI
    Run {
        /// PDF or image file to analyze
        file: PathBuf,

        /// Report view to print (professional, patient)
        #[arg(long)]
        view: Option<String>,

        /// Print render instructions as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Create a `.medidoc/` directory with default settings
    Init {
        /// Overwrite an existing `.medidoc/` directory
        #[arg(long)]
        force: bool,

        /// Only write config.toml
        #[arg(long)]
        minimal: bool,
    },

    /// List available workflows
    Workflows,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        None => {
            mdc_tui::logging::init_file_logging(&cli.root).map_err(|e| eyre!(e))?;
            mdc_tui::run_app(&cli.root).await.map_err(|e| eyre!(e))
        }
        Some(command) => {
            init_stderr_logging();
            match command {
                Commands::Run { file, view, json } => {
                    run_headless(&cli.root, &file, view.as_deref(), json).await
                }
                Commands::Init { force, minimal } => init_project(&cli.root, force, minimal).await,
                Commands::Workflows => list_workflows(&cli.root).await,
            }
        }
    }
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(mdc_tui::logging::env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_headless(root: &Path, file: &Path, view: Option<&str>, json: bool) -> Result<()> {
    let config = load_config(root)
        .await
        .wrap_err("Failed to load .medidoc configuration")?;
    let workbench = Workbench::from_config(
        &config,
        Arc::new(StaticReportProvider::new()),
        Arc::new(ConsoleSink::new(json)),
    )?;

    if let Some(view) = view {
        workbench.select(view)?;
    }
    workbench.select_path(file)?;

    let handle = workbench.submit()?;
    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let outcome = wait_for_run(&workbench, handle, interrupt).await?;
    info!(run_id = %outcome.run_id, "analysis finished");
    Ok(())
}

/// Wait for a run, aborting it when `interrupt` resolves first.
///
/// After an abort the run is still awaited so its final instructions reach
/// the console before the command exits.
async fn wait_for_run(
    workbench: &Workbench,
    handle: RunHandle,
    interrupt: impl Future<Output = ()>,
) -> Result<RunOutcome> {
    let join = handle.join();
    tokio::pin!(join);

    tokio::select! {
        outcome = &mut join => return Ok(outcome?),
        _ = interrupt => {
            workbench.abort();
        }
    }

    if let Err(err) = join.await {
        info!(error = %err, "interrupted run stopped");
    }
    Err(eyre!("Interrupted"))
}

async fn init_project(root: &Path, force: bool, minimal: bool) -> Result<()> {
    let options = InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    };
    let written = generate_medidoc_structure(options).await?;
    for path in &written {
        println!("{} {}", "created".green(), path.display());
    }
    Ok(())
}

async fn list_workflows(root: &Path) -> Result<()> {
    let config = load_config(root)
        .await
        .wrap_err("Failed to load .medidoc configuration")?;
    for name in config.workflow_names()? {
        let workflow = config.find_workflow(&name)?;
        let marker = if name == config.global.workflow { "*" } else { " " };
        println!(
            "{marker} {} ({} stages)",
            name.bold(),
            workflow.stages.len()
        );
    }
    Ok(())
}

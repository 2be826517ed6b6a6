//! # mdc-tui
//!
//! Terminal User Interface for medidoc.
//!
//! The TUI is one renderer of the core's instruction stream. It sends
//! `Command`s to a controller task that drives the `Workbench`, and draws
//! whatever `RenderInstruction`s come back.

pub mod app;
pub mod controller;
pub mod event;
pub mod event_handler;
pub mod logging;
pub mod screen;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use mdc_core::config::loader::load_config;
use mdc_core::report::StaticReportProvider;
use mdc_core::state::Workbench;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;

/// Run the interactive workbench for the project rooted at `root`.
///
/// Configuration errors surface before the terminal is touched.
pub async fn run_app(root: &Path) -> Result<()> {
    let config = load_config(root).await?;

    let (render_tx, render_rx) = unbounded_channel();
    let (command_tx, command_rx) = unbounded_channel();

    let workbench = Arc::new(Workbench::from_config(
        &config,
        Arc::new(StaticReportProvider::new()),
        Arc::new(render_tx),
    )?);
    info!(
        workflow = %config.global.workflow,
        stages = workbench.stage_snapshot().len(),
        "workbench ready"
    );

    let controller = tokio::spawn(controller::run_controller(
        Arc::clone(&workbench),
        command_rx,
    ));

    let mut tui = Tui::init()?;
    let mut app = App::new(command_tx, render_rx, workbench.active_view());
    let result = app.run(&mut tui).await;
    tui.restore()?;

    drop(app);
    let _ = controller.await;
    result
}

//! Command dispatch from the TUI to the workbench.
//!
//! The controller runs as its own task, so the input loop never blocks on
//! the core. Every outcome reaches the screen through the render sink.

use mdc_core::state::{Workbench, WorkbenchError};
use mdc_protocol::ipc::Command;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

/// Apply one command to the workbench.
///
/// Returns `ControlFlow::Break` once the session should end.
pub fn dispatch(workbench: &Workbench, command: Command) -> ControlFlow<()> {
    match command {
        Command::SelectFile { path } => {
            if let Err(err) = workbench.select_path(&path) {
                debug!(path = %path.display(), error = %err, "file not accepted");
            }
        }
        Command::Submit => match workbench.submit() {
            Ok(handle) => {
                tokio::spawn(async move {
                    match handle.join().await {
                        Ok(outcome) => info!(run_id = %outcome.run_id, "analysis finished"),
                        Err(err) => warn!(error = %err, "analysis did not finish"),
                    }
                });
            }
            Err(WorkbenchError::RunAlreadyInProgress) => {
                debug!("submit ignored while a run is active");
            }
            Err(err) => warn!(error = %err, "submit rejected"),
        },
        Command::SelectView { view } => {
            if let Err(err) = workbench.select(&view) {
                warn!(view = %view, error = %err, "view selection rejected");
            }
        }
        Command::Shutdown => {
            workbench.abort();
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

/// Consume commands until shutdown or until the sender is dropped.
pub async fn run_controller(workbench: Arc<Workbench>, mut commands: UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        if dispatch(&workbench, command).is_break() {
            break;
        }
    }
    workbench.abort();
}

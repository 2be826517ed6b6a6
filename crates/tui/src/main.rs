//! Main entry point for the mdc-tui binary.
//!
//! This executable provides a standalone TUI for medidoc.

use anyhow::Result;
use mdc_tui::logging::init_file_logging;
use mdc_tui::run_app;

#[tokio::main]
async fn main() -> Result<()> {
    let root = std::env::current_dir()?;
    init_file_logging(&root)?;
    run_app(&root).await
}

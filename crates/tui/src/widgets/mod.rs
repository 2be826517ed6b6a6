//! TUI widgets module.
//!
//! - [`upload_panel`]: path input and file summary
//! - [`stage_list`]: per-stage progress
//! - [`report_view`]: report tabs and body

pub mod report_view;
pub mod stage_list;
pub mod upload_panel;

pub use report_view::ReportView;
pub use stage_list::render_stage_list;
pub use upload_panel::render_upload_panel;

//! Render sink printing instructions to stdout.
//!
//! Text mode prints a readable transcript of the run; JSON mode prints one
//! serialized instruction per line for scripting.

use colored::Colorize;
use mdc_core::render::RenderSink;
use mdc_protocol::ipc::RenderInstruction;
use std::io::Write;

pub struct ConsoleSink {
    json: bool,
}

impl ConsoleSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl RenderSink for ConsoleSink {
    fn emit(&self, instruction: RenderInstruction) {
        let line = if self.json {
            serde_json::to_string(&instruction).ok()
        } else {
            format_instruction(&instruction)
        };
        if let Some(line) = line {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{line}");
        }
    }
}

/// Text rendering of one instruction; `None` for instructions that have no
/// visible line (progress frames, trigger toggles).
pub fn format_instruction(instruction: &RenderInstruction) -> Option<String> {
    match instruction {
        RenderInstruction::ArtifactAccepted { artifact } => Some(format!(
            "{} {} ({})",
            "Selected".green().bold(),
            artifact.display_name,
            artifact.size_label()
        )),
        RenderInstruction::IntakeRejected { message } => Some(message.red().to_string()),
        RenderInstruction::TriggerChanged { .. } | RenderInstruction::StageProgress { .. } => None,
        RenderInstruction::RunStarted { stage_count, .. } => {
            Some(format!("Starting analysis ({stage_count} stages)"))
        }
        RenderInstruction::Loading { message } => Some(message.dimmed().to_string()),
        RenderInstruction::SectionHeading { title, .. } => {
            Some(format!("\n{}", title.cyan().bold()))
        }
        RenderInstruction::StageActivated {
            icon,
            name,
            task_label,
            ..
        } => Some(format!("{icon} {}  {task_label}", name.bold())),
        RenderInstruction::StageCompleted {
            completion_label, ..
        } => Some(format!("   {} {completion_label}", "✓".green())),
        RenderInstruction::ReportRendered {
            report,
            active_view,
            ..
        } => {
            let mut out = format!("\n{}\n", report.headline.green().bold());
            for stat in &report.stats {
                out.push_str(&format!("  {} {}\n", stat.value.bold(), stat.label));
            }
            if let Some(document) = report.document(*active_view) {
                out.push_str(&format!(
                    "\n{} [{}]\n\n{}",
                    document.title.bold().underline(),
                    active_view.caption(),
                    document.body.trim_end()
                ));
            }
            Some(out)
        }
        RenderInstruction::ViewChanged { view } => {
            Some(format!("Showing {}", view.caption()))
        }
        RenderInstruction::RunAborted { reason, .. } => {
            Some(format!("{} {reason}", "Run aborted:".red().bold()))
        }
    }
}

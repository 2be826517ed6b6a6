//! Stage list widget showing per-stage progress bars.
//!
//! Each stage renders as a header line (icon, name, label) followed by a
//! text progress bar. Section headings appear between groups of stages.

use crate::screen::{ScreenRow, ScreenState, StageRow};
use mdc_protocol::stage_models::StageStatus;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const BAR_WIDTH: usize = 30;

/// Render a fixed-width bar for `percent` (0..=100).
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn stage_lines(stage: &StageRow) -> [Line<'static>; 2] {
    let status_style = match stage.status {
        StageStatus::Pending => Style::default().fg(Color::DarkGray),
        StageStatus::Active => Style::default().fg(Color::Yellow),
        StageStatus::Complete => Style::default().fg(Color::Green),
    };
    let marker = match stage.status {
        StageStatus::Complete => "✓",
        _ => "…",
    };

    let header = Line::from(vec![
        Span::raw(format!("{} ", stage.icon)),
        Span::styled(
            stage.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{marker} {}", stage.label), status_style),
    ]);
    let bar = Line::from(vec![
        Span::raw("   "),
        Span::styled(progress_bar(stage.percent, BAR_WIDTH), status_style),
        Span::raw(format!(" {:>3.0}%", stage.percent)),
    ]);
    [header, bar]
}

/// Renders the stage list for the current run.
///
/// # Arguments
/// * `frame` - The frame to render into
/// * `area` - The area to render the list in
/// * `screen` - Current screen state
pub fn render_stage_list(frame: &mut Frame, area: Rect, screen: &ScreenState) {
    let title = if screen.stage_count > 0 {
        format!(
            "Analysis - {}/{} stages",
            screen.completed_stages(),
            screen.stage_count
        )
    } else {
        "Analysis".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let mut lines: Vec<Line> = Vec::new();
    if screen.rows.is_empty() {
        lines.push(Line::from("Select a file and press Enter to start analysis."));
    }
    for row in &screen.rows {
        match row {
            ScreenRow::Heading(title) => lines.push(Line::styled(
                title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            ScreenRow::Stage(stage) => lines.extend(stage_lines(stage)),
        }
    }
    if let Some(reason) = &screen.aborted {
        lines.push(Line::styled(
            format!("Run aborted: {reason}"),
            Style::default().fg(Color::Red),
        ));
    }

    // Keep the newest rows visible once the list outgrows the panel.
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let paragraph = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()).block(block);
    frame.render_widget(paragraph, area);
}

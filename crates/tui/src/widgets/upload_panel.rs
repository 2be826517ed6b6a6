//! Upload panel: path input, accepted file summary and intake messages.

use crate::screen::ScreenState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_upload_panel(frame: &mut Frame, area: Rect, screen: &ScreenState, path_input: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Upload - type a PDF or image path, Enter to select");

    let mut lines = vec![Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow)),
        Span::raw(path_input.to_string()),
    ])];

    match (&screen.artifact, &screen.intake_message) {
        (_, Some(message)) => {
            lines.push(Line::styled(message.clone(), Style::default().fg(Color::Red)));
        }
        (Some(artifact), None) => {
            let hint = if screen.trigger_enabled {
                "  Press Enter to analyze"
            } else {
                ""
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ({})", artifact.display_name, artifact.size_label()),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ]));
        }
        (None, None) => {
            lines.push(Line::styled(
                "No file selected",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

//! Report view widget with view tabs and scrolling support.
//!
//! Shows the loading placeholder while a run executes, then the report
//! headline, stat cards, a tab strip with one tab per view and the body of
//! the active view. The body scrolls with the arrow and page keys.

use crate::event::EventStatus;
use crate::screen::ScreenState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use mdc_protocol::report_models::ReportPayload;
use mdc_protocol::view_models::ViewName;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Tabs, Wrap,
    },
    Frame,
};
use std::cell::Cell;

const PAGE_SIZE: usize = 10;

/// Widget for displaying the report with scrolling support.
pub struct ReportView {
    /// Current scroll offset (number of lines scrolled from the top).
    pub scroll_offset: usize,
    /// Largest useful offset, measured on the last render.
    max_scroll: Cell<usize>,
}

impl ReportView {
    /// Create a new ReportView with scroll offset at the top.
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            max_scroll: Cell::new(0),
        }
    }

    /// Render the result area for the given screen state.
    pub fn render(&self, frame: &mut Frame, area: Rect, screen: &ScreenState) {
        let block = Block::default().borders(Borders::ALL).title("Report");

        let Some(report) = &screen.report else {
            let text = screen
                .loading
                .clone()
                .unwrap_or_else(|| "No report yet.".to_string());
            let paragraph = Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
            self.max_scroll.set(0);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Headline and stats
                Constraint::Length(1), // Tabs
                Constraint::Min(1),    // Body
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(summary_line(report)), chunks[0]);
        self.render_tabs(frame, chunks[1], screen.active_view);
        self.render_body(frame, chunks[2], report, screen.active_view);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, active: ViewName) {
        let titles: Vec<&str> = ViewName::ALL.iter().map(|view| view.caption()).collect();
        let selected = ViewName::ALL
            .iter()
            .position(|view| *view == active)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, report: &ReportPayload, view: ViewName) {
        let Some(document) = report.document(view) else {
            frame.render_widget(Paragraph::new("This view is not available."), area);
            self.max_scroll.set(0);
            return;
        };

        let mut lines = vec![
            Line::styled(
                document.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
        ];
        lines.extend(document.body.lines().map(|line| Line::from(line.to_string())));
        let total_lines = wrapped_height(&lines, area.width);
        let visible_lines = usize::from(area.height);
        let max_scroll = total_lines.saturating_sub(visible_lines);
        self.max_scroll.set(max_scroll);
        let offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, area);

        if total_lines > visible_lines {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(total_lines)
                .viewport_content_length(visible_lines)
                .position(offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    /// Handle scroll keys; everything else is left for the input line.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> EventStatus {
        if key_event.kind != KeyEventKind::Press {
            return EventStatus::NotConsumed;
        }
        match key_event.code {
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            KeyCode::PageUp => self.page_up(PAGE_SIZE),
            KeyCode::PageDown => self.page_down(PAGE_SIZE),
            KeyCode::Home => self.scroll_to_top(),
            _ => return EventStatus::NotConsumed,
        }
        EventStatus::Consumed
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line, stopping at the end of the content.
    pub fn scroll_down(&mut self) {
        self.page_down(1);
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(page_size)
            .min(self.max_scroll.get());
    }

    /// Reset scroll to the top.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }
}

impl Default for ReportView {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows taken by `lines` once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

fn summary_line(report: &ReportPayload) -> Line<'static> {
    let mut spans = vec![Span::styled(
        report.headline.clone(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    for stat in &report.stats {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            stat.value.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", stat.label)));
    }
    Line::from(spans)
}

//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that manages the TUI state
//! and the event loop using `tokio::select!`.

use anyhow::Result;
use crossterm::event::KeyEvent;
use mdc_protocol::ipc::{Command, RenderInstruction};
use mdc_protocol::view_models::ViewName;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::screen::ScreenState;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{render_stage_list, render_upload_panel, ReportView};

/// Redraw cadence while a run animates.
const ANIMATION_FRAME: Duration = Duration::from_millis(33);

/// Main TUI application state.
pub struct App {
    /// Everything drawn, folded from render instructions.
    pub screen: ScreenState,
    /// File path being typed.
    pub path_input: String,
    pub report_view: ReportView,
    /// Channel to send commands to the core.
    pub command_tx: UnboundedSender<Command>,
    /// Channel to receive render instructions from the core.
    pub render_rx: UnboundedReceiver<RenderInstruction>,
    pub should_exit: bool,
}

impl App {
    pub fn new(
        command_tx: UnboundedSender<Command>,
        render_rx: UnboundedReceiver<RenderInstruction>,
        default_view: ViewName,
    ) -> Self {
        Self {
            screen: ScreenState::new(default_view),
            path_input: String::new(),
            report_view: ReportView::new(),
            command_tx,
            render_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and render
    /// instructions concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(instruction) = self.render_rx.recv() => {
                    self.handle_render_instruction(instruction);
                    tui.frame_requester().schedule_frame_in(ANIMATION_FRAME);
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
            }
        }

        let _ = self.command_tx.send(Command::Shutdown);
        Ok(())
    }

    fn handle_render_instruction(&mut self, instruction: RenderInstruction) {
        let new_report = matches!(instruction, RenderInstruction::ReportRendered { .. });
        event_handler::handle_render_instruction(&mut self.screen, instruction);
        if new_report {
            self.report_view.scroll_to_top();
        }
    }

    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(pasted) => {
                event_handler::handle_paste(&pasted, &mut self.path_input);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| {
                    self.render(frame);
                })?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.report_view.handle_key_event(key_event).is_consumed() {
            return;
        }
        self.should_exit = event_handler::handle_keyboard_event(
            key_event,
            &mut self.path_input,
            &self.screen,
            &self.command_tx,
        );
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Title
                Constraint::Length(4),      // Upload
                Constraint::Percentage(40), // Stages
                Constraint::Min(6),         // Report
                Constraint::Length(1),      // Key hints
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);
        render_upload_panel(frame, chunks[1], &self.screen, &self.path_input);
        render_stage_list(frame, chunks[2], &self.screen);
        self.report_view.render(frame, chunks[3], &self.screen);
        self.render_hints(frame, chunks[4]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "MediDoc AI",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  Medical document analysis"),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = "Enter select/analyze  Tab switch view  ↑↓ scroll  Esc quit";
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

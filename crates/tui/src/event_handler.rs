//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling different types of events:
//! - Render instructions (from mdc-core)
//! - Keyboard events (user input)

use crate::screen::{ScreenRow, ScreenState, StageRow};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mdc_protocol::ipc::{Command, RenderInstruction};
use mdc_protocol::stage_models::StageStatus;
use mdc_protocol::view_models::ViewName;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Fold one render instruction into the screen state.
///
/// Instructions tagged with a run other than the current one are dropped so
/// that a superseded run can never overwrite the display.
pub fn handle_render_instruction(screen: &mut ScreenState, instruction: RenderInstruction) {
    if let (Some(current), Some(run_id)) = (screen.run_id, instruction.run_id()) {
        let starts_new_run = matches!(instruction, RenderInstruction::RunStarted { .. });
        if run_id != current && !starts_new_run {
            return;
        }
    }

    match instruction {
        RenderInstruction::ArtifactAccepted { artifact } => {
            screen.artifact = Some(artifact);
            screen.intake_message = None;
        }
        RenderInstruction::IntakeRejected { message } => {
            screen.intake_message = Some(message);
        }
        RenderInstruction::TriggerChanged { enabled } => {
            screen.trigger_enabled = enabled;
        }
        RenderInstruction::RunStarted {
            run_id,
            stage_count,
        } => {
            screen.run_id = Some(run_id);
            screen.stage_count = stage_count;
            screen.rows.clear();
            screen.report = None;
            screen.aborted = None;
        }
        RenderInstruction::Loading { message } => {
            screen.loading = Some(message);
            screen.report = None;
        }
        RenderInstruction::SectionHeading { title, .. } => {
            screen.rows.push(ScreenRow::Heading(title));
        }
        RenderInstruction::StageActivated {
            stage_index,
            name,
            icon,
            task_label,
            ..
        } => {
            screen.rows.push(ScreenRow::Stage(StageRow {
                index: stage_index,
                name,
                icon,
                label: task_label,
                percent: 0.0,
                status: StageStatus::Active,
            }));
        }
        RenderInstruction::StageProgress {
            stage_index,
            percent,
            ..
        } => {
            if let Some(stage) = screen.stage_mut(stage_index) {
                stage.percent = percent;
            }
        }
        RenderInstruction::StageCompleted {
            stage_index,
            completion_label,
            ..
        } => {
            if let Some(stage) = screen.stage_mut(stage_index) {
                stage.status = StageStatus::Complete;
                stage.label = completion_label;
            }
        }
        RenderInstruction::ReportRendered {
            report,
            active_view,
            ..
        } => {
            screen.loading = None;
            screen.report = Some(report);
            screen.active_view = active_view;
        }
        RenderInstruction::ViewChanged { view } => {
            screen.active_view = view;
        }
        RenderInstruction::RunAborted { reason, .. } => {
            screen.loading = None;
            screen.aborted = Some(reason);
        }
    }
}

/// Handle a keyboard event from the user.
///
/// Typed characters build a file path. `Enter` offers the typed path to the
/// intake gate, or starts a run when nothing is typed and the trigger is
/// enabled. `Tab`/`Shift+Tab` and `F1`/`F2` switch report views.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    path_input: &mut String,
    screen: &ScreenState,
    command_tx: &UnboundedSender<Command>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            return true;
        }
        KeyCode::Char('q') if path_input.is_empty() => return true,
        KeyCode::Tab => send_view(command_tx, cycle_view(screen.active_view, 1)),
        KeyCode::BackTab => send_view(command_tx, cycle_view(screen.active_view, -1)),
        KeyCode::F(n) => {
            if let Some(view) = ViewName::ALL.get(usize::from(n).saturating_sub(1)) {
                send_view(command_tx, *view);
            }
        }
        KeyCode::Char(c) => path_input.push(c),
        KeyCode::Backspace => {
            path_input.pop();
        }
        KeyCode::Enter => submit_input(path_input, screen, command_tx),
        _ => {}
    }

    false
}

/// Append pasted text to the path input, dropping line breaks.
pub fn handle_paste(pasted: &str, path_input: &mut String) {
    path_input.extend(pasted.chars().filter(|c| *c != '\n' && *c != '\r'));
}

fn submit_input(
    path_input: &mut String,
    screen: &ScreenState,
    command_tx: &UnboundedSender<Command>,
) {
    let path = path_input.trim();
    if !path.is_empty() {
        let _ = command_tx.send(Command::SelectFile {
            path: PathBuf::from(path),
        });
        path_input.clear();
    } else if screen.trigger_enabled {
        let _ = command_tx.send(Command::Submit);
    }
}

fn send_view(command_tx: &UnboundedSender<Command>, view: ViewName) {
    let _ = command_tx.send(Command::SelectView {
        view: view.as_str().to_string(),
    });
}

fn cycle_view(current: ViewName, step: isize) -> ViewName {
    let views = ViewName::ALL;
    let position = views.iter().position(|v| *v == current).unwrap_or(0) as isize;
    let next = (position + step).rem_euclid(views.len() as isize) as usize;
    views[next]
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::history::CommitHistory;
use crate::story::Step;

use super::state::{Tab, TuiState};

const CURSOR_STEP: f64 = 10.0;
const CURSOR_STEP_FAST: f64 = 50.0;
pub const HOVER_RADIUS: f64 = 15.0;

/// Handle a keyboard event, updating TUI state and returning `true` if the loop should exit.
pub fn handle_key_event(key: KeyEvent, state: &mut TuiState, history: &CommitHistory, steps: &[Step]) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Char('q')) {
            state.show_help = false;
        }
        return false;
    }

    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        CURSOR_STEP_FAST
    } else {
        CURSOR_STEP
    };

    let view = state.view;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => state.tab = state.tab.next(),
        KeyCode::BackTab => state.tab = state.tab.prev(),
        KeyCode::Char(']') => state.view = view.nudge_slider(5),
        KeyCode::Char('[') => state.view = view.nudge_slider(-5),
        KeyCode::Char('}') => state.view = view.nudge_slider(1),
        KeyCode::Char('{') => state.view = view.nudge_slider(-1),
        KeyCode::Left => state.view = view.move_cursor(-step, 0.0),
        KeyCode::Right => state.view = view.move_cursor(step, 0.0),
        KeyCode::Up => state.view = view.move_cursor(0.0, -step),
        KeyCode::Down => state.view = view.move_cursor(0.0, step),
        KeyCode::Char('b') => {
            state.view = view.begin_brush();
            state.tab = Tab::Scatter;
            state.set_status("Brushing: move the cursor, Enter to finish");
        }
        KeyCode::Enter if view.is_brushing() => {
            state.view = view.finish_brush();
            let n = state.view.selected(history).len();
            state.set_status(format!("{n} commits selected"));
        }
        KeyCode::Esc => {
            state.view = view.clear_selection();
            state.set_status("Selection cleared");
        }
        KeyCode::Char('n') => {
            let next = view.step.map_or(0, |i| i + 1);
            if next < steps.len() {
                state.view = view.enter_step(next, steps);
            }
        }
        KeyCode::Char('p') => {
            if let Some(i) = view.step.filter(|&i| i > 0) {
                state.view = view.enter_step(i - 1, steps);
            }
        }
        KeyCode::Char('y') => copy_focused_commit(state, history, steps),
        _ => {}
    }
    debug!(selection = ?state.view.selection, "key handled");
    false
}

/// Copies the hovered commit, or the active step's commit: its link when a
/// URL template is set, otherwise its id.
fn copy_focused_commit(state: &mut TuiState, history: &CommitHistory, steps: &[Step]) {
    let id = state
        .view
        .hovered(history, HOVER_RADIUS)
        .map(|c| c.url.clone().unwrap_or_else(|| c.id.clone()))
        .or_else(|| {
            state
                .view
                .step
                .and_then(|i| steps.get(i))
                .map(|s| s.url.clone().unwrap_or_else(|| s.commit_id.clone()))
        });

    let Some(id) = id else {
        state.set_status("No commit under the cursor");
        return;
    };

    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(id.clone())) {
        Ok(()) => state.set_status(format!("Copied {id}")),
        Err(e) => {
            warn!(error = %e, "clipboard unavailable");
            state.set_status(format!("Clipboard unavailable: {e}"));
        }
    }
}

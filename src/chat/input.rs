use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::controller::{ChatController, Focus, PendingPrompt};

const PAGE: u16 = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Submit(PendingPrompt),
    Quit,
}

/// Maps one key press onto controller transitions.
pub fn handle_key(controller: &mut ChatController, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Tab => controller.toggle_focus(),
        KeyCode::PageUp => controller.scroll_up(PAGE),
        KeyCode::PageDown => controller.scroll_down(PAGE),
        _ => match controller.focus() {
            Focus::Input => return handle_input_key(controller, key),
            Focus::History => handle_history_key(controller, key),
        },
    }
    KeyOutcome::Continue
}

fn handle_input_key(controller: &mut ChatController, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Enter => {
            if let Some(ticket) = controller.submit_input() {
                return KeyOutcome::Submit(ticket);
            }
        }
        KeyCode::Backspace => controller.backspace(),
        KeyCode::Delete => controller.delete(),
        KeyCode::Left => controller.move_cursor_left(),
        KeyCode::Right => controller.move_cursor_right(),
        KeyCode::Home => controller.move_cursor_home(),
        KeyCode::End => controller.move_cursor_end(),
        KeyCode::Char(c) => controller.insert_char(c),
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_history_key(controller: &mut ChatController, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => controller.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => controller.scroll_down(1),
        KeyCode::End | KeyCode::Char('G') => controller.scroll_to_latest(),
        KeyCode::Enter | KeyCode::Char('i') => controller.focus_input(),
        _ => {}
    }
}

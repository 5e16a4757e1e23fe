//! Keyboard handling for the catalog screen
//!
//! Keys either change [`AppState`] directly or map to an [`Action`] that
//! needs the view controller.

use super::state::{AppState, Field, Mode};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Work for the event loop after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the state change already made
    None,
    Quit,
    /// Filter and sort with the filter bar
    Apply,
    Reset,
    Reload,
    /// Ask before deleting the car under the cursor
    Delete,
    ConfirmDelete,
    CancelDelete,
    Buy,
    /// Open an empty listing form
    Add,
    /// Open the form for the car under the cursor
    Edit,
    /// Create or update from the open form
    SubmitForm,
    ToggleTheme,
    /// Dismiss the newest notification
    Dismiss,
    /// End the session and leave the screen
    Logout,
}

/// Poll for one event and handle it
///
/// # Errors
///
/// Returns an I/O error if the terminal cannot be read.
pub fn poll_and_handle(
    state: &mut AppState,
    len: usize,
    timeout: Duration,
) -> std::io::Result<Action> {
    if !event::poll(timeout)? {
        return Ok(Action::None);
    }

    let action = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key, len),
        _ => Action::None,
    };
    Ok(action)
}

/// Map a key to a state change or an action
pub fn handle_key(state: &mut AppState, key: KeyEvent, len: usize) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match state.mode {
        Mode::Normal => handle_normal_mode(state, key, len),
        Mode::Input(_) => handle_input_mode(state, key),
        Mode::Confirm => handle_confirm_mode(key),
        Mode::Form => handle_form_mode(state, key),
        Mode::Help => {
            // Any key closes help
            state.mode = Mode::Normal;
            Action::None
        }
    }
}

fn handle_normal_mode(state: &mut AppState, key: KeyEvent, len: usize) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        // Navigation
        KeyCode::Up => {
            state.cursor_up();
            Action::None
        }
        KeyCode::Down => {
            state.cursor_down(len);
            Action::None
        }
        KeyCode::Home => {
            state.jump_to_start();
            Action::None
        }
        KeyCode::End => {
            state.jump_to_end(len);
            Action::None
        }

        // Filter bar
        KeyCode::Char('/') => {
            state.mode = Mode::Input(Field::Brand);
            Action::None
        }
        KeyCode::Char('p') => {
            state.mode = Mode::Input(Field::MaxPrice);
            Action::None
        }
        KeyCode::Char('s') => {
            state.cycle_status();
            Action::None
        }
        KeyCode::Char('o') => {
            state.cycle_sort();
            Action::None
        }
        KeyCode::Enter | KeyCode::Char('f') => Action::Apply,
        KeyCode::Char('r') => Action::Reset,

        KeyCode::Char('d') => Action::Delete,
        KeyCode::Char('a') => Action::Add,
        KeyCode::Char('e') => Action::Edit,
        KeyCode::Char('b') => Action::Buy,
        KeyCode::Char('l') => Action::Logout,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('g') => Action::Reload,
        KeyCode::Char('x') => Action::Dismiss,
        KeyCode::Char('?') | KeyCode::F(1) => {
            state.mode = Mode::Help;
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_input_mode(state: &mut AppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            Action::Apply
        }
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            Action::None
        }
        _ => {
            edit_input(state, key);
            Action::None
        }
    }
}

fn edit_input(state: &mut AppState, key: KeyEvent) {
    let Some(input) = state.input_mut() else {
        return;
    };
    match key.code {
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
        _ => {}
    }
}

fn handle_form_mode(state: &mut AppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::SubmitForm,
        KeyCode::Esc => {
            state.close_form();
            Action::None
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = state.form.as_mut() {
                form.next_field();
            }
            Action::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = state.form.as_mut() {
                form.prev_field();
            }
            Action::None
        }
        // Same editing keys as the filter bar
        _ => {
            edit_input(state, key);
            Action::None
        }
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::CancelDelete,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CarId, CarStatus};
    use crate::search::SortKey;
    use crate::ui::tui::widgets::{CarFormState, FormField};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut state = AppState::new(Vec::new());
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q')), 0), Action::Quit);
        assert_eq!(handle_key(&mut state, press(KeyCode::Esc), 0), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, ctrl_c, 0), Action::Quit);
    }

    #[test]
    fn test_brand_input_then_apply() {
        let mut state = AppState::new(Vec::new());
        handle_key(&mut state, press(KeyCode::Char('/')), 3);
        assert_eq!(state.mode, Mode::Input(Field::Brand));

        for c in "bmw".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)), 3);
        }
        handle_key(&mut state, press(KeyCode::Backspace), 3);
        assert_eq!(state.brand, "bm");

        // 'q' is text while editing
        handle_key(&mut state, press(KeyCode::Char('q')), 3);
        assert_eq!(state.brand, "bmq");

        assert_eq!(handle_key(&mut state, press(KeyCode::Enter), 3), Action::Apply);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_cycles_and_navigation() {
        let mut state = AppState::new(Vec::new());
        handle_key(&mut state, press(KeyCode::Char('s')), 2);
        handle_key(&mut state, press(KeyCode::Char('o')), 2);
        handle_key(&mut state, press(KeyCode::Down), 2);
        handle_key(&mut state, press(KeyCode::Down), 2);

        assert_eq!(state.status, Some(CarStatus::Available));
        assert_eq!(state.sort, SortKey::PriceAscending);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_confirm_mode_keys() {
        let mut state = AppState::new(Vec::new());
        state.ask_delete(CarId(1), "Delete?".to_string());

        assert_eq!(handle_key(&mut state, press(KeyCode::Char('x')), 1), Action::None);
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('y')), 1),
            Action::ConfirmDelete
        );
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Esc), 1),
            Action::CancelDelete
        );
    }

    #[test]
    fn test_form_mode_keys() {
        let mut state = AppState::new(Vec::new());
        state.open_form(CarFormState::new_listing());

        for c in "Saab".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)), 0);
        }
        handle_key(&mut state, press(KeyCode::Tab), 0);
        for c in "900".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)), 0);
        }
        handle_key(&mut state, press(KeyCode::Backspace), 0);

        // Letters that are commands elsewhere are text here
        handle_key(&mut state, press(KeyCode::Char('q')), 0);
        assert_eq!(state.mode, Mode::Form);

        let form = state.form.as_ref().unwrap();
        assert_eq!(form.value(FormField::Brand), "Saab");
        assert_eq!(form.value(FormField::Model), "90q");

        assert_eq!(
            handle_key(&mut state, press(KeyCode::Enter), 0),
            Action::SubmitForm
        );
        assert_eq!(handle_key(&mut state, press(KeyCode::Esc), 0), Action::None);
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.form.is_none());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut state = AppState::new(Vec::new());
        handle_key(&mut state, press(KeyCode::Char('?')), 0);
        assert_eq!(state.mode, Mode::Help);
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q')), 0), Action::None);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_action_keys() {
        let mut state = AppState::new(Vec::new());
        let cases = [
            ('d', Action::Delete),
            ('b', Action::Buy),
            ('t', Action::ToggleTheme),
            ('g', Action::Reload),
            ('x', Action::Dismiss),
            ('r', Action::Reset),
            ('f', Action::Apply),
            ('a', Action::Add),
            ('e', Action::Edit),
            ('l', Action::Logout),
        ];
        for (key, action) in cases {
            assert_eq!(handle_key(&mut state, press(KeyCode::Char(key)), 0), action);
        }
    }
}

//! Terminal UI for browsing the catalog
//!
//! Draws the state of a [`ViewController`] with ratatui and feeds key presses
//! back into it. The controller is synchronous, so a key press is fully
//! handled before the next frame is drawn.

pub mod events;
pub mod state;
pub mod theme;
pub mod widgets;

use self::events::{Action, poll_and_handle};
use self::state::{AppState, Mode};
use self::theme::Palette;
use self::widgets::{CarForm, CarFormState, CarTable, ConfirmDialog, FilterBar, HelpBar, KeyHint, Toasts};
use super::error::Result;
use crate::notify::Severity;
use crate::service::CatalogService;
use crate::session::{Session, SessionStore};
use crate::catalog::CarDraft;
use crate::view::{MountOutcome, ViewController, ViewError};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the catalog screen until the user quits or logs out
///
/// The view should already be mounted. Theme changes and logout are saved
/// to `sessions` when one is given.
///
/// # Errors
///
/// Returns `UiError::IoError` if the terminal cannot be used.
pub fn run<S: CatalogService>(
    view: &mut ViewController<S>,
    sessions: Option<&SessionStore>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, view, sessions);
    cleanup_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_loop<S: CatalogService>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    view: &mut ViewController<S>,
    sessions: Option<&SessionStore>,
) -> Result<()> {
    let is_admin = view.session().is_some_and(Session::is_admin);
    let mut state = AppState::new(HelpBar::hints_for(is_admin));

    loop {
        view.notifications_mut().prune();
        state.clamp(view.displayed().len());

        terminal.draw(|frame| render(frame, &state, view))?;

        let action = poll_and_handle(&mut state, view.displayed().len(), POLL_INTERVAL)?;
        if action == Action::Quit {
            return Ok(());
        }
        perform(action, &mut state, view, sessions);
        if action == Action::Logout {
            return Ok(());
        }
    }
}

/// Carry out an action against the controller
pub fn perform<S: CatalogService>(
    action: Action,
    state: &mut AppState,
    view: &mut ViewController<S>,
    sessions: Option<&SessionStore>,
) {
    let outcome = match action {
        Action::None | Action::Quit => Ok(()),
        Action::Apply => match state.criteria() {
            Ok(criteria) => view.apply(criteria, state.sort).map(|_| state.cursor = 0),
            Err(e) => {
                view.notifications_mut().enqueue(e.to_string(), Severity::Error);
                Ok(())
            }
        },
        Action::Reset => view.reset().map(|()| state.clear_filters()),
        Action::Reload => {
            if let MountOutcome::Loaded(_) = view.refresh() {
                state.clear_filters();
            }
            Ok(())
        }
        Action::Delete => match view.displayed().get(state.cursor).map(|car| car.id) {
            Some(id) if view.session().is_some_and(Session::is_admin) => {
                state.ask_delete(id, view.delete_prompt(id));
                Ok(())
            }
            // Refused before any dialog is shown
            Some(id) => view.delete(id, &|_: &str| false).map(|_| ()),
            None => Ok(()),
        },
        Action::ConfirmDelete => match state.take_confirm() {
            Some(id) => view.delete(id, &|_: &str| true).map(|_| ()),
            None => Ok(()),
        },
        Action::CancelDelete => {
            state.take_confirm();
            Ok(())
        }
        Action::Add => {
            if view.session().is_some_and(Session::is_admin) {
                state.open_form(CarFormState::new_listing());
                Ok(())
            } else {
                view.create(&CarDraft::new()).map(|_| ())
            }
        }
        Action::Edit => match view.displayed().get(state.cursor).map(|car| car.id) {
            Some(id) if view.session().is_some_and(Session::is_admin) => {
                if let Some(form) = view.find(id).map(CarFormState::for_car) {
                    state.open_form(form);
                }
                Ok(())
            }
            Some(id) => view.edit(id, &CarDraft::new()).map(|_| ()),
            None => Ok(()),
        },
        Action::SubmitForm => match state.form.as_ref().map(|f| (f.target, f.to_draft())) {
            Some((target, Ok(draft))) => {
                let saved = match target {
                    Some(id) => view.edit(id, &draft),
                    None => view.create(&draft),
                };
                // The form stays open on failure so the text can be fixed
                saved.map(|_| {
                    state.close_form();
                })
            }
            Some((_, Err(e))) => {
                view.notifications_mut().enqueue(e.to_string(), Severity::Error);
                Ok(())
            }
            None => Ok(()),
        },
        Action::Buy => match view.displayed().get(state.cursor).map(|car| car.id) {
            Some(id) => view.purchase(id),
            None => Ok(()),
        },
        Action::ToggleTheme => {
            let theme = view.toggle_theme();
            if let Some(sessions) = sessions
                && let Err(e) = sessions.set_theme(theme)
            {
                warn!(error = %e, "failed to save theme");
            }
            Ok(())
        }
        Action::Dismiss => {
            if let Some(id) = view.notifications().latest().map(|n| n.id) {
                view.dismiss(id);
            }
            Ok(())
        }
        Action::Logout => {
            view.logout();
            state.clear_filters();
            if let Some(sessions) = sessions
                && let Err(e) = sessions.sign_out()
            {
                warn!(error = %e, "failed to clear saved session");
            }
            Ok(())
        }
    };

    if let Err(e) = outcome {
        report(view, &e);
    }
}

/// Surface errors the controller did not already queue
fn report<S: CatalogService>(view: &mut ViewController<S>, err: &ViewError) {
    match err {
        ViewError::Service(_) | ViewError::Invalid(_) => {}
        other => {
            view.notifications_mut()
                .enqueue(other.to_string(), Severity::Error);
        }
    }
}

fn render<S: CatalogService>(frame: &mut Frame, state: &AppState, view: &ViewController<S>) {
    let palette = Palette::for_theme(view.theme());
    let area = frame.area();

    frame.render_widget(Block::default().style(palette.base_style()), area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(FilterBar::new(state, &palette), chunks[0]);

    let title = match view.session() {
        Some(session) => format!(
            " Cars ({}) - {} ({}) ",
            view.displayed().len(),
            session.display_name,
            session.role
        ),
        None => format!(" Cars ({}) ", view.displayed().len()),
    };
    frame.render_widget(
        CarTable::new(view.displayed(), state.cursor, &palette).title(title),
        chunks[1],
    );
    frame.render_widget(HelpBar::new(&state.hints, &palette), chunks[2]);

    frame.render_widget(Toasts::new(view.notifications().visible(), &palette), chunks[1]);

    match state.mode {
        Mode::Confirm => {
            if let Some((_, dialog)) = &state.confirm {
                frame.render_widget(ConfirmDialog::new(dialog, &palette), area);
            }
        }
        Mode::Form => {
            if let Some(form) = &state.form {
                frame.render_widget(CarForm::new(form, &palette), area);
            }
        }
        Mode::Help => render_help(frame, area, &palette),
        Mode::Normal | Mode::Input(_) => {}
    }
}

fn render_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let keys = [
        KeyHint::new("Up/Down", "move"),
        KeyHint::new("/", "edit brand filter"),
        KeyHint::new("p", "edit max price"),
        KeyHint::new("s", "cycle status"),
        KeyHint::new("o", "cycle sort"),
        KeyHint::new("Enter/f", "apply filters"),
        KeyHint::new("r", "reset filters"),
        KeyHint::new("a", "add car (admin)"),
        KeyHint::new("e", "edit car (admin)"),
        KeyHint::new("d", "delete (admin)"),
        KeyHint::new("b", "buy (customer)"),
        KeyHint::new("t", "toggle theme"),
        KeyHint::new("g", "reload"),
        KeyHint::new("x", "dismiss notification"),
        KeyHint::new("l", "log out"),
        KeyHint::new("q/Esc", "quit"),
    ];

    let width = 40.min(area.width);
    #[allow(clippy::cast_possible_truncation)]
    let height = (keys.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let lines: Vec<Line> = keys
        .iter()
        .map(|k| Line::from(format!("{:>8}  {}", k.key, k.action)))
        .collect();

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.accent_style())
                .title(" Keys ")
                .style(palette.base_style()),
        ),
        rect,
    );
}

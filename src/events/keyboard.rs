//! Keyboard event handling by input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode};
use crate::source::EntityKind;

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    match app.input_mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Selector => handle_selector_mode(app, key),
        InputMode::StatusMenu => handle_status_menu_mode(key),
        InputMode::Help => handle_help_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('?') => Action::OpenHelp,

        // Record navigation
        KeyCode::Char('j') | KeyCode::Down => Action::NextRecord,
        KeyCode::Char('k') | KeyCode::Up => Action::PrevRecord,
        KeyCode::Char(c @ '1'..='9') => Action::SelectRecord((c as usize) - ('1' as usize)),

        // Field selectors
        KeyCode::Char('a') => Action::OpenSelector(EntityKind::Agent),
        KeyCode::Char('c') => Action::OpenSelector(EntityKind::City),
        KeyCode::Char('l') => Action::OpenSelector(EntityKind::Client),

        KeyCode::Char('s') => Action::OpenStatusMenu,

        _ => Action::None,
    }
}

fn handle_selector_mode(app: &App, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let page = app.selector_page_rows() as isize;

    match key.code {
        KeyCode::Esc => Action::SelectorCancel,

        KeyCode::Enter if ctrl => Action::SelectorConfirmSelected,
        KeyCode::Char('o') if ctrl => Action::SelectorConfirmSelected,
        KeyCode::Enter => Action::SelectorConfirmHighlighted,

        KeyCode::Down => Action::SelectorMove(1),
        KeyCode::Up => Action::SelectorMove(-1),
        KeyCode::Char('n') if ctrl => Action::SelectorMove(1),
        KeyCode::Char('p') if ctrl => Action::SelectorMove(-1),
        KeyCode::PageDown => Action::SelectorMove(page),
        KeyCode::PageUp => Action::SelectorMove(-page),
        KeyCode::Home => Action::SelectorHome,
        KeyCode::End => Action::SelectorEnd,

        KeyCode::Backspace => Action::SelectorBackspace,
        KeyCode::Char(c) if !ctrl => Action::SelectorInput(c),

        _ => Action::None,
    }
}

fn handle_status_menu_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::CloseStatusMenu,
        KeyCode::Char('j') | KeyCode::Down => Action::StatusMenuDown,
        KeyCode::Char('k') | KeyCode::Up => Action::StatusMenuUp,
        KeyCode::Enter => Action::StatusMenuConfirm,
        _ => Action::None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseHelp,
        _ => Action::None,
    }
}

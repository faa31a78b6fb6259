//! Central event handler that maps terminal events to actions.

use crossterm::event::{Event, KeyEventKind};

use crate::app::App;

use super::Action;
use super::keyboard::handle_key_event;
use super::mouse::handle_mouse_event;

/// Central event handler for the application.
pub struct EventHandler;

impl EventHandler {
    /// Handle a crossterm event (keyboard, mouse, paste) and return an action.
    pub fn handle_event(app: &App, event: &Event) -> Vec<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => vec![handle_key_event(app, *key)],
            Event::Mouse(mouse) => vec![handle_mouse_event(app, *mouse)],
            // Pasting into the search box types each character
            Event::Paste(text) if app.selector_open() => {
                text.chars().filter(|c| !c.is_control()).map(Action::SelectorInput).collect()
            }
            _ => vec![],
        }
    }
}

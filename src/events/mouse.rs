//! Mouse event handling.
//!
//! Mouse events are dispatched through the interaction registry, which is
//! populated by UI components during each render. This allows components
//! to define their own clickable/scrollable regions without modifying
//! the mouse handler.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

use super::Action;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(app: &App, mouse: MouseEvent) -> Action {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::ScrollUp => app.interactions.handle_scroll_up(x, y),
        MouseEventKind::ScrollDown => app.interactions.handle_scroll_down(x, y),
        MouseEventKind::Down(MouseButton::Left) => app.interactions.handle_click(x, y),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ClickRegion;
    use crate::tui::interaction::{InteractiveRegion, POPUP_PRIORITY};
    use crate::app::test_app;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_click_and_wheel_go_through_registry() {
        let mut app = test_app();
        app.interactions.register_scroll(
            "selector_list",
            ClickRegion::new(0, 0, 10, 10),
            Action::SelectorScroll(-1),
            Action::SelectorScroll(1),
        );
        app.interactions.register(
            InteractiveRegion::clickable("selector_item", ClickRegion::new(0, 2, 10, 1), Action::SelectorClick(2))
                .with_priority(POPUP_PRIORITY),
        );

        assert_eq!(
            handle_mouse_event(&app, mouse(MouseEventKind::ScrollDown, 3, 3)),
            Action::SelectorScroll(1)
        );
        assert_eq!(
            handle_mouse_event(&app, mouse(MouseEventKind::Down(MouseButton::Left), 3, 2)),
            Action::SelectorClick(2)
        );
        assert_eq!(
            handle_mouse_event(&app, mouse(MouseEventKind::Down(MouseButton::Left), 30, 30)),
            Action::None
        );
    }
}

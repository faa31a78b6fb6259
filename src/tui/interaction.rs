//! Mouse hit-testing for rendered widgets.
//!
//! Widgets record where they were drawn while rendering; the mouse handler
//! later asks the registry which action a click or wheel tick at a cell maps
//! to. The registry is emptied at the start of every frame.
//!
//! ```ignore
//! registry.register(
//!     InteractiveRegion::clickable("selector_item", ClickRegion::new(x, y, width, 1), Action::SelectorClick(row))
//!         .with_priority(POPUP_PRIORITY),
//! );
//! let action = registry.handle_click(column, row);
//! ```

use crate::app::ClickRegion;
use crate::events::Action;
use crate::log;

/// Priority for popup contents
pub const POPUP_PRIORITY: i32 = 10;

/// Priority for the area behind a popup, which swallows stray clicks
pub const BACKDROP_PRIORITY: i32 = 5;

/// A rectangle on screen plus what the mouse does there.
#[derive(Debug, Clone)]
pub struct InteractiveRegion {
    /// Name shown in the event log
    pub id: &'static str,
    pub bounds: ClickRegion,
    pub on_click: Option<Action>,
    /// Wheel up and wheel down actions
    pub on_wheel: Option<(Action, Action)>,
    /// Overlapping regions resolve to the highest priority
    pub priority: i32,
}

impl InteractiveRegion {
    fn new(id: &'static str, bounds: ClickRegion) -> Self {
        Self {
            id,
            bounds,
            on_click: None,
            on_wheel: None,
            priority: 0,
        }
    }

    pub fn clickable(id: &'static str, bounds: ClickRegion, action: Action) -> Self {
        Self {
            on_click: Some(action),
            ..Self::new(id, bounds)
        }
    }

    pub fn scrollable(id: &'static str, bounds: ClickRegion, up: Action, down: Action) -> Self {
        Self {
            on_wheel: Some((up, down)),
            ..Self::new(id, bounds)
        }
    }

    /// Region behind a popup that swallows clicks and wheel events
    pub fn backdrop(id: &'static str, bounds: ClickRegion) -> Self {
        Self {
            on_click: Some(Action::None),
            on_wheel: Some((Action::None, Action::None)),
            priority: BACKDROP_PRIORITY,
            ..Self::new(id, bounds)
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.bounds.contains(x, y)
    }
}

/// Regions drawn during the current frame.
#[derive(Debug, Default)]
pub struct InteractionRegistry {
    regions: Vec<InteractiveRegion>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, region: InteractiveRegion) {
        self.regions.push(region);
    }

    pub fn register_scroll(&mut self, id: &'static str, bounds: ClickRegion, up: Action, down: Action) {
        self.register(InteractiveRegion::scrollable(id, bounds, up, down));
    }

    /// Two-line row of the record list
    pub fn register_record_item(&mut self, record_idx: usize, bounds: ClickRegion) {
        self.register(InteractiveRegion::clickable(
            "record_item",
            bounds,
            Action::SelectRecord(record_idx),
        ));
    }

    /// Action for a left click at (x, y), or `Action::None` when nothing was hit.
    pub fn handle_click(&self, x: u16, y: u16) -> Action {
        match self.hit(x, y, |r| r.on_click.as_ref()) {
            Some((id, action)) => {
                log::log_event(&format!("click {} -> {:?}", id, action));
                action
            }
            None => Action::None,
        }
    }

    pub fn handle_scroll_up(&self, x: u16, y: u16) -> Action {
        self.hit(x, y, |r| r.on_wheel.as_ref().map(|(up, _)| up))
            .map_or(Action::None, |(_, action)| action)
    }

    pub fn handle_scroll_down(&self, x: u16, y: u16) -> Action {
        self.hit(x, y, |r| r.on_wheel.as_ref().map(|(_, down)| down))
            .map_or(Action::None, |(_, action)| action)
    }

    fn hit(
        &self,
        x: u16,
        y: u16,
        handler: impl Fn(&InteractiveRegion) -> Option<&Action>,
    ) -> Option<(&'static str, Action)> {
        // Ties go to the region registered first
        self.regions
            .iter()
            .filter(|r| r.contains(x, y))
            .filter_map(|r| handler(r).map(|action| (r, action)))
            .fold(None::<(&InteractiveRegion, &Action)>, |best, (region, action)| match best {
                Some((best_region, _)) if best_region.priority >= region.priority => best,
                _ => Some((region, action)),
            })
            .map(|(region, action)| (region.id, action.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_half_open() {
        let row = InteractiveRegion::clickable("row", ClickRegion::new(4, 7, 12, 1), Action::SelectorClick(0));

        assert!(row.contains(4, 7));
        assert!(row.contains(15, 7));
        assert!(!row.contains(16, 7));
        assert!(!row.contains(4, 8));
        assert!(!row.contains(3, 7));
    }

    #[test]
    fn test_popup_row_beats_record_behind_it() {
        let mut registry = InteractionRegistry::new();
        registry.register_record_item(0, ClickRegion::new(0, 0, 80, 2));
        registry.register(
            InteractiveRegion::clickable("selector_item", ClickRegion::new(10, 1, 40, 1), Action::SelectorClick(3))
                .with_priority(POPUP_PRIORITY),
        );

        assert_eq!(registry.handle_click(20, 1), Action::SelectorClick(3));
        assert_eq!(registry.handle_click(5, 1), Action::SelectRecord(0));
        assert_eq!(registry.handle_click(5, 9), Action::None);
    }

    #[test]
    fn test_equal_priority_goes_to_first_registered() {
        let mut registry = InteractionRegistry::new();
        registry.register_record_item(1, ClickRegion::new(0, 0, 10, 2));
        registry.register_record_item(2, ClickRegion::new(0, 0, 10, 2));

        assert_eq!(registry.handle_click(1, 1), Action::SelectRecord(1));
    }

    #[test]
    fn test_popup_backdrop_swallows_clicks_and_wheel() {
        let mut registry = InteractionRegistry::new();
        registry.register_record_item(2, ClickRegion::new(0, 4, 30, 2));
        registry.register_scroll(
            "record_list",
            ClickRegion::new(0, 0, 30, 20),
            Action::PrevRecord,
            Action::NextRecord,
        );
        assert_eq!(registry.handle_scroll_down(5, 5), Action::NextRecord);

        registry.register(
            InteractiveRegion::scrollable(
                "selector_list",
                ClickRegion::new(40, 5, 20, 10),
                Action::SelectorScroll(-1),
                Action::SelectorScroll(1),
            )
            .with_priority(POPUP_PRIORITY),
        );
        registry.register(InteractiveRegion::backdrop("backdrop", ClickRegion::new(0, 0, 100, 40)));

        assert_eq!(registry.handle_click(5, 5), Action::None);
        assert_eq!(registry.handle_scroll_down(5, 5), Action::None);
        assert_eq!(registry.handle_scroll_up(45, 6), Action::SelectorScroll(-1));

        registry.clear();
        assert_eq!(registry.handle_scroll_down(45, 6), Action::None);
    }
}

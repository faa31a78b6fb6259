//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents that can be logged, replayed, or customized.

use crate::source::EntityKind;

/// Actions that can be dispatched from event handlers.
///
/// These represent user intents and are processed by the App to update state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === Application ===
    /// Quit the application
    Quit,
    /// Open help popup
    OpenHelp,
    /// Close help popup
    CloseHelp,

    // === Record navigation ===
    /// Highlight next record
    NextRecord,
    /// Highlight previous record
    PrevRecord,
    /// Highlight record by index
    SelectRecord(usize),

    // === Entity selector ===
    /// Open the selector for a field of the highlighted record
    OpenSelector(EntityKind),
    /// Type into the search box
    SelectorInput(char),
    /// Delete the last search character
    SelectorBackspace,
    /// Move the highlight by a number of rows
    SelectorMove(isize),
    /// Jump to the first row
    SelectorHome,
    /// Jump to the last loaded row
    SelectorEnd,
    /// Mouse wheel over the list (positive = down)
    SelectorScroll(i32),
    /// Click on a visible row
    SelectorClick(usize),
    /// Confirm the highlighted row
    SelectorConfirmHighlighted,
    /// Confirm the current selection without picking a new row
    SelectorConfirmSelected,
    /// Dismiss the selector
    SelectorCancel,

    // === Status menu ===
    /// Open the status menu for the highlighted record
    OpenStatusMenu,
    /// Close the status menu
    CloseStatusMenu,
    /// Navigate status menu up
    StatusMenuUp,
    /// Navigate status menu down
    StatusMenuDown,
    /// Apply the highlighted status
    StatusMenuConfirm,
    /// Click on a status choice
    StatusMenuClick(usize),

    // === No-op ===
    /// No action to take
    None,
}

//! UI components for the TUI.
//!
//! This module organizes UI rendering into logical components.
//!
//! # Component Organization
//!
//! - `record_list` - Records with status badges (left column)
//! - `record_detail` - Fields and next statuses of the highlighted record
//! - `entity_selector` - Searchable, paginated selector popup
//! - `status_menu` - Status transition menu
//! - `help_popup` - Help overlay with keybindings
//! - `separators` - Vertical line separator

mod entity_selector;
mod help_popup;
mod record_detail;
mod record_list;
mod separators;
mod status_menu;

// Re-export all render functions for use in ui.rs
pub use entity_selector::render_entity_selector;
pub use help_popup::render_help_popup;
pub use record_detail::render_record_detail;
pub use record_list::render_record_list;
pub use separators::render_separator;
pub use status_menu::render_status_menu;

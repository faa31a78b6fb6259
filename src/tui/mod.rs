//! Terminal UI: layout, components and mouse hit regions.

pub mod components;
pub mod interaction;
pub mod theme;
pub mod ui;

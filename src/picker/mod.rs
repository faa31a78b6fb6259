//! Generic picker module
//!
//! The highlight-navigation trait used by the selector and the status menu.

mod traits;

pub use traits::Picker;

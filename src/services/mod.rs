//! Services module
//!
//! Background work the UI loop hands off and hears back from over channels.

mod fetch;

pub use fetch::FetchDispatcher;

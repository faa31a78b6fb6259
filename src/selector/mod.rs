//! Searchable, infinitely scrolling entity selector.
//!
//! - `item` - selectable items, page tokens and page results
//! - `debounce` - deferred search notification
//! - `scroll` - near-end detection and wheel smoothing
//! - `state` - the selector state machine itself

mod debounce;
mod item;
mod scroll;
mod state;

pub use debounce::DEFAULT_SEARCH_DEBOUNCE_MS;
pub use item::{ItemId, PageResult, PageToken, SelectableItem};
pub use scroll::DEFAULT_NEAR_END_THRESHOLD;
pub use state::{
    CancelPolicy, PaginatedSelector, Phase, SelectorConfig, SelectorEvent, SelectorProps,
};

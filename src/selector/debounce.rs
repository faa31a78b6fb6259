//! Search input debouncing.
//!
//! The search text is updated on every keystroke, but the host is only told
//! about it once the input has been quiet for the debounce window.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut debouncer = SearchDebouncer::new(300);
//!
//! // On keystroke:
//! debouncer.input("ahm", Instant::now());
//!
//! // On every tick:
//! if let Some(text) = debouncer.poll(Instant::now()) {
//!     host.search(text);
//! }
//! ```

use std::time::{Duration, Instant};

/// Default debounce window for search input (milliseconds)
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Defers search notifications until typing pauses.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    /// Text waiting to be emitted
    pending: Option<String>,
    /// Time of last keystroke
    last_input: Option<Instant>,
    /// Debounce window
    window: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}

impl SearchDebouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: None,
            last_input: None,
            window: Duration::from_millis(debounce_ms),
        }
    }

    /// Record a new value of the search text, restarting the window.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(text.into());
        self.last_input = Some(now);
    }

    /// Return the pending text once the window has elapsed since the last input.
    ///
    /// Each burst of input is emitted at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last = self.last_input?;
        if now.saturating_duration_since(last) < self.window {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    /// Drop any pending value.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapid_input_emits_once_with_final_text() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(300);

        debouncer.input("a", start);
        debouncer.input("ah", start + Duration::from_millis(100));
        assert!(debouncer.poll(start + Duration::from_millis(250)).is_none());
        debouncer.input("ahm", start + Duration::from_millis(200));

        // 300ms after the first keystroke, but only 100ms after the last
        assert!(debouncer.poll(start + Duration::from_millis(300)).is_none());

        let fired = debouncer.poll(start + Duration::from_millis(500));
        assert_eq!(fired.as_deref(), Some("ahm"));

        // Nothing else fires afterwards
        assert!(debouncer.poll(start + Duration::from_millis(2000)).is_none());
    }

    #[test]
    fn test_poll_without_input_is_silent() {
        let mut debouncer = SearchDebouncer::default();
        assert!(debouncer.poll(Instant::now()).is_none());
    }

    #[test]
    fn test_reset_discards_pending() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(10);
        debouncer.input("sara", start);
        debouncer.reset();
        assert!(debouncer.poll(start + Duration::from_millis(50)).is_none());
    }

    #[test]
    fn test_empty_text_is_still_emitted() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(10);
        debouncer.input("", start);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(10)).as_deref(),
            Some("")
        );
    }
}

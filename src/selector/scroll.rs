//! Scroll geometry and wheel-event smoothing for the selector list.
//!
//! `ScrollMetrics` answers "is the viewport close enough to the end of the
//! list to ask for the next page". `ScrollHelper` accumulates wheel deltas
//! over a short window so trackpads do not produce jittery movement.
//!
//! # Example
//!
//! ```rust,ignore
//! let metrics = ScrollMetrics::new(content_rows, scroll_offset, viewport_rows);
//! if metrics.is_near_end(threshold) {
//!     // request the next page
//! }
//! ```

use std::time::{Duration, Instant};

/// Default near-end threshold in list rows.
pub const DEFAULT_NEAR_END_THRESHOLD: u32 = 2;

/// Snapshot of a scrollable region, in any consistent unit (rows here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Total height of the scrollable content
    pub content_height: u32,
    /// Offset of the viewport's top edge into the content
    pub scroll_top: u32,
    /// Height of the visible viewport
    pub viewport_height: u32,
}

impl ScrollMetrics {
    pub fn new(content_height: u32, scroll_top: u32, viewport_height: u32) -> Self {
        Self {
            content_height,
            scroll_top,
            viewport_height,
        }
    }

    /// Distance from the viewport's bottom edge to the end of the content.
    pub fn remaining(&self) -> u32 {
        self.content_height
            .saturating_sub(self.scroll_top)
            .saturating_sub(self.viewport_height)
    }

    /// True once `remaining <= threshold`.
    ///
    /// Content shorter than the viewport is always near its end.
    pub fn is_near_end(&self, threshold: u32) -> bool {
        self.remaining() <= threshold
    }

    /// Largest valid scroll offset for this content
    pub fn max_scroll_top(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

/// Helper for debouncing scroll events.
///
/// Accumulates scroll deltas and only returns a value once the accumulated
/// delta reaches the threshold, restarting when the window has elapsed.
#[derive(Debug, Clone)]
pub struct ScrollHelper {
    /// Accumulated scroll delta since last emission
    accumulated_delta: i32,
    /// Time of last scroll event
    last_event: Option<Instant>,
    /// Debounce window
    window: Duration,
    /// Minimum delta before emitting
    threshold: i32,
}

impl Default for ScrollHelper {
    fn default() -> Self {
        Self::new(50, 1)
    }
}

impl ScrollHelper {
    /// # Arguments
    /// * `debounce_ms` - Time window for accumulating scroll events (milliseconds)
    /// * `threshold` - Minimum accumulated delta before emitting a scroll action
    pub fn new(debounce_ms: u64, threshold: i32) -> Self {
        Self {
            accumulated_delta: 0,
            last_event: None,
            window: Duration::from_millis(debounce_ms),
            threshold,
        }
    }

    /// Accumulate a delta observed at `now` and return the total if ready.
    pub fn accumulate_at(&mut self, delta: i32, now: Instant) -> Option<i32> {
        match self.last_event {
            Some(last) if now.saturating_duration_since(last) <= self.window => {
                self.accumulated_delta += delta;
            }
            // First event, or the window elapsed: start fresh
            _ => self.accumulated_delta = delta,
        }

        self.last_event = Some(now);
        self.flush()
    }

    /// Emit the accumulated delta if it reached the threshold.
    pub fn flush(&mut self) -> Option<i32> {
        if self.accumulated_delta.abs() >= self.threshold {
            let result = self.accumulated_delta;
            self.accumulated_delta = 0;
            Some(result)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_delta = 0;
        self.last_event = None;
    }
}

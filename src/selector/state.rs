//! Paginated, searchable selector state machine.
//!
//! The selector never owns the authoritative list. The host feeds it the full
//! accumulated-so-far list through [`PaginatedSelector::sync`] after every
//! change and receives the user's intents back as [`SelectorEvent`]s:
//!
//! | Event | Host is expected to |
//! |---|---|
//! | `Search(text)` | re-fetch page 1 filtered by `text` and replace its list |
//! | `LoadMore { page }` | fetch `page`, append it, toggle `loading_more` |
//! | `Confirm(item)` | persist `item.id` and dismiss the popup |
//! | `Cancel` | dismiss the popup |
//!
//! Lifecycle: `Idle -> LoadingInitial -> Ready <-> LoadingMore`,
//! `Ready <-> Searching`, then `Closed` after a confirm or cancel. Every
//! [`PaginatedSelector::open`] goes back through `LoadingInitial`.

use std::time::Instant;

use serde::Deserialize;

use crate::picker::Picker;

use super::debounce::{DEFAULT_SEARCH_DEBOUNCE_MS, SearchDebouncer};
use super::item::{ItemId, PageToken, SelectableItem};
use super::scroll::{DEFAULT_NEAR_END_THRESHOLD, ScrollHelper, ScrollMetrics};

/// What happens to the selection when the user cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelPolicy {
    /// Restore the selection the popup was opened with
    #[default]
    Revert,
    /// Drop the selection entirely (host clears its field too)
    Clear,
}

/// Selector configuration supplied by the host.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Prompt shown while nothing is selected
    pub label: String,
    /// Suppress all interaction
    pub disabled: bool,
    /// Quiet period before a search is reported
    pub search_debounce_ms: u64,
    /// Remaining rows below the viewport that count as "near the end"
    pub near_end_threshold: u32,
    /// Whether the host handles `LoadMore`
    pub load_more: bool,
    pub cancel_policy: CancelPolicy,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            label: "Select".to_string(),
            disabled: false,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            near_end_threshold: DEFAULT_NEAR_END_THRESHOLD,
            load_more: true,
            cancel_policy: CancelPolicy::default(),
        }
    }
}

/// Host state re-supplied to the selector after every host update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorProps {
    /// Full accumulated list, not a delta
    pub items: Vec<SelectableItem>,
    pub has_more: bool,
    /// First page (or a search reload) is in flight
    pub loading_initial: bool,
    /// A next-page fetch is in flight
    pub loading_more: bool,
    pub total_count: Option<u64>,
    /// Last page the host has appended
    pub loaded_page: PageToken,
    /// Bumped by the host whenever any of the above changed
    pub revision: u64,
}

/// Intents reported to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEvent {
    Search(String),
    LoadMore { page: PageToken },
    Confirm(SelectableItem),
    Cancel,
}

/// Observable selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingInitial,
    Ready,
    LoadingMore,
    Searching,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Idle,
    Open,
    Closed,
}

#[derive(Debug, Clone)]
pub struct PaginatedSelector {
    config: SelectorConfig,
    visibility: Visibility,

    accumulated_items: Vec<SelectableItem>,
    search_text: String,
    debouncer: SearchDebouncer,
    current_page: PageToken,
    has_more: bool,
    total_count: Option<u64>,

    host_loading_initial: bool,
    host_loading_more: bool,
    /// A search fired and the host has not delivered its first page yet
    search_in_flight: bool,
    /// `LoadMore` fired and the host has not answered with a newer revision
    load_more_pending: bool,
    /// Revision of the last accepted props, `None` right after `open`
    synced_revision: Option<u64>,

    selected_item: Option<SelectableItem>,
    initial_selected_id: Option<ItemId>,
    /// The initial item once it has been seen in a page
    initial_item: Option<SelectableItem>,
    /// The user picked something during this session
    selection_touched: bool,

    highlighted: usize,
    scroll_offset: usize,
    viewport_rows: usize,
    wheel: ScrollHelper,
}

impl PaginatedSelector {
    pub fn new(config: SelectorConfig) -> Self {
        let debouncer = SearchDebouncer::new(config.search_debounce_ms);
        Self {
            config,
            visibility: Visibility::Idle,
            accumulated_items: Vec::new(),
            search_text: String::new(),
            debouncer,
            current_page: PageToken::FIRST,
            has_more: false,
            total_count: None,
            host_loading_initial: false,
            host_loading_more: false,
            search_in_flight: false,
            load_more_pending: false,
            synced_revision: None,
            selected_item: None,
            initial_selected_id: None,
            initial_item: None,
            selection_touched: false,
            highlighted: 0,
            scroll_offset: 0,
            viewport_rows: 10,
            wheel: ScrollHelper::new(50, 1),
        }
    }

    /// Open (or reopen) the selector.
    ///
    /// All transient state is reset and `selected_item` is re-derived from
    /// `initial_selected_id`. No match simply leaves nothing selected.
    pub fn open(&mut self, items: Vec<SelectableItem>, initial_selected_id: Option<ItemId>) {
        self.visibility = Visibility::Open;
        self.accumulated_items = items;
        self.search_text.clear();
        self.debouncer.reset();
        self.current_page = PageToken::FIRST;
        self.has_more = false;
        self.total_count = None;
        self.host_loading_initial = true;
        self.host_loading_more = false;
        self.search_in_flight = false;
        self.load_more_pending = false;
        self.synced_revision = None;
        self.initial_selected_id = initial_selected_id;
        self.selection_touched = false;
        self.initial_item = self.find_initial();
        self.selected_item = self.initial_item.clone();
        self.scroll_offset = 0;
        self.wheel.reset();
        self.highlight_selected();
    }

    /// Accept the host's current state.
    pub fn sync(&mut self, props: SelectorProps) {
        if self.visibility != Visibility::Open {
            return;
        }

        self.accumulated_items = props.items;
        self.has_more = props.has_more;
        self.total_count = props.total_count;
        self.current_page = props.loaded_page;
        self.host_loading_initial = props.loading_initial;
        self.host_loading_more = props.loading_more;
        let advanced = self.synced_revision.is_none_or(|seen| props.revision > seen);
        if advanced && !props.loading_more {
            self.load_more_pending = false;
        }
        self.synced_revision = Some(props.revision);
        if !props.loading_initial {
            self.search_in_flight = false;
        }

        self.clamp_highlight();
        self.clamp_scroll();

        if self.initial_item.is_none() {
            self.initial_item = self.find_initial();
            if !self.selection_touched && self.selected_item.is_none() && self.initial_item.is_some() {
                self.selected_item = self.initial_item.clone();
                self.highlight_selected();
            }
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match self.visibility {
            Visibility::Idle => Phase::Idle,
            Visibility::Closed => Phase::Closed,
            Visibility::Open if self.search_in_flight => Phase::Searching,
            Visibility::Open if self.host_loading_initial => Phase::LoadingInitial,
            Visibility::Open if self.is_loading_more() => Phase::LoadingMore,
            Visibility::Open => Phase::Ready,
        }
    }

    pub fn is_loading_initial(&self) -> bool {
        self.host_loading_initial || self.search_in_flight
    }

    pub fn is_loading_more(&self) -> bool {
        self.host_loading_more || self.load_more_pending
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn current_page(&self) -> PageToken {
        self.current_page
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn accumulated_items(&self) -> &[SelectableItem] {
        &self.accumulated_items
    }

    pub fn selected_item(&self) -> Option<&SelectableItem> {
        self.selected_item.as_ref()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Items that pass the client-side filter, in display order.
    ///
    /// This runs on top of the server-side filtering so typing narrows the
    /// already-loaded rows before the debounced search comes back.
    pub fn visible_items(&self) -> Vec<&SelectableItem> {
        self.accumulated_items
            .iter()
            .filter(|item| item.matches(&self.search_text))
            .collect()
    }

    pub fn highlighted_item(&self) -> Option<&SelectableItem> {
        self.visible_items().get(self.highlighted).copied()
    }

    fn interactive(&self) -> bool {
        self.visibility == Visibility::Open && !self.config.disabled
    }

    // === Search ===

    /// Update the search text now and restart the debounce window.
    pub fn on_search_text_changed(&mut self, text: impl Into<String>, now: Instant) {
        if !self.interactive() {
            return;
        }
        self.search_text = text.into();
        self.debouncer.input(self.search_text.clone(), now);
        self.highlighted = 0;
        self.scroll_offset = 0;
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        let mut text = self.search_text.clone();
        text.push(c);
        self.on_search_text_changed(text, now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        let mut text = self.search_text.clone();
        if text.pop().is_some() {
            self.on_search_text_changed(text, now);
        }
    }

    /// Emit a debounced search once the window has elapsed.
    ///
    /// Firing resets pagination to the first page and drops the accumulated
    /// list; the host answers with a fresh first page.
    pub fn tick(&mut self, now: Instant) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        let text = self.debouncer.poll(now)?;

        self.current_page = PageToken::FIRST;
        self.accumulated_items.clear();
        self.has_more = false;
        self.total_count = None;
        self.search_in_flight = true;
        self.load_more_pending = false;
        self.highlighted = 0;
        self.scroll_offset = 0;

        Some(SelectorEvent::Search(text))
    }

    // === Pagination ===

    /// Ask the host for the next page if every guard allows it.
    pub fn on_scroll_near_end(&mut self) -> Option<SelectorEvent> {
        if !self.interactive()
            || !self.config.load_more
            || !self.has_more
            || self.is_loading_more()
            || self.is_loading_initial()
        {
            return None;
        }
        self.load_more_pending = true;
        Some(SelectorEvent::LoadMore {
            page: self.current_page.next(),
        })
    }

    /// Run near-end detection for the given geometry.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<SelectorEvent> {
        if metrics.is_near_end(self.config.near_end_threshold) {
            self.on_scroll_near_end()
        } else {
            None
        }
    }

    /// Geometry of the list viewport, one row per visible item.
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.visible_items().len() as u32,
            self.scroll_offset as u32,
            self.viewport_rows as u32,
        )
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.clamp_scroll();
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Scroll the list by `delta` rows.
    pub fn scroll_by(&mut self, delta: i32) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        let max = self.metrics().max_scroll_top() as usize;
        self.scroll_offset = self
            .scroll_offset
            .saturating_add_signed(delta as isize)
            .min(max);
        // Keep the highlight inside the viewport
        let last_row = self.scroll_offset + self.viewport_rows - 1;
        self.highlighted = self.highlighted.clamp(self.scroll_offset, last_row);
        self.clamp_highlight();
        self.on_scroll(self.metrics())
    }

    /// Mouse wheel input, smoothed by the scroll helper.
    pub fn wheel(&mut self, delta: i32, now: Instant) -> Option<SelectorEvent> {
        let delta = self.wheel.accumulate_at(delta, now)?;
        self.scroll_by(delta)
    }

    /// Move the highlight, keep it in view and check for the list end.
    pub fn move_highlight(&mut self, delta: isize) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        self.move_by(delta);
        self.follow_highlight();
        self.on_scroll(self.metrics())
    }

    pub fn highlight_last(&mut self) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        self.select_last();
        self.follow_highlight();
        self.on_scroll(self.metrics())
    }

    pub fn highlight_first(&mut self) {
        if self.interactive() {
            self.select_first();
            self.follow_highlight();
        }
    }

    fn follow_highlight(&mut self) {
        if self.highlighted < self.scroll_offset {
            self.scroll_offset = self.highlighted;
        } else if self.highlighted >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = self.highlighted + 1 - self.viewport_rows;
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self.metrics().max_scroll_top() as usize;
        self.scroll_offset = self.scroll_offset.min(max);
    }

    // === Selection ===

    /// Select `item` and report it; this ends the selection flow.
    pub fn on_item_clicked(&mut self, item: SelectableItem) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        self.selected_item = Some(item.clone());
        self.selection_touched = true;
        self.visibility = Visibility::Closed;
        Some(SelectorEvent::Confirm(item))
    }

    /// Click on the n-th visible row.
    pub fn click_visible(&mut self, index: usize) -> Option<SelectorEvent> {
        let item = self.visible_items().get(index).map(|item| (*item).clone())?;
        self.on_item_clicked(item)
    }

    pub fn confirm_highlighted(&mut self) -> Option<SelectorEvent> {
        let item = self.highlighted_item().cloned()?;
        self.on_item_clicked(item)
    }

    /// Explicit confirm button; only enabled while something is selected.
    pub fn on_confirm_selected_clicked(&mut self) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        let item = self.selected_item.clone()?;
        self.visibility = Visibility::Closed;
        Some(SelectorEvent::Confirm(item))
    }

    pub fn can_confirm_selected(&self) -> bool {
        self.interactive() && self.selected_item.is_some()
    }

    /// Report a cancel. The accumulated list is left untouched.
    pub fn on_cancel(&mut self) -> Option<SelectorEvent> {
        if !self.interactive() {
            return None;
        }
        self.selected_item = match self.config.cancel_policy {
            CancelPolicy::Revert => self.initial_item.clone(),
            CancelPolicy::Clear => None,
        };
        self.visibility = Visibility::Closed;
        Some(SelectorEvent::Cancel)
    }

    /// Host-initiated close, allowed even when disabled.
    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
        self.debouncer.reset();
    }

    fn find_initial(&self) -> Option<SelectableItem> {
        let id = self.initial_selected_id.as_ref()?;
        self.accumulated_items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    fn highlight_selected(&mut self) {
        let selected_id = self.selected_item.as_ref().map(|item| item.id.clone());
        self.highlighted = selected_id
            .and_then(|id| self.visible_items().iter().position(|item| item.id == id))
            .unwrap_or(0);
        self.follow_highlight();
    }
}

impl Picker for PaginatedSelector {
    fn len(&self) -> usize {
        self.visible_items().len()
    }

    fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    fn set_highlighted_index(&mut self, index: usize) {
        self.highlighted = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn city(id: i64, label: &str) -> SelectableItem {
        SelectableItem::new(id, label)
    }

    fn ready_props(items: Vec<SelectableItem>, has_more: bool, page: u32, revision: u64) -> SelectorProps {
        SelectorProps {
            items,
            has_more,
            loading_initial: false,
            loading_more: false,
            total_count: None,
            loaded_page: PageToken::new(page),
            revision,
        }
    }

    fn opened(items: Vec<SelectableItem>, has_more: bool) -> PaginatedSelector {
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(items.clone(), None);
        selector.sync(ready_props(items, has_more, 1, 1));
        selector
    }

    #[test]
    fn test_new_selector_is_idle() {
        let selector = PaginatedSelector::new(SelectorConfig::default());
        assert_eq!(selector.phase(), Phase::Idle);
    }

    #[test]
    fn test_open_always_goes_through_loading_initial() {
        let items = vec![city(1, "Riyadh")];
        let mut selector = opened(items.clone(), false);
        assert_eq!(selector.phase(), Phase::Ready);

        selector.open(items, None);
        assert_eq!(selector.phase(), Phase::LoadingInitial);
    }

    #[test]
    fn test_debounced_search_fires_once_with_final_text() {
        let start = Instant::now();
        let mut selector = opened(vec![city(1, "Riyadh")], false);

        selector.on_search_text_changed("r", start);
        selector.on_search_text_changed("ri", start + Duration::from_millis(100));
        selector.on_search_text_changed("riy", start + Duration::from_millis(200));
        assert_eq!(selector.search_text(), "riy");

        assert!(selector.tick(start + Duration::from_millis(400)).is_none());
        assert_eq!(
            selector.tick(start + Duration::from_millis(500)),
            Some(SelectorEvent::Search("riy".to_string()))
        );
        assert!(selector.tick(start + Duration::from_millis(900)).is_none());
    }

    #[test]
    fn test_search_resets_pagination() {
        let start = Instant::now();
        let mut selector = opened(vec![city(1, "Riyadh"), city(2, "Jeddah")], true);
        selector.sync(ready_props(
            vec![city(1, "Riyadh"), city(2, "Jeddah"), city(3, "Mecca")],
            true,
            2,
            2,
        ));
        assert_eq!(selector.current_page().number(), 2);

        selector.on_search_text_changed("m", start);
        let event = selector.tick(start + Duration::from_millis(300));
        assert_eq!(event, Some(SelectorEvent::Search("m".to_string())));
        assert_eq!(selector.current_page(), PageToken::FIRST);
        assert!(selector.accumulated_items().is_empty());
        assert_eq!(selector.phase(), Phase::Searching);

        // No appending to pre-search items while the reload is in flight
        assert!(selector.on_scroll_near_end().is_none());

        // Host answers with a fresh first page
        selector.sync(ready_props(vec![city(3, "Mecca"), city(4, "Medina")], true, 1, 3));
        assert_eq!(selector.phase(), Phase::Ready);
        assert_eq!(
            selector.on_scroll_near_end(),
            Some(SelectorEvent::LoadMore { page: PageToken::new(2) })
        );
    }

    #[test]
    fn test_load_more_fires_once_while_in_flight() {
        let mut selector = opened(vec![city(1, "Riyadh"), city(2, "Jeddah")], true);

        assert!(matches!(
            selector.on_scroll_near_end(),
            Some(SelectorEvent::LoadMore { .. })
        ));
        assert!(selector.on_scroll_near_end().is_none());
        assert!(selector.on_scroll_near_end().is_none());

        // Host acknowledged and is still loading
        let mut loading = ready_props(vec![city(1, "Riyadh"), city(2, "Jeddah")], true, 1, 2);
        loading.loading_more = true;
        selector.sync(loading);
        assert_eq!(selector.phase(), Phase::LoadingMore);
        assert!(selector.on_scroll_near_end().is_none());

        // Page arrived
        selector.sync(ready_props(
            vec![city(1, "Riyadh"), city(2, "Jeddah"), city(3, "Mecca")],
            true,
            2,
            3,
        ));
        assert_eq!(
            selector.on_scroll_near_end(),
            Some(SelectorEvent::LoadMore { page: PageToken::new(3) })
        );
    }

    #[test]
    fn test_no_load_more_after_has_more_false() {
        let mut selector = opened(vec![city(1, "Riyadh")], false);
        for _ in 0..5 {
            assert!(selector.on_scroll_near_end().is_none());
        }
    }

    #[test]
    fn test_no_load_more_without_host_handler() {
        let config = SelectorConfig {
            load_more: false,
            ..SelectorConfig::default()
        };
        let mut selector = PaginatedSelector::new(config);
        selector.open(vec![], None);
        selector.sync(ready_props(vec![city(1, "Riyadh")], true, 1, 1));
        assert!(selector.on_scroll_near_end().is_none());
    }

    #[test]
    fn test_selection_round_trip() {
        let a = city(1, "A");
        let b = city(2, "B");
        let c = city(3, "C");
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(vec![a.clone(), b.clone(), c.clone()], Some(ItemId::Int(2)));
        assert_eq!(selector.selected_item(), Some(&b));

        let event = selector.on_item_clicked(c.clone());
        assert_eq!(event, Some(SelectorEvent::Confirm(c.clone())));
        assert_eq!(selector.selected_item(), Some(&c));
        assert_eq!(selector.phase(), Phase::Closed);
    }

    #[test]
    fn test_unknown_initial_id_leaves_nothing_selected() {
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(vec![city(1, "A")], Some(ItemId::Int(99)));
        assert!(selector.selected_item().is_none());
        assert!(!selector.can_confirm_selected());
        assert!(selector.on_confirm_selected_clicked().is_none());
    }

    #[test]
    fn test_initial_selection_resolves_when_page_arrives() {
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(vec![], Some(ItemId::Int(2)));
        assert!(selector.selected_item().is_none());

        selector.sync(ready_props(vec![city(1, "A"), city(2, "B")], false, 1, 1));
        assert_eq!(selector.selected_item().map(|i| i.label.as_str()), Some("B"));
    }

    #[test]
    fn test_client_side_filter() {
        let ahmed = SelectableItem::new(1_i64, "Ahmed").with_secondary("ahmed@x.com");
        let sara = SelectableItem::new(2_i64, "Sara").with_secondary("sara@x.com");
        let mut selector = opened(vec![ahmed.clone(), sara], false);

        selector.on_search_text_changed("ahm", Instant::now());
        assert_eq!(selector.visible_items(), vec![&ahmed]);
    }

    #[test]
    fn test_end_to_end_scroll_pagination() {
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.set_viewport_rows(5);
        selector.open(vec![], None);
        selector.sync(ready_props(vec![city(1, "Riyadh"), city(2, "Jeddah")], true, 1, 1));

        // Two rows in a five-row viewport are already at the end
        let event = selector.scroll_by(1);
        assert_eq!(event, Some(SelectorEvent::LoadMore { page: PageToken::new(2) }));

        selector.sync(ready_props(
            vec![city(1, "Riyadh"), city(2, "Jeddah"), city(3, "Mecca")],
            false,
            2,
            2,
        ));
        let labels: Vec<_> = selector
            .accumulated_items()
            .iter()
            .map(|i| i.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Riyadh", "Jeddah", "Mecca"]);

        assert!(selector.scroll_by(1).is_none());
        assert!(selector.on_scroll_near_end().is_none());
    }

    #[test]
    fn test_highlight_movement_triggers_load_more_near_end() {
        let items: Vec<_> = (1..=10).map(|i| city(i, &format!("City {}", i))).collect();
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.set_viewport_rows(4);
        selector.open(vec![], None);
        selector.sync(ready_props(items, true, 1, 1));

        // Rows 0..4 visible, 6 remaining: not near the end
        assert!(selector.move_highlight(1).is_none());
        let event = selector.highlight_last();
        assert_eq!(event, Some(SelectorEvent::LoadMore { page: PageToken::new(2) }));
        assert_eq!(selector.scroll_offset(), 6);
    }

    #[test]
    fn test_cancel_reverts_to_initial_selection() {
        let a = city(1, "A");
        let b = city(2, "B");
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(vec![a, b.clone()], Some(ItemId::Int(2)));
        selector.move_highlight(-1);

        assert_eq!(selector.on_cancel(), Some(SelectorEvent::Cancel));
        assert_eq!(selector.selected_item(), Some(&b));
        assert_eq!(selector.accumulated_items().len(), 2);
        assert_eq!(selector.phase(), Phase::Closed);
    }

    #[test]
    fn test_cancel_with_clear_policy() {
        let config = SelectorConfig {
            cancel_policy: CancelPolicy::Clear,
            ..SelectorConfig::default()
        };
        let mut selector = PaginatedSelector::new(config);
        selector.open(vec![city(1, "A")], Some(ItemId::Int(1)));
        assert_eq!(selector.on_cancel(), Some(SelectorEvent::Cancel));
        assert!(selector.selected_item().is_none());
    }

    #[test]
    fn test_disabled_selector_ignores_interaction() {
        let config = SelectorConfig {
            disabled: true,
            ..SelectorConfig::default()
        };
        let start = Instant::now();
        let mut selector = PaginatedSelector::new(config);
        selector.open(vec![city(1, "A")], None);
        selector.sync(ready_props(vec![city(1, "A")], true, 1, 1));

        selector.on_search_text_changed("a", start);
        assert_eq!(selector.search_text(), "");
        assert!(selector.tick(start + Duration::from_secs(1)).is_none());
        assert!(selector.on_scroll_near_end().is_none());
        assert!(selector.click_visible(0).is_none());
        assert!(selector.on_cancel().is_none());

        selector.close();
        assert_eq!(selector.phase(), Phase::Closed);
    }

    #[test]
    fn test_failed_load_more_without_has_more_reset_keeps_retrying() {
        // A host that forgets to clear has_more on error will see LoadMore
        // again once it publishes the failed page as a new revision
        let mut selector = opened(vec![city(1, "A")], true);
        assert!(selector.on_scroll_near_end().is_some());
        selector.sync(ready_props(vec![city(1, "A")], true, 1, 2));
        assert!(selector.on_scroll_near_end().is_some());
    }

    #[test]
    fn test_resync_without_new_revision_keeps_load_more_in_flight() {
        let items = vec![city(1, "Riyadh"), city(2, "Jeddah")];
        let mut selector = opened(items.clone(), true);
        assert_eq!(
            selector.on_scroll_near_end(),
            Some(SelectorEvent::LoadMore { page: PageToken::new(2) })
        );

        // Host re-renders before it has seen the request
        selector.sync(ready_props(items.clone(), true, 1, 1));
        assert!(selector.on_scroll_near_end().is_none());
        assert_eq!(selector.phase(), Phase::LoadingMore);

        let mut grown = items;
        grown.push(city(3, "Mecca"));
        selector.sync(ready_props(grown, true, 2, 2));
        assert_eq!(
            selector.on_scroll_near_end(),
            Some(SelectorEvent::LoadMore { page: PageToken::new(3) })
        );
    }

    #[test]
    fn test_cancel_after_search_reverts_to_initial_selection() {
        let start = Instant::now();
        let jeddah = city(2, "Jeddah");
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(vec![], Some(ItemId::Int(2)));
        selector.sync(ready_props(vec![city(1, "Riyadh"), jeddah.clone()], false, 1, 1));

        selector.on_search_text_changed("riy", start);
        assert!(selector.tick(start + Duration::from_millis(300)).is_some());
        selector.sync(ready_props(vec![city(1, "Riyadh")], false, 1, 2));

        assert_eq!(selector.on_cancel(), Some(SelectorEvent::Cancel));
        assert_eq!(selector.selected_item(), Some(&jeddah));
    }

    #[test]
    fn test_late_initial_selection_is_highlighted() {
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.open(vec![], Some(ItemId::Int(3)));
        selector.sync(ready_props(
            vec![city(1, "Riyadh"), city(2, "Jeddah"), city(3, "Mecca")],
            false,
            1,
            1,
        ));

        assert_eq!(selector.highlighted_index(), 2);
        assert_eq!(
            selector.confirm_highlighted(),
            Some(SelectorEvent::Confirm(city(3, "Mecca")))
        );
    }

    #[test]
    fn test_wheel_scroll_clamps_to_content() {
        let items: Vec<_> = (1..=6).map(|i| city(i, &format!("C{}", i))).collect();
        let mut selector = PaginatedSelector::new(SelectorConfig::default());
        selector.set_viewport_rows(3);
        selector.open(vec![], None);
        selector.sync(ready_props(items, false, 1, 1));

        selector.wheel(10, Instant::now());
        assert_eq!(selector.scroll_offset(), 3);
        assert_eq!(selector.highlighted_index(), 3);
    }
}

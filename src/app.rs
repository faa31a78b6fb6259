use std::time::{Duration, Instant};

use crate::config::Config;
use crate::events::Action;
use crate::feed::{FeedUpdate, FetchRequest, FetchResponse, ListFeed};
use crate::lifecycle::RecordStatus;
use crate::log;
use crate::picker::Picker;
use crate::records::{Assignment, Record, RecordBook};
use crate::selector::{CancelPolicy, PaginatedSelector, SelectorEvent};
use crate::source::EntityKind;
use crate::tui::interaction::InteractionRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,     // Record list navigation
    Selector,   // Entity selector popup
    StatusMenu, // Choosing the next status
    Help,       // Help popup showing all hotkeys
}

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Screen rectangle used for mouse hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClickRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

/// Selector popup bound to one field of one record
#[derive(Debug)]
pub struct ActiveSelector {
    pub record_id: i64,
    pub field: EntityKind,
    pub selector: PaginatedSelector,
    pub feed: ListFeed,
}

/// Status menu for one record
#[derive(Debug)]
pub struct StatusMenuState {
    pub record_id: i64,
    pub current: RecordStatus,
    pub choices: Vec<RecordStatus>,
    highlighted: usize,
}

impl StatusMenuState {
    pub fn new(record: &Record) -> Self {
        Self {
            record_id: record.id,
            current: record.status,
            choices: record.status.transitions(),
            highlighted: 0,
        }
    }

    pub fn highlighted_choice(&self) -> Option<RecordStatus> {
        self.choices.get(self.highlighted).copied()
    }
}

impl Picker for StatusMenuState {
    fn len(&self) -> usize {
        self.choices.len()
    }

    fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    fn set_highlighted_index(&mut self, index: usize) {
        self.highlighted = index;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Short-lived status line message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

pub struct App {
    pub records: RecordBook,
    pub input_mode: InputMode,
    pub active: Option<ActiveSelector>,
    pub status_menu: Option<StatusMenuState>,
    pub toast: Option<Toast>,
    pub spinner_frame: usize,
    pub interactions: InteractionRegistry,
    pub should_quit: bool,
    config: Config,
}

impl App {
    pub fn new(records: Vec<Record>, config: Config) -> Self {
        Self {
            records: RecordBook::new(records),
            input_mode: InputMode::Normal,
            active: None,
            status_menu: None,
            toast: None,
            spinner_frame: 0,
            interactions: InteractionRegistry::new(),
            should_quit: false,
            config,
        }
    }

    pub fn selector_open(&self) -> bool {
        self.active.is_some()
    }

    /// Rows moved by PageUp/PageDown in the selector
    pub fn selector_page_rows(&self) -> usize {
        self.active
            .as_ref()
            .map(|active| active.selector.viewport_rows())
            .unwrap_or(1)
    }

    /// Record the active selector edits
    pub fn active_record(&self) -> Option<&Record> {
        self.active
            .as_ref()
            .and_then(|active| self.records.get(active.record_id))
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Periodic housekeeping: spinner, toast expiry and the search debounce.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();

        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.toast = None;
        }

        let event = self.active.as_mut()?.selector.tick(now)?;
        self.handle_selector_event(event, now)
    }

    /// Apply a user action. Returns a fetch the caller should dispatch.
    pub fn apply(&mut self, action: Action, now: Instant) -> Option<FetchRequest> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::OpenHelp => {
                self.input_mode = InputMode::Help;
                None
            }
            Action::CloseHelp => {
                self.input_mode = InputMode::Normal;
                None
            }

            Action::NextRecord => {
                self.records.select_next();
                None
            }
            Action::PrevRecord => {
                self.records.select_prev();
                None
            }
            Action::SelectRecord(index) => {
                if index < self.records.len() {
                    self.records.select_index(index);
                }
                None
            }

            Action::OpenSelector(field) => self.open_selector(field, now),
            Action::SelectorInput(c) => {
                self.with_selector(|selector| {
                    selector.push_search_char(c, now);
                    None
                });
                None
            }
            Action::SelectorBackspace => {
                self.with_selector(|selector| {
                    selector.pop_search_char(now);
                    None
                });
                None
            }
            Action::SelectorMove(delta) => {
                let event = self.with_selector(|selector| selector.move_highlight(delta))?;
                self.handle_selector_event(event, now)
            }
            Action::SelectorHome => {
                self.with_selector(|selector| {
                    selector.highlight_first();
                    None
                });
                None
            }
            Action::SelectorEnd => {
                let event = self.with_selector(|selector| selector.highlight_last())?;
                self.handle_selector_event(event, now)
            }
            Action::SelectorScroll(delta) => {
                let event = self.with_selector(|selector| selector.wheel(delta, now))?;
                self.handle_selector_event(event, now)
            }
            Action::SelectorClick(index) => {
                let event = self.with_selector(|selector| selector.click_visible(index))?;
                self.handle_selector_event(event, now)
            }
            Action::SelectorConfirmHighlighted => {
                let event = self.with_selector(|selector| selector.confirm_highlighted())?;
                self.handle_selector_event(event, now)
            }
            Action::SelectorConfirmSelected => {
                let event = self.with_selector(|selector| selector.on_confirm_selected_clicked())?;
                self.handle_selector_event(event, now)
            }
            Action::SelectorCancel => {
                let disabled = self
                    .active
                    .as_ref()
                    .is_some_and(|active| active.selector.config().disabled);
                if disabled {
                    // A read-only selector reports nothing, so the host closes it
                    self.close_selector();
                    return None;
                }
                let event = self.with_selector(|selector| selector.on_cancel())?;
                self.handle_selector_event(event, now)
            }

            Action::OpenStatusMenu => {
                self.open_status_menu(now);
                None
            }
            Action::CloseStatusMenu => {
                self.status_menu = None;
                self.input_mode = InputMode::Normal;
                None
            }
            Action::StatusMenuUp => {
                if let Some(menu) = self.status_menu.as_mut() {
                    menu.select_prev();
                }
                None
            }
            Action::StatusMenuDown => {
                if let Some(menu) = self.status_menu.as_mut() {
                    menu.select_next();
                }
                None
            }
            Action::StatusMenuClick(index) => {
                if let Some(menu) = self.status_menu.as_mut() {
                    menu.select_index(index);
                }
                self.confirm_status(now);
                None
            }
            Action::StatusMenuConfirm => {
                self.confirm_status(now);
                None
            }

            Action::None => None,
        }
    }

    /// Feed a fetch result to the open selector.
    pub fn on_fetch_response(&mut self, response: FetchResponse, now: Instant) -> Option<FetchRequest> {
        let Some(active) = self.active.as_mut() else {
            log::log(&format!(
                "Dropped {} page {} (selector closed)",
                response.field.display_name(),
                response.page
            ));
            return None;
        };

        let field = active.field;
        let update = active.feed.apply(response);
        active.selector.sync(active.feed.props());

        match update {
            FeedUpdate::Stale => {
                log::log(&format!("Discarded stale {} page", field.display_name()));
                None
            }
            FeedUpdate::Failed(err) => {
                self.show_toast(
                    format!("Could not load {}: {}", field.display_name().to_lowercase(), err),
                    ToastKind::Error,
                    now,
                );
                None
            }
            FeedUpdate::Replaced { .. } | FeedUpdate::Appended { .. } => {
                // Keep filling until the list overflows the viewport
                let metrics = active.selector.metrics();
                let event = active.selector.on_scroll(metrics)?;
                self.handle_selector_event(event, now)
            }
        }
    }

    fn with_selector(
        &mut self,
        f: impl FnOnce(&mut PaginatedSelector) -> Option<SelectorEvent>,
    ) -> Option<SelectorEvent> {
        self.active.as_mut().and_then(|active| f(&mut active.selector))
    }

    fn open_selector(&mut self, field: EntityKind, now: Instant) -> Option<FetchRequest> {
        let Some(record) = self.records.highlighted_record() else {
            self.show_toast("No record selected".to_string(), ToastKind::Info, now);
            return None;
        };
        if !record.accepts(field) {
            let message = format!(
                "{} records have no {} field",
                record.kind.display_name(),
                field.display_name().to_lowercase()
            );
            self.show_toast(message, ToastKind::Info, now);
            return None;
        }

        let mut config = self.config.selector_config(field.display_name());
        config.disabled = record.status.is_terminal();
        let record_id = record.id;
        let initial = record.selected_id(field);

        let mut feed = ListFeed::new(field, self.config.page_size());
        let request = feed.open();
        let mut selector = PaginatedSelector::new(config);
        selector.open(Vec::new(), initial);
        selector.sync(feed.props());

        log::log_event(&format!("Open {} selector for record {}", field.display_name(), record_id));
        self.active = Some(ActiveSelector {
            record_id,
            field,
            selector,
            feed,
        });
        self.input_mode = InputMode::Selector;
        Some(request)
    }

    fn handle_selector_event(&mut self, event: SelectorEvent, now: Instant) -> Option<FetchRequest> {
        match event {
            SelectorEvent::Search(text) => {
                let active = self.active.as_mut()?;
                let request = active.feed.search(&text);
                active.selector.sync(active.feed.props());
                Some(request)
            }
            SelectorEvent::LoadMore { page } => {
                let active = self.active.as_mut()?;
                let request = active.feed.load_more(page);
                active.selector.sync(active.feed.props());
                request
            }
            SelectorEvent::Confirm(item) => {
                let active = self.close_selector()?;
                if let Some(record) = self.records.get_mut(active.record_id) {
                    record.assign(active.field, Some(Assignment::from(&item)));
                    log::log_event(&format!(
                        "Record {} {} = {}",
                        active.record_id,
                        active.field.display_name(),
                        item.id
                    ));
                    self.show_toast(
                        format!("{} set to {}", active.field.display_name(), item.label),
                        ToastKind::Info,
                        now,
                    );
                }
                None
            }
            SelectorEvent::Cancel => {
                let active = self.close_selector()?;
                if active.selector.config().cancel_policy == CancelPolicy::Clear {
                    if let Some(record) = self.records.get_mut(active.record_id) {
                        if record.assignment(active.field).is_some() {
                            record.assign(active.field, None);
                            self.show_toast(
                                format!("{} cleared", active.field.display_name()),
                                ToastKind::Info,
                                now,
                            );
                        }
                    }
                }
                None
            }
        }
    }

    fn close_selector(&mut self) -> Option<ActiveSelector> {
        let mut active = self.active.take()?;
        active.selector.close();
        self.input_mode = InputMode::Normal;
        Some(active)
    }

    fn open_status_menu(&mut self, now: Instant) {
        let Some(record) = self.records.highlighted_record() else {
            return;
        };
        let menu = StatusMenuState::new(record);
        if menu.is_empty() {
            let message = format!("{} is final", record.status);
            self.show_toast(message, ToastKind::Info, now);
            return;
        }
        self.status_menu = Some(menu);
        self.input_mode = InputMode::StatusMenu;
    }

    fn confirm_status(&mut self, now: Instant) {
        let Some(menu) = self.status_menu.take() else {
            return;
        };
        self.input_mode = InputMode::Normal;
        let Some(target) = menu.highlighted_choice() else {
            return;
        };

        match self.records.set_status(menu.record_id, target) {
            Ok(()) => {
                log::log_event(&format!("Record {} -> {}", menu.record_id, target));
                self.show_toast(format!("Status set to {}", target), ToastKind::Info, now);
            }
            Err(err) => {
                log::log(&format!("Status change failed: {}", err));
                self.show_toast(err.to_string(), ToastKind::Error, now);
            }
        }
    }

    fn show_toast(&mut self, message: String, kind: ToastKind, now: Instant) {
        self.toast = Some(Toast {
            message,
            kind,
            expires_at: now + TOAST_DURATION,
        });
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> App {
    let catalog = crate::source::Catalog::seed().unwrap();
    App::new(catalog.records().to_vec(), Config::default())
}

//! Host-side list feed.
//!
//! The feed is the host's single source of truth for what a selector shows:
//! it accumulates fetched pages, tracks loading flags and turns selector
//! intents into page requests. Every search session gets a new generation
//! number, and responses tagged with an older generation are dropped, so a
//! slow page from a previous search can never overwrite the current list.

use crate::error::{SourceError, SourceResult};
use crate::selector::{PageResult, PageToken, SelectableItem, SelectorProps};
use crate::source::{EntityKind, PageQuery};

/// A page fetch the host should run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub field: EntityKind,
    pub generation: u64,
    pub query: PageQuery,
}

/// The outcome of a fetch, tagged with the request it answers.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub field: EntityKind,
    pub generation: u64,
    pub page: PageToken,
    pub result: SourceResult<PageResult>,
}

impl FetchResponse {
    pub fn answer(request: &FetchRequest, result: SourceResult<PageResult>) -> Self {
        Self {
            field: request.field,
            generation: request.generation,
            page: request.query.page,
            result,
        }
    }
}

/// What applying a response did to the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    /// First page of a session replaced the list
    Replaced { count: usize },
    /// A later page was appended
    Appended { count: usize },
    /// The fetch failed; loading stopped and `has_more` was cleared
    Failed(SourceError),
    /// The response belongs to an older session or an unexpected page
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListFeed {
    field: EntityKind,
    per_page: usize,
    generation: u64,
    search: Option<String>,
    items: Vec<SelectableItem>,
    has_more: bool,
    loading_initial: bool,
    loading_more: bool,
    total_count: Option<u64>,
    loaded_page: PageToken,
    last_error: Option<SourceError>,
    /// Bumped on every change the selector should see
    revision: u64,
}

impl ListFeed {
    pub fn new(field: EntityKind, per_page: usize) -> Self {
        Self {
            field,
            per_page,
            generation: 0,
            search: None,
            items: Vec::new(),
            has_more: false,
            loading_initial: false,
            loading_more: false,
            total_count: None,
            loaded_page: PageToken::FIRST,
            last_error: None,
            revision: 0,
        }
    }

    #[cfg(test)]
    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    pub fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    /// Start an unfiltered session.
    pub fn open(&mut self) -> FetchRequest {
        self.restart(None)
    }

    /// Start a new search session; the list is cleared until page 1 arrives.
    pub fn search(&mut self, text: &str) -> FetchRequest {
        self.restart(Some(text))
    }

    fn restart(&mut self, text: Option<&str>) -> FetchRequest {
        let query = PageQuery::new(PageToken::FIRST, self.per_page).search(text.unwrap_or(""));
        self.generation += 1;
        self.revision += 1;
        self.search = query.search.clone();
        self.items.clear();
        self.has_more = false;
        self.loading_initial = true;
        self.loading_more = false;
        self.total_count = None;
        self.loaded_page = PageToken::FIRST;
        self.last_error = None;

        FetchRequest {
            field: self.field,
            generation: self.generation,
            query,
        }
    }

    /// Request `page` if it is the next one and nothing is in flight.
    pub fn load_more(&mut self, page: PageToken) -> Option<FetchRequest> {
        // A refusal is an answer too; the selector waits for a new revision
        self.revision += 1;
        if !self.has_more
            || self.loading_initial
            || self.loading_more
            || page != self.loaded_page.next()
        {
            return None;
        }
        self.loading_more = true;

        let mut query = PageQuery::new(page, self.per_page);
        query.search = self.search.clone();
        Some(FetchRequest {
            field: self.field,
            generation: self.generation,
            query,
        })
    }

    /// Apply a response, discarding it if it is stale.
    pub fn apply(&mut self, response: FetchResponse) -> FeedUpdate {
        if response.field != self.field || response.generation != self.generation {
            return FeedUpdate::Stale;
        }
        let expected = if self.loading_initial {
            PageToken::FIRST
        } else if self.loading_more {
            self.loaded_page.next()
        } else {
            return FeedUpdate::Stale;
        };
        if response.page != expected {
            return FeedUpdate::Stale;
        }

        self.loading_initial = false;
        self.loading_more = false;
        self.revision += 1;

        match response.result {
            Ok(page) => {
                let count = page.items.len();
                self.has_more = page.has_more;
                self.total_count = page.total_count;
                self.loaded_page = response.page;
                if response.page.is_first() {
                    self.items = page.items;
                    FeedUpdate::Replaced { count }
                } else {
                    self.items.extend(page.items);
                    FeedUpdate::Appended { count }
                }
            }
            Err(err) => {
                // Without this the selector would re-request on every scroll
                self.has_more = false;
                self.last_error = Some(err.clone());
                FeedUpdate::Failed(err)
            }
        }
    }

    /// Snapshot handed to the selector.
    pub fn props(&self) -> SelectorProps {
        SelectorProps {
            items: self.items.clone(),
            has_more: self.has_more,
            loading_initial: self.loading_initial,
            loading_more: self.loading_more,
            total_count: self.total_count,
            loaded_page: self.loaded_page,
            revision: self.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: i64, label: &str) -> SelectableItem {
        SelectableItem::new(id, label)
    }

    fn page(items: Vec<SelectableItem>, has_more: bool) -> SourceResult<PageResult> {
        Ok(PageResult {
            items,
            has_more,
            total_count: None,
        })
    }

    #[test]
    fn test_open_then_pages_accumulate_in_order() {
        let mut feed = ListFeed::new(EntityKind::City, 2);
        let first = feed.open();
        assert_eq!(first.query.page, PageToken::FIRST);
        assert!(feed.props().loading_initial);

        let update = feed.apply(FetchResponse::answer(
            &first,
            page(vec![city(1, "Riyadh"), city(2, "Jeddah")], true),
        ));
        assert_eq!(update, FeedUpdate::Replaced { count: 2 });

        let second = feed.load_more(PageToken::new(2)).unwrap();
        assert!(feed.props().loading_more);
        // A second request while one is in flight is refused
        assert!(feed.load_more(PageToken::new(2)).is_none());

        let update = feed.apply(FetchResponse::answer(&second, page(vec![city(3, "Mecca")], false)));
        assert_eq!(update, FeedUpdate::Appended { count: 1 });

        let props = feed.props();
        let labels: Vec<_> = props.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Riyadh", "Jeddah", "Mecca"]);
        assert!(!props.has_more);
        assert_eq!(props.loaded_page, PageToken::new(2));
        assert!(feed.load_more(PageToken::new(3)).is_none());
    }

    #[test]
    fn test_stale_response_from_previous_search_is_dropped() {
        let mut feed = ListFeed::new(EntityKind::City, 2);
        let old = feed.search("ri");
        let current = feed.search("je");
        assert!(current.generation > old.generation);
        assert_eq!(current.query.search.as_deref(), Some("je"));

        // Slow answer for the old search arrives late
        let update = feed.apply(FetchResponse::answer(&old, page(vec![city(1, "Riyadh")], false)));
        assert_eq!(update, FeedUpdate::Stale);
        assert!(feed.items().is_empty());
        assert!(feed.props().loading_initial);

        let update = feed.apply(FetchResponse::answer(&current, page(vec![city(2, "Jeddah")], false)));
        assert_eq!(update, FeedUpdate::Replaced { count: 1 });
        assert_eq!(feed.items()[0].label, "Jeddah");
    }

    #[test]
    fn test_load_more_keeps_search_term() {
        let mut feed = ListFeed::new(EntityKind::Client, 1);
        let first = feed.search("  sara ");
        assert_eq!(first.query.search.as_deref(), Some("sara"));
        feed.apply(FetchResponse::answer(&first, page(vec![city(1, "Sara A")], true)));

        let next = feed.load_more(PageToken::new(2)).unwrap();
        assert_eq!(next.query.search.as_deref(), Some("sara"));
        assert_eq!(next.generation, first.generation);
    }

    #[test]
    fn test_out_of_order_page_is_refused() {
        let mut feed = ListFeed::new(EntityKind::City, 2);
        let first = feed.open();
        feed.apply(FetchResponse::answer(&first, page(vec![city(1, "A")], true)));
        assert!(feed.load_more(PageToken::new(5)).is_none());
        assert!(!feed.props().loading_more);
    }

    #[test]
    fn test_failure_stops_pagination() {
        let mut feed = ListFeed::new(EntityKind::City, 2);
        let first = feed.open();
        feed.apply(FetchResponse::answer(&first, page(vec![city(1, "A"), city(2, "B")], true)));

        let second = feed.load_more(PageToken::new(2)).unwrap();
        let err = SourceError::RequestFailed(2, "timeout".to_string());
        let update = feed.apply(FetchResponse::answer(&second, Err(err.clone())));
        assert_eq!(update, FeedUpdate::Failed(err.clone()));

        let props = feed.props();
        assert!(!props.has_more);
        assert!(!props.loading_more);
        assert_eq!(props.items.len(), 2);
        assert_eq!(feed.last_error(), Some(&err));
        assert!(feed.load_more(PageToken::new(2)).is_none());
    }

    #[test]
    fn test_revision_moves_on_every_visible_change() {
        let mut feed = ListFeed::new(EntityKind::City, 2);
        let first = feed.open();
        let opened = feed.props().revision;

        let response = FetchResponse::answer(&first, page(vec![city(1, "A")], true));
        feed.apply(response.clone());
        let loaded = feed.props().revision;
        assert!(loaded > opened);

        // Stale answers leave the revision alone
        feed.apply(response);
        assert_eq!(feed.props().revision, loaded);

        // A refused request still counts as an answer
        assert!(feed.load_more(PageToken::new(7)).is_none());
        assert!(feed.props().revision > loaded);
    }

    #[test]
    fn test_duplicate_response_is_stale() {
        let mut feed = ListFeed::new(EntityKind::City, 2);
        let first = feed.open();
        let response = FetchResponse::answer(&first, page(vec![city(1, "A")], false));
        assert_eq!(feed.apply(response.clone()), FeedUpdate::Replaced { count: 1 });
        assert_eq!(feed.apply(response), FeedUpdate::Stale);
    }
}

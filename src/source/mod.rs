//! List data sources
//!
//! A `ListDataSource` answers page queries for one kind of entity. The
//! selector never talks to it directly; the host's feed issues the queries and
//! hands the results to the selector.
//!
//! Contract for implementors:
//! - identical `(page, search)` queries return identical pages within a session
//! - pages for the same search never overlap (the selector does not deduplicate)
//! - concatenating pages in request order yields a stable total order
//! - `has_more` eventually becomes false

mod catalog;
mod memory;

use futures::future::BoxFuture;

use crate::error::SourceResult;
use crate::selector::{PageResult, PageToken};

pub use catalog::{Catalog, EntityKind};
pub use memory::InMemorySource;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One page request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub page: PageToken,
    /// Trimmed, non-empty search text
    pub search: Option<String>,
    pub per_page: usize,
}

impl PageQuery {
    pub fn new(page: PageToken, per_page: usize) -> Self {
        Self {
            page,
            search: None,
            per_page,
        }
    }

    /// Attach a search term; blank terms mean "no filter".
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }
}

/// Supplies pages of selectable items.
pub trait ListDataSource: Send + Sync {
    /// Fetch one page. The future must not borrow `self`.
    fn fetch(&self, query: PageQuery) -> BoxFuture<'static, SourceResult<PageResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_search_is_dropped() {
        let query = PageQuery::new(PageToken::FIRST, 10).search("   ");
        assert!(query.search.is_none());

        let query = PageQuery::new(PageToken::FIRST, 10).search("  jed ");
        assert_eq!(query.search.as_deref(), Some("jed"));
    }
}

//! In-memory data source with optional latency and failure injection.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::{SourceError, SourceResult};
use crate::selector::{PageResult, SelectableItem};

use super::{ListDataSource, PageQuery};

/// Serves pages from a fixed item list.
///
/// Items keep the order they were given in, so page boundaries are stable
/// and pages never overlap for the same search.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    items: Arc<Vec<SelectableItem>>,
    latency: Duration,
    /// Page numbers that always fail
    failing_pages: Arc<HashSet<u32>>,
}

impl InMemorySource {
    pub fn new(items: Vec<SelectableItem>) -> Self {
        Self {
            items: Arc::new(items),
            latency: Duration::ZERO,
            failing_pages: Arc::new(HashSet::new()),
        }
    }

    /// Delay every response, to make loading states visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the given pages fail.
    pub fn with_failing_pages(mut self, pages: impl IntoIterator<Item = u32>) -> Self {
        self.failing_pages = Arc::new(pages.into_iter().collect());
        self
    }

    /// Compute one page synchronously.
    pub fn page(&self, query: &PageQuery) -> SourceResult<PageResult> {
        if query.per_page == 0 {
            return Err(SourceError::InvalidPageSize(0));
        }
        let page = query.page.number();
        if self.failing_pages.contains(&page) {
            return Err(SourceError::RequestFailed(
                page,
                "simulated backend failure".to_string(),
            ));
        }

        let term = query.search.as_deref().unwrap_or("");
        let matching: Vec<&SelectableItem> =
            self.items.iter().filter(|item| item.matches(term)).collect();

        let start = (page as usize - 1).saturating_mul(query.per_page);
        if start > matching.len() {
            return Err(SourceError::PageOutOfRange(page));
        }
        let end = (start + query.per_page).min(matching.len());

        Ok(PageResult {
            items: matching[start..end].iter().map(|item| (*item).clone()).collect(),
            has_more: end < matching.len(),
            total_count: Some(matching.len() as u64),
        })
    }
}

impl ListDataSource for InMemorySource {
    fn fetch(&self, query: PageQuery) -> BoxFuture<'static, SourceResult<PageResult>> {
        let source = self.clone();
        async move {
            if !source.latency.is_zero() {
                tokio::time::sleep(source.latency).await;
            }
            source.page(&query)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::PageToken;

    fn cities() -> InMemorySource {
        InMemorySource::new(vec![
            SelectableItem::new(1_i64, "Riyadh"),
            SelectableItem::new(2_i64, "Jeddah"),
            SelectableItem::new(3_i64, "Mecca"),
            SelectableItem::new(4_i64, "Medina"),
            SelectableItem::new(5_i64, "Dammam"),
        ])
    }

    fn labels(page: &PageResult) -> Vec<&str> {
        page.items.iter().map(|i| i.label.as_str()).collect()
    }

    #[tokio::test]
    async fn test_pages_do_not_overlap_and_terminate() {
        let source = cities();
        let first = source.fetch(PageQuery::new(PageToken::new(1), 2)).await.unwrap();
        let second = source.fetch(PageQuery::new(PageToken::new(2), 2)).await.unwrap();
        let third = source.fetch(PageQuery::new(PageToken::new(3), 2)).await.unwrap();

        assert_eq!(labels(&first), vec!["Riyadh", "Jeddah"]);
        assert_eq!(labels(&second), vec!["Mecca", "Medina"]);
        assert_eq!(labels(&third), vec!["Dammam"]);
        assert!(first.has_more && second.has_more);
        assert!(!third.has_more);
        assert_eq!(third.total_count, Some(5));
    }

    #[tokio::test]
    async fn test_search_filters_before_paging() {
        let source = cities();
        let query = PageQuery::new(PageToken::FIRST, 10).search("me");
        let page = source.fetch(query).await.unwrap();
        assert_eq!(labels(&page), vec!["Mecca", "Medina"]);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_identical_queries_are_idempotent() {
        let source = cities();
        let query = PageQuery::new(PageToken::new(2), 2).search("a");
        let a = source.fetch(query.clone()).await.unwrap();
        let b = source.fetch(query).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let source = cities().with_failing_pages([2]);
        assert!(source.fetch(PageQuery::new(PageToken::FIRST, 2)).await.is_ok());
        let err = source
            .fetch(PageQuery::new(PageToken::new(2), 2))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::RequestFailed(2, _)));
    }

    #[test]
    fn test_out_of_range_and_empty_pages() {
        let source = cities();
        assert_eq!(
            source.page(&PageQuery::new(PageToken::new(9), 2)),
            Err(SourceError::PageOutOfRange(9))
        );
        let none = source
            .page(&PageQuery::new(PageToken::FIRST, 2).search("zzz"))
            .unwrap();
        assert!(none.items.is_empty());
        assert!(!none.has_more);
        assert_eq!(
            source.page(&PageQuery::new(PageToken::FIRST, 0)),
            Err(SourceError::InvalidPageSize(0))
        );
    }
}

//! Fetch dispatcher service
//!
//! Runs page fetches on tokio tasks and reports each result to the main loop,
//! so the UI never awaits a data source directly.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::SourceError;
use crate::feed::{FetchRequest, FetchResponse};
use crate::log;
use crate::source::{EntityKind, ListDataSource};

/// Dispatcher for page fetches, one data source per entity kind
#[derive(Clone)]
pub struct FetchDispatcher {
    sources: HashMap<EntityKind, Arc<dyn ListDataSource>>,
    tx: mpsc::Sender<FetchResponse>,
}

impl FetchDispatcher {
    pub fn new(
        sources: HashMap<EntityKind, Arc<dyn ListDataSource>>,
        tx: mpsc::Sender<FetchResponse>,
    ) -> Self {
        Self { sources, tx }
    }

    /// Spawn a task for `request`. The response is sent even on failure.
    pub fn dispatch(&self, request: FetchRequest) {
        log::log_fetch(
            request.field.display_name(),
            request.generation,
            request.query.page.number(),
            request.query.search.as_deref(),
        );

        let tx = self.tx.clone();
        let fetch = self
            .sources
            .get(&request.field)
            .map(|source| source.fetch(request.query.clone()));

        tokio::spawn(async move {
            let result = match fetch {
                Some(fetch) => fetch.await,
                None => Err(SourceError::Unavailable),
            };
            if let Err(err) = &result {
                log::log(&format!(
                    "Fetch {} page {} failed: {}",
                    request.field.display_name(),
                    request.query.page,
                    err
                ));
            }
            // Receiver is gone only during shutdown
            let _ = tx.send(FetchResponse::answer(&request, result)).await;
        });
    }
}

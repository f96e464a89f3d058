//! Incremental pagination over the content listing
//!
//! The accumulator owns the materialized list and the cursor to the next
//! page. Items are append-only: once a page is fetched and normalized it is
//! never re-fetched, re-ordered or removed. No de-duplication happens - a
//! repeated uid from the repository is appended again (trust contract with
//! the content client).

use crate::cms::{FetchError, FetchPage, PageResponse};

use super::normalize::{normalize, DisplayRecord};

/// What a `load_more` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fetched the next page and appended this many records
    Appended(usize),
    /// The cursor was already exhausted; no request was made
    Exhausted,
}

/// Stateful list-plus-cursor controller seeded from the first page.
///
/// `load_more` takes `&mut self`, so within one task overlapping calls are
/// impossible by construction. When the paginator is shared across request
/// handlers it lives behind a `tokio::sync::Mutex` and overlapping calls
/// are rejected at the lock (see `server::load_more`), keeping exactly one
/// fetch outstanding at a time.
pub struct Paginator {
    items: Vec<DisplayRecord>,
    cursor: Option<String>,
    date_fallback: String,
}

impl Paginator {
    pub fn new(
        items: Vec<DisplayRecord>,
        cursor: Option<String>,
        date_fallback: impl Into<String>,
    ) -> Self {
        Self {
            items,
            cursor,
            date_fallback: date_fallback.into(),
        }
    }

    /// Seed from a raw first page, normalizing its records.
    pub fn from_page(page: &PageResponse, date_fallback: &str) -> Self {
        let items = page
            .results
            .iter()
            .map(|record| normalize(record, date_fallback))
            .collect();
        Self::new(items, page.next_page.clone(), date_fallback)
    }

    /// The materialized records, in arrival order.
    pub fn items(&self) -> &[DisplayRecord] {
        &self.items
    }

    /// Whether another page can still be requested.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Fetch the next page through `fetcher`, normalize and append its
    /// records, and advance the cursor.
    ///
    /// With no cursor left this returns [`LoadOutcome::Exhausted`] without
    /// touching the network. A fetch failure propagates as [`FetchError`]
    /// and leaves items and cursor untouched.
    pub async fn load_more(
        &mut self,
        fetcher: &dyn FetchPage,
    ) -> Result<LoadOutcome, FetchError> {
        let Some(cursor) = self.cursor.clone() else {
            return Ok(LoadOutcome::Exhausted);
        };

        let page = fetcher.fetch_page(&cursor).await?;
        let appended = page.results.len();
        self.items
            .extend(page.results.iter().map(|r| normalize(r, &self.date_fallback)));
        self.cursor = page.next_page;

        tracing::debug!(
            "appended {} records, {} total, more={}",
            appended,
            self.items.len(),
            self.has_more()
        );
        Ok(LoadOutcome::Appended(appended))
    }
}

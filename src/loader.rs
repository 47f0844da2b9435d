//! Incremental "load more" article feed.
//!
//! [`ArticlePageLoader`] owns the pagination cursor. Every call to
//! [`ArticlePageLoader::load_more_articles`]:
//! 1. Requests the next batch from the plain or category listing endpoint
//! 2. Looks up the `articles-container` element in the document
//! 3. Resolves each article's owner, renders the fragment and appends it,
//!    keeping the order of the batch
//! 4. Advances the cursor by one page, even when the batch was short or empty
//!
//! A failure anywhere aborts the call: fragments appended so far stay in the
//! container and the cursor is left where it was.
//!
//! Owners are fetched one at a time by default. A larger `owner_concurrency`
//! keeps up to that many owner requests in flight; appends still follow the
//! batch order.

use crate::api::FeedApi;
use crate::document::{ARTICLES_CONTAINER_ID, Document};
use crate::error::{LoadError, Result};
use crate::models::{ArticleTypeId, ArticlesQuery, PageCursor};
use crate::render::{DateLocale, render_article};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Outcome of one successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Listing path that was requested.
    pub path: String,
    /// Cursor offset the batch was requested at.
    pub skip: u64,
    /// Fragments appended to the container.
    pub appended: usize,
    /// Cursor offset for the next call.
    pub next_skip: u64,
}

/// Loads article batches and appends them to a [`Document`].
///
/// Calls take `&mut self`, so two loads on the same loader can never
/// overlap and read the same cursor value.
#[derive(Debug)]
pub struct ArticlePageLoader<A> {
    api: A,
    cursor: PageCursor,
    locale: DateLocale,
    owner_concurrency: usize,
}

impl<A> ArticlePageLoader<A>
where
    A: FeedApi,
{
    /// A loader with a fresh cursor and default page size.
    pub fn new(api: A) -> Self {
        Self {
            api,
            cursor: PageCursor::default(),
            locale: DateLocale::default(),
            owner_concurrency: 1,
        }
    }

    pub fn with_page_size(mut self, limit: u64) -> Self {
        self.cursor = PageCursor::new(limit);
        self
    }

    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Maximum owner requests in flight. `0` and `1` both mean sequential.
    pub fn with_owner_concurrency(mut self, n: usize) -> Self {
        self.owner_concurrency = n.max(1);
        self
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Load the next batch into `document`.
    ///
    /// Owners are resolved with at most `owner_concurrency` requests in
    /// flight and their fragments are appended in batch order.
    ///
    /// # Arguments
    ///
    /// * `document` - Page holding the `articles-container` element
    /// * `article_type_id` - Category to load; `None` or `Some(0)` loads the
    ///   unfiltered feed
    ///
    /// # Returns
    ///
    /// A [`LoadReport`] with the requested path, the offset used, the number
    /// of fragments appended and the offset of the next batch.
    ///
    /// # Errors
    ///
    /// Any backend failure, malformed response, or a missing
    /// `articles-container` element. The cursor is not advanced on error.
    #[instrument(level = "info", skip(self, document), fields(cursor_skip = self.cursor.skip()))]
    pub async fn load_more_articles(
        &mut self,
        document: &mut Document,
        article_type_id: Option<ArticleTypeId>,
    ) -> Result<LoadReport> {
        let t0 = Instant::now();
        let query = ArticlesQuery::new(&self.cursor, article_type_id);
        let path = query.path();

        let articles = self.api.fetch_articles(&query).await?;
        debug!(%path, count = articles.len(), "Fetched article batch");

        let container = document
            .get_element_by_id_mut(ARTICLES_CONTAINER_ID)
            .ok_or_else(|| LoadError::MissingContainer(ARTICLES_CONTAINER_ID.to_string()))?;

        let api = &self.api;
        let locale = self.locale;
        let mut owners = stream::iter(articles.iter())
            .map(|article| async move { (article, api.fetch_user(article.owner_id).await) })
            .buffered(self.owner_concurrency);

        let mut appended = 0usize;
        while let Some((article, owner)) = owners.next().await {
            let owner = owner?;
            container.append_child(render_article(article, &owner, locale));
            appended += 1;
            debug!(article_id = article.id, owner_id = owner.id, "Appended article");
        }

        self.cursor.advance();
        info!(
            %path,
            appended,
            next_skip = self.cursor.skip(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Loaded article batch"
        );

        Ok(LoadReport {
            path,
            skip: query.skip,
            appended,
            next_skip: self.cursor.skip(),
        })
    }
}

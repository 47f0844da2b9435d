//! Article backend access with optional exponential backoff.
//!
//! The loader talks to the backend only through the [`FeedApi`] trait:
//! - [`HttpFeedApi`]: Real HTTP client over `reqwest`
//! - [`RetryApi`]: Decorator that retries transient failures of any `FeedApi`
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | [`FeedApi::fetch_articles`] | `GET /articles/?skip=&limit=` or `GET /articles/article_type/{id}?skip=&limit=` |
//! | [`FeedApi::fetch_user`] | `GET /users/{id}` |
//! | [`FeedApi::fetch_article_types`] | `GET /article_types/` |
//!
//! Non-success statuses and malformed bodies are returned as [`LoadError`]s;
//! nothing is swallowed here.

use crate::error::{LoadError, Result};
use crate::models::{Article, ArticleType, ArticlesQuery, User, UserId};
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Async access to the article backend.
pub trait FeedApi {
    /// Fetch one batch of articles.
    async fn fetch_articles(&self, query: &ArticlesQuery) -> Result<Vec<Article>>;

    /// Fetch a single user by id.
    async fn fetch_user(&self, user_id: UserId) -> Result<User>;

    /// Fetch every article category.
    async fn fetch_article_types(&self) -> Result<Vec<ArticleType>>;
}

/// [`FeedApi`] over plain HTTP GETs.
#[derive(Debug, Clone)]
pub struct HttpFeedApi {
    client: Client,
    /// Always ends with `/` so request paths join under it.
    base_url: Url,
}

impl HttpFeedApi {
    /// Create a client rooted at `base_url`.
    ///
    /// Request paths are joined under the base, so a base with a path
    /// prefix keeps it: `https://host/news` + `/users/1` is
    /// `https://host/news/users/1`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the article backend, with or without a
    ///   trailing slash
    ///
    /// # Returns
    ///
    /// A client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidUrl`] if `base_url` does not parse, or
    /// [`LoadError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .build()?;
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self { client, base_url })
    }

    /// Resolve a backend path like `/users/3` against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url_for(path)?;
        let t0 = Instant::now();
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%path, status = status.as_u16(), "Backend returned error status");
            return Err(LoadError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body: truncate_for_log(&body, 300),
            });
        }

        let body = resp.text().await?;
        debug!(
            %path,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched"
        );
        serde_json::from_str(&body).map_err(|source| LoadError::Json {
            path: path.to_string(),
            source,
        })
    }
}

impl FeedApi for HttpFeedApi {
    async fn fetch_articles(&self, query: &ArticlesQuery) -> Result<Vec<Article>> {
        self.get_json(&query.path()).await
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<User> {
        self.get_json(&format!("/users/{}", user_id)).await
    }

    async fn fetch_article_types(&self) -> Result<Vec<ArticleType>> {
        self.get_json("/article_types/").await
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FeedApi`].
///
/// Only errors for which [`LoadError::is_transient`] holds are retried.
/// With `max_retries == 0` the wrapper is a pass-through.
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryApi<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryApi<T>
where
    T: FeedApi,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &T {
        &self.inner
    }

    async fn with_retries<R, F, Fut>(&self, what: &str, mut op: F) -> Result<R>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match op().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if !e.is_transient() || attempt > self.max_retries {
                        if self.max_retries > 0 {
                            error!(
                                what,
                                attempt,
                                max = self.max_retries,
                                elapsed_ms_total = total_dt.as_millis() as u64,
                                error = %e,
                                "giving up"
                            );
                        }
                        return Err(e);
                    }

                    let delay = self
                        .base_delay
                        .saturating_mul(1 << (attempt - 1).min(16))
                        .min(self.max_delay);
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        what,
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

impl<T> fmt::Debug for RetryApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryApi")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FeedApi for RetryApi<T>
where
    T: FeedApi,
{
    async fn fetch_articles(&self, query: &ArticlesQuery) -> Result<Vec<Article>> {
        self.with_retries("fetch_articles", || self.inner.fetch_articles(query))
            .await
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<User> {
        self.with_retries("fetch_user", || self.inner.fetch_user(user_id))
            .await
    }

    async fn fetch_article_types(&self) -> Result<Vec<ArticleType>> {
        self.with_retries("fetch_article_types", || self.inner.fetch_article_types())
            .await
    }
}

//! # Article Feed
//!
//! Loads article summaries from the article backend one page at a time,
//! resolves each article's author and renders the feed as HTML fragments
//! appended to an `articles-container` element.
//!
//! ## Usage
//!
//! ```sh
//! article_feed --base-url http://127.0.0.1:8000 --pages 2 -o ./feed.html
//! ```
//!
//! ## Flow
//!
//! 1. **Listing**: `GET /articles/?skip=&limit=` (or the per-category variant)
//! 2. **Owners**: `GET /users/{owner_id}` for every article, in batch order
//! 3. **Rendering**: one fragment per article appended to the container
//! 4. **Paging**: the cursor moves forward one page after every batch
//! 5. **Output**: the container markup is written to a file or stdout

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod document;
mod error;
mod loader;
mod models;
mod outputs;
mod render;
mod utils;

use api::{FeedApi, HttpFeedApi, RetryApi};
use cli::Cli;
use document::Document;
use loader::ArticlePageLoader;
use outputs::html;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // logs go to stderr so stdout stays clean for the HTML
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Some(ref output) = args.output {
        if let Err(e) = ensure_writable_parent(output).await {
            error!(path = %output, error = %e, "Output location is not writable");
            return Err(e);
        }
    }

    let http = HttpFeedApi::new(&args.base_url)?;
    let api = RetryApi::new(http, args.max_retries, Duration::from_secs(1));
    info!(base_url = %args.base_url, max_retries = args.max_retries, "Backend configured");

    if args.list_types {
        let types = api.fetch_article_types().await?;
        info!(count = types.len(), "Fetched article types");
        for article_type in types {
            println!("{}\t{}", article_type.id, article_type.name);
        }
        return Ok(());
    }

    let mut loader = ArticlePageLoader::new(api)
        .with_page_size(args.page_size)
        .with_locale(args.locale)
        .with_owner_concurrency(args.owner_concurrency);
    let mut document = Document::with_articles_container();

    let mut total = 0usize;
    for page in 0..args.pages {
        match loader
            .load_more_articles(&mut document, args.article_type_id)
            .await
        {
            Ok(report) => {
                total += report.appended;
                info!(
                    page,
                    skip = report.skip,
                    appended = report.appended,
                    next_skip = report.next_skip,
                    "Page loaded"
                );
            }
            Err(e) => {
                error!(page, skip = loader.cursor().skip(), error = %e, "Loading stopped");
                // keep whatever made it into the container before failing
                html::write_document(&document, args.output.as_deref()).await?;
                return Err(e.into());
            }
        }
    }

    html::write_document(&document, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(
        pages = args.pages,
        articles = total,
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );
    Ok(())
}

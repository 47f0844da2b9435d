//! Command-line interface definitions for the article feed loader.
//!
//! All options can be given as flags; the backend location can also come
//! from the environment.

use crate::models::{ArticleTypeId, DEFAULT_PAGE_SIZE};
use crate::render::DateLocale;
use clap::Parser;

/// Command-line arguments for `article_feed`.
///
/// # Examples
///
/// ```sh
/// # First page of the whole feed to stdout
/// article_feed --base-url http://127.0.0.1:8000
///
/// # Three pages of category 3 into a file
/// article_feed -t 3 -p 3 -o ./feed.html
///
/// # Show available categories
/// article_feed --list-types
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root URL of the article backend
    #[arg(
        short,
        long,
        env = "ARTICLE_FEED_BASE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub base_url: String,

    /// Only load articles of this category
    #[arg(short = 't', long)]
    pub article_type_id: Option<ArticleTypeId>,

    /// How many times to load the next batch
    #[arg(short, long, default_value_t = 1)]
    pub pages: u32,

    /// Articles per batch
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// How creation dates are displayed
    #[arg(short, long, value_enum, default_value_t = DateLocale::Ru)]
    pub locale: DateLocale,

    /// Owner requests kept in flight per batch (1 = one at a time)
    #[arg(long, default_value_t = 1)]
    pub owner_concurrency: usize,

    /// Retries for transient backend failures (0 = fail on first error)
    #[arg(long, env = "ARTICLE_FEED_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: usize,

    /// Write the rendered HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the article categories and exit
    #[arg(long)]
    pub list_types: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["article_feed", "--base-url", "http://localhost:8000"]);

        assert_eq!(cli.base_url, "http://localhost:8000");
        assert_eq!(cli.article_type_id, None);
        assert_eq!(cli.pages, 1);
        assert_eq!(cli.page_size, 5);
        assert_eq!(cli.locale, DateLocale::Ru);
        assert_eq!(cli.owner_concurrency, 1);
        assert_eq!(cli.output, None);
        assert!(!cli.list_types);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "article_feed",
            "-b",
            "https://news.example.com",
            "-t",
            "3",
            "-p",
            "4",
            "-l",
            "en-us",
            "-o",
            "/tmp/feed.html",
        ]);

        assert_eq!(cli.base_url, "https://news.example.com");
        assert_eq!(cli.article_type_id, Some(3));
        assert_eq!(cli.pages, 4);
        assert_eq!(cli.locale, DateLocale::EnUs);
        assert_eq!(cli.output.as_deref(), Some("/tmp/feed.html"));
    }

    #[test]
    fn test_cli_rejects_zero_page_size() {
        let res = Cli::try_parse_from(["article_feed", "--page-size", "0"]);
        assert!(res.is_err());

        let cli = Cli::parse_from(["article_feed", "--page-size", "1"]);
        assert_eq!(cli.page_size, 1);
    }

    #[test]
    fn test_cli_rejects_unknown_locale() {
        let res = Cli::try_parse_from(["article_feed", "--locale", "klingon"]);
        assert!(res.is_err());
    }
}

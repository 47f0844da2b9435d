//! HTML rendering of article summaries.
//!
//! Each article becomes one `div.row.align-items-center.my-4` element with a
//! fixed template: title linked to the article detail page, short
//! description, localized creation date and the owner's avatar and name
//! linked to the owner's page.

use crate::document::Element;
use crate::models::{Article, User};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::debug;

/// Classes carried by every article fragment.
pub const FRAGMENT_CLASSES: [&str; 3] = ["row", "align-items-center", "my-4"];

/// What an unparseable date renders as.
pub const INVALID_DATE: &str = "Invalid Date";

/// How creation dates are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DateLocale {
    /// `01.03.2024`
    #[default]
    Ru,
    /// `3/1/2024`
    EnUs,
    /// `2024-03-01`
    Iso,
}

impl DateLocale {
    fn pattern(self) -> &'static str {
        match self {
            DateLocale::Ru => "%d.%m.%Y",
            DateLocale::EnUs => "%-m/%-d/%Y",
            DateLocale::Iso => "%Y-%m-%d",
        }
    }
}

/// Parse the backend's ISO-ish date string down to a calendar date.
///
/// Accepts RFC 3339 with an offset, naive date-times (`T` or space
/// separated, optional fraction) and bare dates.
pub fn parse_created_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = raw.replacen(' ', "T", 1).parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    raw.parse::<NaiveDate>().ok()
}

/// Render `created_date` for display, or [`INVALID_DATE`].
pub fn format_created_date(raw: &str, locale: DateLocale) -> String {
    match parse_created_date(raw) {
        Some(date) => date.format(locale.pattern()).to_string(),
        None => {
            debug!(raw, "Unparseable created_date");
            INVALID_DATE.to_string()
        }
    }
}

/// Build the fragment for one article and its owner.
///
/// Text is escaped for element content, URLs and the avatar `alt` for
/// double-quoted attributes. Missing optional fields render empty.
///
/// # Arguments
///
/// * `article` - The article whose title, description and date are shown
/// * `owner` - The article's owner, shown as avatar, name and profile link
/// * `locale` - How the creation date is formatted
///
/// # Returns
///
/// A `div.row.align-items-center.my-4` element ready to append to the
/// articles container.
pub fn render_article(article: &Article, owner: &User, locale: DateLocale) -> Element {
    let mut element = Element::new("div");
    element.add_classes(&FRAGMENT_CLASSES);

    let owner_name = owner.name.as_deref().unwrap_or_default();
    element.inner_html = format!(
        r#"
    <div class="col-md-12">
      <h2 class="featurette-heading"><a href="/article_detail/{id}">{title}</a></h2>
      <p class="lead">{short_description}</p>
      <p>Дата создания: {created}</p>
      <p>
          Автор:
            <a href="/user_page/{owner_id}">
            <img
        src="{picture}"
        alt="{owner_alt}"
        class="img-fluid rounded-circle"
        style="max-width: 3%"
      />{owner_name}
            </a>
        </p>
    </div>
  "#,
        id = article.id,
        title = encode_text(&article.title),
        short_description = encode_text(article.short_description.as_deref().unwrap_or_default()),
        created = format_created_date(&article.created_date, locale),
        owner_id = owner.id,
        picture = encode_double_quoted_attribute(owner.picture.as_deref().unwrap_or_default()),
        owner_alt = encode_double_quoted_attribute(owner_name),
        owner_name = encode_text(owner_name),
    );
    element
}

//! Data models for the article feed.
//!
//! This module defines the records delivered by the article backend and the
//! pagination state the loader carries between invocations:
//! - [`Article`]: One article summary from the listing endpoints
//! - [`User`]: The owner of an article
//! - [`ArticleType`]: A category articles can be filtered by
//! - [`PageCursor`]: The `skip`/`limit` window of the next batch
//!
//! Records are transient. They are fetched fresh on every load, rendered,
//! and dropped.

use serde::{Deserialize, Serialize};

/// Identifier of an article category.
pub type ArticleTypeId = u64;

/// Identifier of a user.
pub type UserId = u64;

/// Number of articles requested per batch.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// An article summary as returned by `GET /articles/`.
///
/// `created_date` is kept as the backend sent it (ISO-ish, usually without
/// an offset) and only parsed when rendered.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_date: String,
    pub owner_id: UserId,
    #[serde(default)]
    pub article_type_id: Option<ArticleTypeId>,
}

/// The owner of an article as returned by `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// An article category as returned by `GET /article_types/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleType {
    pub id: ArticleTypeId,
    pub name: String,
}

/// Pagination window for the listing endpoints.
///
/// `skip` only ever grows, and only through [`PageCursor::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    skip: u64,
    limit: u64,
}

impl PageCursor {
    /// A fresh cursor at offset zero.
    pub fn new(limit: u64) -> Self {
        Self { skip: 0, limit }
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Move past one full page, however many articles the page held.
    pub fn advance(&mut self) {
        self.skip = self.skip.saturating_add(self.limit);
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Which listing endpoint a batch is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticlesQuery {
    pub article_type_id: Option<ArticleTypeId>,
    pub skip: u64,
    pub limit: u64,
}

impl ArticlesQuery {
    /// Build the query for the cursor's current window.
    ///
    /// A type id of `0` counts as "no filter", the same as an absent one.
    pub fn new(cursor: &PageCursor, article_type_id: Option<ArticleTypeId>) -> Self {
        Self {
            article_type_id: article_type_id.filter(|id| *id != 0),
            skip: cursor.skip(),
            limit: cursor.limit(),
        }
    }

    /// Path and query string relative to the backend root.
    pub fn path(&self) -> String {
        match self.article_type_id {
            Some(type_id) => format!(
                "/articles/article_type/{}?skip={}&limit={}",
                type_id, self.skip, self.limit
            ),
            None => format!("/articles/?skip={}&limit={}", self.skip, self.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialization_from_backend() {
        let json = r#"{
            "title": "Rust 2024",
            "short_description": "What changed",
            "description": "Long text",
            "id": 12,
            "owner_id": 3,
            "article_type_id": 2,
            "created_date": "2024-03-01T12:34:56.123456"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 12);
        assert_eq!(article.owner_id, 3);
        assert_eq!(article.short_description.as_deref(), Some("What changed"));
        assert_eq!(article.created_date, "2024-03-01T12:34:56.123456");
    }

    #[test]
    fn test_article_null_description() {
        let json = r#"{"id": 1, "title": "t", "short_description": null,
            "created_date": "2024-01-01", "owner_id": 9}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.short_description, None);
        assert_eq!(article.article_type_id, None);
    }

    #[test]
    fn test_user_ignores_nested_articles() {
        let json = r#"{"id": 7, "email": "a@b.c", "name": "Anna",
            "picture": "https://img/7.png", "is_active": true, "articles": []}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.name.as_deref(), Some("Anna"));
        assert_eq!(user.picture.as_deref(), Some("https://img/7.png"));
    }

    #[test]
    fn test_cursor_advances_by_limit() {
        let mut cursor = PageCursor::default();
        assert_eq!(cursor.skip(), 0);
        assert_eq!(cursor.limit(), 5);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.skip(), 10);
    }

    #[test]
    fn test_unfiltered_query_path() {
        let cursor = PageCursor::default();
        let query = ArticlesQuery::new(&cursor, None);
        assert_eq!(query.path(), "/articles/?skip=0&limit=5");
    }

    #[test]
    fn test_filtered_query_path() {
        let mut cursor = PageCursor::default();
        cursor.advance();
        let query = ArticlesQuery::new(&cursor, Some(3));
        assert_eq!(query.path(), "/articles/article_type/3?skip=5&limit=5");
    }

    #[test]
    fn test_zero_type_id_is_unfiltered() {
        let query = ArticlesQuery::new(&PageCursor::default(), Some(0));
        assert_eq!(query.article_type_id, None);
        assert_eq!(query.path(), "/articles/?skip=0&limit=5");
    }
}

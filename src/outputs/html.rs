//! HTML output of the loaded feed.
//!
//! The document is serialized as-is: the `articles-container` element with
//! every fragment appended so far, in load order.

use crate::document::Document;
use crate::error::Result;
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::{info, instrument};

/// Write the document markup to `path`, or to stdout when `path` is `None`.
#[instrument(level = "info", skip_all, fields(path = ?path))]
pub async fn write_document(document: &Document, path: Option<&str>) -> Result<()> {
    let mut html = document.to_html();
    html.push('\n');

    match path {
        Some(path) => {
            fs::write(path, &html).await?;
            info!(path, bytes = html.len(), "Wrote feed HTML");
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(html.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ARTICLES_CONTAINER_ID, Element};

    #[tokio::test]
    async fn test_write_document_to_file() {
        let mut doc = Document::with_articles_container();
        let mut child = Element::new("div");
        child.add_classes(&["row"]);
        doc.get_element_by_id_mut(ARTICLES_CONTAINER_ID)
            .unwrap()
            .append_child(child);

        let path = std::env::temp_dir().join(format!("article_feed_{}.html", std::process::id()));
        write_document(&doc, path.to_str()).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "<div id=\"articles-container\"><div class=\"row\"></div></div>\n"
        );
        let _ = std::fs::remove_file(&path);
    }
}

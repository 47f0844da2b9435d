//! Output of the rendered feed.
//!
//! # Submodules
//!
//! - [`html`]: Writes the `articles-container` markup to a file or stdout
pub mod html;

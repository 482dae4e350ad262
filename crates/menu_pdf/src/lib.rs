//! Menu PDF generation for the East @ West restaurant.
//!
//! A menu is either assembled from structured data through
//! [`document::MenuDocumentBuilder`] or converted from the HTML menu editor
//! page through [`markup::MarkupConverter`]. Both end in a [`render::PdfRenderer`].

pub mod assets;
pub mod builder;
pub mod catalog;
pub mod document;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod markup;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod theme;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use error::MenuError;
pub use pipeline::{generate_from_markup, generate_structured, GenerationReport};

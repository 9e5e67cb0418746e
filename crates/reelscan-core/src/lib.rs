//! # Reelscan Core
//!
//! Single-pass extractors over a markup token stream. Pulls movie and person
//! facts out of film database pages without building a DOM, and maps media
//! server library entries to film database ids.
//!
//! ## Quick Start
//!
//! ```rust
//! use reelscan_core::parser::MovieExtractor;
//!
//! let page = r#"<h1 class="">The Matrix</h1><span itemprop="ratingValue">8.7</span>"#;
//! let extractor = MovieExtractor::new(page);
//!
//! assert_eq!(extractor.title().unwrap(), "The Matrix");
//! assert_eq!(extractor.rating().unwrap(), 8.7);
//! ```
pub mod error;
pub mod ident;
pub mod parser;
pub mod source;
pub mod types;

// Re-export primary API
pub use error::{ReelscanError, Result};
pub use ident::{IdKind, expect_id, id_from_href};
pub use parser::{MovieExtractor, PersonExtractor, TokenStream, title_id_from_guid};
pub use source::DocumentSource;
pub use types::{LibraryListing, Movie, Person, TagValue, Video};

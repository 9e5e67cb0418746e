//! The seam between the extractors and whatever supplies raw markup.

use crate::error::Result;
use crate::ident::IdKind;

/// Supplies raw film database pages.
///
/// The HTTP client in `reelscan-client` is the production implementation;
/// anything that can hand back a whole document as a string will do.
pub trait DocumentSource {
    /// The page for a title id (`tt…`).
    fn title_page(&self, id: &str) -> Result<String>;

    /// The page for a person id (`nm…`).
    fn name_page(&self, id: &str) -> Result<String>;

    /// A search results page restricted to `kind`, for an already
    /// URL-safe `query`.
    fn search_page(&self, kind: IdKind, query: &str) -> Result<String>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn title_page(&self, id: &str) -> Result<String> {
        (**self).title_page(id)
    }

    fn name_page(&self, id: &str) -> Result<String> {
        (**self).name_page(id)
    }

    fn search_page(&self, kind: IdKind, query: &str) -> Result<String> {
        (**self).search_page(kind, query)
    }
}

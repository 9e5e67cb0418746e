use std::num::ParseFloatError;

use thiserror::Error;

/// Errors that can occur while fetching or scanning documents.
#[derive(Debug, Error)]
pub enum ReelscanError {
    /// The document could not be retrieved from its source.
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        /// The URL (with secrets redacted) that was requested.
        url: String,
        /// Transport or status failure description.
        reason: String,
    },

    /// The structural marker for a field never appeared in the document.
    #[error("{field} not found in document")]
    NotFound {
        /// Name of the field being extracted.
        field: &'static str,
    },

    /// A matched field's text could not be converted to the expected type.
    #[error("failed to parse {field} from {text:?}")]
    Parse {
        /// Name of the field being extracted.
        field: &'static str,
        /// The raw text that failed conversion.
        text: String,
        /// Underlying conversion error.
        #[source]
        source: ParseFloatError,
    },

    /// An href or guid does not follow the `tt…` / `nm…` identifier shapes.
    #[error("malformed identifier: {0:?}")]
    MalformedIdentifier(String),

    /// The token stream ended while a scope was still open.
    #[error("markup ended before {field} scope was closed")]
    Truncated {
        /// Name of the field being extracted.
        field: &'static str,
    },

    /// A media server listing could not be decoded.
    #[error("library listing could not be decoded: {0}")]
    Xml(String),
}

impl ReelscanError {
    pub(crate) fn not_found(field: &'static str) -> Self {
        Self::NotFound { field }
    }

    /// Returns `true` for the "marker absent" failure kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<quick_xml::DeError> for ReelscanError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Result type alias for reelscan operations.
pub type Result<T> = std::result::Result<T, ReelscanError>;

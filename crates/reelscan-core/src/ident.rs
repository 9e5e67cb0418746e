//! # Identifier Rules
//!
//! Film database keys are a two-letter prefix followed by digits:
//! `tt0133093` for titles, `nm0000206` for people. Everything the
//! extractors pull out of an `href` or a guid goes through here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReelscanError, Result};

/// The two kinds of film database identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    /// `tt…`
    Title,
    /// `nm…`
    Person,
}

impl IdKind {
    /// The two-letter prefix for this kind.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Title => "tt",
            Self::Person => "nm",
        }
    }

    /// Classifies `id`, returning `None` when it follows neither shape.
    ///
    /// # Examples
    /// ```
    /// use reelscan_core::IdKind;
    ///
    /// assert_eq!(IdKind::of("tt0133093"), Some(IdKind::Title));
    /// assert_eq!(IdKind::of("nm0000206"), Some(IdKind::Person));
    /// assert_eq!(IdKind::of("xx123"), None);
    /// ```
    #[must_use]
    pub fn of(id: &str) -> Option<Self> {
        [Self::Title, Self::Person].into_iter().find(|kind| {
            id.strip_prefix(kind.prefix())
                .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        })
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Recovers the identifier embedded in an `href`.
///
/// The query string and fragment are dropped, the remainder is split on
/// `/`, and the first segment with a valid identifier shape wins. Works for
/// both relative (`/name/nm0000206/?ref_=x`) and absolute links.
///
/// # Errors
///
/// Returns `ReelscanError::MalformedIdentifier` if no segment is a title or
/// person id.
pub fn id_from_href(href: &str) -> Result<(IdKind, String)> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .find_map(|segment| IdKind::of(segment).map(|kind| (kind, segment.to_string())))
        .ok_or_else(|| ReelscanError::MalformedIdentifier(href.to_string()))
}

/// Like [`id_from_href`], but the identifier must be of the given kind.
///
/// # Errors
///
/// Returns `ReelscanError::MalformedIdentifier` if the href carries no id or
/// an id of the other kind.
pub fn expect_id(href: &str, expected: IdKind) -> Result<String> {
    match id_from_href(href)? {
        (kind, id) if kind == expected => Ok(id),
        _ => Err(ReelscanError::MalformedIdentifier(href.to_string())),
    }
}

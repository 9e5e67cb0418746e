use serde::{Deserialize, Serialize};

use super::person::Person;

/// A film database title, assembled one field at a time.
///
/// Each field comes from its own pass over the title page, so a field whose
/// marker was missing keeps its empty value while the others are filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Title id (`tt…`).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Aggregate user rating; `0.0` when unknown.
    pub rating: f32,

    /// Genres in document order.
    pub genres: Vec<String>,

    /// Recommended title ids in document order, without duplicates.
    pub recommendations: Vec<String>,

    /// Directors, id and name only.
    pub directors: Vec<Person>,

    /// Cast members, id and name only.
    pub cast: Vec<Person>,
}

impl Movie {
    /// Creates an empty record for `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the rating was found.
    #[must_use]
    pub fn has_rating(&self) -> bool {
        self.rating != 0.0
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Movie({}", self.id)?;
        if !self.title.is_empty() {
            write!(f, ", title={:?}", self.title)?;
        }
        if self.has_rating() {
            write!(f, ", rating={:.1}", self.rating)?;
        }
        if !self.genres.is_empty() {
            write!(f, ", genres=[{}]", self.genres.join(", "))?;
        }
        write!(f, ", recs={}", self.recommendations.len())?;
        write!(f, ", cast={}", self.cast.len())?;
        write!(f, ")")
    }
}

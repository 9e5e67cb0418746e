use serde::{Deserialize, Serialize};

/// Root of a media server section listing (`<MediaContainer>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "MediaContainer")]
pub struct LibraryListing {
    /// One entry per `<Video>` child, in listing order.
    #[serde(rename = "Video", default)]
    pub videos: Vec<Video>,
}

/// A single library entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Agent guid, e.g. `com.plexapp.agents.imdb://tt0458525?lang=en`.
    #[serde(rename = "@guid", default)]
    pub guid: String,

    #[serde(rename = "@title", default)]
    pub title: String,

    /// Rating as listed by the server (kept verbatim).
    #[serde(rename = "@rating", default)]
    pub rating: Option<String>,

    /// Unix timestamp the entry was added, verbatim.
    #[serde(rename = "@addedAt", default)]
    pub added_at: Option<String>,

    #[serde(rename = "Genre", default)]
    pub genres: Vec<TagValue>,

    #[serde(rename = "Director", default)]
    pub directors: Vec<TagValue>,

    #[serde(rename = "Role", default)]
    pub cast: Vec<TagValue>,
}

/// A child element whose readable value lives in its `tag` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    #[serde(rename = "@tag", default)]
    pub tag: String,
}

impl Video {
    /// Genre names in listing order.
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|g| g.tag.as_str())
    }

    /// Director names in listing order.
    pub fn director_names(&self) -> impl Iterator<Item = &str> {
        self.directors.iter().map(|d| d.tag.as_str())
    }

    /// Cast names in listing order.
    pub fn cast_names(&self) -> impl Iterator<Item = &str> {
        self.cast.iter().map(|r| r.tag.as_str())
    }
}

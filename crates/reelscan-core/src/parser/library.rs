//! # Library Cross-Referencer
//!
//! Maps media server listing entries to film database title ids. The
//! listing itself is decoded by `quick-xml`; the id lives inside the
//! entry's agent guid (`com.plexapp.agents.imdb://tt0458525?lang=en`).

use crate::error::{ReelscanError, Result};
use crate::ident::IdKind;
use crate::types::{LibraryListing, Video};

/// Extracts the title id from an agent guid.
///
/// The part between `//` and `?` is returned when it contains the title
/// prefix.
///
/// # Errors
///
/// Returns `ReelscanError::MalformedIdentifier` if the guid has no `//`
/// separator, and `ReelscanError::NotFound` if the path part holds no
/// title id.
pub fn title_id_from_guid(guid: &str) -> Result<String> {
    let (_, rest) = guid
        .split_once("//")
        .ok_or_else(|| ReelscanError::MalformedIdentifier(guid.to_string()))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.contains(IdKind::Title.prefix()) {
        Ok(path.to_string())
    } else {
        Err(ReelscanError::not_found("title id"))
    }
}

impl LibraryListing {
    /// Decodes a `MediaContainer` document.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::Xml` if the document is not a listing.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Pairs every entry's title with its title id lookup, in listing order.
    pub fn cross_reference(&self) -> impl Iterator<Item = (&str, Result<String>)> {
        self.videos
            .iter()
            .map(|video| (video.title.as_str(), video.title_id()))
    }
}

impl Video {
    /// The film database title id behind this entry's guid.
    ///
    /// # Errors
    ///
    /// See [`title_id_from_guid`].
    pub fn title_id(&self) -> Result<String> {
        title_id_from_guid(&self.guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = include_str!("../../fixtures/library.xml");

    #[test]
    fn guid_with_title_id() {
        assert_eq!(
            title_id_from_guid("com.plexapp.agents.imdb://tt0458525?lang=en").unwrap(),
            "tt0458525"
        );
    }

    #[test]
    fn guid_without_query() {
        assert_eq!(
            title_id_from_guid("com.plexapp.agents.imdb://tt0133093").unwrap(),
            "tt0133093"
        );
    }

    #[test]
    fn guid_from_other_agent_is_not_found() {
        let err = title_id_from_guid("com.plexapp.agents.themoviedb://603?lang=en").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn guid_without_separator_is_malformed() {
        assert!(matches!(
            title_id_from_guid("local-file-12"),
            Err(ReelscanError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn listing_decodes_entries_and_children() {
        let listing = LibraryListing::from_xml(LISTING).unwrap();
        assert_eq!(listing.videos.len(), 3);

        let first = &listing.videos[0];
        assert_eq!(first.title, "X-Men Origins: Wolverine");
        assert_eq!(first.rating.as_deref(), Some("5.7"));
        assert_eq!(first.added_at.as_deref(), Some("1536352051"));
        assert_eq!(first.genre_names().collect::<Vec<_>>(), vec!["Action", "Adventure"]);
        assert_eq!(first.director_names().collect::<Vec<_>>(), vec!["Gavin Hood"]);
        assert_eq!(
            first.cast_names().collect::<Vec<_>>(),
            vec!["Hugh Jackman", "Liev Schreiber", "Danny Huston"]
        );

        assert_eq!(listing.videos[2].rating, None);
    }

    #[test]
    fn listing_cross_reference_keeps_order() {
        let listing = LibraryListing::from_xml(LISTING).unwrap();
        let pairs: Vec<_> = listing.cross_reference().collect();

        assert_eq!(pairs[0].0, "X-Men Origins: Wolverine");
        assert_eq!(pairs[0].1.as_deref().unwrap(), "tt0458525");
        assert_eq!(pairs[1].1.as_deref().unwrap(), "tt0133093");
        assert!(pairs[2].1.as_ref().unwrap_err().is_not_found());
    }

    #[test]
    fn garbage_listing_is_xml_error() {
        assert!(matches!(
            LibraryListing::from_xml("<MediaContainer><Video"),
            Err(ReelscanError::Xml(_))
        ));
    }

    #[test]
    fn empty_listing() {
        let listing = LibraryListing::from_xml(r#"<MediaContainer size="0"></MediaContainer>"#).unwrap();
        assert!(listing.videos.is_empty());
    }
}

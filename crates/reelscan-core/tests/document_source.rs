//! End-to-end extraction through an in-memory document source.

use std::collections::HashMap;

use reelscan_core::{DocumentSource, IdKind, Movie, Person, ReelscanError, Result};

const TITLE: &str = include_str!("../fixtures/title.html");
const NAME: &str = include_str!("../fixtures/name.html");
const SEARCH: &str = include_str!("../fixtures/search.html");

/// Serves fixture pages keyed by URL path.
struct Pages(HashMap<String, &'static str>);

impl Pages {
    fn new() -> Self {
        let mut pages = HashMap::new();
        pages.insert("/title/tt0133093/".to_string(), TITLE);
        pages.insert("/name/nm0000206/".to_string(), NAME);
        pages.insert("/find?s=nm&q=Keanu+Reeves".to_string(), SEARCH);
        Self(pages)
    }

    fn get(&self, path: String) -> Result<String> {
        self.0
            .get(&path)
            .map(|page| page.to_string())
            .ok_or(ReelscanError::Fetch {
                url: path,
                reason: "server returned 404 Not Found".to_string(),
            })
    }
}

impl DocumentSource for Pages {
    fn title_page(&self, id: &str) -> Result<String> {
        self.get(format!("/title/{id}/"))
    }

    fn name_page(&self, id: &str) -> Result<String> {
        self.get(format!("/name/{id}/"))
    }

    fn search_page(&self, kind: IdKind, query: &str) -> Result<String> {
        self.get(format!("/find?s={kind}&q={query}"))
    }
}

#[test]
fn movie_from_source() {
    let movie = Movie::fetch(&Pages::new(), "tt0133093", 5).unwrap();

    assert_eq!(movie.id, "tt0133093");
    assert_eq!(movie.title, "The Matrix");
    assert_eq!(movie.rating, 8.7);
    assert_eq!(movie.genres, vec!["Action", "Sci-Fi"]);
    assert_eq!(movie.directors.len(), 2);
    assert_eq!(movie.cast[0], Person::with_name("nm0000206", "Keanu Reeves"));
}

#[test]
fn missing_movie_is_fetch_error() {
    let err = Movie::fetch(&Pages::new(), "tt0000001", 5).unwrap_err();
    assert!(matches!(err, ReelscanError::Fetch { ref url, .. } if url == "/title/tt0000001/"));
}

#[test]
fn person_by_name_then_details() {
    let pages = Pages::new();
    let mut person = Person::named("  Keanu Reeves ");

    assert_eq!(person.resolve_id(&pages).unwrap(), "nm0000206");
    person.fetch(&pages).unwrap();

    assert_eq!(person.known_for, vec!["tt0133093", "tt0234215", "tt2911666", "tt0111257"]);
}

#[test]
fn cast_member_details() {
    let pages = Pages::new();
    let movie = Movie::fetch(&pages, "tt0133093", 1).unwrap();

    let mut lead = movie.cast[0].clone();
    lead.fetch(&pages).unwrap();
    assert_eq!(lead.name, "Keanu Reeves");
    assert_eq!(lead.known_for.len(), 4);

    // Only the lead has a page here.
    let mut second = movie.cast[1].clone();
    assert!(matches!(second.fetch(&pages), Err(ReelscanError::Fetch { .. })));
}

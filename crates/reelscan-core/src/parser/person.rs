use tracing::debug;

use crate::error::{ReelscanError, Result};
use crate::ident::{IdKind, id_from_href};
use crate::parser::tokenizer::{Event, TokenStream};
use crate::source::DocumentSource;
use crate::types::Person;

/// Field extractor for a person's name page.
pub struct PersonExtractor<'d> {
    document: &'d str,
}

impl<'d> PersonExtractor<'d> {
    /// Wraps an already fetched name page.
    pub fn new(document: &'d str) -> Self {
        Self { document }
    }

    fn tokens(&self) -> TokenStream<'d> {
        TokenStream::new(self.document)
    }

    /// The first non-blank text after an `h1` with `class=header`.
    ///
    /// Unlike a title heading, other attributes are allowed and the heading
    /// may wrap the name in further tags.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::NotFound` if the heading never appears or is
    /// never followed by text.
    pub fn name(&self) -> Result<String> {
        let mut armed = false;
        for event in self.tokens() {
            match event {
                Event::StartTag(tag) if tag.is("h1") && tag.attr_is("class", "header") => {
                    armed = true;
                }
                Event::Text(text) if armed && !text.trim().is_empty() => {
                    return Ok(text.trim().to_string());
                }
                _ => {}
            }
        }
        Err(ReelscanError::not_found("name"))
    }

    /// Title or person ids linked from the `knownfor` block.
    ///
    /// The block ends when its `div` nesting returns to zero; links after it
    /// are never considered.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::NotFound` if nothing was collected.
    pub fn known_for(&self) -> Result<Vec<String>> {
        let mut known_for: Vec<String> = Vec::new();
        let mut div_depth = 0usize;

        for event in self.tokens() {
            match event {
                Event::StartTag(tag) if tag.is("div") => {
                    if div_depth > 0 {
                        div_depth += 1;
                    } else if tag.attr_is("id", "knownfor") {
                        div_depth = 1;
                    }
                }
                Event::StartTag(tag) if div_depth > 0 && tag.is("a") => {
                    if !tag.attr_is("class", "knownfor-ellipsis") {
                        continue;
                    }
                    let href = tag.attr("href").unwrap_or_default();
                    match id_from_href(href) {
                        Ok((_, id)) if !known_for.contains(&id) => known_for.push(id),
                        Ok(_) => {}
                        Err(err) => debug!(%err, "skipping known-for link"),
                    }
                }
                Event::EndTag(name) if div_depth > 0 && name == "div" => {
                    div_depth -= 1;
                    if div_depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        if known_for.is_empty() {
            return Err(ReelscanError::not_found("known_for"));
        }
        Ok(known_for)
    }
}

/// The id linked from the first `result_text` row of a search results page.
///
/// # Errors
///
/// Returns `ReelscanError::MalformedIdentifier` if that link carries no id,
/// and `ReelscanError::NotFound` if no row with a link exists.
pub fn first_search_result(document: &str) -> Result<(IdKind, String)> {
    let mut in_row = false;
    for event in TokenStream::new(document) {
        let Event::StartTag(tag) = event else {
            continue;
        };
        if tag.is("td") && tag.attr_is("class", "result_text") {
            in_row = true;
        } else if in_row && tag.is("a") {
            if let Some(href) = tag.attr("href") {
                return id_from_href(href);
            }
        }
    }
    Err(ReelscanError::not_found("search result"))
}

/// Builds the search query for a name: trimmed, spaces become `+`.
#[must_use]
pub fn search_query(name: &str) -> String {
    name.trim().replace(' ', "+")
}

impl Person {
    /// Looks up this person's id by name through a search results page.
    ///
    /// # Errors
    ///
    /// Fails if the search page cannot be fetched, has no result, or the
    /// first result is not a person id.
    pub fn resolve_id<S: DocumentSource + ?Sized>(&mut self, source: &S) -> Result<&str> {
        let query = search_query(&self.name);
        let document = source.search_page(IdKind::Person, &query)?;
        let (kind, id) = first_search_result(&document)?;
        if kind != IdKind::Person {
            return Err(ReelscanError::MalformedIdentifier(id));
        }
        debug!(name = %self.name, %id, "resolved person");
        self.id = id;
        Ok(&self.id)
    }

    /// Fills name and known-for from this person's page.
    ///
    /// The page is fetched once and cached; fields that are already set are
    /// not scanned again, so a second call does no work.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be fetched or the id is not a person id.
    /// Field failures are reported after both fields were attempted, with
    /// the name's failure taking precedence; whatever succeeded stays set.
    pub fn fetch<S: DocumentSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        if IdKind::of(&self.id) != Some(IdKind::Person) {
            return Err(ReelscanError::MalformedIdentifier(self.id.clone()));
        }
        if self.document.is_none() {
            self.document = Some(source.name_page(&self.id)?);
        }
        self.fill_from_document()
    }

    /// Caches `document` as this person's page and fills the fields from it.
    ///
    /// # Errors
    ///
    /// Same field failures as [`Person::fetch`].
    pub fn load(&mut self, document: impl Into<String>) -> Result<()> {
        self.document = Some(document.into());
        self.fill_from_document()
    }

    fn fill_from_document(&mut self) -> Result<()> {
        let Some(document) = self.document.as_deref() else {
            return Ok(());
        };
        let extractor = PersonExtractor::new(document);

        let name = if self.name.is_empty() {
            extractor.name().map(Some)
        } else {
            Ok(None)
        };
        let known_for = if self.known_for.is_empty() {
            extractor.known_for().map(Some)
        } else {
            Ok(None)
        };

        let mut first_err = None;
        match name {
            Ok(Some(name)) => self.name = name,
            Ok(None) => {}
            Err(err) => first_err = Some(err),
        }
        match known_for {
            Ok(Some(ids)) => self.known_for = ids,
            Ok(None) => {}
            Err(err) => {
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    const NAME_PAGE: &str = include_str!("../../fixtures/name.html");
    const SEARCH_PAGE: &str = include_str!("../../fixtures/search.html");

    #[derive(Default)]
    struct CountingSource {
        name_pages: Cell<usize>,
        searches: Cell<usize>,
    }

    impl DocumentSource for CountingSource {
        fn title_page(&self, id: &str) -> Result<String> {
            Err(ReelscanError::Fetch {
                url: format!("/title/{id}/"),
                reason: "not served".into(),
            })
        }

        fn name_page(&self, _id: &str) -> Result<String> {
            self.name_pages.set(self.name_pages.get() + 1);
            Ok(NAME_PAGE.to_string())
        }

        fn search_page(&self, kind: IdKind, query: &str) -> Result<String> {
            assert_eq!(kind, IdKind::Person);
            assert_eq!(query, "Keanu+Reeves");
            self.searches.set(self.searches.get() + 1);
            Ok(SEARCH_PAGE.to_string())
        }
    }

    #[test]
    fn name_from_fixture() {
        assert_eq!(PersonExtractor::new(NAME_PAGE).name().unwrap(), "Keanu Reeves");
    }

    #[test]
    fn name_flag_is_sticky_across_tags() {
        let doc = r#"<h1 class="header" id="x"> <span><b>  Someone Else </b></span></h1>"#;
        assert_eq!(PersonExtractor::new(doc).name().unwrap(), "Someone Else");
    }

    #[test]
    fn name_missing() {
        let err = PersonExtractor::new("<h1>Nobody</h1>").name().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn known_for_from_fixture() {
        assert_eq!(
            PersonExtractor::new(NAME_PAGE).known_for().unwrap(),
            vec!["tt0133093", "tt0234215", "tt2911666", "tt0111257"]
        );
    }

    #[test]
    fn known_for_stops_when_block_closes() {
        let doc = r#"
            <div id="knownfor">
              <div class="knownfor-title">
                <div><a class="knownfor-ellipsis" href="/title/tt0000001/">One</a></div>
              </div>
              <a class="knownfor-ellipsis" href="/title/tt0000002/">Two</a>
              <a class="knownfor-ellipsis" href="/title/tt0000001/">One again</a>
              <a class="other" href="/title/tt0000005/">Not it</a>
            </div>
            <a class="knownfor-ellipsis" href="/title/tt0000003/">Outside</a>
        "#;
        assert_eq!(
            PersonExtractor::new(doc).known_for().unwrap(),
            vec!["tt0000001", "tt0000002"]
        );
    }

    #[test]
    fn known_for_skips_malformed_links() {
        let doc = r#"<div id="knownfor">
            <a class="knownfor-ellipsis" href="/list/ls123/">List</a>
            <a class="knownfor-ellipsis" href="/title/tt0000004/">Four</a>
        </div>"#;
        assert_eq!(PersonExtractor::new(doc).known_for().unwrap(), vec!["tt0000004"]);
    }

    #[test]
    fn known_for_missing() {
        let err = PersonExtractor::new(r#"<div id="knownfor"></div>"#)
            .known_for()
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn search_result_from_fixture() {
        assert_eq!(
            first_search_result(SEARCH_PAGE).unwrap(),
            (IdKind::Person, "nm0000206".to_string())
        );
    }

    #[test]
    fn search_result_malformed_link_is_hard_failure() {
        let doc = r#"<td class="result_text"><a href="/list/ls0001/">Bad</a></td>
                     <td class="result_text"><a href="/name/nm0000001/">Good</a></td>"#;
        assert!(matches!(
            first_search_result(doc),
            Err(ReelscanError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn search_result_missing() {
        let doc = r#"<a href="/name/nm0000001/">Not in a result row</a>"#;
        assert!(first_search_result(doc).unwrap_err().is_not_found());
    }

    #[test]
    fn query_replaces_spaces() {
        assert_eq!(search_query("  Keanu Reeves "), "Keanu+Reeves");
        assert_eq!(search_query("Cher"), "Cher");
    }

    #[test]
    fn resolve_then_fetch() {
        let source = CountingSource::default();
        let mut person = Person::named("Keanu Reeves");

        assert_eq!(person.resolve_id(&source).unwrap(), "nm0000206");
        person.fetch(&source).unwrap();

        assert_eq!(person.name, "Keanu Reeves");
        assert_eq!(person.known_for.len(), 4);
        assert_eq!(source.searches.get(), 1);
        assert_eq!(source.name_pages.get(), 1);
    }

    #[test]
    fn fetch_twice_is_idempotent() {
        let source = CountingSource::default();
        let mut person = Person::new("nm0000206");

        person.fetch(&source).unwrap();
        let first = person.clone();
        person.fetch(&source).unwrap();

        assert_eq!(person, first);
        assert_eq!(source.name_pages.get(), 1);
        assert!(person.has_document());
    }

    #[test]
    fn fetch_rejects_non_person_id() {
        let source = CountingSource::default();
        let mut person = Person::new("tt0133093");
        assert!(matches!(
            person.fetch(&source),
            Err(ReelscanError::MalformedIdentifier(_))
        ));
        assert_eq!(source.name_pages.get(), 0);
    }

    #[test]
    fn partial_page_keeps_successful_field() {
        let mut person = Person::new("nm0000001");
        let err = person
            .load(r#"<h1 class="header"><span>Only Name</span></h1>"#)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(person.name, "Only Name");
        assert!(person.known_for.is_empty());
    }
}

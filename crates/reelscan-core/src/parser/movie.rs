use tracing::{debug, warn};

use crate::error::{ReelscanError, Result};
use crate::ident::{IdKind, expect_id, id_from_href};
use crate::parser::tokenizer::{Event, TokenStream};
use crate::source::DocumentSource;
use crate::types::{Movie, Person};

/// Attribute value marking the aggregate rating `span`.
const RATING_MARKER: &str = "ratingValue";

const GENRES_LABEL: &str = "Genres:";
const DIRECTOR_LABEL: &str = "Director:";

/// Field extractor for a title page.
///
/// Every field is an independent pass over a fresh token stream, so the
/// methods can be called in any order and any number of times.
pub struct MovieExtractor<'d> {
    document: &'d str,
}

impl<'d> MovieExtractor<'d> {
    /// Wraps an already fetched title page.
    pub fn new(document: &'d str) -> Self {
        Self { document }
    }

    fn tokens(&self) -> TokenStream<'d> {
        TokenStream::new(self.document)
    }

    /// Runs every field pass and assembles a [`Movie`].
    ///
    /// A field that fails is logged and left empty; the other fields are
    /// still extracted.
    pub fn extract(&self, id: &str, cast_limit: usize) -> Movie {
        let mut movie = Movie::new(id);

        if let Some(title) = keep(id, "title", self.title()) {
            movie.title = title;
        }
        if let Some(rating) = keep(id, "rating", self.rating()) {
            movie.rating = rating;
        }
        if let Some(genres) = keep(id, "genres", self.genres()) {
            movie.genres = genres;
        }
        if let Some(recommendations) = keep(id, "recommendations", self.recommendations()) {
            movie.recommendations = recommendations;
        }
        if let Some(directors) = keep(id, "directors", self.directors()) {
            movie.directors = directors;
        }
        if let Some(cast) = keep(id, "cast", self.cast(cast_limit)) {
            movie.cast = cast;
        }

        movie
    }

    /// The text right after the first `h1` whose only attribute is an empty
    /// `class`.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::NotFound` if no such heading is followed by text.
    pub fn title(&self) -> Result<String> {
        let mut tokens = self.tokens();
        while let Some(event) = tokens.next() {
            let Event::StartTag(tag) = event else {
                continue;
            };
            if tag.is("h1") && tag.attributes.len() == 1 && tag.attr_is("class", "") {
                if let Some(Event::Text(text)) = tokens.next() {
                    return Ok(text.trim().to_string());
                }
            }
        }
        Err(ReelscanError::not_found("title"))
    }

    /// The aggregate rating from the `span` carrying the rating marker.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::Parse` if the text after the marker is not a
    /// number, and `ReelscanError::NotFound` if the marker never appears.
    pub fn rating(&self) -> Result<f32> {
        let mut tokens = self.tokens();
        while let Some(event) = tokens.next() {
            let Event::StartTag(tag) = event else {
                continue;
            };
            if tag.is("span") && tag.any_attr_is(RATING_MARKER) {
                if let Some(Event::Text(text)) = tokens.next() {
                    let text = text.trim();
                    return text.parse::<f32>().map_err(|source| ReelscanError::Parse {
                        field: "rating",
                        text: text.to_string(),
                        source,
                    });
                }
            }
        }
        Err(ReelscanError::not_found("rating"))
    }

    /// Recommended title ids from `data-tconst` attributes on `div`s.
    ///
    /// The first repeated id ends the scan: past that point the page only
    /// repeats entries already seen.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::NotFound` if no recommendation was collected.
    pub fn recommendations(&self) -> Result<Vec<String>> {
        let mut recommendations: Vec<String> = Vec::new();

        'scan: for event in self.tokens() {
            let Event::StartTag(tag) = event else {
                continue;
            };
            if !tag.is("div") {
                continue;
            }
            for (key, value) in &tag.attributes {
                if key == "class" && value == "rec_overview" {
                    continue;
                }
                if key != "data-tconst" {
                    continue;
                }
                if IdKind::of(value) != Some(IdKind::Title) {
                    debug!(value = %value, "skipping malformed recommendation id");
                    continue;
                }
                if recommendations.contains(value) {
                    break 'scan;
                }
                recommendations.push(value.clone());
            }
        }

        if recommendations.is_empty() {
            return Err(ReelscanError::not_found("recommendations"));
        }
        Ok(recommendations)
    }

    /// Genre link texts from the `Genres:` block, in document order.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::NotFound` if the block label never appears.
    pub fn genres(&self) -> Result<Vec<String>> {
        let mut tokens = self
            .after_label(GENRES_LABEL)
            .ok_or(ReelscanError::not_found("genres"))?;
        let mut genres = Vec::new();

        while let Some(event) = tokens.next() {
            match event {
                Event::StartTag(tag) if tag.is("a") => match tokens.next() {
                    Some(Event::Text(text)) => genres.push(text.trim().to_string()),
                    Some(Event::EndTag(name)) if name == "div" => break,
                    _ => {}
                },
                Event::EndTag(name) if name == "div" => break,
                _ => {}
            }
        }

        Ok(genres)
    }

    /// Directors linked from the `Director:` block.
    ///
    /// Links that do not point at a person id are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::NotFound` if the block label never appears.
    pub fn directors(&self) -> Result<Vec<Person>> {
        let mut tokens = self
            .after_label(DIRECTOR_LABEL)
            .ok_or(ReelscanError::not_found("directors"))?;
        let mut directors = Vec::new();

        while let Some(event) = tokens.next() {
            match event {
                Event::StartTag(tag) if tag.is("a") => {
                    let href = tag.attr("href").unwrap_or_default();
                    let id = match expect_id(href, IdKind::Person) {
                        Ok(id) => id,
                        Err(err) => {
                            debug!(%err, "skipping director link");
                            continue;
                        }
                    };
                    match tokens.next() {
                        Some(Event::Text(name)) => {
                            directors.push(Person::with_name(id, name.trim()));
                        }
                        Some(Event::EndTag(name)) if name == "div" => break,
                        _ => {}
                    }
                }
                Event::EndTag(name) if name == "div" => break,
                _ => {}
            }
        }

        Ok(directors)
    }

    /// Cast members from the `cast_list` table.
    ///
    /// `limit` is advisory: the whole table is always walked and nothing is
    /// truncated. Nesting is approximated by a counter bumped on every start
    /// tag and dropped on every end tag, void elements included; a member's
    /// name is only accepted while that counter stays above its value before
    /// the member's `td`.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::Truncated` if the document ends inside the
    /// table, and `ReelscanError::NotFound` if no member was collected.
    pub fn cast(&self, limit: usize) -> Result<Vec<Person>> {
        let mut cast = Vec::new();
        let mut depth: i64 = 0;
        let mut in_table = false;
        let mut member_depth: Option<i64> = None;
        let mut link_id: Option<String> = None;

        for event in self.tokens() {
            match event {
                Event::StartTag(tag) => {
                    depth += 1;
                    if !in_table {
                        in_table = tag.is("table") && tag.attr_is("class", "cast_list");
                    } else if member_depth.is_none() {
                        if tag.is("td") && tag.attributes.is_empty() {
                            member_depth = Some(depth - 1);
                        }
                    } else if link_id.is_none() && tag.is("a") {
                        if let Some(href) = tag.attr("href") {
                            match id_from_href(href) {
                                Ok((_, id)) => link_id = Some(id),
                                Err(err) => debug!(%err, "skipping cast link"),
                            }
                        }
                    }
                }
                Event::EndTag(name) => {
                    depth -= 1;
                    if in_table && name == "table" {
                        return finish_cast(cast, limit);
                    }
                    if member_depth.is_some_and(|d| depth <= d) {
                        member_depth = None;
                        link_id = None;
                    }
                }
                Event::Text(text) => {
                    let (Some(floor), Some(id)) = (member_depth, link_id.as_ref()) else {
                        continue;
                    };
                    let name = text.trim();
                    if depth > floor && !name.is_empty() {
                        cast.push(Person::with_name(id.clone(), name));
                        member_depth = None;
                        link_id = None;
                    }
                }
            }
        }

        if in_table {
            Err(ReelscanError::Truncated { field: "cast" })
        } else {
            Err(ReelscanError::not_found("cast"))
        }
    }

    /// Positions a stream right after an inline `h4` reading exactly `label`.
    fn after_label(&self, label: &str) -> Option<TokenStream<'d>> {
        let mut tokens = self.tokens();
        while let Some(event) = tokens.next() {
            let Event::StartTag(tag) = event else {
                continue;
            };
            if tag.is("h4") && tag.attr_is("class", "inline") {
                let next = tokens.next();
                if next.as_ref().and_then(Event::as_text) == Some(label) {
                    return Some(tokens);
                }
            }
        }
        None
    }
}

fn finish_cast(cast: Vec<Person>, limit: usize) -> Result<Vec<Person>> {
    if cast.is_empty() {
        return Err(ReelscanError::not_found("cast"));
    }
    // TODO: `limit` is never enforced; decide whether it should cap the list.
    if cast.len() > limit {
        debug!(found = cast.len(), limit, "cast list exceeds requested size");
    }
    Ok(cast)
}

fn keep<T>(id: &str, field: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => {
            debug!(id, field, "extracted");
            Some(value)
        }
        Err(err) => {
            warn!(id, field, %err, "field unavailable");
            None
        }
    }
}

impl Movie {
    /// Fetches the title page for `id` and extracts every field.
    ///
    /// # Errors
    ///
    /// Only a failed fetch is an error; field failures leave the field empty.
    pub fn fetch<S: DocumentSource + ?Sized>(source: &S, id: &str, cast_limit: usize) -> Result<Self> {
        let document = source.title_page(id)?;
        Ok(MovieExtractor::new(&document).extract(id, cast_limit))
    }
}

//! # Markup Token Stream
//!
//! Thin adapter over the `html5gum` tokenizer. Scanners only care about
//! start tags, end tags and text, so comments and doctypes are dropped and
//! recoverable tokenizer diagnostics are logged instead of surfaced.
//! Exhaustion of the stream is end-of-document.

use html5gum::{Token, Tokenizer};
use tracing::trace;

/// A start tag with its lowercase name and attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Lowercase element name.
    pub name: String,
    /// Attributes as `(key, value)` pairs, keys lowercase.
    pub attributes: Vec<(String, String)>,
}

impl Tag {
    /// Returns `true` if this is a `name` element.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Value of the attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if attribute `key` is present and equals `value`.
    pub fn attr_is(&self, key: &str, value: &str) -> bool {
        self.attr(key) == Some(value)
    }

    /// Returns `true` if any attribute, whatever its key, equals `value`.
    pub fn any_attr_is(&self, value: &str) -> bool {
        self.attributes.iter().any(|(_, v)| v == value)
    }
}

/// One event of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `<name attr="…">`
    StartTag(Tag),
    /// `</name>`, carrying the lowercase name.
    EndTag(String),
    /// Character data between tags, entities decoded.
    Text(String),
}

impl Event {
    /// The text of a `Text` event.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Forward-only stream of [`Event`]s over one document.
pub struct TokenStream<'a> {
    tokens: Box<dyn Iterator<Item = Token> + 'a>,
}

impl<'a> TokenStream<'a> {
    /// Starts tokenizing `document` from the beginning.
    pub fn new(document: &'a str) -> Self {
        Self {
            tokens: Box::new(Tokenizer::new(document).infallible()),
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            match self.tokens.next()? {
                Token::StartTag(tag) => {
                    return Some(Event::StartTag(Tag {
                        name: lossy(&tag.name),
                        attributes: tag
                            .attributes
                            .iter()
                            .map(|(k, v)| (lossy(k), lossy(v)))
                            .collect(),
                    }));
                }
                Token::EndTag(tag) => return Some(Event::EndTag(lossy(&tag.name))),
                Token::String(text) => return Some(Event::Text(lossy(&text))),
                Token::Error(err) => trace!(?err, "tokenizer diagnostic"),
                _ => {}
            }
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

use serde::{Deserialize, Serialize};

/// A film database person.
///
/// The raw name page is cached on the instance once fetched so that
/// repeated detail fetches never hit the source twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    /// Person id (`nm…`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Ids of the titles this person is known for, without duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_for: Vec<String>,

    #[serde(skip)]
    pub(crate) document: Option<String>,
}

impl Person {
    /// Creates an empty record for `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Creates a record carrying only id and name, as listed on a title page.
    #[must_use]
    pub fn with_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a record known only by name, to be resolved later.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_name(String::new(), name)
    }

    /// Returns `true` once a name page has been cached.
    #[must_use]
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }
}

// The cached page is an implementation detail, not part of identity.
impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.known_for == other.known_for
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let p = Person::new("nm0000206");
        assert_eq!(p.id, "nm0000206");
        assert!(p.name.is_empty());
        assert!(!p.has_document());

        let p = Person::named("Keanu Reeves");
        assert!(p.id.is_empty());
        assert_eq!(p.name, "Keanu Reeves");
    }

    #[test]
    fn equality_ignores_cached_document() {
        let mut a = Person::with_name("nm0000206", "Keanu Reeves");
        let b = a.clone();
        a.document = Some("<html></html>".into());
        assert_eq!(a, b);
    }

    #[test]
    fn display() {
        let p = Person::with_name("nm0000206", "Keanu Reeves");
        assert_eq!(p.to_string(), "Keanu Reeves (nm0000206)");
    }
}

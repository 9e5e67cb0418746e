//! # Reelscan
//!
//! Pulls movie and person facts out of film database pages and maps media
//! server library entries to film database ids.
//!
//! The extractors live in [`scan`]; the blocking HTTP document source and
//! media server listing live in [`client`].
//!
//! ```rust,no_run
//! use reelscan::{ClientConfig, ImdbClient, Person};
//!
//! let client = ImdbClient::new(ClientConfig::default())?;
//! let mut person = Person::named("Keanu Reeves");
//! person.resolve_id(&client)?;
//! person.fetch(&client)?;
//! println!("{person}: {:?}", person.known_for);
//! # Ok::<(), reelscan::ReelscanError>(())
//! ```

pub use reelscan_client as client;
pub use reelscan_core as scan;

pub use reelscan_client::{ClientConfig, ImdbClient, PlexClient, PlexConfig};
pub use reelscan_core::{
    DocumentSource, IdKind, LibraryListing, Movie, MovieExtractor, Person, PersonExtractor,
    ReelscanError, Result, Video, title_id_from_guid,
};

//! # Reelscan Client
//!
//! Blocking HTTP glue around `reelscan-core`: a [`DocumentSource`] backed by
//! the film database website, and a listing fetcher for a media server
//! library section. Every request reads the full body before any scanning.
//!
//! [`DocumentSource`]: reelscan_core::DocumentSource

mod http;

pub mod config;
pub mod imdb;
pub mod plex;

pub use config::{ClientConfig, PlexConfig};
pub use imdb::ImdbClient;
pub use plex::PlexClient;

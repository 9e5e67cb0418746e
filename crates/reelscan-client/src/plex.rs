use reelscan_core::{LibraryListing, Result};
use reqwest::blocking::Client;
use tracing::info;

use crate::config::PlexConfig;
use crate::http::{build_client, get_text, redact};

/// Blocking media server client for library section listings.
pub struct PlexClient {
    http: Client,
    config: PlexConfig,
}

impl PlexClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::Fetch` if the HTTP stack cannot be set up.
    pub fn new(config: PlexConfig) -> Result<Self> {
        let base = format!("http://{}:{}", config.host, config.port);
        let http = build_client(&base, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Listing URL for the configured section, token included.
    pub fn library_url(&self) -> String {
        format!(
            "http://{}:{}/library/sections/{}/all?X-Plex-Token={}",
            self.config.host, self.config.port, self.config.section, self.config.token
        )
    }

    /// Fetches and decodes the configured section's listing.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::Fetch` for transport failures and
    /// `ReelscanError::Xml` if the body is not a listing.
    pub fn library(&self) -> Result<LibraryListing> {
        let url = self.library_url();
        let listing = LibraryListing::from_xml(&get_text(&self.http, &url)?)?;
        info!(
            url = %redact(&url),
            entries = listing.videos.len(),
            "library listing decoded"
        );
        Ok(listing)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &PlexConfig {
        &self.config
    }
}

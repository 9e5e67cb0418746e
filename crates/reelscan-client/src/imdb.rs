use reelscan_core::{DocumentSource, IdKind, Result};
use reqwest::blocking::Client;

use crate::config::ClientConfig;
use crate::http::{build_client, get_text};

/// Blocking film database client.
///
/// Each call fetches one whole page; nothing is cached or retried here.
///
/// # Example
/// ```rust,no_run
/// use reelscan_client::{ClientConfig, ImdbClient};
/// use reelscan_core::Movie;
///
/// let client = ImdbClient::new(ClientConfig::default()).unwrap();
/// let movie = Movie::fetch(&client, "tt0133093", 5).unwrap();
/// println!("{movie}");
/// ```
pub struct ImdbClient {
    http: Client,
    config: ClientConfig,
}

impl ImdbClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `ReelscanError::Fetch` if the HTTP stack cannot be set up.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_client(&config.imdb_url, config.timeout)?;
        Ok(Self { http, config })
    }

    pub fn title_url(&self, id: &str) -> String {
        format!("{}/title/{id}/", self.config.imdb_url)
    }

    pub fn name_url(&self, id: &str) -> String {
        format!("{}/name/{id}/", self.config.imdb_url)
    }

    /// Search URL for an already URL-safe `query`.
    pub fn search_url(&self, kind: IdKind, query: &str) -> String {
        format!("{}/find?s={kind}&q={query}", self.config.imdb_url)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl DocumentSource for ImdbClient {
    fn title_page(&self, id: &str) -> Result<String> {
        get_text(&self.http, &self.title_url(id))
    }

    fn name_page(&self, id: &str) -> Result<String> {
        get_text(&self.http, &self.name_url(id))
    }

    fn search_page(&self, kind: IdKind, query: &str) -> Result<String> {
        get_text(&self.http, &self.search_url(kind, query))
    }
}

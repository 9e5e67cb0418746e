//! Connection settings for the film database and the media server.

use std::time::Duration;

/// Default film database location.
pub const DEFAULT_IMDB_URL: &str = "https://www.imdb.com";

/// Default media server port.
pub const DEFAULT_PLEX_PORT: u16 = 32400;

/// Settings shared by every request to the film database.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host, without a trailing slash.
    pub imdb_url: String,
    /// Whole-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            imdb_url: DEFAULT_IMDB_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at another film database host.
    pub fn with_imdb_url(mut self, url: impl Into<String>) -> Self {
        self.imdb_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where the media server lives and which library section to list.
#[derive(Debug, Clone)]
pub struct PlexConfig {
    pub host: String,
    pub port: u16,
    /// Sent as the `X-Plex-Token` query parameter; never logged.
    pub token: String,
    pub section: u32,
    pub timeout: Option<Duration>,
}

impl Default for PlexConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PLEX_PORT,
            token: String::new(),
            section: 1,
            timeout: None,
        }
    }
}

impl PlexConfig {
    /// Create a new media server configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_section(mut self, section: u32) -> Self {
        self.section = section;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

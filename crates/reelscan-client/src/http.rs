use std::time::Duration;

use reelscan_core::{ReelscanError, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Query parameters whose values never reach a log line or an error.
const SECRET_PARAMS: &[&str] = &["X-Plex-Token"];

pub(crate) fn build_client(base: &str, timeout: Option<Duration>) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ReelscanError::Fetch {
            url: base.to_string(),
            reason: format!("client setup failed: {err}"),
        })
}

/// GETs `url` and reads the whole body into memory.
///
/// Transport failures and non-success statuses both become
/// `ReelscanError::Fetch`. There is no retry.
pub(crate) fn get_text(client: &Client, url: &str) -> Result<String> {
    let shown = redact(url);
    debug!(url = %shown, "fetching document");

    let fail = |reason: String| ReelscanError::Fetch {
        url: shown.clone(),
        reason,
    };
    let response = client
        .get(url)
        .send()
        .map_err(|err| fail(err.without_url().to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(fail(format!("server returned {status}")));
    }
    let body = response
        .text()
        .map_err(|err| fail(err.without_url().to_string()))?;

    debug!(url = %shown, bytes = body.len(), "fetched document");
    Ok(body)
}

/// Replaces the values of secret query parameters with `<redacted>`.
pub(crate) fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_PARAMS.contains(&key) => format!("{key}=<redacted>"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_token() {
        assert_eq!(
            redact("http://10.0.0.2:32400/library/sections/1/all?X-Plex-Token=abc123"),
            "http://10.0.0.2:32400/library/sections/1/all?X-Plex-Token=<redacted>"
        );
    }

    #[test]
    fn keeps_other_params() {
        assert_eq!(
            redact("https://www.imdb.com/find?s=nm&q=Keanu+Reeves"),
            "https://www.imdb.com/find?s=nm&q=Keanu+Reeves"
        );
        assert_eq!(redact("https://www.imdb.com/title/tt0133093/"), "https://www.imdb.com/title/tt0133093/");
    }

    #[test]
    fn unreachable_host_is_fetch_error() {
        let client = build_client("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = get_text(&client, "http://127.0.0.1:9/title/tt0133093/").unwrap_err();
        assert!(matches!(err, ReelscanError::Fetch { ref url, .. } if url.ends_with("tt0133093/")));
    }
}

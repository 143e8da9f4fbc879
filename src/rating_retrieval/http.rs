/// Blocking HTTP page fetcher backed by reqwest.
use super::{Page, PageFetcher, TransportError};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;

/// Settings used to build the HTTP client.
///
/// Everything defaults to the reqwest client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Total request timeout. `None` keeps the client default.
    pub timeout: Option<Duration>,
    /// Value for the `User-Agent` header. `None` sends no custom header.
    pub user_agent: Option<String>,
}

/// Page fetcher performing plain blocking GET requests.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher with a default reqwest client.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a fetcher from the given settings.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError::RequestException` if the client cannot be
    /// built (for example when the TLS backend fails to initialize).
    pub fn from_config(config: &FetcherConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder.build().map_err(classify)?;
        Ok(Self::with_client(client))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> Result<Page, TransportError> {
        let response = self.client.get(url).send().map_err(classify)?;
        let status = response.status();

        tracing::debug!(url = %url, status = status.as_u16(), "Received response");

        // Only an OK body is ever looked at
        if status != StatusCode::OK {
            return Ok(Page {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().map_err(classify)?;
        tracing::debug!(bytes = body.len(), "Read response body");

        Ok(Page {
            status: status.as_u16(),
            body,
        })
    }
}

/// Maps a reqwest error onto the transport failure categories.
fn classify(error: reqwest::Error) -> TransportError {
    let detail = Some(error.to_string());

    if error.is_timeout() {
        TransportError::Timeout(detail)
    } else if error.is_connect() {
        TransportError::ConnectionError(detail)
    } else {
        TransportError::RequestException(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_invalid_url_is_request_exception() {
        let fetcher = HttpPageFetcher::new();
        let error = fetcher.fetch("not a url").unwrap_err();
        assert_eq!(error.kind_name(), "RequestException");
        assert!(error.detail().is_some());
    }

    #[test]
    fn test_refused_connection_is_connection_error() {
        let config = FetcherConfig {
            timeout: Some(Duration::from_secs(5)),
            user_agent: Some("imdb-ratings-test".to_string()),
        };
        let fetcher = HttpPageFetcher::from_config(&config).unwrap();

        // Port 1 on loopback is not expected to accept connections
        let error = fetcher.fetch("http://127.0.0.1:1/title/tt0000001/").unwrap_err();
        assert_eq!(error.kind_name(), "ConnectionError");
    }
}

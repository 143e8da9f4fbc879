/// Data structures and traits for title rating retrieval.
///
/// This module provides the rating record and result types handed back to
/// callers, as well as the traits behind which the HTTP fetch and the HTML
/// extraction live.
mod extraction;
mod http;
mod imdb;

pub use extraction::PatternExtractor;
pub use http::{FetcherConfig, HttpPageFetcher};
pub use imdb::{IMDB_RATINGS_URL, ImdbRatingProvider};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which IMDb ratings are reported in the `ratings` mapping.
pub const IMDB_SOURCE: &str = "imdb";

/// Transport-level failures of a page fetch.
///
/// The `Display` output is the failure category, followed by `": <detail>"`
/// when a detail message is available. This is exactly the text placed in
/// the `error` field of [`Details::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete in time
    #[error("{}", with_detail("Timeout", .0))]
    Timeout(Option<String>),

    /// The connection to the remote host could not be established
    #[error("{}", with_detail("ConnectionError", .0))]
    ConnectionError(Option<String>),

    /// Any other failure while sending the request or reading the response
    #[error("{}", with_detail("RequestException", .0))]
    RequestException(Option<String>),
}

impl TransportError {
    /// Returns the category name without any detail.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TransportError::Timeout(_) => "Timeout",
            TransportError::ConnectionError(_) => "ConnectionError",
            TransportError::RequestException(_) => "RequestException",
        }
    }

    /// Returns the human-readable detail, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TransportError::Timeout(detail)
            | TransportError::ConnectionError(detail)
            | TransportError::RequestException(detail) => detail.as_deref(),
        }
    }
}

fn with_detail(kind: &str, detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(detail) if !detail.is_empty() => format!("{}: {}", kind, detail),
        _ => kind.to_string(),
    }
}

/// A fetched page: the HTTP status code and the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP status code of the response
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Rating score and vote count attributed to one provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Number of votes the rating is based on
    pub votes: u64,
    /// The average rating value
    pub rating: f64,
}

/// The `ratings` mapping, keyed by provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    /// The IMDb record, reported under [`IMDB_SOURCE`]
    pub imdb: RatingRecord,
}

/// Outcome of a single rating lookup.
///
/// Serializes to one of the three mapping shapes callers inspect:
/// `{}`, `{"ratings": {"imdb": {...}}}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    /// Both the rating and the vote count were found
    Ratings { ratings: Ratings },
    /// The page could not be fetched
    Error { error: String },
    /// No data available
    Empty {},
}

impl Details {
    /// Builds a result from the two extracted values.
    ///
    /// A record is only produced when both values are present.
    pub fn from_parts(votes: Option<u64>, rating: Option<f64>) -> Self {
        match (votes, rating) {
            (Some(votes), Some(rating)) => Details::Ratings {
                ratings: Ratings {
                    imdb: RatingRecord { votes, rating },
                },
            },
            _ => Details::Empty {},
        }
    }

    /// Returns true if no data is available.
    pub fn is_empty(&self) -> bool {
        matches!(self, Details::Empty {})
    }

    /// Returns true if the lookup failed at the transport level.
    pub fn is_error(&self) -> bool {
        matches!(self, Details::Error { .. })
    }

    /// Returns the IMDb record, if one was found.
    pub fn rating_record(&self) -> Option<&RatingRecord> {
        match self {
            Details::Ratings { ratings } => Some(&ratings.imdb),
            _ => None,
        }
    }
}

impl From<TransportError> for Details {
    fn from(error: TransportError) -> Self {
        Details::Error {
            error: error.to_string(),
        }
    }
}

/// Trait for the HTTP capability used to download a title page.
///
/// Implementors perform a single blocking GET. Transport failures are
/// reported as [`TransportError`]; any HTTP status, including error
/// statuses, is a successful fetch.
pub trait PageFetcher {
    /// Fetches the page at `url`.
    fn fetch(&self, url: &str) -> Result<Page, TransportError>;
}

/// Trait for pulling the rating and the vote count out of a title page.
pub trait RatingExtractor {
    /// Extracts the rating value, if present.
    fn rating(&self, html: &str) -> Option<f64>;

    /// Extracts the vote count, if present.
    fn votes(&self, html: &str) -> Option<u64>;
}

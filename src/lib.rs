//! imdb_ratings - Fetch the IMDb rating of a title
//!
//! This library downloads the IMDb title page for an identifier and pulls the
//! rating value and the vote count out of the HTML. Every lookup returns a
//! plain [`Details`] value: transport failures are reported as data, never
//! as an `Err`.

mod rating_retrieval;

pub use rating_retrieval::{
    Details, FetcherConfig, HttpPageFetcher, IMDB_RATINGS_URL, IMDB_SOURCE, ImdbRatingProvider,
    Page, PageFetcher, PatternExtractor, RatingExtractor, RatingRecord, Ratings, TransportError,
};

/// Looks up the IMDb rating of a title using the default provider.
///
/// # Arguments
///
/// * `identifier` - The IMDb title id; empty or absent identifiers return
///   an empty result without touching the network
///
/// # Examples
///
/// ```no_run
/// use imdb_ratings::get_details;
///
/// let details = get_details(Some("tt0111161"));
/// if let Some(record) = details.rating_record() {
///     println!("{} ({} votes)", record.rating, record.votes);
/// }
/// ```
pub fn get_details(identifier: Option<&str>) -> Details {
    // Avoid building an HTTP client when there is nothing to look up
    match identifier {
        Some(identifier) if !identifier.is_empty() => {
            ImdbRatingProvider::new().get_details(Some(identifier))
        }
        _ => Details::Empty {},
    }
}

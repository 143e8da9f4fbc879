/// IMDb rating provider implementation.
use super::extraction::PatternExtractor;
use super::http::HttpPageFetcher;
use super::{Details, PageFetcher, RatingExtractor};

/// Template of the title page URL; `{}` is replaced by the identifier.
pub const IMDB_RATINGS_URL: &str = "https://www.imdb.com/title/{}/";

/// Rating provider for IMDb title pages.
///
/// Each lookup downloads https://www.imdb.com/title/<id>/ once and pulls the
/// rating and the vote count out of the HTML. The provider holds no mutable
/// state, so lookups are independent of each other.
pub struct ImdbRatingProvider<F = HttpPageFetcher, E = PatternExtractor> {
    fetcher: F,
    extractor: E,
}

impl ImdbRatingProvider {
    /// Creates a provider with the default HTTP client and extraction patterns.
    pub fn new() -> Self {
        Self::with_parts(HttpPageFetcher::new(), PatternExtractor::new())
    }
}

impl Default for ImdbRatingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, E> ImdbRatingProvider<F, E>
where
    F: PageFetcher,
    E: RatingExtractor,
{
    /// Creates a provider from a custom page fetcher and extractor.
    pub fn with_parts(fetcher: F, extractor: E) -> Self {
        Self { fetcher, extractor }
    }

    /// Builds the title page URL for an identifier.
    ///
    /// The identifier is substituted as is, without format checks.
    pub fn title_url(identifier: &str) -> String {
        IMDB_RATINGS_URL.replace("{}", identifier)
    }

    /// Looks up the rating of a title.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The IMDb title id (e.g. `tt0111161`); empty or absent
    ///   identifiers yield [`Details::Empty`] without any request
    ///
    /// # Returns
    ///
    /// * [`Details::Ratings`] when both the rating and the vote count were found
    /// * [`Details::Error`] when the page could not be fetched
    /// * [`Details::Empty`] otherwise, including for non-200 responses
    pub fn get_details(&self, identifier: Option<&str>) -> Details {
        let identifier = match identifier {
            Some(identifier) if !identifier.is_empty() => identifier,
            _ => return Details::Empty {},
        };

        let url = Self::title_url(identifier);
        tracing::debug!(url = %url, "Fetching IMDb title page");

        let page = match self.fetcher.fetch(&url) {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(identifier = %identifier, error = %error, "Failed to fetch IMDb title page");
                return Details::from(error);
            }
        };

        let html = if page.status == 200 {
            page.body.as_str()
        } else {
            tracing::debug!(status = page.status, "Ignoring body of non-OK response");
            ""
        };

        let rating = self.extractor.rating(html);
        let votes = self.extractor.votes(html);

        if rating.is_none() || votes.is_none() {
            tracing::debug!(
                identifier = %identifier,
                rating = ?rating,
                votes = ?votes,
                "Rating data incomplete"
            );
        }

        Details::from_parts(votes, rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating_retrieval::{Page, RatingRecord, TransportError};
    use std::cell::{Cell, RefCell};

    const FULL_PAGE: &str = concat!(
        "<html><body>\n",
        r#"<div class="ratingValue"><strong title="8.4 based on 12,345 user ratings">"#,
        r#"<span itemprop="ratingValue">8.4</span></strong></div>"#,
        "\n",
        r#"<a href="/title/tt0000001/ratings"><span class="small" itemprop="ratingCount">12,345</span></a>"#,
        "\n</body></html>\n",
    );

    const RATING_ONLY_PAGE: &str =
        r#"<html><span itemprop="ratingValue">8.4</span></html>"#;

    /// Page fetcher returning a canned response and counting calls.
    struct FakeFetcher {
        response: Result<Page, TransportError>,
        calls: Cell<usize>,
        last_url: RefCell<Option<String>>,
    }

    impl FakeFetcher {
        fn ok(status: u16, body: &str) -> Self {
            Self::new(Ok(Page {
                status,
                body: body.to_string(),
            }))
        }

        fn failing(error: TransportError) -> Self {
            Self::new(Err(error))
        }

        fn new(response: Result<Page, TransportError>) -> Self {
            Self {
                response,
                calls: Cell::new(0),
                last_url: RefCell::new(None),
            }
        }
    }

    impl PageFetcher for &FakeFetcher {
        fn fetch(&self, url: &str) -> Result<Page, TransportError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_url.borrow_mut() = Some(url.to_string());
            self.response.clone()
        }
    }

    fn provider(fetcher: &FakeFetcher) -> ImdbRatingProvider<&FakeFetcher, PatternExtractor> {
        ImdbRatingProvider::with_parts(fetcher, PatternExtractor::new())
    }

    #[test]
    fn test_empty_identifier_makes_no_request() {
        let fetcher = FakeFetcher::ok(200, FULL_PAGE);
        let provider = provider(&fetcher);

        assert_eq!(provider.get_details(None), Details::Empty {});
        assert_eq!(provider.get_details(Some("")), Details::Empty {});
        assert_eq!(fetcher.calls.get(), 0);
    }

    #[test]
    fn test_full_page_yields_ratings() {
        let fetcher = FakeFetcher::ok(200, FULL_PAGE);
        let details = provider(&fetcher).get_details(Some("tt0000001"));

        assert_eq!(
            details.rating_record(),
            Some(&RatingRecord {
                votes: 12345,
                rating: 8.4
            })
        );
        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            serde_json::json!({"ratings": {"imdb": {"votes": 12345, "rating": 8.4}}})
        );
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(
            fetcher.last_url.borrow().as_deref(),
            Some("https://www.imdb.com/title/tt0000001/")
        );
    }

    #[test]
    fn test_partial_data_is_suppressed() {
        let fetcher = FakeFetcher::ok(200, RATING_ONLY_PAGE);
        assert!(provider(&fetcher).get_details(Some("tt1")).is_empty());
    }

    #[test]
    fn test_no_markers_yields_empty() {
        let fetcher = FakeFetcher::ok(200, "<html><body>Nothing here</body></html>");
        assert!(provider(&fetcher).get_details(Some("tt1")).is_empty());
    }

    #[test]
    fn test_connection_error_becomes_error_value() {
        let fetcher = FakeFetcher::failing(TransportError::ConnectionError(None));
        let details = provider(&fetcher).get_details(Some("tt1"));

        assert_eq!(
            details,
            Details::Error {
                error: "ConnectionError".to_string()
            }
        );
        assert_eq!(fetcher.calls.get(), 1);
    }

    #[test]
    fn test_error_detail_is_appended() {
        let fetcher =
            FakeFetcher::failing(TransportError::Timeout(Some("deadline elapsed".to_string())));
        let details = provider(&fetcher).get_details(Some("tt1"));

        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            serde_json::json!({"error": "Timeout: deadline elapsed"})
        );
    }

    #[test]
    fn test_non_ok_status_ignores_body() {
        let fetcher = FakeFetcher::ok(404, FULL_PAGE);
        assert!(provider(&fetcher).get_details(Some("tt1")).is_empty());
    }

    #[test]
    fn test_votes_with_several_separators() {
        let page = r#"<span itemprop="ratingValue">9.3</span><span itemprop="ratingCount">1,234,567</span>"#;
        let fetcher = FakeFetcher::ok(200, page);
        let details = provider(&fetcher).get_details(Some("tt0111161"));

        assert_eq!(
            details.rating_record(),
            Some(&RatingRecord {
                votes: 1234567,
                rating: 9.3
            })
        );
    }

    #[test]
    fn test_repeated_lookups_are_identical() {
        let fetcher = FakeFetcher::ok(200, FULL_PAGE);
        let provider = provider(&fetcher);

        let first = provider.get_details(Some("tt0000001"));
        let second = provider.get_details(Some("tt0000001"));
        assert_eq!(first, second);
        assert_eq!(fetcher.calls.get(), 2);
    }

    #[test]
    fn test_identifier_is_not_validated() {
        assert_eq!(
            ImdbRatingProvider::<HttpPageFetcher, PatternExtractor>::title_url("not-an-id"),
            "https://www.imdb.com/title/not-an-id/"
        );
    }
}

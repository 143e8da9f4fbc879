//! Pattern-based extraction of the rating fields from raw title page HTML.
//!
//! No DOM is built. Each field is located by its `itemprop` marker, after
//! which the first numeric token between the next `>` and `<` is taken.
//! This tolerates attribute and whitespace variance in the markup but breaks
//! when the page structure changes.

use super::RatingExtractor;
use regex::Regex;
use std::sync::LazyLock;

static RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"itemprop="ratingValue".*?>.*?([0-9.]+).*?<"#).expect("valid rating pattern")
});

static VOTES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"itemprop="ratingCount".*?>.*?([0-9,]+).*?<"#).expect("valid votes pattern")
});

/// Extracts the rating and the vote count using fixed regular expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl RatingExtractor for PatternExtractor {
    fn rating(&self, html: &str) -> Option<f64> {
        let token = first_capture(&RATING_PATTERN, html)?;
        parse_rating(token)
    }

    fn votes(&self, html: &str) -> Option<u64> {
        let token = first_capture(&VOTES_PATTERN, html)?;
        parse_votes(token)
    }
}

fn first_capture<'h>(pattern: &Regex, html: &'h str) -> Option<&'h str> {
    pattern
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Parses a rating token such as `8.4`.
fn parse_rating(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|rating| rating.is_finite())
}

/// Parses a vote count token, dropping thousands separators (`1,234,567`).
fn parse_votes(token: &str) -> Option<u64> {
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    digits.parse::<u64>().ok()
}

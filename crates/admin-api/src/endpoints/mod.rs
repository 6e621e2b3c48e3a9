//! Endpoint groups, one per REST resource.
//!
//! Each group borrows the [`ApiClient`](crate::ApiClient) and is obtained
//! from an accessor on it, e.g. `client.users().list().await`.

pub mod auth;
pub mod categories;
pub mod documents;
pub mod locations;
pub mod progress;
pub mod roles;
pub mod search;
pub mod stages;
pub mod users;

use reqwest::Url;

/// Default page size for paged search endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Percent-encode `segment` so it stays a single path segment. `.` and `..`
/// encode to nothing.
pub fn encode_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse("http://segment.invalid/") else {
        return segment.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("Recife"), "Recife");
        assert_eq!(encode_segment("São Paulo"), "S%C3%A3o%20Paulo");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_segment("50%#1"), "50%25%231");
        assert_eq!(encode_segment(""), "");
        assert_eq!(encode_segment(".."), "");
    }
}

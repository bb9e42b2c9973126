//! Reddit API wire types.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// `Listing` envelope returned by list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

/// A typed child of a listing (`kind` is `t1` for comments).
#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
    pub data: T,
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        self.data.children.into_iter().map(|c| c.data).collect()
    }
}

/// Response from the OAuth token endpoint.
///
/// A rejected password grant still answers 200, with only `error` set.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub error: Option<String>,
}

/// Response from `POST /api/comment` with `api_type=json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    pub json: CommentResponseBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponseBody {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// A bearer token and when it stops being valid.
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Renew this long before the server-side expiry.
    const REFRESH_MARGIN_SECS: i64 = 60;

    pub fn new(value: String, expires_in_secs: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    pub fn is_fresh(&self) -> bool {
        Utc::now() + Duration::seconds(Self::REFRESH_MARGIN_SECS) < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::Comment;

    #[test]
    fn test_listing_items_keep_order() {
        let listing: Listing<Comment> = serde_json::from_str(
            r#"{"kind": "Listing", "data": {"after": null, "children": [
                {"kind": "t1", "data": {"id": "b", "body": "second"}},
                {"kind": "t1", "data": {"id": "a", "body": "first"}}
            ]}}"#,
        )
        .unwrap();

        let ids: Vec<_> = listing.into_items().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_token_freshness() {
        assert!(AccessToken::new("t".to_string(), 3600).is_fresh());
        assert!(!AccessToken::new("t".to_string(), 30).is_fresh());
    }

    #[test]
    fn test_comment_errors() {
        let response: CommentResponse = serde_json::from_str(
            r#"{"json": {"errors": [["RATELIMIT", "you are doing that too much", "ratelimit"]]}}"#,
        )
        .unwrap();
        assert_eq!(response.json.errors.len(), 1);
    }
}

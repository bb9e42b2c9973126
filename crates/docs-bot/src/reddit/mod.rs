//! Minimal Reddit API client.
//!
//! Covers only what the bot needs: a password-grant OAuth token, the newest
//! comments of a subreddit, and posting a reply.

mod stream;
mod types;

pub use stream::CommentStream;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::comments::{Comment, CommentReplier};
use crate::config::Credentials;
use crate::error::{BotError, Result};
use types::{AccessToken, CommentResponse, Listing, TokenResponse};

/// Reddit hosts used by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditEndpoints {
    /// OAuth token endpoint.
    pub token_url: String,
    /// Base URL for authenticated API calls.
    pub api_base: String,
}

impl Default for RedditEndpoints {
    fn default() -> Self {
        Self {
            token_url: "https://www.reddit.com/api/v1/access_token".to_string(),
            api_base: "https://oauth.reddit.com".to_string(),
        }
    }
}

/// Authenticated Reddit client for a script application.
pub struct RedditClient {
    http: reqwest::Client,
    credentials: Credentials,
    endpoints: RedditEndpoints,
    token: Mutex<Option<AccessToken>>,
}

impl RedditClient {
    /// Create a client against the public Reddit hosts.
    pub fn new(credentials: Credentials, user_agent: &str) -> Result<Self> {
        Self::with_endpoints(credentials, user_agent, RedditEndpoints::default())
    }

    /// Create a client against custom hosts.
    pub fn with_endpoints(
        credentials: Credentials,
        user_agent: &str,
        endpoints: RedditEndpoints,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            credentials,
            endpoints,
            token: Mutex::new(None),
        })
    }

    /// Open an endless stream of new comments from `subreddit`.
    #[must_use]
    pub fn comment_stream(self: &Arc<Self>, subreddit: &str, skip_existing: bool) -> CommentStream {
        CommentStream::new(Arc::clone(self), subreddit, skip_existing)
    }

    /// Return a valid bearer token, authenticating if needed.
    async fn access_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if let Some(current) = token.as_ref().filter(|t| t.is_fresh()) {
            return Ok(current.value.clone());
        }

        let fresh = self.authenticate().await?;
        let value = fresh.value.clone();
        *token = Some(fresh);
        Ok(value)
    }

    async fn authenticate(&self) -> Result<AccessToken> {
        debug!(username = %self.credentials.username, "Authenticating to reddit");

        let response: TokenResponse = self
            .http
            .post(&self.endpoints.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(BotError::Reddit(format!("authentication failed: {error}")));
        }
        let access_token = response
            .access_token
            .ok_or_else(|| BotError::Reddit("token response had no access_token".to_string()))?;

        info!("Authenticated to reddit");
        Ok(AccessToken::new(
            access_token,
            response.expires_in.unwrap_or(3600),
        ))
    }

    /// Fetch the newest comments in `subreddit`, newest first.
    pub async fn new_comments(&self, subreddit: &str, limit: u32) -> Result<Vec<Comment>> {
        let token = self.access_token().await?;
        let url = format!("{}/r/{subreddit}/comments", self.endpoints.api_base);

        let listing: Listing<Comment> = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let comments = listing.into_items();
        debug!(subreddit, count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    /// Reply to the thing identified by `fullname` (e.g. `t1_abc123`).
    pub async fn submit_reply(&self, fullname: &str, text: &str) -> Result<()> {
        let token = self.access_token().await?;
        let url = format!("{}/api/comment", self.endpoints.api_base);

        let response: CommentResponse = self
            .http
            .post(url)
            .bearer_auth(token)
            .form(&[("api_type", "json"), ("thing_id", fullname), ("text", text)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.json.errors.is_empty() {
            Ok(())
        } else {
            let errors: Vec<String> = response
                .json
                .errors
                .iter()
                .map(ToString::to_string)
                .collect();
            Err(BotError::Reddit(format!(
                "reply to {fullname} rejected: {}",
                errors.join(", ")
            )))
        }
    }
}

#[async_trait]
impl CommentReplier for RedditClient {
    async fn reply(&self, comment: &Comment, body: &str) -> Result<()> {
        self.submit_reply(&comment.fullname(), body).await
    }
}

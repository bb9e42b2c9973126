//! Comment source and reply abstractions.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// A comment read from the stream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// Base-36 comment id without the `t1_` kind prefix.
    pub id: String,
    /// Markdown body.
    pub body: String,
    /// Author name (`[deleted]` for removed accounts).
    #[serde(default)]
    pub author: String,
    /// Path to the comment on the site.
    #[serde(default)]
    pub permalink: String,
}

impl Comment {
    /// Create a comment with only an id and body.
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            author: String::new(),
            permalink: String::new(),
        }
    }

    /// Fullname used by the API to address this comment.
    #[must_use]
    pub fn fullname(&self) -> String {
        format!("t1_{}", self.id)
    }
}

/// A possibly endless sequence of comments.
#[async_trait]
pub trait CommentSource: Send {
    /// Wait for the next comment.
    ///
    /// Returns `Ok(None)` only if the source is finite and exhausted.
    async fn next_comment(&mut self) -> Result<Option<Comment>>;
}

/// Posts replies to comments.
#[async_trait]
pub trait CommentReplier: Send + Sync {
    /// Post `body` as a reply to `comment`.
    async fn reply(&self, comment: &Comment, body: &str) -> Result<()>;
}

//! Comment handling: detect a command, resolve it, post one reply.

use tracing::{error, info};

use crate::command::CommandParser;
use crate::comments::{Comment, CommentReplier, CommentSource};
use crate::error::Result;
use crate::resolver::DocsResolver;

/// Appended to every reply.
pub const REPLY_FOOTER: &str =
    "  \nPython Documentation Bot - *[How To Use](https://github.com/trevormiller6/Py-Docs-Bot)*";

/// What happened to a single comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The comment had no command line.
    Ignored,
    /// A command was found but no reference matched anything.
    NoMatches { references: Vec<String> },
    /// A reply was posted.
    Replied { body: String },
}

/// Join per-reference results and append the footer.
///
/// Returns `None` when there is nothing to say.
#[must_use]
pub fn format_reply<S: AsRef<str>>(results: &[S]) -> Option<String> {
    if results.is_empty() {
        return None;
    }

    let mut body = String::new();
    for result in results {
        body.push_str(result.as_ref());
    }
    body.push_str(REPLY_FOOTER);
    Some(body)
}

/// Answers documentation requests found in comments.
pub struct DocsBot {
    parser: CommandParser,
    resolver: DocsResolver,
}

impl DocsBot {
    #[must_use]
    pub fn new(parser: CommandParser, resolver: DocsResolver) -> Self {
        Self { parser, resolver }
    }

    /// Handle one comment to completion, replying at most once.
    pub async fn handle(&self, comment: &Comment, replier: &dyn CommentReplier) -> Result<Outcome> {
        let Some(command) = self.parser.parse(&comment.body) else {
            return Ok(Outcome::Ignored);
        };
        info!(
            comment_id = %comment.id,
            author = %comment.author,
            permalink = %comment.permalink,
            body = ?comment.body,
            "New command received"
        );

        let results = self.resolver.resolve_all(&command.references).await?;

        let Some(body) = format_reply(&results) else {
            error!(
                comment_id = %comment.id,
                references = ?command.references,
                "The request was not valid, no response sent"
            );
            return Ok(Outcome::NoMatches {
                references: command.references,
            });
        };

        replier.reply(comment, &body).await?;
        info!(comment_id = %comment.id, reply = ?body, "Replied to a comment");
        Ok(Outcome::Replied { body })
    }

    /// Process comments one at a time until the source ends or fails.
    pub async fn monitor(
        &self,
        source: &mut dyn CommentSource,
        replier: &dyn CommentReplier,
    ) -> Result<()> {
        info!(trigger = self.parser.trigger(), "Monitoring comments for keyword");

        while let Some(comment) = source.next_comment().await? {
            self.handle(&comment, replier).await?;
        }

        info!("Comment source exhausted");
        Ok(())
    }
}

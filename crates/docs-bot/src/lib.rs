//! Reddit bot that answers `!docs` commands with Python documentation links.
//!
//! The bot watches a subreddit's comment stream for lines such as
//!
//! ```text
//! !docs pathlib.Path, re.search, zip, while, pep-8
//! ```
//!
//! and replies with one markdown link per match. Each requested reference
//! goes through three lookups (see [`resolver`]):
//!
//! - standard library pages, built from the dotted name and probed live
//! - language reference sections, fuzzy matched against a static table
//! - PEP pages, probed live
//!
//! # Architecture
//!
//! - [`ReferenceTable`] is loaded once at startup and shared read-only.
//! - [`DocsBot`] handles one comment at a time from a [`CommentSource`] and
//!   replies through a [`CommentReplier`]; [`RedditClient`] implements both
//!   sides for Reddit.
//! - [`Supervisor`] restarts the monitoring task with backoff and stops on
//!   shutdown.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod command;
pub mod comments;
pub mod config;
pub mod datastore;
pub mod error;
pub mod fuzzy;
pub mod reddit;
pub mod resolver;
pub mod supervisor;

pub use bot::{format_reply, DocsBot, Outcome, REPLY_FOOTER};
pub use command::{CommandInvocation, CommandParser, DEFAULT_TRIGGER};
pub use comments::{Comment, CommentReplier, CommentSource};
pub use config::{BotConfig, Credentials, USER_AGENT};
pub use datastore::{DocSection, ReferenceTable};
pub use error::{BotError, Result};
pub use reddit::{CommentStream, RedditClient, RedditEndpoints};
pub use resolver::{DocsResolver, DocsUrls, HttpProber, Prober, ResolvedLink};
pub use supervisor::{Exit, RetryPolicy, Supervisor};

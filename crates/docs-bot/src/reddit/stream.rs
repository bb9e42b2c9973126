//! Polling comment stream.

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use super::RedditClient;
use crate::comments::{Comment, CommentSource};
use crate::error::Result;

/// Comments requested per poll (the API maximum).
const PAGE_LIMIT: u32 = 100;
/// How many recent ids are remembered to filter duplicates.
const SEEN_CAPACITY: usize = 301;
const INITIAL_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(16);

/// Insertion-ordered set that forgets its oldest entries past `capacity`.
#[derive(Debug)]
struct SeenIds {
    order: VecDeque<String>,
    ids: HashSet<String>,
    capacity: usize,
}

impl SeenIds {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            ids: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `id`; returns `true` if it was not already present.
    fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
        self.order.push_back(id.to_string());
        self.ids.insert(id.to_string());
        true
    }
}

/// Wait between polls: doubles while nothing new arrives, resets otherwise.
#[derive(Debug)]
struct PollDelay {
    current: Duration,
}

impl PollDelay {
    fn new() -> Self {
        Self {
            current: INITIAL_DELAY,
        }
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(MAX_DELAY);
        delay
    }

    fn reset(&mut self) {
        self.current = INITIAL_DELAY;
    }
}

/// Endless stream of new comments in one subreddit.
///
/// Comments are yielded oldest first. With `skip_existing`, whatever is on
/// the first page when the stream opens is marked seen and never yielded.
pub struct CommentStream {
    client: Arc<RedditClient>,
    subreddit: String,
    skip_existing: bool,
    primed: bool,
    seen: SeenIds,
    pending: VecDeque<Comment>,
    delay: PollDelay,
}

impl CommentStream {
    pub(crate) fn new(client: Arc<RedditClient>, subreddit: &str, skip_existing: bool) -> Self {
        Self {
            client,
            subreddit: subreddit.to_string(),
            skip_existing,
            primed: false,
            seen: SeenIds::new(SEEN_CAPACITY),
            pending: VecDeque::new(),
            delay: PollDelay::new(),
        }
    }

    /// Poll once and queue every comment not seen before.
    async fn poll(&mut self) -> Result<usize> {
        let newest_first = self.client.new_comments(&self.subreddit, PAGE_LIMIT).await?;

        let mut fresh = 0;
        for comment in newest_first.into_iter().rev() {
            if self.seen.insert(&comment.id) {
                fresh += 1;
                self.pending.push_back(comment);
            }
        }

        if !self.primed {
            self.primed = true;
            if self.skip_existing {
                tracing::debug!(skipped = self.pending.len(), "Skipping existing comments");
                self.pending.clear();
                return Ok(0);
            }
        }

        Ok(fresh)
    }
}

#[async_trait]
impl CommentSource for CommentStream {
    async fn next_comment(&mut self) -> Result<Option<Comment>> {
        loop {
            if let Some(comment) = self.pending.pop_front() {
                return Ok(Some(comment));
            }

            if self.poll().await? > 0 {
                self.delay.reset();
            } else {
                let wait = self.delay.next_delay();
                tracing::trace!(wait_ms = wait.as_millis() as u64, "No new comments");
                tokio::time::sleep(wait).await;
            }
        }
    }
}

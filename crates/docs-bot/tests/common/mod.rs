//! Shared helpers for integration tests.
//!
//! Each test binary uses a subset; helpers only some binaries need carry
//! `#[allow(dead_code)]`.

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Router,
};
use docs_bot::{
    BotError, Comment, CommentReplier, CommentSource, DocsResolver, DocsUrls, HttpProber,
    ReferenceTable, Result,
};
use std::collections::{HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

// =============================================================================
// Mock documentation host
// =============================================================================

/// Shared state for the mock documentation host.
#[derive(Default)]
pub struct MockDocsState {
    /// Paths answered with 200.
    pages: HashSet<String>,
    /// Paths answered with a redirect to another path.
    redirects: Vec<(String, String)>,
    /// Paths answered with 500.
    broken: HashSet<String>,
    /// Number of requests received.
    request_count: AtomicUsize,
}

impl MockDocsState {
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

async fn serve_page(State(state): State<Arc<MockDocsState>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.request_count.fetch_add(1, Ordering::SeqCst);

    if let Some((_, target)) = state.redirects.iter().find(|(from, _)| *from == path) {
        return Redirect::temporary(target).into_response();
    }
    if state.broken.contains(&path) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if state.pages.contains(&path) {
        (StatusCode::OK, "<html>docs</html>").into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Builder for the mock documentation host.
#[derive(Default)]
pub struct MockDocs {
    state: MockDocsState,
}

impl MockDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str) -> Self {
        self.state.pages.insert(path.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.state.redirects.push((from.to_string(), to.to_string()));
        self
    }

    #[allow(dead_code)]
    pub fn broken(mut self, path: &str) -> Self {
        self.state.broken.insert(path.to_string());
        self
    }

    /// Start the host on a random port.
    pub async fn start(self) -> (SocketAddr, Arc<MockDocsState>) {
        let state = Arc::new(self.state);
        let app = Router::new()
            .fallback(serve_page)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (addr, state)
    }
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

// =============================================================================
// Resolver fixtures
// =============================================================================

#[allow(dead_code)]
pub fn table() -> ReferenceTable {
    ReferenceTable::from_json(
        r#"{
            "docs_sections": [
                {"title": "the while statement", "link": "https://docs.python.org/3/reference/compound_stmts.html#the-while-statement"},
                {"title": "list comprehensions", "link": "https://docs.python.org/3/tutorial/datastructures.html#list-comprehensions"}
            ],
            "builtin_functions": ["zip", "map", "enumerate"]
        }"#,
    )
    .unwrap()
}

/// Resolver probing the given host with a real HTTP client.
#[allow(dead_code)]
pub fn resolver_for(addr: SocketAddr) -> DocsResolver {
    let prober = HttpProber::new("docs-bot-tests").unwrap();
    DocsResolver::with_urls(
        Arc::new(table()),
        Arc::new(prober),
        DocsUrls::with_host(&format!("http://{addr}")),
    )
}

// =============================================================================
// Comment fakes
// =============================================================================

/// Finite comment source.
#[allow(dead_code)]
pub struct VecSource {
    comments: VecDeque<Comment>,
}

#[allow(dead_code)]
impl VecSource {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments: comments.into(),
        }
    }
}

#[async_trait]
impl CommentSource for VecSource {
    async fn next_comment(&mut self) -> Result<Option<Comment>> {
        Ok(self.comments.pop_front())
    }
}

/// Replier that records every reply.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingReplier {
    replies: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl RecordingReplier {
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentReplier for RecordingReplier {
    async fn reply(&self, comment: &Comment, body: &str) -> Result<()> {
        self.replies
            .lock()
            .unwrap()
            .push((comment.id.clone(), body.to_string()));
        Ok(())
    }
}

/// Replier that always fails.
#[allow(dead_code)]
pub struct FailingReplier;

#[async_trait]
impl CommentReplier for FailingReplier {
    async fn reply(&self, _comment: &Comment, _body: &str) -> Result<()> {
        Err(BotError::Reddit("SUBREDDIT_NOEXIST".to_string()))
    }
}

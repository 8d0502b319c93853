pub mod config;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod store;
pub mod video_id;
pub mod youtube;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use pipeline::{ScrapeInput, run};
pub use video_id::VideoId;
pub use youtube::{CommentSource, FetchRequest, YouTubeClient};

/// Upstream comment ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first
    #[default]
    Recent,
    /// Ranked by the platform's relevance score
    Relevance,
}

impl SortMode {
    /// The `order` value the commentThreads endpoint expects
    pub fn api_order(&self) -> &'static str {
        match self {
            SortMode::Recent => "time",
            SortMode::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Recent => write!(f, "recent"),
            SortMode::Relevance => write!(f, "relevance"),
        }
    }
}

/// A top-level comment as returned upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub id: String,
    pub text: String,
}

/// A filtered comment ready for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedComment {
    pub url: String,
    pub text: String,
}

/// Ordered comments produced by one scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    pub video_id: VideoId,
    pub comments: Vec<ProcessedComment>,
}

impl ScrapeResult {
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Failure reported by the comment-threads API or the transport beneath it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe_upstream(.status, .message))]
pub struct UpstreamError {
    /// HTTP status, absent for transport failures
    pub status: Option<u16>,
    /// First `errors[].reason` from the API error body, e.g. `quotaExceeded`
    pub reason: Option<String>,
    pub message: String,
}

impl UpstreamError {
    pub fn transport(message: impl Into<String>) -> Self {
        UpstreamError {
            status: None,
            reason: None,
            message: message.into(),
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self.reason.as_deref(), Some("quotaExceeded" | "rateLimitExceeded"))
    }

    pub fn is_comments_disabled(&self) -> bool {
        self.reason.as_deref() == Some("commentsDisabled")
    }
}

fn describe_upstream(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("YouTube API returned {status}: {message}"),
        None => format!("YouTube API request failed: {message}"),
    }
}

/// Every way a scrape can fail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error(
        "could not extract video ID from: {0}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/shorts/ID\n  <11-character video ID>"
    )]
    InvalidVideoId(String),

    #[error("no API key provided (use --key, YOUTUBE_API_KEY, or api_key in config)")]
    MissingCredential,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ScrapeError {
    /// Errors the caller can fix by correcting the input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScrapeError::InvalidVideoId(_) | ScrapeError::MissingCredential)
    }
}

use std::future::Future;
use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::{RawComment, SortMode, UpstreamError, VideoId};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

/// Most items the commentThreads endpoint returns per page
pub const MAX_RESULTS_CEILING: u32 = 100;

/// Parameters for a single commentThreads request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub credential: String,
    pub video_id: VideoId,
    pub sort: SortMode,
    pub max_items: u32,
}

impl FetchRequest {
    pub fn new(credential: impl Into<String>, video_id: VideoId, sort: SortMode) -> Self {
        FetchRequest {
            credential: credential.into(),
            video_id,
            sort,
            max_items: MAX_RESULTS_CEILING,
        }
    }

    /// `maxResults` as sent upstream, clamped to what the API accepts
    pub fn max_results(&self) -> u32 {
        self.max_items.clamp(1, MAX_RESULTS_CEILING)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("part", "snippet".to_string()),
            ("videoId", self.video_id.to_string()),
            ("maxResults", self.max_results().to_string()),
            ("order", self.sort.api_order().to_string()),
            ("textFormat", "plainText".to_string()),
            ("key", self.credential.clone()),
        ]
    }
}

/// Anything that can produce the first page of top-level comments for a video
pub trait CommentSource {
    fn fetch(&self, req: &FetchRequest) -> impl Future<Output = Result<Vec<RawComment>, UpstreamError>> + Send;
}

#[derive(Debug, Deserialize)]
struct CommentThreadListResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    top_level_comment: Comment,
}

#[derive(Debug, Deserialize)]
struct Comment {
    id: String,
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
struct CommentSnippet {
    #[serde(rename = "textOriginal", default)]
    text_original: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

/// YouTube Data API v3 client for the commentThreads endpoint
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        Self::with_base_url(DEFAULT_API_BASE, timeout)
    }

    /// Point the client at another host, e.g. a local mock
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::transport(e.to_string()))?;

        Ok(YouTubeClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/youtube/v3/commentThreads", self.base_url)
    }

    /// Fetch the first page of top-level comments, in upstream order
    pub async fn fetch_comments(&self, req: &FetchRequest) -> Result<Vec<RawComment>, UpstreamError> {
        debug!(
            "Fetching comment threads: video={} order={} maxResults={}",
            req.video_id,
            req.sort.api_order(),
            req.max_results()
        );

        let resp = self
            .client
            .get(self.endpoint())
            .query(&req.query())
            .send()
            .await
            .map_err(|e| UpstreamError::transport(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| UpstreamError::transport(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body));
        }

        let comments = parse_comment_threads(&body).map_err(|e| UpstreamError {
            status: Some(status.as_u16()),
            reason: None,
            message: format!("unexpected response format: {e}"),
        })?;

        debug!("Received {} comment threads", comments.len());
        Ok(comments)
    }
}

impl CommentSource for YouTubeClient {
    async fn fetch(&self, req: &FetchRequest) -> Result<Vec<RawComment>, UpstreamError> {
        self.fetch_comments(req).await
    }
}

fn parse_comment_threads(body: &str) -> Result<Vec<RawComment>, serde_json::Error> {
    let resp: CommentThreadListResponse = serde_json::from_str(body)?;
    Ok(resp
        .items
        .into_iter()
        .map(|thread| {
            let comment = thread.snippet.top_level_comment;
            RawComment {
                id: comment.id,
                text: comment.snippet.text_original,
            }
        })
        .collect())
}

fn parse_api_error(status: u16, body: &str) -> UpstreamError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(resp) => {
            let reason = resp.error.errors.into_iter().find_map(|d| d.reason);
            let message = if resp.error.message.is_empty() {
                reason.clone().unwrap_or_else(|| "unknown error".to_string())
            } else {
                resp.error.message
            };
            UpstreamError {
                status: Some(status),
                reason,
                message,
            }
        }
        Err(_) => UpstreamError {
            status: Some(status),
            reason: None,
            message: if body.trim().is_empty() {
                "empty response body".to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

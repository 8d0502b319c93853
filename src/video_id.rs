use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::ScrapeError;

const VIDEO_ID_LEN: usize = 11;

/// A validated 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Extract a video ID from a bare ID or any supported YouTube URL shape
    pub fn extract(input: &str) -> Result<Self, ScrapeError> {
        let input = input.trim();

        let candidate = SHAPES
            .iter()
            .find_map(|shape| shape.capture(input).map(|id| (shape.name, id)));

        match candidate {
            Some((shape, id)) if is_valid_id(id) => {
                debug!("Matched {shape} shape: {id}");
                Ok(VideoId(id.to_string()))
            }
            Some((shape, id)) => {
                debug!("Rejected {shape} candidate of length {}: {id}", id.len());
                Err(ScrapeError::InvalidVideoId(input.to_string()))
            }
            None => Err(ScrapeError::InvalidVideoId(input.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named URL shape; `regex` captures the candidate ID in group 1
struct Shape {
    name: &'static str,
    regex: Regex,
}

impl Shape {
    fn new(name: &'static str, pattern: &str) -> Self {
        Shape {
            name,
            regex: Regex::new(pattern).expect("URL shape pattern must compile"),
        }
    }

    fn capture<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.regex.captures(input).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    }
}

// Tried in order. Every URL shape is anchored to the scheme, host and path so
// a link buried in a query string cannot match. Candidates are captured
// greedily so that an over-long segment fails the length gate instead of
// being silently cut to 11.
static SHAPES: LazyLock<Vec<Shape>> = LazyLock::new(|| {
    vec![
        Shape::new("bare", r"^([a-zA-Z0-9_-]+)$"),
        Shape::new("short-link", r"^(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]*)"),
        Shape::new(
            "embed-link",
            r"^(?:https?://)?(?:[\w-]+\.)?youtube(?:-nocookie)?\.com/(?:embed|v|e)/([a-zA-Z0-9_-]*)",
        ),
        Shape::new(
            "shorts-link",
            r"^(?:https?://)?(?:[\w-]+\.)?youtube\.com/(?:shorts|live)/([a-zA-Z0-9_-]*)",
        ),
        // First `v` parameter wins
        Shape::new(
            "watch-link",
            r"^(?:https?://)?(?:[\w-]+\.)?youtube\.com/watch/?\?(?:[^#]*?&)??v=([a-zA-Z0-9_-]*)",
        ),
    ]
});

fn is_valid_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

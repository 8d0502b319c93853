use log::info;

use crate::process::process;
use crate::youtube::{CommentSource, FetchRequest, MAX_RESULTS_CEILING};
use crate::{ScrapeError, ScrapeResult, SortMode, VideoId};

/// Everything a caller supplies for one scrape
#[derive(Debug, Clone)]
pub struct ScrapeInput {
    pub credential: String,
    /// Video URL in any supported shape, or a bare ID
    pub video: String,
    pub search_term: String,
    pub sort: SortMode,
    pub limit: usize,
}

impl ScrapeInput {
    pub fn new(credential: impl Into<String>, video: impl Into<String>) -> Self {
        ScrapeInput {
            credential: credential.into(),
            video: video.into(),
            search_term: String::new(),
            sort: SortMode::default(),
            limit: MAX_RESULTS_CEILING as usize,
        }
    }
}

/// Run one scrape: extract the ID, fetch a single page, then filter and shape it
pub async fn run<S: CommentSource>(source: &S, input: &ScrapeInput) -> Result<ScrapeResult, ScrapeError> {
    if input.credential.trim().is_empty() {
        return Err(ScrapeError::MissingCredential);
    }

    let video_id = VideoId::extract(&input.video)?;

    let req = FetchRequest::new(input.credential.trim(), video_id.clone(), input.sort);
    let raw = source.fetch(&req).await?;
    let fetched = raw.len();

    let result = process(raw, &video_id, &input.search_term, input.limit);
    info!(
        "Scraped {video_id}: {} of {fetched} comments kept (sort={})",
        result.len(),
        input.sort
    );

    Ok(result)
}

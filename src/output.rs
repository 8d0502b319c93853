use eyre::Result;

use crate::ScrapeResult;

/// Render comment texts, one per line
pub fn render_texts(result: &ScrapeResult) -> String {
    result.comments.iter().map(|c| format!("{}\n", c.text)).collect()
}

/// Render comment permalinks, one per line
pub fn render_urls(result: &ScrapeResult) -> String {
    result.comments.iter().map(|c| format!("{}\n", c.url)).collect()
}

/// Render the permalink list, a blank line, then the text list
pub fn render_both(result: &ScrapeResult) -> String {
    format!("{}\n{}", render_urls(result), render_texts(result))
}

pub fn render_json(result: &ScrapeResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProcessedComment, VideoId};

    fn sample_result() -> ScrapeResult {
        ScrapeResult {
            video_id: VideoId::extract("dQw4w9WgXcQ").unwrap(),
            comments: vec![
                ProcessedComment {
                    url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c1".to_string(),
                    text: "Hello world".to_string(),
                },
                ProcessedComment {
                    url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c2".to_string(),
                    text: "This is a test".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_render_texts() {
        assert_eq!(render_texts(&sample_result()), "Hello world\nThis is a test\n");
    }

    #[test]
    fn test_render_urls() {
        assert_eq!(
            render_urls(&sample_result()),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c1\nhttps://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c2\n"
        );
    }

    #[test]
    fn test_render_both() {
        let output = render_both(&sample_result());
        assert!(output.starts_with("https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c1\n"));
        assert!(output.ends_with("lc=c2\n\nHello world\nThis is a test\n"));
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample_result()).unwrap()).unwrap();
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
        assert_eq!(json["comments"][1]["text"], "This is a test");
        assert_eq!(json["comments"][0]["url"], "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c1");
    }

    #[test]
    fn test_render_empty() {
        let result = ScrapeResult {
            video_id: VideoId::extract("dQw4w9WgXcQ").unwrap(),
            comments: vec![],
        };
        assert_eq!(render_texts(&result), "");
        assert_eq!(render_urls(&result), "");
    }
}

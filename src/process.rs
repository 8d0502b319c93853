use log::debug;

use crate::{ProcessedComment, RawComment, ScrapeResult, VideoId};

/// Permalink that deep-links to a single comment under its video
pub fn permalink(video_id: &VideoId, comment_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}&lc={comment_id}")
}

/// Collapse a comment onto one line by removing every CRLF, CR and LF
pub fn normalize_text(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// Normalize, filter by `search_term`, keep the first `limit`, and build permalinks.
///
/// The search term is matched literally and case-sensitively; an empty term
/// keeps every comment. Upstream order is preserved.
pub fn process(raw: Vec<RawComment>, video_id: &VideoId, search_term: &str, limit: usize) -> ScrapeResult {
    let total = raw.len();

    let comments: Vec<ProcessedComment> = raw
        .into_iter()
        .map(|c| (c.id, normalize_text(&c.text)))
        .filter(|(_, text)| text.contains(search_term))
        .take(limit)
        .map(|(id, text)| ProcessedComment {
            url: permalink(video_id, &id),
            text,
        })
        .collect();

    debug!(
        "Kept {} of {total} comments (term={search_term:?}, limit={limit})",
        comments.len()
    );

    ScrapeResult {
        video_id: video_id.clone(),
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_id() -> VideoId {
        VideoId::extract("dQw4w9WgXcQ").unwrap()
    }

    fn raw(id: &str, text: &str) -> RawComment {
        RawComment {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("a\r\nb\nc\rd"), "abcd");
        assert_eq!(normalize_text("\n\n"), "");
        assert_eq!(normalize_text("no breaks"), "no breaks");
    }

    #[test]
    fn test_permalink() {
        assert_eq!(
            permalink(&video_id(), "Ugz1"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=Ugz1"
        );
    }

    #[test]
    fn test_filter_and_normalize() {
        let input = vec![raw("c1", "hello\nworld"), raw("c2", "other")];
        let result = process(input, &video_id(), "hello", 10);
        assert_eq!(
            result.comments,
            vec![ProcessedComment {
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c1".to_string(),
                text: "helloworld".to_string(),
            }]
        );
    }

    #[test]
    fn test_match_spans_removed_line_break() {
        let input = vec![raw("c1", "hel\r\nlo")];
        assert_eq!(process(input, &video_id(), "hello", 10).len(), 1);
    }

    #[test]
    fn test_search_is_case_sensitive_and_literal() {
        let input = vec![raw("c1", "Hello"), raw("c2", "a.c"), raw("c3", "abc")];
        let vid = video_id();
        assert!(process(input.clone(), &vid, "hello", 10).is_empty());

        let dotted = process(input, &vid, "a.c", 10);
        assert_eq!(dotted.len(), 1);
        assert_eq!(dotted.comments[0].text, "a.c");
    }

    #[test]
    fn test_empty_term_keeps_all() {
        let input = vec![raw("c1", "one"), raw("c2", ""), raw("c3", "three\n")];
        let result = process(input, &video_id(), "", 100);
        assert_eq!(result.len(), 3);
        let texts: Vec<&str> = result.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "", "three"]);
    }

    #[test]
    fn test_limit_keeps_first_match() {
        let input: Vec<RawComment> = (1..=5).map(|i| raw(&format!("c{i}"), "match")).collect();
        let result = process(input, &video_id(), "match", 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.comments[0].url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=c1");
    }

    #[test]
    fn test_limit_applies_after_filter() {
        let input = vec![raw("c1", "skip"), raw("c2", "keep 1"), raw("c3", "skip"), raw("c4", "keep 2")];
        let result = process(input, &video_id(), "keep", 1);
        assert_eq!(result.comments[0].text, "keep 1");
    }

    #[test]
    fn test_zero_limit() {
        let input = vec![raw("c1", "a"), raw("c2", "b")];
        assert!(process(input, &video_id(), "", 0).is_empty());
    }

    #[test]
    fn test_output_bounded_by_limit() {
        let input: Vec<RawComment> = (0..20).map(|i| raw(&i.to_string(), "x")).collect();
        for limit in [0, 1, 7, 20, 50] {
            let result = process(input.clone(), &video_id(), "", limit);
            assert_eq!(result.len(), limit.min(20));
        }
    }

    #[test]
    fn test_deterministic() {
        let input = vec![raw("c1", "foo\nbar"), raw("c2", "bar"), raw("c3", "baz")];
        let first = process(input.clone(), &video_id(), "bar", 5);
        let second = process(input, &video_id(), "bar", 5);
        assert_eq!(first, second);
    }
}

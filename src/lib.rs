pub mod config;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod source;
pub mod ui;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A single captioned segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// An 11-character YouTube video identifier.
///
/// Only [`extract_video_id`] hands these out; whether the video exists is
/// not known until a fetch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete transcript for a video: every segment's text followed by a newline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub text: String,
    pub segment_count: usize,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// Order matters: the first pattern that matches wins.
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11}).*").expect("valid video id pattern"),
        Regex::new(r"youtu\.be/([0-9A-Za-z_-]{11})").expect("valid short link pattern"),
    ]
});

/// Extract the video ID from a YouTube URL.
///
/// Matches `v=ID` or any `/ID` path segment (watch, embed, v, shorts, youtu.be
/// links), then the bare short-link form. Returns `None` for anything else.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| VideoId(caps[1].to_string()))
}

#[cfg(test)]
pub(crate) fn video_id(id: &str) -> VideoId {
    VideoId(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(url: &str) -> Option<String> {
        extract_video_id(url).map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120&list=PL123"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_v_param_not_first() {
        assert_eq!(
            extract("https://www.youtube.com/watch?feature=share&v=a_b-C1d2E3f"),
            Some("a_b-C1d2E3f".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_short_url_without_scheme() {
        assert_eq!(extract("youtu.be/dQw4w9WgXcQ?si=xyz"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_v_path_url() {
        assert_eq!(extract("https://www.youtube.com/v/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            extract("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_first_pattern_wins() {
        // v= appears before the short-link path, so its token is returned
        assert_eq!(
            extract("https://example.com/?v=AAAAAAAAAAA&next=youtu.be/BBBBBBBBBBB"),
            Some("AAAAAAAAAAA".to_string())
        );
    }

    #[test]
    fn test_capture_is_limited_to_eleven_chars() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQXYZ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(extract("not a url"), None);
        assert_eq!(extract("invalid"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_bare_id_is_not_a_url() {
        assert_eq!(extract("dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_token_too_short() {
        assert_eq!(extract("https://youtu.be/short"), None);
    }

    #[test]
    fn test_deterministic() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42";
        assert_eq!(extract_video_id(url), extract_video_id(url));
    }

    #[test]
    fn test_transcript_is_empty() {
        let t = Transcript {
            video_id: video_id("abc12345678"),
            text: String::new(),
            segment_count: 0,
        };
        assert!(t.is_empty());
    }
}

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube|youtu|youtube-nocookie)\.(com|be)/")
        .expect("static regex")
});

static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)").expect("static regex"),
        Regex::new(r"youtube\.com/embed/([^&\n?#]+)").expect("static regex"),
    ]
});

pub fn is_youtube_url(input: &str) -> bool {
    YOUTUBE_URL.is_match(input)
}

/// Video id from a watch, short or embed link.
pub fn extract_video_id(input: &str) -> Option<&str> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|id| id.as_str())
    })
}

//! YouTube URLから動画IDを抽出する
//!
//! 対応形式:
//! - `https://www.youtube.com/watch?v=ID`
//! - `https://youtu.be/ID`
//! - `https://www.youtube.com/live/ID`
//!
//! IDの直後は `?`、`&`、または文字列末尾でなければならない。

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// 動画IDの長さ
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|live/)([A-Za-z0-9_-]{11})(?:\?|&|$)")
        .expect("video id pattern is a valid regex")
});

/// 11文字の動画ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// 生のID文字列を検証してVideoIdを作成
    ///
    /// 長さや文字種が合わない場合は切り詰めずに `None` を返す。
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == VIDEO_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self(raw.to_string()))
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

/// URL文字列から最初に見つかった動画IDを取り出す
///
/// 一致しない場合は `None`（呼び出し側で「無効なリンク」として扱う）
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(url: &str) -> Option<String> {
        extract_video_id(url).map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/watch?feature=share&v=a-b_c1D2e3F"),
            Some("a-b_c1D2e3F".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ?si=abcdef"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_live_url() {
        assert_eq!(
            id("https://www.youtube.com/live/jfKfPfyJRdk?feature=shared"),
            Some("jfKfPfyJRdk".to_string())
        );
    }

    #[test]
    fn test_rejects_wrong_length() {
        // 12文字目があると終端条件を満たさない（切り詰めない）
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9WgXcQX"), None);
        assert_eq!(id("https://youtu.be/short"), None);
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        assert_eq!(id("https://www.youtube.com/channel/UCxxxxxxxxxxxxxxxxxxxxxx"), None);
        assert_eq!(id("https://example.com/"), None);
        assert_eq!(id("dQw4w9WgXcQ"), None);
        assert_eq!(id(""), None);
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert_eq!(id("https://youtu.be/dQw4w9WgX!Q"), None);
    }

    #[test]
    fn test_parse() {
        assert!(VideoId::parse("dQw4w9WgXcQ").is_some());
        assert!(VideoId::parse("dQw4w9WgXc").is_none());
        assert!(VideoId::parse("dQw4w9WgXcQQ").is_none());
        assert!(VideoId::parse("dQw4w9WgX.Q").is_none());
        assert_eq!(VideoId::parse("dQw4w9WgXcQ").unwrap().to_string(), "dQw4w9WgXcQ");
    }
}

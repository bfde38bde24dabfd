use chrono::{DateTime, Utc};
use serde::Deserialize;

/// スニペットにタイトルがない場合の表示
pub const UNKNOWN_TITLE: &str = "제목 없음";
/// スニペットにチャンネル名がない場合の表示
pub const UNKNOWN_CHANNEL: &str = "채널 정보 없음";

// =============================================================================
// ボット内部で使う整形済みデータ
// =============================================================================

/// ライブ配信の基本情報と実績時刻
#[derive(Debug, Clone, PartialEq)]
pub struct LiveStreamInfo {
    pub title: String,
    pub channel_title: String,
    /// 実際の配信開始時刻（未開始ならNone）
    pub start_time: Option<DateTime<Utc>>,
    /// 実際の配信終了時刻（配信中ならNone）
    pub end_time: Option<DateTime<Utc>>,
}

/// videos.list（liveStreamingDetails）の結果
#[derive(Debug, Clone, PartialEq)]
pub enum VideoLookup {
    Found(LiveStreamInfo),
    /// IDに該当する動画がない
    NotFound,
    /// 動画はあるがライブ配信情報がない
    NotLive,
}

/// チャンネル検索結果の1件
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelResult {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// 人気動画の1件（統計情報と結合済み）
#[derive(Debug, Clone, PartialEq)]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub view_count: u64,
}

// =============================================================================
// YouTube API レスポンス型
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct VideoResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    #[serde(rename = "liveStreamingDetails")]
    pub live_streaming_details: Option<LiveStreamingDetails>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LiveStreamingDetails {
    #[serde(rename = "actualStartTime")]
    pub actual_start_time: Option<DateTime<Utc>>,
    #[serde(rename = "actualEndTime")]
    pub actual_end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    /// APIは数値を文字列で返す
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    #[serde(default)]
    pub snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchSnippet {
    pub title: String,
    pub description: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
}

/// Google APIのエラーレスポンス
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
}

impl VideoItem {
    /// ライブ配信情報へ変換（liveStreamingDetailsがなければNone）
    pub fn into_live_stream_info(self) -> Option<LiveStreamInfo> {
        let details = self.live_streaming_details?;
        let (title, channel_title) = match self.snippet {
            Some(snippet) => (snippet.title, snippet.channel_title),
            None => (None, None),
        };

        Some(LiveStreamInfo {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            channel_title: channel_title.unwrap_or_else(|| UNKNOWN_CHANNEL.to_string()),
            start_time: details.actual_start_time,
            end_time: details.actual_end_time,
        })
    }
}

//! コマンドごとの応答テキスト整形（I/Oなし）

use chrono::{DateTime, FixedOffset, Utc};

use super::time::TimingReport;
use crate::youtube::types::{ChannelResult, LiveStreamInfo, VideoResult};

/// チャンネル説明の最大表示文字数
pub const DESCRIPTION_LIMIT: usize = 100;

const CHANNEL_URL: &str = "https://www.youtube.com/channel/";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// ライブ配信レポート
pub fn live_stream_report(info: &LiveStreamInfo, now: DateTime<Utc>, offset: FixedOffset) -> String {
    let timing = TimingReport::new(info.start_time, info.end_time, now, offset);

    let mut out = format!("**{}** (채널: {})\n", info.title, info.channel_title);
    out.push_str("```\n");
    if let Some(date) = &timing.date_line {
        out.push_str(date);
        out.push('\n');
    }
    out.push_str(&timing.start_line);
    out.push('\n');
    out.push_str(&timing.end_line);
    out.push('\n');
    out.push('\n');
    out.push_str(&timing.duration_line);
    out.push('\n');
    out.push_str("```");
    out
}

/// チャンネル検索レポート
pub fn channel_report(query: &str, channels: &[ChannelResult]) -> String {
    let mut out = format!("'{}'에 대한 검색 결과:\n", query);
    for (i, channel) in channels.iter().enumerate() {
        out.push_str(&format!(
            "\n**{}. {}**\n   - ID: `{}`\n   - 설명: {}\n   - 링크: {}{}\n",
            i + 1,
            channel.title,
            channel.id,
            truncate_description(&channel.description),
            CHANNEL_URL,
            channel.id
        ));
    }
    out
}

/// 人気動画レポート
pub fn trending_report(query: &str, videos: &[VideoResult]) -> String {
    let mut out = format!("'{}' 관련 인기 동영상:\n", query);
    for (i, video) in videos.iter().enumerate() {
        out.push_str(&format!(
            "\n**{}. {}**\n   - 채널: {}\n   - 조회수: {}\n   - 링크: {}{}\n",
            i + 1,
            video.title,
            video.channel_title,
            thousands(video.view_count),
            WATCH_URL,
            video.id
        ));
    }
    out
}

/// 100文字を超える説明は切り詰めて「...」を付ける
pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

/// 3桁区切り（1234567 → "1,234,567"）
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

use super::{send, CommandDispatcher, CommandError, ReplyChannel};
use crate::format;
use crate::youtube::{extract_video_id, types::VideoLookup};

const LINK_ACK: &str = "유튜브 라이브 정보를 가져오는 중입니다. 잠시만 기다려 주세요...";

impl CommandDispatcher {
    /// `링크 <url>`: ライブ配信の開始・終了・配信時間
    pub(super) async fn link(
        &self,
        args: &str,
        reply: &dyn ReplyChannel,
    ) -> Result<String, CommandError> {
        // 最初のトークンのみをURLとして扱う
        let url = args.split_whitespace().next().ok_or(CommandError::InvalidInput)?;

        send(reply, LINK_ACK).await;

        let video_id = extract_video_id(url).ok_or_else(|| {
            log::debug!("No video id in {:?}", url);
            CommandError::InvalidInput
        })?;

        match self.client.fetch_live_stream(&video_id).await? {
            VideoLookup::Found(info) => Ok(format::live_stream_report(
                &info,
                (self.clock)(),
                self.display_offset,
            )),
            VideoLookup::NotFound => Err(CommandError::NotFound {
                subject: video_id.to_string(),
            }),
            VideoLookup::NotLive => Err(CommandError::NotLive),
        }
    }

    /// `채널 <검색어>`: チャンネル検索（行の残り全体を検索語とする）
    pub(super) async fn channel(
        &self,
        args: &str,
        reply: &dyn ReplyChannel,
    ) -> Result<String, CommandError> {
        let query = args.trim();
        if query.is_empty() {
            return Err(CommandError::InvalidInput);
        }

        send(
            reply,
            &format!(
                "'{}'에 대한 유튜브 채널을 검색 중입니다. 잠시만 기다려 주세요...",
                query
            ),
        )
        .await;

        let channels = self.client.search_channels(query, self.max_results).await?;
        if channels.is_empty() {
            return Err(CommandError::NotFound {
                subject: query.to_string(),
            });
        }

        Ok(format::channel_report(query, &channels))
    }

    /// `트렌드`: 固定検索語の人気動画（引数は無視）
    pub(super) async fn trend(
        &self,
        args: &str,
        reply: &dyn ReplyChannel,
    ) -> Result<String, CommandError> {
        if !args.is_empty() {
            log::debug!("Ignoring extra arguments for trend: {:?}", args);
        }

        let query = self.trend_query.as_str();
        send(
            reply,
            &format!(
                "유튜브에서 '{}' 관련 인기 동영상을 검색 중입니다. 잠시만 기다려 주세요...",
                query
            ),
        )
        .await;

        let videos = self.client.fetch_trending(query, self.max_results).await?;
        if videos.is_empty() {
            return Err(CommandError::NotFound {
                subject: query.to_string(),
            });
        }

        Ok(format::trending_report(query, &videos))
    }
}

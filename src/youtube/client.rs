use reqwest::{Client, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

use super::{errors::YouTubeError, types::*, video_id::VideoId};
use crate::config::{mask_api_key, BotConfig};

/// YouTube Data API v3 クライアント
///
/// 1回の呼び出しにつき1リクエストのみ。リトライは行わず、
/// タイムアウトはreqwestクライアントの設定値に任せる。
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_base: String,
    api_key: String,
    timeout: Duration,
}

impl YouTubeClient {
    pub fn new(config: &BotConfig) -> Result<Self, YouTubeError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        log::info!(
            "YouTube client ready (base: {}, key: {})",
            config.api_base,
            mask_api_key(&config.youtube_api_key)
        );

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.youtube_api_key.clone(),
            timeout: config.http_timeout,
        })
    }

    /// 動画IDからライブ配信情報を取得（クォータ1消費）
    pub async fn fetch_live_stream(&self, video_id: &VideoId) -> Result<VideoLookup, YouTubeError> {
        log::info!(
            "Fetching live streaming details for video: {} (quota cost: 1 unit)",
            video_id
        );

        let data: VideoResponse = self
            .get(
                "videos",
                &[
                    ("part", "liveStreamingDetails,snippet"),
                    ("id", video_id.as_str()),
                ],
            )
            .await?;

        let Some(item) = data.items.into_iter().next() else {
            log::warn!("Video not found: {}", video_id);
            return Ok(VideoLookup::NotFound);
        };

        match item.into_live_stream_info() {
            Some(info) => Ok(VideoLookup::Found(info)),
            None => {
                log::info!("Video {} has no live streaming details", video_id);
                Ok(VideoLookup::NotLive)
            }
        }
    }

    /// チャンネル検索（クォータ100消費）
    ///
    /// 結果はAPIの関連度順のまま返す
    pub async fn search_channels(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ChannelResult>, YouTubeError> {
        log::info!("Searching channels for '{}' (quota cost: 100 units)", query);

        let max_results = limit.to_string();
        let data: SearchResponse = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let channels: Vec<ChannelResult> = data
            .items
            .into_iter()
            .filter_map(|item| match item.id.channel_id {
                Some(id) => Some(ChannelResult {
                    id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                }),
                None => {
                    log::warn!("Skipping search item without channelId");
                    None
                }
            })
            .collect();

        log::info!("Found {} channels", channels.len());
        Ok(channels)
    }

    /// 再生回数順の動画検索（クォータ100消費）
    ///
    /// 再生回数は0で埋めた状態で返す。統計情報は `fetch_view_counts` で取得する。
    pub async fn search_trending_videos(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<VideoResult>, YouTubeError> {
        log::info!(
            "Searching videos for '{}' ordered by view count (quota cost: 100 units)",
            query
        );

        let max_results = limit.to_string();
        let data: SearchResponse = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "video"),
                    ("order", "viewCount"),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        Ok(data
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                Some(VideoResult {
                    id,
                    title: item.snippet.title,
                    channel_title: item.snippet.channel_title,
                    view_count: 0,
                })
            })
            .collect())
    }

    /// 動画IDごとの再生回数を一括取得（クォータ1消費）
    ///
    /// 応答に含まれないIDはマップに入らない
    pub async fn fetch_view_counts(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, u64>, YouTubeError> {
        if video_ids.is_empty() {
            return Ok(HashMap::new());
        }

        log::info!(
            "Fetching statistics for {} videos (quota cost: 1 unit)",
            video_ids.len()
        );

        let ids = video_ids.join(",");
        let data: VideoResponse = self
            .get("videos", &[("part", "statistics"), ("id", ids.as_str())])
            .await?;

        Ok(data
            .items
            .into_iter()
            .map(|item| {
                let count = item
                    .statistics
                    .and_then(|s| s.view_count)
                    .map(|raw| {
                        raw.parse::<u64>().unwrap_or_else(|_| {
                            log::warn!("Unparseable viewCount for {}: {}", item.id, raw);
                            0
                        })
                    })
                    .unwrap_or(0);
                (item.id, count)
            })
            .collect())
    }

    /// 検索と統計取得を組み合わせた人気動画一覧
    ///
    /// 検索順を保ったまま再生回数を結合する。統計が欠けた動画は0回として扱う。
    pub async fn fetch_trending(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<VideoResult>, YouTubeError> {
        let mut videos = self.search_trending_videos(query, limit).await?;
        if videos.is_empty() {
            return Ok(videos);
        }

        let ids: Vec<String> = videos.iter().map(|v| v.id.clone()).collect();
        let counts = self.fetch_view_counts(&ids).await?;

        for video in &mut videos {
            video.view_count = counts.get(&video.id).copied().unwrap_or_else(|| {
                log::debug!("No statistics returned for {}, defaulting to 0", video.id);
                0
            });
        }

        Ok(videos)
    }

    /// GETリクエストを送り、成功時はJSONをデコードする
    async fn get<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T, YouTubeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.api_base, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let response = Self::check_status(response).await?;
        let body = response.text().await.map_err(|e| self.request_error(e))?;
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to decode {} response: {}", endpoint, e);
            YouTubeError::ParseError(e.to_string())
        })
    }

    /// reqwestのエラーを変換（タイムアウトは専用の種別にする）
    fn request_error(&self, err: reqwest::Error) -> YouTubeError {
        if err.is_timeout() {
            log::warn!("YouTube API request timed out after {:?}", self.timeout);
            YouTubeError::Timeout(self.timeout)
        } else {
            YouTubeError::from(err)
        }
    }

    async fn check_status(response: Response) -> Result<Response, YouTubeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = classify_error(status, &body);
        log::error!("YouTube API error - status: {}, error: {}", status, error);
        Err(error)
    }
}

/// HTTPステータスとエラーボディからエラー種別を判定
pub fn classify_error(status: StatusCode, body: &str) -> YouTubeError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let has_reason = |reason: &str| match &parsed {
        Some(p) => p.error.errors.iter().any(|e| e.reason == reason),
        None => body.contains(reason),
    };
    let message = parsed
        .as_ref()
        .map(|p| p.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::FORBIDDEN => {
            if !has_reason("quotaExceeded") && !has_reason("rateLimitExceeded") {
                log::warn!("403 without quota reason, treating as quota/key problem: {}", message);
            }
            YouTubeError::QuotaExceeded
        }
        StatusCode::TOO_MANY_REQUESTS => YouTubeError::QuotaExceeded,
        StatusCode::BAD_REQUEST if has_reason("keyInvalid") => YouTubeError::InvalidApiKey,
        StatusCode::BAD_REQUEST => YouTubeError::BadRequest(message),
        StatusCode::UNAUTHORIZED => YouTubeError::InvalidApiKey,
        status => YouTubeError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

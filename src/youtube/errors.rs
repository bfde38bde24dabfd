use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YouTubeError {
    /// URL（APIキーを含む）は取り除いた状態で保持する
    #[error("HTTP request failed: {0}")]
    HttpError(#[source] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API key is invalid or missing")]
    InvalidApiKey,

    #[error("Quota exceeded - please try again later")]
    QuotaExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        // reqwestのエラー表示にはクエリ文字列（key=...）付きのURLが含まれる
        Self::HttpError(err.without_url())
    }
}

use thiserror::Error;

use super::CommandKind;
use crate::youtube::YouTubeError;

/// コマンド処理の失敗種別
///
/// ハンドラーの境界で必ず1件のユーザー向けメッセージに変換され、
/// それより外へは伝播しない。
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid or missing argument")]
    InvalidInput,

    #[error("nothing found for {subject}")]
    NotFound { subject: String },

    #[error("video has no live streaming details")]
    NotLive,

    #[error("quota exceeded or API key rejected")]
    QuotaExceeded,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Transport(String),
}

impl From<YouTubeError> for CommandError {
    fn from(err: YouTubeError) -> Self {
        match err {
            YouTubeError::QuotaExceeded | YouTubeError::InvalidApiKey => Self::QuotaExceeded,
            YouTubeError::BadRequest(message) => Self::BadRequest(message),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl CommandError {
    /// チャットに返すメッセージ
    pub fn user_message(&self, kind: CommandKind, prefix: &str) -> String {
        match self {
            Self::InvalidInput => match kind {
                CommandKind::Link => format!(
                    "유효한 유튜브 링크 주소를 찾을 수 없습니다. `{}링크 [유튜브 라이브 링크주소]` 형식으로 입력해주세요.",
                    prefix
                ),
                CommandKind::Channel => format!(
                    "검색어가 비어 있습니다. `{}채널 [검색어]` 형식으로 입력해주세요.",
                    prefix
                ),
                CommandKind::Trend => format!("`{}트렌드` 형식으로 입력해주세요.", prefix),
            },
            Self::NotFound { subject } => match kind {
                CommandKind::Link => format!(
                    "해당 ID({})에 대한 유튜브 비디오 정보를 찾을 수 없습니다.",
                    subject
                ),
                CommandKind::Channel => format!("'{}'에 해당하는 채널을 찾을 수 없습니다.", subject),
                CommandKind::Trend => format!("'{}' 관련 인기 동영상을 찾을 수 없습니다.", subject),
            },
            Self::NotLive => {
                "이 비디오는 라이브 스트리밍 정보가 없는 것 같습니다. 라이브 스트림만 지원합니다."
                    .to_string()
            }
            Self::QuotaExceeded => {
                "유튜브 API 할당량 초과 또는 API 키에 문제가 있습니다. 잠시 후 다시 시도하거나 API 키를 확인해주세요."
                    .to_string()
            }
            Self::BadRequest(_) => {
                let hint = match kind {
                    CommandKind::Link => "비디오 ID가 유효한지 확인해주세요.",
                    CommandKind::Channel => "검색어가 유효한지 확인해주세요.",
                    CommandKind::Trend => "검색어에 문제가 있을 수 있습니다.",
                };
                format!("유튜브 API 요청이 잘못되었습니다. {}", hint)
            }
            Self::Transport(detail) => {
                format!("유튜브 API 호출 중 오류가 발생했습니다: {}", detail)
            }
        }
    }
}

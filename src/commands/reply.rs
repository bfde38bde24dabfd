use async_trait::async_trait;
use thiserror::Error;

/// 返信送信エラー
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to deliver reply: {0}")]
    Send(String),
}

/// 返信先（チャットのチャンネルなど）
///
/// 接続管理や認証はこのトレイトの実装側の責務。
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), TransportError>;
}

// =============================================================================
// チャットコマンドのディスパッチ
// =============================================================================
// 受け取ったコマンド名と引数を3つのハンドラーへ振り分ける。
// 各ハンドラーは「処理中」メッセージを1件、最終結果（またはエラー）を1件送る。
// 呼び出し間で共有する可変状態はない。
// =============================================================================

mod error;
mod reply;
mod youtube;

pub use error::CommandError;
pub use reply::{ReplyChannel, TransportError};

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::BotConfig;
use crate::youtube::YouTubeClient;

/// 対応コマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// ライブ配信の開始・終了・配信時間
    Link,
    /// チャンネル検索
    Channel,
    /// 固定検索語の人気動画
    Trend,
}

impl CommandKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "링크" | "link" => Some(Self::Link),
            "채널" | "channel" => Some(Self::Channel),
            "트렌드" | "trend" => Some(Self::Trend),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Link => "링크",
            Self::Channel => "채널",
            Self::Trend => "트렌드",
        }
    }
}

/// チャット1行をコマンド名と残りの引数に分解
///
/// プレフィックスで始まらない行や、プレフィックスのみの行はNone。
/// 引数は行の残り全体（前後の空白のみ除去）。
pub fn parse_invocation<'a>(prefix: &str, line: &'a str) -> Option<(&'a str, &'a str)> {
    let body = line.trim().strip_prefix(prefix)?;
    let mut parts = body.splitn(2, char::is_whitespace);
    let name = parts.next().filter(|n| !n.is_empty())?;
    let args = parts.next().unwrap_or("").trim();
    Some((name, args))
}

/// コマンドディスパッチャー
///
/// エントリポイントで一度だけ構築し、`Arc` で共有する。
pub struct CommandDispatcher {
    client: YouTubeClient,
    prefix: String,
    trend_query: String,
    max_results: u32,
    display_offset: FixedOffset,
    clock: fn() -> DateTime<Utc>,
}

impl CommandDispatcher {
    pub fn new(config: &BotConfig, client: YouTubeClient) -> Self {
        Self {
            client,
            prefix: config.command_prefix.clone(),
            trend_query: config.trend_query.clone(),
            max_results: config.max_results,
            display_offset: config.display_offset,
            clock: Utc::now,
        }
    }

    /// 現在時刻の取得関数を差し替える
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// チャット1行を解釈して実行
    pub async fn handle_line(&self, line: &str, reply: &dyn ReplyChannel) -> Option<CommandKind> {
        let (name, args) = parse_invocation(&self.prefix, line)?;
        self.dispatch(name, args, reply).await
    }

    /// コマンドを実行し、最終メッセージを1件送信する
    ///
    /// 未知のコマンドは何も送らずNoneを返す。
    pub async fn dispatch(
        &self,
        name: &str,
        args: &str,
        reply: &dyn ReplyChannel,
    ) -> Option<CommandKind> {
        let Some(kind) = CommandKind::from_name(name) else {
            log::debug!("Ignoring unknown command: {}", name);
            return None;
        };

        log::info!("Command {} invoked (args: {:?})", kind.name(), args);

        let result = match kind {
            CommandKind::Link => self.link(args, reply).await,
            CommandKind::Channel => self.channel(args, reply).await,
            CommandKind::Trend => self.trend(args, reply).await,
        };

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                match &e {
                    CommandError::Transport(_) | CommandError::QuotaExceeded => {
                        log::error!("Command {} failed: {}", kind.name(), e)
                    }
                    _ => log::warn!("Command {} rejected: {}", kind.name(), e),
                }
                e.user_message(kind, &self.prefix)
            }
        };

        send(reply, &text).await;
        Some(kind)
    }
}

/// 返信を送る。送信失敗はログのみ
async fn send(reply: &dyn ReplyChannel, text: &str) {
    if let Err(e) = reply.send(text).await {
        log::warn!("Failed to send reply: {}", e);
    }
}

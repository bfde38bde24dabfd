mod commands;
mod config;
mod console;
mod format;
mod youtube;

pub use commands::{
    parse_invocation, CommandDispatcher, CommandError, CommandKind, ReplyChannel, TransportError,
};
pub use config::{BotConfig, ConfigError};
pub use console::{run_console, ConsoleReply};
pub use format::{BroadcastDuration, TimingReport};
pub use youtube::{
    extract_video_id,
    types::{ChannelResult, LiveStreamInfo, VideoLookup, VideoResult},
    VideoId, YouTubeClient, YouTubeError,
};

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// 起動時のエラー
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build YouTube client: {0}")]
    Client(#[from] YouTubeError),

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// ロガーを初期化（RUST_LOG未設定時はinfo）
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// 設定を読み込み、標準入出力でボットを動かす
///
/// 設定・クライアント・ディスパッチャーはここで一度だけ構築し、
/// 各コマンド呼び出しへ `Arc` で渡す。
pub async fn run() -> Result<(), StartupError> {
    init_logging();

    let config = BotConfig::load(Path::new(config::CONFIG_FILE))?;
    let client = YouTubeClient::new(&config)?;
    let dispatcher = Arc::new(CommandDispatcher::new(&config, client));

    log::info!(
        "Bot ready - commands: {p}링크 <url>, {p}채널 <query>, {p}트렌드",
        p = dispatcher.prefix()
    );

    run_console(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await?;

    log::info!("Input closed, shutting down");
    Ok(())
}

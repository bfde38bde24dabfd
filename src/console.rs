//! 標準入出力を使う簡易トランスポート
//!
//! 1行を1件のチャットメッセージとして読み、コマンドごとにタスクを起動する。
//! 返信は `[#連番] ` を付けて標準出力に書く。

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::commands::{parse_invocation, CommandDispatcher, ReplyChannel, TransportError};

/// 1回の呼び出しに対応する返信先
pub struct ConsoleReply<W> {
    invocation: u64,
    out: Arc<Mutex<W>>,
}

impl<W> ConsoleReply<W> {
    pub fn new(invocation: u64, out: Arc<Mutex<W>>) -> Self {
        Self { invocation, out }
    }
}

#[async_trait]
impl<W> ReplyChannel for ConsoleReply<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, text: &str) -> Result<(), TransportError> {
        let mut out = self.out.lock().await;
        let line = format!("[#{}] {}\n", self.invocation, text);
        out.write_all(line.as_bytes())
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

/// 入力が尽きるまで行を読み、コマンドを並行に処理する
///
/// 起動したタスクはすべて完了を待ってから戻る。
pub async fn run_console<R, W>(
    dispatcher: Arc<CommandDispatcher>,
    input: R,
    out: W,
) -> std::io::Result<()>
where
    R: tokio::io::AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let out = Arc::new(Mutex::new(out));
    let mut invocation = 0u64;
    let mut lines = BufReader::new(input).lines();
    let mut tasks = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let Some((name, args)) = parse_invocation(dispatcher.prefix(), &line) else {
            continue;
        };
        let (name, args) = (name.to_string(), args.to_string());

        invocation += 1;
        let reply = ConsoleReply::new(invocation, Arc::clone(&out));
        let dispatcher = Arc::clone(&dispatcher);

        tasks.push(tokio::spawn(async move {
            if dispatcher.dispatch(&name, &args, &reply).await.is_none() {
                log::debug!("Invocation #{} was not a known command", invocation);
            }
        }));
    }

    for task in tasks {
        if let Err(e) = task.await {
            log::error!("Command task panicked: {}", e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;
    use crate::youtube::YouTubeClient;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_console_reply_prefixes_invocation() {
        let out = Arc::new(Mutex::new(Vec::<u8>::new()));
        let reply = ConsoleReply::new(7, Arc::clone(&out));
        reply.send("hello").await.unwrap();

        let written = String::from_utf8(out.lock().await.clone()).unwrap();
        assert_eq!(written, "[#7] hello\n");
    }

    #[tokio::test]
    async fn test_run_console_handles_each_line() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let mut config = BotConfig::new("test_key_123456");
        config.api_base = server.url();
        let client = YouTubeClient::new(&config).unwrap();
        let dispatcher = Arc::new(CommandDispatcher::new(&config, client));

        let input: &[u8] = "hello there\n!채널 nothing\n!unknown\n!링크\n".as_bytes();
        let sink = Arc::new(std::sync::Mutex::new(Vec::<u8>::new()));
        let writer = SharedSink(Arc::clone(&sink));

        run_console(dispatcher, input, writer).await.unwrap();

        let written = String::from_utf8(sink.lock().unwrap().clone()).unwrap();
        // 채널: 処理中 + 結果、링크: 使い方のみ
        assert_eq!(written.lines().count(), 3);
        assert!(written.contains("'nothing'에 해당하는 채널을 찾을 수 없습니다."));
        assert!(written.contains("`!링크 [유튜브 라이브 링크주소]`"));
    }

    /// テスト用: 書き込み内容を共有バッファに溜める
    struct SharedSink(Arc<std::sync::Mutex<Vec<u8>>>);

    impl AsyncWrite for SharedSink {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            self.0.lock().unwrap().extend_from_slice(buf);
            std::task::Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }
}

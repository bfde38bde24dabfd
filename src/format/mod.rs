//! 応答テキストの整形
//!
//! すべて純粋関数。API呼び出しやメッセージ送信は行わない。

pub mod report;
pub mod time;

pub use report::{channel_report, live_stream_report, trending_report};
pub use time::{BroadcastDuration, TimingReport};

//! 配信時刻と配信時間の表示文字列を作る
//!
//! 現在時刻は呼び出し側から渡す（テストで固定できるように）。

use chrono::{DateTime, FixedOffset, Utc};

const START_UNKNOWN: &str = "방송 시작: 정보 없음";
const END_UNKNOWN: &str = "방송 종료: 정보 없음";
const END_STILL_LIVE: &str = "방송 종료: 현재 라이브 중";
const DURATION_UNKNOWN: &str = "총 방송 시간: 계산 불가 (라이브 중이거나 정보 부족)";
const ANOMALY_NOTE: &str = " (시각 데이터 이상)";

/// 配信時間の算出結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastDuration {
    /// 開始時刻がない
    Unknown,
    /// 開始のみ: 現在時刻までの経過秒
    Elapsed(i64),
    /// 開始・終了あり: 総配信秒
    Total(i64),
}

impl BroadcastDuration {
    /// 開始・終了・現在時刻から配信時間を求める
    ///
    /// 開始時刻がない場合は終了時刻の有無に関わらずUnknown。
    /// 開始のみの場合は配信中とみなす。異常終了した配信で終了時刻が
    /// 記録されないケースは区別できない。
    pub fn between(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self::Total((end - start).num_seconds()),
            (Some(start), None) => Self::Elapsed((now - start).num_seconds()),
            (None, _) => Self::Unknown,
        }
    }

    pub fn seconds(&self) -> Option<i64> {
        match self {
            Self::Unknown => None,
            Self::Elapsed(secs) | Self::Total(secs) => Some(*secs),
        }
    }
}

/// 配信時刻ブロックの各行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingReport {
    /// 開始日（MM/DD）。開始時刻がなければNone
    pub date_line: Option<String>,
    pub start_line: String,
    pub end_line: String,
    pub duration_line: String,
    /// 配信時間が負になった（0に丸めた）
    pub anomalous: bool,
}

impl TimingReport {
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Self {
        let local_start = start.map(|t| t.with_timezone(&offset));
        let local_end = end.map(|t| t.with_timezone(&offset));

        let date_line = local_start.map(|t| t.format("%m/%d").to_string());

        let start_line = match local_start {
            Some(t) => format!("방송 시작 {}", clock_text(&t)),
            None => START_UNKNOWN.to_string(),
        };

        let end_line = match (local_end, local_start) {
            (Some(t), _) => format!("방송 종료 {}", clock_text(&t)),
            (None, Some(_)) => END_STILL_LIVE.to_string(),
            (None, None) => END_UNKNOWN.to_string(),
        };

        let duration = BroadcastDuration::between(start, end, now);
        let (duration_line, anomalous) = match duration.seconds() {
            Some(secs) if secs < 0 => {
                log::warn!(
                    "Negative broadcast duration ({}s), clamping to zero: start={:?} end={:?}",
                    secs,
                    start,
                    end
                );
                (
                    format!("총 방송 시간 {}{}", hms_text(0), ANOMALY_NOTE),
                    true,
                )
            }
            Some(secs) => (format!("총 방송 시간 {}", hms_text(secs)), false),
            None => (DURATION_UNKNOWN.to_string(), false),
        };

        Self {
            date_line,
            start_line,
            end_line,
            duration_line,
            anomalous,
        }
    }
}

/// 秒数を「H시간 M분 S초」に変換（切り捨て）
pub fn hms_text(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}시간 {}분 {}초", hours, minutes, seconds)
}

fn clock_text(t: &DateTime<FixedOffset>) -> String {
    t.format("%H시 %M분 %S초 (%m/%d)").to_string()
}

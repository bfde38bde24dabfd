// =============================================================================
// 共通設定・定数モジュール
// =============================================================================
// ボット全体で使用する設定値・定数を定義
// 設定は config.env（存在する場合）とプロセス環境変数から一度だけ読み込み、
// エントリポイントが所有する BotConfig として各コンポーネントへ渡す
// =============================================================================

use chrono::FixedOffset;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// HTTPリクエストのデフォルトタイムアウト（秒）
///
/// YouTube APIへのリクエストに適用される唯一の期限。
/// リトライやバックオフは行わない。
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// YouTube Data API v3 のベースURL
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// トレンドコマンドの固定検索語
pub const DEFAULT_TREND_QUERY: &str = "horror movie";

/// 検索系コマンドの最大取得件数
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// デフォルトのコマンドプレフィックス
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// 表示用タイムゾーン（KST = UTC+9）のオフセット（時間）
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// 設定ファイル名（カレントディレクトリから探す）
pub const CONFIG_FILE: &str = "config.env";

/// HTTPリクエストのデフォルトタイムアウト（Duration）
pub fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set - check config.env or the environment")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// ボットの実行時設定
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// YouTube Data API キー
    pub youtube_api_key: String,
    /// APIベースURL（テスト時はモックサーバーに差し替える）
    pub api_base: String,
    /// コマンドプレフィックス
    pub command_prefix: String,
    /// トレンドコマンドの検索語
    pub trend_query: String,
    /// 検索結果の最大件数
    pub max_results: u32,
    /// 表示用タイムゾーン
    pub display_offset: FixedOffset,
    /// HTTPタイムアウト
    pub http_timeout: Duration,
}

impl BotConfig {
    /// APIキーだけを指定し、残りはデフォルト値で作成
    pub fn new(youtube_api_key: impl Into<String>) -> Self {
        Self {
            youtube_api_key: youtube_api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            trend_query: DEFAULT_TREND_QUERY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            display_offset: kst(),
            http_timeout: http_timeout(),
        }
    }

    /// 設定ファイルとプロセス環境変数から設定を読み込む
    ///
    /// 環境変数がファイルの値より優先される（dotenvy と同じ規則）。
    /// ファイルが存在しない場合は環境変数のみを参照する。
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| file_vars.get(name).cloned())
        })
    }

    /// 任意の参照関数から設定を構築
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let youtube_api_key =
            get("YOUTUBE_API_KEY").ok_or(ConfigError::MissingVar("YOUTUBE_API_KEY"))?;

        let mut config = Self::new(youtube_api_key.trim());

        if let Some(base) = get("YOUTUBE_API_BASE") {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(prefix) = get("COMMAND_PREFIX") {
            config.command_prefix = prefix.trim().to_string();
        }
        if let Some(query) = get("TREND_QUERY") {
            config.trend_query = query.trim().to_string();
        }
        if let Some(hours) = get("DISPLAY_UTC_OFFSET_HOURS") {
            config.display_offset = hours
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|h| h.checked_mul(3600))
                .and_then(FixedOffset::east_opt)
                .ok_or(ConfigError::InvalidValue {
                    name: "DISPLAY_UTC_OFFSET_HOURS",
                    value: hours,
                })?;
        }

        Ok(config)
    }
}

/// KST（UTC+9）
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
        .expect("UTC+9 is within the valid offset range - this should never fail")
}

/// env形式のファイルを読み込み、キーと値のマップを返す
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        log::debug!("Env file not found, using process environment only: {:?}", path);
        return Ok(HashMap::new());
    }

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    log::info!("Loaded {} entries from {:?}", vars.len(), path);
    Ok(vars)
}

/// APIキーをマスキングしてログ出力用の文字列を生成
///
/// 先頭4文字と末尾4文字のみを残す。8文字以下は全体を伏せる。
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_http_timeout_duration() {
        assert_eq!(http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&[("YOUTUBE_API_KEY", "key")])).unwrap();
        assert_eq!(config.youtube_api_key, "key");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.trend_query, "horror movie");
        assert_eq!(config.max_results, 5);
        assert_eq!(config.display_offset.local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_missing_api_key() {
        let result = BotConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("YOUTUBE_API_KEY"))
        ));

        // 空文字列も未設定扱い
        let result = BotConfig::from_lookup(lookup_from(&[("YOUTUBE_API_KEY", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_overrides() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("YOUTUBE_API_KEY", "key"),
            ("YOUTUBE_API_BASE", "http://127.0.0.1:1234/"),
            ("COMMAND_PREFIX", "?"),
            ("TREND_QUERY", "ghost"),
            ("DISPLAY_UTC_OFFSET_HOURS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:1234");
        assert_eq!(config.command_prefix, "?");
        assert_eq!(config.trend_query, "ghost");
        assert_eq!(config.display_offset.local_minus_utc(), 0);
    }

    #[test]
    fn test_invalid_offset() {
        let result = BotConfig::from_lookup(lookup_from(&[
            ("YOUTUBE_API_KEY", "key"),
            ("DISPLAY_UTC_OFFSET_HOURS", "abc"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "DISPLAY_UTC_OFFSET_HOURS",
                ..
            })
        ));

        let result = BotConfig::from_lookup(lookup_from(&[
            ("YOUTUBE_API_KEY", "key"),
            ("DISPLAY_UTC_OFFSET_HOURS", "30"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "YOUTUBE_API_KEY=from_file").unwrap();
        writeln!(file, "TREND_QUERY=\"ghost house\"").unwrap();
        drop(file);

        let vars = read_env_file(&path).unwrap();
        assert_eq!(vars.get("YOUTUBE_API_KEY").map(String::as_str), Some("from_file"));
        assert_eq!(vars.get("TREND_QUERY").map(String::as_str), Some("ghost house"));

        let config = BotConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.trend_query, "ghost house");
    }

    #[test]
    fn test_load_prefers_process_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "YOUTUBE_API_KEY=from_file").unwrap();
        writeln!(file, "TREND_QUERY=file_query").unwrap();
        drop(file);

        // load() を呼ぶテストはこれだけなので、プロセス環境の変更は他に影響しない
        std::env::set_var("YOUTUBE_API_KEY", "from_env");
        let result = BotConfig::load(&path);
        std::env::remove_var("YOUTUBE_API_KEY");

        let config = result.unwrap();
        assert_eq!(config.youtube_api_key, "from_env");
        assert_eq!(config.trend_query, "file_query");
    }

    #[test]
    fn test_read_missing_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_env_file(&dir.path().join("nope.env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("AIzaSyABC123def456GHI789"), "AIza***I789");
        assert_eq!(mask_api_key("short"), "***");
        assert_eq!(mask_api_key(""), "***");
        assert_eq!(mask_api_key("12345678"), "***");
        assert_eq!(mask_api_key("123456789"), "1234***6789");
    }
}

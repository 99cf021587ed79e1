//! ロギング初期化
//!
//! 標準出力（テキストまたはJSON）と、任意で日次ローテーションのファイル出力。

use crate::common::error::{DeskError, DeskResult};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名の接頭辞（`tourdesk.log.YYYY-MM-DD`）
const LOG_FILE_PREFIX: &str = "tourdesk.log";

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// EnvFilter書式のレベル指定
    pub level: String,
    /// 標準出力をJSONにする
    pub json: bool,
    /// ログファイルの出力先ディレクトリ
    pub dir: Option<PathBuf>,
}

impl LogSettings {
    /// 環境変数から読み込む
    ///
    /// レベルは `TOURDESK_LOG_LEVEL`、なければ `RUST_LOG`、既定は `info`。
    pub fn from_env() -> Self {
        let level = std::env::var("TOURDESK_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        let json = std::env::var("TOURDESK_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let dir = std::env::var("TOURDESK_LOG_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        Self { level, json, dir }
    }
}

/// グローバルsubscriberを設定する
///
/// ファイル出力が有効な場合は `WorkerGuard` を返す。プロセス終了まで保持すること
/// （Dropで未出力分がフラッシュされる）。
pub fn init() -> DeskResult<Option<WorkerGuard>> {
    init_with(LogSettings::from_env())
}

/// 指定した設定でsubscriberを設定する
pub fn init_with(settings: LogSettings) -> DeskResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&settings.level)
        .map_err(|e| DeskError::Config(format!("Invalid log level '{}': {}", settings.level, e)))?;

    let (file_layer, guard) = match &settings.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                DeskError::Config(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = settings.json.then(|| fmt::layer().json().with_target(true));
    let text_layer = (!settings.json).then(|| fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| DeskError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

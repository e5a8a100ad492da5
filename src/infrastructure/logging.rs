/// ログ基盤モジュール
///
/// CloudWatch Logs向けにJSON形式の構造化ログを出力する。
/// ログレベルは`RUST_LOG`で指定し、未指定時はinfoとする。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 本番用のデフォルトログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

static INIT: Once = Once::new();

/// `RUST_LOG`からフィルターを構築する（不正・未設定時は`default_level`）
fn env_filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 複数回呼び出しても最初の1回のみ初期化する。
/// 既に別のサブスクライバーが登録されている場合は何もしない。
///
/// # 使用例
/// ```ignore
/// use event_forwarder::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("コールドスタート");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        let _ = tracing_subscriber::registry()
            .with(env_filter_or(DEFAULT_LOG_LEVEL))
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter_or("debug"))
            .with(fmt_layer)
            .try_init();
    });
}

/// イベント転送設定
///
/// コールドスタート時に環境変数から1度だけ読み込み、
/// 以降は不変の値としてハンドラーへ注入する。
use tracing::warn;

/// イベントソース名の環境変数
pub const SOURCE_NAME_ENV: &str = "SOURCE_NAME";
/// detail-typeの環境変数
pub const DETAIL_TYPE_ENV: &str = "DETAIL_TYPE";
/// 発行先イベントバス名の環境変数
pub const EVENT_BUS_NAME_ENV: &str = "EVENT_BUS_NAME";
/// EVENT_BUS_NAME未設定時のイベントバス名
pub const DEFAULT_EVENT_BUS_NAME: &str = "default";

/// イベント転送設定
///
/// 以下の環境変数から読み込む:
/// - SOURCE_NAME: 発行イベントのsource（未設定時は空文字列）
/// - DETAIL_TYPE: 発行イベントのdetail-type（未設定時は空文字列）
/// - EVENT_BUS_NAME: 発行先イベントバス（未設定時は`default`）
///
/// SOURCE_NAME / DETAIL_TYPEの値は検証しない。空値の扱いはEventBridge側に委ねる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderConfig {
    /// イベントソース名
    source_name: String,
    /// detail-type
    detail_type: String,
    /// 発行先イベントバス名
    event_bus_name: String,
}

impl ForwarderConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 未設定のSOURCE_NAME / DETAIL_TYPEは空文字列のまま通し、警告ログのみ出力する。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_name = lookup(SOURCE_NAME_ENV).unwrap_or_else(|| {
            warn!(key = SOURCE_NAME_ENV, "環境変数が未設定のため空文字列を使用");
            String::new()
        });

        let detail_type = lookup(DETAIL_TYPE_ENV).unwrap_or_else(|| {
            warn!(key = DETAIL_TYPE_ENV, "環境変数が未設定のため空文字列を使用");
            String::new()
        });

        let event_bus_name = lookup(EVENT_BUS_NAME_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT_BUS_NAME.to_string());

        Self {
            source_name,
            detail_type,
            event_bus_name,
        }
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(
        source_name: impl Into<String>,
        detail_type: impl Into<String>,
        event_bus_name: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            detail_type: detail_type.into(),
            event_bus_name: event_bus_name.into(),
        }
    }

    /// イベントソース名を取得
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// detail-typeを取得
    pub fn detail_type(&self) -> &str {
        &self.detail_type
    }

    /// 発行先イベントバス名を取得
    pub fn event_bus_name(&self) -> &str {
        &self.event_bus_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 安全性: #[serial]でシングルスレッド実行する
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup_forwarder_env() {
        unsafe {
            remove_env(SOURCE_NAME_ENV);
            remove_env(DETAIL_TYPE_ENV);
            remove_env(EVENT_BUS_NAME_ENV);
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ==================== from_lookup テスト ====================

    #[test]
    fn test_from_lookup_all_set() {
        let config = ForwarderConfig::from_lookup(lookup_from(&[
            ("SOURCE_NAME", "shopify.webhook"),
            ("DETAIL_TYPE", "orders/create"),
            ("EVENT_BUS_NAME", "shop-bus"),
        ]));

        assert_eq!(config.source_name(), "shopify.webhook");
        assert_eq!(config.detail_type(), "orders/create");
        assert_eq!(config.event_bus_name(), "shop-bus");
    }

    #[test]
    fn test_from_lookup_missing_values_pass_through_as_empty() {
        let config = ForwarderConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.source_name(), "");
        assert_eq!(config.detail_type(), "");
        assert_eq!(config.event_bus_name(), DEFAULT_EVENT_BUS_NAME);
    }

    #[test]
    fn test_from_lookup_keeps_values_unvalidated() {
        // 空白のみの値もそのまま使用する
        let config = ForwarderConfig::from_lookup(lookup_from(&[
            ("SOURCE_NAME", " "),
            ("DETAIL_TYPE", ""),
        ]));

        assert_eq!(config.source_name(), " ");
        assert_eq!(config.detail_type(), "");
    }

    #[test]
    fn test_from_lookup_blank_event_bus_name_uses_default() {
        let config = ForwarderConfig::from_lookup(lookup_from(&[("EVENT_BUS_NAME", "  ")]));
        assert_eq!(config.event_bus_name(), "default");
    }

    #[test]
    fn test_new() {
        let config = ForwarderConfig::new("src", "type", "bus");
        assert_eq!(config, ForwarderConfig::new("src", "type", "bus"));
        assert_eq!(config.source_name(), "src");
        assert_eq!(config.detail_type(), "type");
        assert_eq!(config.event_bus_name(), "bus");
    }

    // ==================== from_env テスト ====================

    #[test]
    #[serial(forwarder_env)]
    fn test_from_env_reads_process_environment() {
        unsafe {
            cleanup_forwarder_env();
            set_env(SOURCE_NAME_ENV, "my.source");
            set_env(DETAIL_TYPE_ENV, "my-detail-type");
        }

        let config = ForwarderConfig::from_env();
        assert_eq!(config.source_name(), "my.source");
        assert_eq!(config.detail_type(), "my-detail-type");
        assert_eq!(config.event_bus_name(), "default");

        unsafe { cleanup_forwarder_env(); }
    }

    #[test]
    #[serial(forwarder_env)]
    fn test_from_env_unset() {
        unsafe { cleanup_forwarder_env(); }

        let config = ForwarderConfig::from_env();
        assert_eq!(config, ForwarderConfig::new("", "", "default"));
    }
}

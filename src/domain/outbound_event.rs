/// 送信イベントとPutEvents応答のドメイン型
///
/// EventBridgeへ発行する1件のイベントと、ブローカーからの応答を
/// SDK型から切り離して表現する。
use serde::{Deserialize, Serialize};

/// EventBridgeへ発行するイベント
///
/// 呼び出しごとに生成され、発行時に所有権がイベントバス操作へ移る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEvent {
    /// イベントソース（SOURCE_NAME）
    pub source: String,
    /// detail-type（DETAIL_TYPE）
    pub detail_type: String,
    /// デコード済みリクエストボディ
    pub detail: String,
    /// 発行先イベントバス名
    pub event_bus_name: String,
}

impl OutboundEvent {
    /// 新しい送信イベントを作成
    pub fn new(
        source: impl Into<String>,
        detail_type: impl Into<String>,
        detail: impl Into<String>,
        event_bus_name: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            detail_type: detail_type.into(),
            detail: detail.into(),
            event_bus_name: event_bus_name.into(),
        }
    }
}

/// PutEvents応答のエントリ単位の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishResultEntry {
    /// 成功時に払い出されたイベントID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// 失敗時のエラーコード
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// 失敗時のエラーメッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PublishResultEntry {
    /// 成功エントリを作成
    pub fn accepted(event_id: impl Into<String>) -> Self {
        Self {
            event_id: Some(event_id.into()),
            ..Default::default()
        }
    }

    /// 失敗エントリを作成
    pub fn rejected(error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            event_id: None,
            error_code: Some(error_code.into()),
            error_message: Some(error_message.into()),
        }
    }
}

/// PutEvents応答
///
/// 成功レスポンスのボディとしてこの構造をJSONシリアライズする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishResponse {
    /// 失敗したエントリ数
    pub failed_entry_count: i32,
    /// エントリごとの結果（リクエスト順）
    pub entries: Vec<PublishResultEntry>,
}

impl PublishResponse {
    /// 新しい応答を作成
    pub fn new(failed_entry_count: i32, entries: Vec<PublishResultEntry>) -> Self {
        Self {
            failed_entry_count,
            entries,
        }
    }

    /// 失敗エントリを含むかどうか
    pub fn has_failures(&self) -> bool {
        self.failed_entry_count > 0
    }

    /// 最初のエントリのイベントID
    pub fn first_event_id(&self) -> Option<&str> {
        self.entries.first().and_then(|e| e.event_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_event_new() {
        let event = OutboundEvent::new("shopify", "order-created", r#"{"k":"v"}"#, "default");

        assert_eq!(event.source, "shopify");
        assert_eq!(event.detail_type, "order-created");
        assert_eq!(event.detail, r#"{"k":"v"}"#);
        assert_eq!(event.event_bus_name, "default");
    }

    #[test]
    fn test_publish_response_serializes_in_put_events_shape() {
        let response = PublishResponse::new(0, vec![PublishResultEntry::accepted("evt-1")]);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "FailedEntryCount": 0,
                "Entries": [{"EventId": "evt-1"}]
            })
        );
    }

    #[test]
    fn test_publish_response_rejected_entry_serialization() {
        let response = PublishResponse::new(
            1,
            vec![PublishResultEntry::rejected(
                "MalformedDetail",
                "Detail is malformed.",
            )],
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["FailedEntryCount"], 1);
        assert_eq!(value["Entries"][0]["ErrorCode"], "MalformedDetail");
        assert_eq!(value["Entries"][0]["ErrorMessage"], "Detail is malformed.");
        assert!(value["Entries"][0].get("EventId").is_none());
    }

    #[test]
    fn test_has_failures() {
        assert!(!PublishResponse::new(0, vec![]).has_failures());
        assert!(PublishResponse::new(1, vec![]).has_failures());
    }

    #[test]
    fn test_first_event_id() {
        let response = PublishResponse::new(0, vec![PublishResultEntry::accepted("evt-42")]);
        assert_eq!(response.first_event_id(), Some("evt-42"));

        let rejected = PublishResponse::new(1, vec![PublishResultEntry::rejected("E", "m")]);
        assert_eq!(rejected.first_event_id(), None);

        assert_eq!(PublishResponse::default().first_event_id(), None);
    }
}

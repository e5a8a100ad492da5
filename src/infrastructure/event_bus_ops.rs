//! イベントバス操作モジュール
//!
//! EventBridge PutEventsによるイベント発行を提供する。
//! - 送信イベントのPutEventsRequestEntryへの変換
//! - PutEvents応答のドメイン型への変換

use async_trait::async_trait;
use aws_sdk_eventbridge::Client as EventBridgeClient;
use aws_sdk_eventbridge::error::DisplayErrorContext;
use aws_sdk_eventbridge::operation::put_events::PutEventsOutput;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{OutboundEvent, PublishResponse, PublishResultEntry};

/// イベントバス操作のエラー型
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PublishError {
    /// EventBridgeがリクエストを拒否した（クライアント/サービスエラー）
    #[error("EventBridge APIエラー: {0}")]
    ServiceError(String),
    /// 送信・タイムアウト等、応答を得られなかったエラー
    #[error("EventBridge呼び出しエラー: {0}")]
    DispatchError(String),
}

/// イベントバス操作トレイト（テスト用の抽象化）
#[async_trait]
pub trait EventBusOps: Send + Sync {
    /// イベントをまとめてイベントバスへ発行する
    ///
    /// # 引数
    /// * `entries` - 発行するイベント（順序はそのまま応答のEntriesに対応する）
    ///
    /// # 戻り値
    /// * `Ok(PublishResponse)` - ブローカーの応答（エントリ単位の失敗を含み得る）
    /// * `Err(PublishError)` - 呼び出し自体の失敗
    async fn publish(&self, entries: Vec<OutboundEvent>) -> Result<PublishResponse, PublishError>;
}

/// 実際のAWS EventBridge SDKを使用したイベントバス操作実装
pub struct AwsEventBusOps {
    client: EventBridgeClient,
}

impl AwsEventBusOps {
    /// 新しいAwsEventBusOpsを作成
    pub fn new(client: EventBridgeClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = EventBridgeClient::new(&config);
        Self::new(client)
    }
}

/// 送信イベントをPutEventsのリクエストエントリに変換
pub fn to_request_entry(event: OutboundEvent) -> PutEventsRequestEntry {
    PutEventsRequestEntry::builder()
        .source(event.source)
        .detail_type(event.detail_type)
        .detail(event.detail)
        .event_bus_name(event.event_bus_name)
        .build()
}

/// PutEvents応答をドメイン型に変換
pub fn to_publish_response(output: &PutEventsOutput) -> PublishResponse {
    let entries = output
        .entries()
        .iter()
        .map(|entry| PublishResultEntry {
            event_id: entry.event_id().map(str::to_string),
            error_code: entry.error_code().map(str::to_string),
            error_message: entry.error_message().map(str::to_string),
        })
        .collect();

    PublishResponse::new(output.failed_entry_count(), entries)
}

#[async_trait]
impl EventBusOps for AwsEventBusOps {
    async fn publish(&self, entries: Vec<OutboundEvent>) -> Result<PublishResponse, PublishError> {
        let entry_count = entries.len();
        info!(entry_count = entry_count, "EventBridge PutEvents開始");

        let request_entries: Vec<PutEventsRequestEntry> =
            entries.into_iter().map(to_request_entry).collect();

        let result = self
            .client
            .put_events()
            .set_entries(Some(request_entries))
            .send()
            .await;

        match result {
            Ok(output) => {
                let response = to_publish_response(&output);

                info!(
                    entry_count = entry_count,
                    failed_entry_count = response.failed_entry_count,
                    event_id = response.first_event_id().unwrap_or("none"),
                    "EventBridge PutEvents完了"
                );

                Ok(response)
            }
            Err(err) => {
                let detail = DisplayErrorContext(&err).to_string();
                warn!(error = %detail, "EventBridge PutEventsエラー");

                if err.as_service_error().is_some() {
                    Err(PublishError::ServiceError(detail))
                } else {
                    Err(PublishError::DispatchError(detail))
                }
            }
        }
    }
}

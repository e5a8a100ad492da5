/// イベント転送ハンドラー
///
/// 1回のHTTPリクエストを1件のEventBridgeイベントとして再発行する。
///
/// # 処理フロー
/// 1. ボディをデコード（base64の場合のみ）
/// 2. 設定のsource / detail-typeで送信イベントを構築
/// 3. 1件だけのバッチとしてイベントバスへ発行
/// 4. ブローカー応答をHTTPレスポンスに変換
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{DecodeError, InboundEnvelope, OutboundEvent, PublishResponse};
use crate::infrastructure::{EventBusOps, ForwarderConfig, PublishError};

/// 転送処理のエラー型
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ForwardError {
    /// リクエストボディのデコード失敗（呼び出しエラーとしてランタイムへ伝播する）
    #[error("リクエストボディのデコードに失敗: {0}")]
    Decode(#[from] DecodeError),

    /// EventBridge呼び出しの失敗
    #[error("イベント発行に失敗: {0}")]
    Publish(#[from] PublishError),

    /// 呼び出しは成功したがエントリが拒否された
    #[error("イベントが拒否されました (FailedEntryCount: {})", .0.failed_entry_count)]
    EntryRejected(PublishResponse),

    /// 応答のシリアライズ失敗
    #[error("応答のシリアライズに失敗: {0}")]
    Serialize(String),
}

impl ForwardError {
    /// エラーをHTTPレスポンスに変換する
    ///
    /// デコードエラーはレスポンスにせず呼び出しエラーとして扱うため`None`を返す。
    pub fn to_http_response(&self) -> Option<HttpResponse> {
        match self {
            ForwardError::Decode(_) => None,
            ForwardError::Publish(err) => Some(HttpResponse::json(
                502,
                json!({ "message": err.to_string() }).to_string(),
            )),
            ForwardError::EntryRejected(response) => Some(HttpResponse::json(
                502,
                serde_json::to_string(response).unwrap_or_else(|_| {
                    json!({ "message": self.to_string() }).to_string()
                }),
            )),
            ForwardError::Serialize(_) => Some(HttpResponse::json(
                500,
                json!({ "message": "Internal server error" }).to_string(),
            )),
        }
    }
}

/// プロキシ統合形式で返却するHTTPレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスボディ（JSON文字列）
    pub body: String,
}

impl HttpResponse {
    /// JSONボディのレスポンスを作成
    pub fn json(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// API Gateway / Function URLのプロキシレスポンス形式に変換
    pub fn to_proxy_response(&self) -> Value {
        json!({
            "statusCode": self.status_code,
            "headers": { "content-type": "application/json" },
            "body": self.body,
        })
    }
}

/// イベント転送ハンドラー
///
/// 設定とイベントバス操作はコールドスタート時に1度だけ構築して注入する。
pub struct ForwardHandler<E>
where
    E: EventBusOps,
{
    /// 転送設定
    config: ForwarderConfig,
    /// イベントバス操作
    event_bus: E,
}

impl<E> ForwardHandler<E>
where
    E: EventBusOps,
{
    /// 新しいForwardHandlerを作成
    pub fn new(config: ForwarderConfig, event_bus: E) -> Self {
        Self { config, event_bus }
    }

    /// 転送設定を取得
    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    /// デコード済みボディから送信イベントを構築
    pub fn build_event(&self, detail: String) -> OutboundEvent {
        OutboundEvent::new(
            self.config.source_name(),
            self.config.detail_type(),
            detail,
            self.config.event_bus_name(),
        )
    }

    /// リクエストを1件のイベントとして転送する
    ///
    /// # 戻り値
    /// * `Ok(HttpResponse)` - ステータス200、ボディはPutEvents応答のJSON
    /// * `Err(ForwardError)` - デコード失敗、発行失敗、またはエントリ拒否
    pub async fn handle(&self, envelope: &InboundEnvelope) -> Result<HttpResponse, ForwardError> {
        let detail = envelope.decode_body()?;

        info!(
            source = self.config.source_name(),
            detail_type = self.config.detail_type(),
            event_bus_name = self.config.event_bus_name(),
            is_base64_encoded = envelope.is_base64_encoded,
            detail_length = detail.len(),
            "イベント転送開始"
        );

        let event = self.build_event(detail);

        let response = match self.event_bus.publish(vec![event]).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "イベント発行失敗");
                return Err(ForwardError::Publish(err));
            }
        };

        if response.has_failures() {
            warn!(
                failed_entry_count = response.failed_entry_count,
                entries = ?response.entries,
                "イベントがEventBridgeに拒否された"
            );
            return Err(ForwardError::EntryRejected(response));
        }

        let body =
            serde_json::to_string(&response).map_err(|e| ForwardError::Serialize(e.to_string()))?;

        info!(
            event_id = response.first_event_id().unwrap_or("none"),
            "イベント転送完了"
        );

        Ok(HttpResponse::json(200, body))
    }
}

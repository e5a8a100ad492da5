/// イベント転送Lambdaエントリポイント
///
/// API Gateway / Lambda Function URL経由のHTTPリクエストを受け取り、
/// ボディを1件のイベントとしてEventBridgeへ転送する。
///
/// 設定とEventBridgeクライアントはコールドスタート時に1度だけ構築する。
use event_forwarder::application::ForwardHandler;
use event_forwarder::domain::InboundEnvelope;
use event_forwarder::infrastructure::{AwsEventBusOps, EventBusOps, ForwarderConfig, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let config = ForwarderConfig::from_env();
    info!(
        source = config.source_name(),
        detail_type = config.detail_type(),
        event_bus_name = config.event_bus_name(),
        "転送設定を読み込み"
    );

    let event_bus = AwsEventBusOps::from_config().await;
    let forward_handler = ForwardHandler::new(config, event_bus);
    let handler_ref = &forward_handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<InboundEnvelope>| async move {
        handler(event, handler_ref).await
    }))
    .await
}

/// Lambda関数のメインハンドラー
///
/// # 戻り値
/// * 成功時・発行失敗時はプロキシレスポンスJSON
/// * ボディのデコード失敗時は呼び出しエラー
async fn handler<E>(
    event: LambdaEvent<InboundEnvelope>,
    forward_handler: &ForwardHandler<E>,
) -> Result<Value, Error>
where
    E: EventBusOps,
{
    let request_id = event.context.request_id.clone();

    match forward_handler.handle(&event.payload).await {
        Ok(response) => Ok(response.to_proxy_response()),
        Err(err) => match err.to_http_response() {
            Some(response) => {
                error!(
                    request_id = %request_id,
                    status_code = response.status_code,
                    error = %err,
                    "イベント転送失敗"
                );
                Ok(response.to_proxy_response())
            }
            None => {
                error!(request_id = %request_id, error = %err, "リクエストを処理できません");
                Err(err.into())
            }
        },
    }
}

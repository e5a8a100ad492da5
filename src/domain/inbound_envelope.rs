/// 受信イベントエンベロープ
///
/// API Gateway / Lambda Function URLのプロキシイベントのうち、
/// 転送処理で参照する`body`と`isBase64Encoded`のみを表す。
/// ヘッダー、クエリパラメータ、パスは読み取らない。
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use thiserror::Error;

/// ボディのデコードエラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    /// base64として不正な文字列
    #[error("base64デコードに失敗: {0}")]
    InvalidBase64(String),

    /// デコード結果がUTF-8として不正
    #[error("UTF-8デコードに失敗: {0}")]
    InvalidUtf8(String),
}

/// 受信イベントエンベロープ
///
/// 呼び出しごとにHTTP層から生成され、1回だけ消費される。
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboundEnvelope {
    /// リクエストボディ（未設定は空文字列扱い）
    #[serde(default)]
    pub body: Option<String>,

    /// ボディがbase64エンコードされているか
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl InboundEnvelope {
    /// 新しいエンベロープを作成
    pub fn new(body: impl Into<String>, is_base64_encoded: bool) -> Self {
        Self {
            body: Some(body.into()),
            is_base64_encoded,
        }
    }

    /// ボディをデコードしてテキストとして返す
    ///
    /// `is_base64_encoded`がtrueの場合はbase64デコード後にUTF-8として解釈し、
    /// falseの場合はボディをそのまま返す。内容の検証・変換は行わない。
    pub fn decode_body(&self) -> Result<String, DecodeError> {
        let raw = self.body.as_deref().unwrap_or_default();
        if self.is_base64_encoded {
            decode_base64_text(raw)
        } else {
            Ok(raw.to_string())
        }
    }
}

/// base64文字列をUTF-8テキストにデコードする
pub fn decode_base64_text(encoded: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8(e.to_string()))
}

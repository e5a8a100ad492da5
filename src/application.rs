// アプリケーション層モジュール
pub mod forward_handler;

// 再エクスポート
pub use forward_handler::{ForwardError, ForwardHandler, HttpResponse};

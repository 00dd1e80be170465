//! App - アプリケーション層
//!
//! catalog と typed を組み合わせて、host から呼べる形にする。
//!
//! # 主要コンポーネント
//! - **CatalogBuilder**: カタログの構築と起動時検証
//! - **FunctionInvocation**: カタログに束縛された呼び出し（routing を含む）
//! - **FunctionInvoker**: HTTP / background の二つの入口
//! - **http / event**: host 非依存のリクエスト・イベント型

pub mod builder;
pub mod event;
pub mod http;
pub mod invocation;
pub mod invoker;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, CatalogBuilder};
pub use self::event::{EventContext, PubSubMessage};
pub use self::http::{HttpRequest, HttpResponse};
pub use self::invocation::FunctionInvocation;
pub use self::invoker::{DROPPED_RESULT_PREFIX, FunctionInvoker, InvokerError};

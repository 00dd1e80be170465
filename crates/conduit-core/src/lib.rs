//! conduit-core
//!
//! Core building blocks for Conduit: register plain Rust closures as
//! functions and invoke them from an HTTP or background-event host.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TypeRef, TypeDescriptor, Message, ids, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, DispatchStrategy）
//! - **typed**: 型付き関数 API（FunctionInput/FunctionOutput, DynFunction, PayloadCodec）
//! - **catalog**: 登録とメタデータ参照（FunctionCatalog, FunctionInspector, RoutingFunction）
//! - **app**: アプリケーション層（CatalogBuilder, FunctionInvocation, FunctionInvoker）
//! - **impls**: ports の実装（HeaderDispatch, DirectDispatch）
//! - **config**: InvokerConfig（conduit.toml + 環境変数）
//! - **observability**: カタログの要約ビュー
//!
//! # 使用例
//! ```ignore
//! let catalog = CatalogBuilder::new()
//!     .register(FunctionRegistration::function(|s: String| s.to_uppercase()).with_name("uppercase"))?
//!     .build()?;
//! let invoker = FunctionInvoker::new(catalog, &InvokerConfig::load()?)?;
//! let response = invoker.service(HttpRequest::new("\"hello\"")).await;
//! assert_eq!(response.text(), "\"HELLO\"");
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod typed;

#[cfg(test)]
pub(crate) mod testing {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct IncomingRequest {
        pub message: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct OutgoingResponse {
        pub message: String,
    }

    impl OutgoingResponse {
        pub fn new(message: &str) -> Self {
            Self {
                message: message.to_string(),
            }
        }
    }
}

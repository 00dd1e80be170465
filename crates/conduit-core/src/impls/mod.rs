//! Impls - ports の実装

pub mod dispatch;

pub use self::dispatch::{DEFAULT_ROUTING_HEADER, DirectDispatch, HeaderDispatch};

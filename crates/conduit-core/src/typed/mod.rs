//! Typed - 型付き関数 API
//!
//! # 二層構造
//! - **表層（Typed）**: closures over concrete types, shape inferred via
//!   `FunctionInput` / `FunctionOutput`
//! - **内部（Dyn）**: `DynFunction` trait - object-safe, type erasure
//!
//! `PayloadCodec` converts between host bytes and the JSON values the dyn
//! layer works on.

pub mod codec;
pub mod function;
pub mod shape;

pub use self::codec::{JsonCodec, PayloadCodec};
pub use self::function::{ConsumerFn, DynFunction, FunctionFn, SupplierFn};
pub use self::shape::{Enveloped, FunctionInput, FunctionOutput, Plain};

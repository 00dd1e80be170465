//! Catalog - 関数の登録とメタデータ参照
//!
//! - **FunctionHandle**: identity of a registered target
//! - **FunctionRegistration**: handle + names + descriptor
//! - **FunctionCatalog**: read-only table of registrations
//! - **FunctionInspector**: metadata lookups over a catalog
//! - **RoutingFunction**: per-message indirection to another function

pub mod handle;
pub mod inspector;
pub mod registration;
pub mod registry;
pub mod routing;

pub use self::handle::{AsFunctionHandle, FunctionHandle, FunctionTarget};
pub use self::inspector::{FunctionInspector, FunctionInspectorExt};
pub use self::registration::FunctionRegistration;
pub use self::registry::{FunctionCatalog, RegistryError};
pub use self::routing::{ROUTER_NAME, RoutingFunction};

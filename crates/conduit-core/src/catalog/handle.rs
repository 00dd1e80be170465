//! FunctionHandle - 登録済みターゲットへの同一性つき参照

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::routing::RoutingFunction;
use crate::typed::DynFunction;

/// What a handle points at.
pub enum FunctionTarget {
    /// A user function.
    Function(Box<dyn DynFunction>),
    /// A router that delegates to another registered function per message.
    Routing(RoutingFunction),
}

impl FunctionTarget {
    fn kind(&self) -> &'static str {
        match self {
            FunctionTarget::Function(_) => "function",
            FunctionTarget::Routing(_) => "routing",
        }
    }
}

/// Opaque, cheaply clonable reference to a registered target.
///
/// Two handles are equal only if they are clones of the same handle; equal
/// closures registered twice give two distinct handles.
///
/// # 学習ポイント
/// - 同一性は `Arc::ptr_eq`（中身の比較はしない）
/// - `key()` はポインタ値なので HashMap の索引に使える
#[derive(Clone)]
pub struct FunctionHandle(Arc<FunctionTarget>);

impl FunctionHandle {
    pub fn new(target: FunctionTarget) -> Self {
        Self(Arc::new(target))
    }

    pub fn target(&self) -> &FunctionTarget {
        &self.0
    }

    pub fn is_routing(&self) -> bool {
        matches!(*self.0, FunctionTarget::Routing(_))
    }

    /// Identity key, stable for as long as any clone of the handle is alive.
    pub(crate) fn key(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for FunctionHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FunctionHandle {}

impl Hash for FunctionHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionHandle({}@{:#x})", self.0.kind(), self.key())
    }
}

/// Anything that resolves to a [`FunctionHandle`].
///
/// Wrappers (such as `app::FunctionInvocation`) implement this by returning
/// the handle they delegate to, which is how lookups see through them.
pub trait AsFunctionHandle {
    fn function_handle(&self) -> &FunctionHandle;
}

impl AsFunctionHandle for FunctionHandle {
    fn function_handle(&self) -> &FunctionHandle {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::SupplierFn;
    use std::convert::Infallible;

    fn supplier() -> FunctionHandle {
        FunctionHandle::new(FunctionTarget::Function(Box::new(SupplierFn::new(|| {
            Ok::<_, Infallible>(1)
        }))))
    }

    #[test]
    fn clones_share_identity() {
        let a = supplier();
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn distinct_targets_differ() {
        assert_ne!(supplier(), supplier());
    }

    #[test]
    fn debug_names_the_kind() {
        assert!(format!("{:?}", supplier()).starts_with("FunctionHandle(function@"));
    }
}

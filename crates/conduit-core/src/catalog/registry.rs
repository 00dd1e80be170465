//! FunctionCatalog - 登録済み関数の読み取り専用テーブル
//!
//! Built once through `app::CatalogBuilder` (mutable), then shared as
//! `Arc<FunctionCatalog>` (immutable). No locks are needed because nothing
//! is registered after the catalog is built.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::handle::FunctionHandle;
use super::inspector::FunctionInspector;
use super::registration::FunctionRegistration;
use crate::app::{CatalogBuilder, FunctionInvocation};

/// Errors raised while registering functions.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("function name '{0}' is already registered")]
    DuplicateName(String),

    #[error("function names must not be empty")]
    EmptyName,

    #[error("function handle is already registered")]
    DuplicateHandle,
}

/// FunctionCatalog は登録済み関数を保持
///
/// # 学習ポイント
/// - 名前 → index と handle → index の二つの索引
/// - 登録は all-or-nothing（途中で失敗しても索引が壊れない）
/// - 構築後は `Arc` で共有し、読み取り専用
///
/// # 使用例
/// ```ignore
/// let catalog = FunctionCatalog::builder()
///     .register(FunctionRegistration::function(|s: String| s.len()).with_name("len"))?
///     .build()?;
/// let len = catalog.lookup("len").expect("registered");
/// ```
#[derive(Default)]
pub struct FunctionCatalog {
    registrations: Vec<FunctionRegistration>,
    by_name: HashMap<String, usize>,
    by_handle: HashMap<usize, usize>,
}

impl FunctionCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Add a registration. Either every name is added or none is.
    pub(crate) fn register(
        &mut self,
        registration: FunctionRegistration,
    ) -> Result<(), RegistryError> {
        let key = registration.handle().key();
        if self.by_handle.contains_key(&key) {
            return Err(RegistryError::DuplicateHandle);
        }
        for name in registration.names() {
            if name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if self.by_name.contains_key(name) {
                return Err(RegistryError::DuplicateName(name.clone()));
            }
        }

        let index = self.registrations.len();
        for name in registration.names() {
            self.by_name.insert(name.clone(), index);
        }
        self.by_handle.insert(key, index);
        debug!(
            names = ?registration.names(),
            arity = ?registration.descriptor().arity(),
            "registered function"
        );
        self.registrations.push(registration);
        Ok(())
    }

    /// Registration stored under `name`.
    pub fn find(&self, name: &str) -> Option<&FunctionRegistration> {
        self.by_name.get(name).map(|&i| &self.registrations[i])
    }

    /// Resolve `name` into an invocable wrapper bound to this catalog.
    pub fn lookup(self: &Arc<Self>, name: &str) -> Option<FunctionInvocation> {
        let Some(registration) = self.find(name) else {
            debug!(name, "no function registered under name");
            return None;
        };
        let handle = registration.handle().clone();
        Some(FunctionInvocation::new(Arc::clone(self), handle))
    }

    /// Invocable wrapper for an arbitrary registration of this catalog.
    pub fn invocation(self: &Arc<Self>, handle: &FunctionHandle) -> Option<FunctionInvocation> {
        self.registration(handle)?;
        Some(FunctionInvocation::new(Arc::clone(self), handle.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registrations in registration order.
    pub fn registrations(&self) -> impl Iterator<Item = &FunctionRegistration> {
        self.registrations.iter()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl FunctionInspector for FunctionCatalog {
    fn registration(&self, function: &FunctionHandle) -> Option<&FunctionRegistration> {
        self.by_handle
            .get(&function.key())
            .map(|&i| &self.registrations[i])
            .filter(|registration| registration.handle() == function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> FunctionRegistration {
        FunctionRegistration::supplier(|| 1).with_name(name)
    }

    #[test]
    fn register_and_find() {
        let mut catalog = FunctionCatalog::new();
        catalog.register(named("one")).unwrap();

        assert!(catalog.find("one").is_some());
        assert!(catalog.find("two").is_none());
        assert!(catalog.contains("one"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected_atomically() {
        let mut catalog = FunctionCatalog::new();
        catalog.register(named("one")).unwrap();

        let clash = FunctionRegistration::supplier(|| 2).with_names(["fresh", "one"]);
        let result = catalog.register(clash);

        assert!(matches!(result, Err(RegistryError::DuplicateName(name)) if name == "one"));
        assert!(!catalog.contains("fresh"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut catalog = FunctionCatalog::new();
        let result = catalog.register(named("  "));
        assert!(matches!(result, Err(RegistryError::EmptyName)));
    }

    #[test]
    fn same_handle_cannot_be_registered_twice() {
        let mut catalog = FunctionCatalog::new();
        let reg = named("one");
        let again = reg.clone();
        catalog.register(reg).unwrap();

        // handle identity is checked before names
        assert!(matches!(
            catalog.register(again.with_name("other")),
            Err(RegistryError::DuplicateHandle)
        ));
    }

    #[test]
    fn names_are_sorted() {
        let mut catalog = FunctionCatalog::new();
        catalog.register(named("b")).unwrap();
        catalog.register(named("a")).unwrap();
        assert_eq!(catalog.names(), vec!["a", "b"]);
    }

    #[test]
    fn unnamed_functions_are_allowed() {
        let mut catalog = FunctionCatalog::new();
        catalog.register(FunctionRegistration::supplier(|| 1)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.names().is_empty());
    }

    #[test]
    fn lookup_binds_catalog() {
        let mut catalog = FunctionCatalog::new();
        catalog.register(named("one")).unwrap();
        let catalog = Arc::new(catalog);

        let invocation = catalog.lookup("one").unwrap();
        assert_eq!(invocation.name(), Some("one"));
        assert!(catalog.lookup("missing").is_none());
    }
}

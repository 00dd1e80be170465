//! CatalogBuilder - 関数カタログの構築と起動時検証
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use std::sync::Arc;

use crate::catalog::{FunctionCatalog, FunctionRegistration, RegistryError};

/// CatalogBuilder は関数カタログを構築
///
/// # 使用例
/// ```ignore
/// let catalog = CatalogBuilder::new()
///     .register(FunctionRegistration::function(|s: String| s.to_uppercase()).with_name("uppercase"))?
///     .expect_functions(&["uppercase"])
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - expect_functions() で期待される関数名を登録
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば BuildError を返す
pub struct CatalogBuilder {
    catalog: FunctionCatalog,
    expected_functions: Option<Vec<String>>,
}

/// BuildError はカタログ構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing functions: {0:?}. These functions were expected but not registered.")]
    MissingFunctions(Vec<String>),
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            catalog: FunctionCatalog::new(),
            expected_functions: None,
        }
    }

    /// 関数を登録
    ///
    /// Name clashes are reported immediately rather than at `build()`.
    pub fn register(mut self, registration: FunctionRegistration) -> Result<Self, RegistryError> {
        self.catalog.register(registration)?;
        Ok(self)
    }

    /// 期待される関数名のリストを設定
    pub fn expect_functions(mut self, names: &[&str]) -> Self {
        self.expected_functions = Some(names.iter().map(|name| name.to_string()).collect());
        self
    }

    /// カタログを凍結して共有可能にする
    ///
    /// # 検証
    /// - expect_functions() で設定された名前が全て登録されているかチェック
    /// - 不足があれば BuildError::MissingFunctions を返す
    pub fn build(self) -> Result<Arc<FunctionCatalog>, BuildError> {
        if let Some(expected) = &self.expected_functions {
            let missing: Vec<String> = expected
                .iter()
                .filter(|name| !self.catalog.contains(name))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingFunctions(missing));
            }
        }
        Ok(Arc::new(self.catalog))
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

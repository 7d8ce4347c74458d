// ============================================================================
// Minnow - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 翻译目录核心逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod catalog;
pub mod checker;
pub mod error;
pub mod loader;
pub mod locale;
pub mod parser;
pub mod placeholder;
pub mod translator;
pub mod writer;

// 重新导出常用类型
pub use catalog::{Catalog, CatalogStatistics};
pub use checker::{check_document, CheckOptions};
pub use error::CatalogError;
pub use loader::{load_many, BundledSource, CatalogLoader, CatalogSource, DirectorySource};
pub use translator::{InstallOutcome, Translator};

// ============================================================================
// Minnow - 翻译目录库
// ============================================================================
//
// 文件: src/lib.rs
// 职责: MinnowSnap 界面翻译目录（Qt .ts）的加载、查询与校验
// 边界:
//   - ✅ 核心逻辑、数据模型导出
//   - ✅ 命令行工具所需的 CLI / UI / i18n 模块
//   - ❌ 不应包含截图、标注等界面功能
//
// ============================================================================

pub mod cli;
pub mod core;
pub mod i18n;
pub mod models;
pub mod ui;
pub mod utils;

pub use crate::core::{CatalogError, CatalogLoader, Translator};

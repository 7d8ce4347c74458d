// ============================================================================
// Minnow - 工具模块
// ============================================================================
//
// 文件: src/utils/mod.rs
// 职责: 终端输出相关工具导出
//
// ============================================================================

pub mod colors;
pub mod constants;
pub mod logger;
pub mod styles;

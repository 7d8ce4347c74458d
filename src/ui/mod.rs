// ============================================================================
// Minnow - UI 模块
// ============================================================================
//
// 文件: src/ui/mod.rs
// 职责: 终端结果展示组件导出
//
// ============================================================================

pub mod summary;

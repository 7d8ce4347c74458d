// ============================================================================
// Minnow - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 数据模型导出
// 边界:
//   - ✅ .ts 文档模型
//   - ✅ 校验报告模型
//   - ✅ 配置模型
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod config;
pub mod report;
pub mod ts;

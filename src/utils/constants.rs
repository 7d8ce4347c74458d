// ============================================================================
// Minnow - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 命令行输出用的常量定义
// 边界:
//   - ✅ 应用名称
//   - ✅ 像素图标字符定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "MINNOW";

/// 像素风格图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 目录图标
    pub const CATALOG: &str = "●";
    /// 位置图标
    pub const LOCATION: &str = "◦";
    /// 箭头图标
    pub const ARROW: &str = "→";
}

/// 分隔线
pub const SEPARATOR: &str = "───────────────────────────────────────";

// ============================================================================
// Minnow - 校验报告数据模型
// ============================================================================
//
// 文件: src/models/report.rs
// 职责: 翻译目录校验结果的数据结构定义
// 边界:
//   - ✅ 问题类型、严重级别定义
//   - ✅ 单个目录的校验报告
//   - ❌ 不应包含校验逻辑
//   - ❌ 不应包含输出格式化
//
// ============================================================================

use serde::Serialize;
use std::fmt;

use crate::core::catalog::CatalogStatistics;
use crate::models::ts::Location;

/// 问题严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// 问题类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// 翻译未完成
    Unfinished,
    /// 有效条目的译文为空
    EmptyTranslation,
    /// 源文本与译文的占位符不一致
    PlaceholderMismatch {
        /// 源文本有、译文没有的编号
        missing: Vec<u8>,
        /// 译文有、源文本没有的编号
        unexpected: Vec<u8>,
    },
    /// 同一上下文中 (源文本, 注释) 重复
    DuplicateEntry,
}

impl IssueKind {
    /// 用于 i18n 查表的键
    pub fn message_key(&self) -> &'static str {
        match self {
            IssueKind::Unfinished => "check.issue.unfinished",
            IssueKind::EmptyTranslation => "check.issue.empty",
            IssueKind::PlaceholderMismatch { .. } => "check.issue.placeholder",
            IssueKind::DuplicateEntry => "check.issue.duplicate",
        }
    }
}

/// 单个问题
#[derive(Debug, Clone, Serialize)]
pub struct CheckIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub context: String,
    pub source: String,
    /// 第一个出处（若有）
    pub location: Option<Location>,
}

/// 单个目录的校验报告
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub locale: String,
    pub statistics: CatalogStatistics,
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// 指定级别的问题数
    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

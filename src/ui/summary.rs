// ============================================================================
// Minnow - 结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 校验报告和目录列表的终端显示
// 边界:
//   - ✅ 校验问题表格显示
//   - ✅ 统计信息格式化输出
//   - ✅ 国际化文本支持
//   - ❌ 不应包含校验逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::core::catalog::CatalogStatistics;
use crate::models::report::{CheckIssue, CheckReport, IssueKind, Severity};
use crate::utils::colors::Colors;
use crate::utils::constants::{icons, SEPARATOR};
use crate::utils::logger::Logger;
use crate::utils::styles::TextStyles;
use crate::{t, tf};

// ============================================================================
// 校验报告显示
// ============================================================================

/// 打印一个目录的校验报告
pub fn print_check_report(report: &CheckReport) {
    Logger::info("");
    Logger::info(TextStyles::bold(&tf!(
        "check.catalog_header",
        display_locale(&report.locale)
    )));
    Logger::info(SEPARATOR);
    Logger::info(format_statistics(&report.statistics));

    if report.issues.is_empty() {
        Logger::success(format!("{} {}", icons::SUCCESS, t!("check.no_issues")));
        return;
    }

    // 按上下文分组，组内保持文件顺序
    let mut by_context: BTreeMap<&str, Vec<&CheckIssue>> = BTreeMap::new();
    for issue in &report.issues {
        by_context.entry(issue.context.as_str()).or_default().push(issue);
    }

    for (context, issues) in by_context {
        Logger::info(TextStyles::underline(context));
        for issue in issues {
            Logger::info(format_issue(issue));
        }
    }

    Logger::info(tf!(
        "check.summary",
        report.count(Severity::Error),
        report.count(Severity::Warning)
    ));
    let _ = io::stdout().flush();
}

/// 统计信息行
pub fn format_statistics(stats: &CatalogStatistics) -> String {
    tf!(
        "check.statistics",
        stats.contexts,
        stats.messages,
        stats.active,
        stats.unfinished,
        stats.stale
    )
}

/// 单条问题
fn format_issue(issue: &CheckIssue) -> String {
    let (icon, label) = match issue.severity {
        Severity::Error => (icons::ERROR, Colors::error(&issue.severity.to_string())),
        Severity::Warning => (icons::WARNING, Colors::warn(&issue.severity.to_string())),
    };

    let location = issue
        .location
        .as_ref()
        .map(|loc| format!(" {}", Colors::muted(&format!("({})", loc))))
        .unwrap_or_default();

    format!(
        "  {} {}: \"{}\" {} {}{}",
        icon,
        label,
        issue.source,
        icons::ARROW,
        describe_issue(&issue.kind),
        location
    )
}

/// 问题描述文本
pub fn describe_issue(kind: &IssueKind) -> String {
    match kind {
        IssueKind::PlaceholderMismatch {
            missing,
            unexpected,
        } => tf!(
            kind.message_key(),
            format_indices(missing),
            format_indices(unexpected)
        ),
        _ => t!(kind.message_key()),
    }
}

fn format_indices(indices: &[u8]) -> String {
    if indices.is_empty() {
        return "-".to_string();
    }
    indices
        .iter()
        .map(|i| format!("%{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_locale(locale: &str) -> &str {
    if locale.is_empty() {
        "-"
    } else {
        locale
    }
}

// ============================================================================
// 目录列表显示
// ============================================================================

/// 打印可用目录及其统计
pub fn print_catalog_list(rows: &[(String, CatalogStatistics)]) {
    Logger::info(TextStyles::bold(&t!("list.header")));
    Logger::info(SEPARATOR);

    if rows.is_empty() {
        Logger::warn(t!("list.none"));
        return;
    }

    for (locale, stats) in rows {
        Logger::info(format!(
            "{} {}",
            icons::CATALOG,
            tf!(
                "list.row",
                Colors::info(locale),
                stats.contexts,
                stats.messages,
                stats.active,
                stats.unfinished,
                stats.stale
            )
        ));
    }
    let _ = io::stdout().flush();
}

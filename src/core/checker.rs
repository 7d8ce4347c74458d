// ============================================================================
// Minnow - 翻译目录校验器
// ============================================================================
//
// 文件: src/core/checker.rs
// 职责: 翻译目录的质量检查
// 边界:
//   - ✅ 未完成 / 空译文检测
//   - ✅ 占位符一致性检测
//   - ✅ 重复条目检测
//   - ✅ 按上下文名称忽略
//   - ❌ 不应包含CLI参数处理
//   - ❌ 不应包含输出格式化
//   - ❌ 不应包含文件读写
//
// ============================================================================

use glob::{Pattern, PatternError};
use std::collections::HashMap;

use crate::core::catalog::CatalogStatistics;
use crate::core::placeholder::placeholders;
use crate::models::report::{CheckIssue, CheckReport, IssueKind, Severity};
use crate::models::ts::{Context, Message, TranslationStatus, TsDocument};

/// 校验选项
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// 跳过名称匹配这些模式的上下文
    pub ignore_contexts: Vec<Pattern>,
    /// 未完成条目按错误处理
    pub fail_on_unfinished: bool,
}

impl CheckOptions {
    pub fn new(ignore_contexts: &[String], fail_on_unfinished: bool) -> Result<Self, PatternError> {
        let ignore_contexts = ignore_contexts
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            ignore_contexts,
            fail_on_unfinished,
        })
    }

    fn is_ignored(&self, context: &str) -> bool {
        self.ignore_contexts.iter().any(|p| p.matches(context))
    }
}

/// 查询键：上下文名称、源文本、非空消歧义注释
type EntryKey<'a> = (&'a str, &'a str, Option<&'a str>);

/// 同一查询键的出现情况
#[derive(Default)]
struct KeyUsage {
    /// 未过期条目的出现次数
    occurrences: usize,
    /// 实际用于查询的条目位置（第一条非空译文）
    served: Option<(usize, usize)>,
}

/// 校验一个 .ts 文档
///
/// 统计信息覆盖整个文档，问题列表只包含未被忽略的上下文。
/// 过期条目只计数，不报告问题。
///
/// 重复判定与 `Catalog` 的索引一致：同名上下文块合并，
/// 第一条非空译文生效，同一键的其余未过期条目报告为重复。
pub fn check_document(document: &TsDocument, options: &CheckOptions) -> CheckReport {
    let mut statistics = CatalogStatistics {
        contexts: document.contexts.len(),
        ..CatalogStatistics::default()
    };
    let mut issues = Vec::new();

    let usage = key_usage(document);

    for (ctx_idx, context) in document.contexts.iter().enumerate() {
        let ignored = options.is_ignored(&context.name);
        if ignored {
            tracing::debug!(context = %context.name, "context ignored by check options");
        }

        for (msg_idx, message) in context.messages.iter().enumerate() {
            statistics.messages += 1;
            match message.translation.status {
                TranslationStatus::Vanished | TranslationStatus::Obsolete => {
                    statistics.stale += 1;
                    continue;
                }
                TranslationStatus::Unfinished => statistics.unfinished += 1,
                TranslationStatus::Finished => {}
            }

            let key = entry_key(context, message);
            let (served, duplicate) = match usage.get(&key) {
                Some(entry) => {
                    let served = entry.served == Some((ctx_idx, msg_idx));
                    (served, entry.occurrences > 1 && !served)
                }
                None => (false, false),
            };
            if served {
                statistics.active += 1;
            }

            if ignored {
                continue;
            }
            check_message(context, message, duplicate, options, &mut issues);
        }
    }

    CheckReport {
        locale: document.language.clone(),
        statistics,
        issues,
    }
}

fn entry_key<'a>(context: &'a Context, message: &'a Message) -> EntryKey<'a> {
    let comment = message.comment.as_deref().filter(|c| !c.is_empty());
    (context.name.as_str(), message.source.as_str(), comment)
}

/// 第一遍：统计每个查询键的出现次数和生效条目
fn key_usage(document: &TsDocument) -> HashMap<EntryKey<'_>, KeyUsage> {
    let mut usage: HashMap<EntryKey<'_>, KeyUsage> = HashMap::new();

    for (ctx_idx, context) in document.contexts.iter().enumerate() {
        for (msg_idx, message) in context.messages.iter().enumerate() {
            if !message.is_active() {
                continue;
            }
            let entry = usage.entry(entry_key(context, message)).or_default();
            entry.occurrences += 1;
            if entry.served.is_none() && !message.translation.text.is_empty() {
                entry.served = Some((ctx_idx, msg_idx));
            }
        }
    }

    usage
}

fn check_message(
    context: &Context,
    message: &Message,
    duplicate: bool,
    options: &CheckOptions,
    issues: &mut Vec<CheckIssue>,
) {
    let mut report = |kind: IssueKind, severity: Severity| {
        issues.push(CheckIssue {
            kind,
            severity,
            context: context.name.clone(),
            source: message.source.clone(),
            location: message.locations.first().cloned(),
        });
    };

    if duplicate {
        report(IssueKind::DuplicateEntry, Severity::Error);
    }

    let text = &message.translation.text;
    match message.translation.status {
        TranslationStatus::Unfinished => {
            let severity = if options.fail_on_unfinished {
                Severity::Error
            } else {
                Severity::Warning
            };
            report(IssueKind::Unfinished, severity);
        }
        TranslationStatus::Finished if text.is_empty() => {
            report(IssueKind::EmptyTranslation, Severity::Warning);
        }
        _ => {}
    }

    if text.is_empty() {
        return;
    }

    let expected = placeholders(&message.source);
    let actual = placeholders(text);
    if expected != actual {
        report(
            IssueKind::PlaceholderMismatch {
                missing: expected.difference(&actual).copied().collect(),
                unexpected: actual.difference(&expected).copied().collect(),
            },
            Severity::Error,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ts::Location;

    fn document() -> TsDocument {
        let mut doc = TsDocument::new("zh_CN");

        let mut about = Context::new("AboutPage");
        about
            .messages
            .push(Message::new("Version %1", "版本 %1").with_location("../qml/AboutPage.qml", 24));
        about
            .messages
            .push(Message::new("Saved to %1", "已保存").with_location("../qml/AboutPage.qml", 30));
        about
            .messages
            .push(Message::new("%1 of %2", "%1 / %3"));
        doc.contexts.push(about);

        let mut general = Context::new("GeneralPage");
        general
            .messages
            .push(Message::new("Language", "").with_status(TranslationStatus::Unfinished));
        general.messages.push(Message::new("Theme", ""));
        general
            .messages
            .push(Message::new("Old", "旧").with_status(TranslationStatus::Vanished));
        general
            .messages
            .push(Message::new("Gone %1", "没了").with_status(TranslationStatus::Obsolete));
        doc.contexts.push(general);

        let mut pin = Context::new("PinWindow");
        pin.messages.push(Message::new("Close", "关闭"));
        pin.messages.push(Message::new("Close", "关闭窗口").with_comment("window"));
        pin.messages.push(Message::new("Close", "关掉"));
        doc.contexts.push(pin);

        doc
    }

    fn kinds_for<'a>(report: &'a CheckReport, source: &str) -> Vec<&'a IssueKind> {
        report
            .issues
            .iter()
            .filter(|i| i.source == source)
            .map(|i| &i.kind)
            .collect()
    }

    #[test]
    fn test_placeholder_mismatch() {
        let report = check_document(&document(), &CheckOptions::default());

        assert!(kinds_for(&report, "Version %1").is_empty());
        assert_eq!(
            kinds_for(&report, "Saved to %1"),
            vec![&IssueKind::PlaceholderMismatch {
                missing: vec![1],
                unexpected: vec![]
            }]
        );
        assert_eq!(
            kinds_for(&report, "%1 of %2"),
            vec![&IssueKind::PlaceholderMismatch {
                missing: vec![2],
                unexpected: vec![3]
            }]
        );
    }

    #[test]
    fn test_issue_carries_first_location() {
        let report = check_document(&document(), &CheckOptions::default());
        let issue = report
            .issues
            .iter()
            .find(|i| i.source == "Saved to %1")
            .unwrap();

        assert_eq!(issue.context, "AboutPage");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(
            issue.location,
            Some(Location::new("../qml/AboutPage.qml", 30))
        );
    }

    #[test]
    fn test_unfinished_and_empty() {
        let report = check_document(&document(), &CheckOptions::default());
        assert_eq!(kinds_for(&report, "Language"), vec![&IssueKind::Unfinished]);
        assert_eq!(kinds_for(&report, "Theme"), vec![&IssueKind::EmptyTranslation]);
        assert!(report
            .issues
            .iter()
            .filter(|i| i.context == "GeneralPage")
            .all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_fail_on_unfinished() {
        let options = CheckOptions {
            fail_on_unfinished: true,
            ..CheckOptions::default()
        };
        let report = check_document(&document(), &options);
        let issue = report.issues.iter().find(|i| i.source == "Language").unwrap();
        assert_eq!(issue.severity, Severity::Error);
    }

    #[test]
    fn test_stale_entries_are_only_counted() {
        let report = check_document(&document(), &CheckOptions::default());
        assert!(kinds_for(&report, "Old").is_empty());
        assert!(kinds_for(&report, "Gone %1").is_empty());
        assert_eq!(report.statistics.stale, 2);
    }

    #[test]
    fn test_duplicates() {
        let report = check_document(&document(), &CheckOptions::default());
        let duplicates: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::DuplicateEntry)
            .collect();

        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].context, "PinWindow");
        assert_eq!(duplicates[0].source, "Close");
    }

    #[test]
    fn test_statistics() {
        let report = check_document(&document(), &CheckOptions::default());
        assert_eq!(report.locale, "zh_CN");
        assert_eq!(
            report.statistics,
            CatalogStatistics {
                contexts: 3,
                messages: 10,
                // Version, Saved to, %1 of %2, Close, Close(window)
                active: 5,
                unfinished: 1,
                stale: 2,
            }
        );
        assert!(report.has_errors());
        assert_eq!(report.count(Severity::Warning), 2);
        assert_eq!(report.count(Severity::Error), 3);
    }

    #[test]
    fn test_ignore_contexts() {
        let options = CheckOptions::new(&["About*".to_string(), "PinWindow".to_string()], false).unwrap();
        let report = check_document(&document(), &options);

        assert!(!report.has_errors());
        assert!(report.issues.iter().all(|i| i.context == "GeneralPage"));
        assert_eq!(report.statistics.messages, 10);
    }

    #[test]
    fn test_empty_first_duplicate_matches_lookup() {
        let mut doc = TsDocument::new("zh_CN");
        let mut toolbar = Context::new("Toolbar");
        toolbar
            .messages
            .push(Message::new("Close", "").with_status(TranslationStatus::Unfinished));
        toolbar.messages.push(Message::new("Close", "叉"));
        doc.contexts.push(toolbar);

        let report = check_document(&doc, &CheckOptions::default());
        let catalog = crate::core::catalog::Catalog::from_document(doc);

        assert_eq!(report.statistics.active, 1);
        assert_eq!(report.statistics, catalog.statistics());
        assert_eq!(catalog.lookup("Toolbar", "Close"), "叉");

        // 被遮蔽的是空的那一条，生效的条目不报告重复
        let duplicates: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::DuplicateEntry)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(
            kinds_for(&report, "Close"),
            vec![&IssueKind::DuplicateEntry, &IssueKind::Unfinished]
        );
    }

    #[test]
    fn test_duplicates_across_context_blocks() {
        let mut doc = TsDocument::new("zh_CN");
        let mut first = Context::new("PinWindow");
        first.messages.push(Message::new("Close", "关闭"));
        doc.contexts.push(first);
        let mut second = Context::new("PinWindow");
        second.messages.push(Message::new("Close", "关掉"));
        second.messages.push(Message::new("Pin", "钉住"));
        doc.contexts.push(second);

        let report = check_document(&doc, &CheckOptions::default());
        let catalog = crate::core::catalog::Catalog::from_document(doc);

        let duplicates: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::DuplicateEntry)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].source, "Close");
        assert_eq!(report.statistics.active, 2);
        assert_eq!(report.statistics, catalog.statistics());
        assert_eq!(catalog.lookup("PinWindow", "Close"), "关闭");
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        assert!(CheckOptions::new(&["[".to_string()], false).is_err());
    }

    #[test]
    fn test_statistics_match_catalog() {
        let doc = document();
        let report = check_document(&doc, &CheckOptions::default());
        let catalog = crate::core::catalog::Catalog::from_document(doc);
        assert_eq!(report.statistics, catalog.statistics());
    }
}

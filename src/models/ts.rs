// ============================================================================
// Minnow - 翻译文档数据模型
// ============================================================================
//
// 文件: src/models/ts.rs
// 职责: Qt Linguist (.ts) 翻译文档的数据结构定义
// 边界:
//   - ✅ 文档 / 上下文 / 消息 / 位置数据结构定义
//   - ✅ 翻译状态标记（有效 / 过期）
//   - ✅ 数据序列化（JSON 输出用）
//   - ❌ 不应包含 XML 解析逻辑
//   - ❌ 不应包含查询索引逻辑
//   - ❌ 不应包含文件读写操作
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 当前支持的 TS 格式版本（lupdate 默认输出）
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// 一个完整的 .ts 翻译文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsDocument {
    /// 格式版本
    pub version: String,
    /// 目标语言标签，例如 zh_CN
    pub language: String,
    /// 源语言标签（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    /// 按出现顺序排列的上下文
    #[serde(default)]
    pub contexts: Vec<Context>,
}

/// 上下文：对应一个 UI 界面的字符串分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// 上下文名称，例如 GeneralPage
    pub name: String,
    /// 按出现顺序排列的消息
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// 单条消息：源文本及其翻译
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// 源码位置（仅供工具使用，查询时不参考）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// 源文本
    pub source: String,
    /// lupdate 沿用旧翻译时记录的原源文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// 消歧义注释，参与查询键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// 原消歧义注释
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,
    /// 给译者的附加说明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    /// 译者自己的备注
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    /// 翻译
    pub translation: Translation,
    /// 工具私有数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    /// `<extra-*>` 扩展字段，按出现顺序
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<ExtraField>,
}

/// `<extra-NAME>` 扩展字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraField {
    /// 去掉 `extra-` 前缀后的名称
    pub name: String,
    pub text: String,
}

/// 源码位置
///
/// 按原样保存属性值：`lupdate -locations relative` 写出 `line="+30"`、
/// `line="-5"`，后续位置还会省略 `filename`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// 相对于 .ts 文件的源文件路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// 行号属性原文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

/// 翻译文本与状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub status: TranslationStatus,
}

/// 翻译状态
///
/// `Finished` 与 `Unfinished` 为有效条目；`Vanished` 与 `Obsolete`
/// 为过期条目，只为翻译记忆保留，查询时忽略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    #[default]
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationStatus {
    /// 对应 `<translation type="...">` 的属性值，Finished 没有该属性
    pub fn type_attr(&self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Vanished => Some("vanished"),
            TranslationStatus::Obsolete => Some("obsolete"),
        }
    }

    /// 从 type 属性值解析
    pub fn from_type_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationStatus::Unfinished),
            "vanished" => Some(TranslationStatus::Vanished),
            "obsolete" => Some(TranslationStatus::Obsolete),
            _ => None,
        }
    }

    /// 是否为过期条目
    pub fn is_stale(&self) -> bool {
        matches!(self, TranslationStatus::Vanished | TranslationStatus::Obsolete)
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_attr() {
            Some(attr) => write!(f, "{}", attr),
            None => write!(f, "finished"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filename = self.filename.as_deref().unwrap_or("<same file>");
        match &self.line {
            Some(line) => write!(f, "{}:{}", filename, line),
            None => write!(f, "{}", filename),
        }
    }
}

impl Location {
    /// 绝对位置
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self {
            filename: Some(filename.into()),
            line: Some(line.to_string()),
        }
    }

    /// 是否为相对行号（`+N` / `-N`）
    pub fn is_relative(&self) -> bool {
        self.line
            .as_deref()
            .is_some_and(|line| line.starts_with('+') || line.starts_with('-'))
    }
}

impl TsDocument {
    /// 创建空文档
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language: language.into(),
            source_language: None,
            contexts: Vec::new(),
        }
    }

    /// 按名称查找上下文
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// 遍历所有 (上下文, 消息)
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c, m)))
    }

    /// 消息总数
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }
}

impl Message {
    /// 创建一条已完成的消息
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            locations: Vec::new(),
            source: source.into(),
            old_source: None,
            comment: None,
            old_comment: None,
            extra_comment: None,
            translator_comment: None,
            translation: Translation {
                text: translation.into(),
                status: TranslationStatus::Finished,
            },
            user_data: None,
            extras: Vec::new(),
        }
    }

    /// 设置翻译状态
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.translation.status = status;
        self
    }

    /// 设置消歧义注释
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// 追加源码位置
    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.locations.push(Location::new(filename, line));
        self
    }

    /// 是否参与查询
    pub fn is_active(&self) -> bool {
        !self.translation.status.is_stale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TranslationStatus::Finished, None)]
    #[case(TranslationStatus::Unfinished, Some("unfinished"))]
    #[case(TranslationStatus::Vanished, Some("vanished"))]
    #[case(TranslationStatus::Obsolete, Some("obsolete"))]
    fn test_type_attr_mapping(#[case] status: TranslationStatus, #[case] attr: Option<&str>) {
        assert_eq!(status.type_attr(), attr);
        if let Some(value) = attr {
            assert_eq!(TranslationStatus::from_type_attr(value), Some(status));
        }
    }

    #[test]
    fn test_stale_statuses() {
        assert!(!TranslationStatus::Finished.is_stale());
        assert!(!TranslationStatus::Unfinished.is_stale());
        assert!(TranslationStatus::Vanished.is_stale());
        assert!(TranslationStatus::Obsolete.is_stale());
        assert_eq!(TranslationStatus::from_type_attr("done"), None);
    }

    #[test]
    fn test_location_display() {
        let with_line = Location::new("qml/main.qml", 96);
        let without_line = Location {
            filename: Some("qml/main.qml".to_string()),
            line: None,
        };
        let relative = Location {
            filename: None,
            line: Some("-5".to_string()),
        };
        assert_eq!(with_line.to_string(), "qml/main.qml:96");
        assert_eq!(without_line.to_string(), "qml/main.qml");
        assert_eq!(relative.to_string(), "<same file>:-5");
        assert!(!with_line.is_relative());
        assert!(relative.is_relative());
    }

    #[test]
    fn test_document_message_iteration() {
        let mut doc = TsDocument::new("zh_CN");
        let mut page = Context::new("GeneralPage");
        page.messages.push(Message::new("Language", "语言"));
        page.messages
            .push(Message::new("Theme", "主题").with_status(TranslationStatus::Vanished));
        doc.contexts.push(page);

        assert_eq!(doc.message_count(), 2);
        assert!(doc.context("GeneralPage").is_some());
        assert!(doc.context("PinWindow").is_none());

        let active: Vec<_> = doc
            .messages()
            .filter(|(_, m)| m.is_active())
            .map(|(c, m)| (c.name.as_str(), m.source.as_str()))
            .collect();
        assert_eq!(active, vec![("GeneralPage", "Language")]);
    }
}

// ============================================================================
// Minnow - 翻译目录
// ============================================================================
//
// 文件: src/core/catalog.rs
// 职责: 单个 locale 的只读翻译目录和查询
// 边界:
//   - ✅ (上下文, 源文本, 消歧义注释) 查询索引构建
//   - ✅ 缺失翻译回退到源文本
//   - ✅ 过期条目排除在查询之外
//   - ✅ 目录统计信息
//   - ❌ 不应包含 XML 解析细节
//   - ❌ 不应包含文件查找逻辑
//   - ❌ 不应包含全局状态
//
// ============================================================================

use serde::Serialize;
use std::collections::HashMap;

use crate::core::error::CatalogError;
use crate::core::parser::parse_document;
use crate::core::writer::write_document;
use crate::models::ts::{TranslationStatus, TsDocument};

/// 同一源文本下的一个翻译变体
#[derive(Debug, Clone)]
struct Variant {
    comment: Option<String>,
    text: String,
}

/// 上下文 -> 源文本 -> 变体列表
type LookupIndex = HashMap<String, HashMap<String, Vec<Variant>>>;

/// 一个 locale 的翻译目录
///
/// 加载后不可变，可在多线程间共享读取。
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    document: TsDocument,
    index: LookupIndex,
}

/// 目录统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStatistics {
    /// 上下文数
    pub contexts: usize,
    /// 消息总数（含过期）
    pub messages: usize,
    /// 参与查询的条目数
    pub active: usize,
    /// 未完成条目数
    pub unfinished: usize,
    /// 过期条目数
    pub stale: usize,
}

impl Catalog {
    /// 从已解析的文档构建目录
    pub fn from_document(document: TsDocument) -> Self {
        let index = build_index(&document);
        Self {
            locale: document.language.clone(),
            document,
            index,
        }
    }

    /// 解析 .ts 文本并构建目录
    pub fn parse(text: &str, origin: &str) -> Result<Self, CatalogError> {
        let document = parse_document(text, origin)?;
        Ok(Self::from_document(document))
    }

    /// 源语言目录：没有任何条目，所有查询都返回源文本
    pub fn source_language() -> Self {
        Self::from_document(TsDocument::new(""))
    }

    /// 目录的 locale 标签（源语言目录为空字符串）
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 是否为源语言目录
    pub fn is_source_language(&self) -> bool {
        self.locale.is_empty()
    }

    /// 原始文档（含过期条目和位置信息）
    pub fn document(&self) -> &TsDocument {
        &self.document
    }

    /// 重新序列化为 .ts 文本
    pub fn to_ts_string(&self) -> String {
        write_document(&self.document)
    }

    /// 查询翻译，找不到时返回源文本
    pub fn lookup<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        match self.find(context, source, None) {
            Some(text) => text,
            None => {
                tracing::debug!(
                    locale = %self.locale,
                    context,
                    source,
                    "missing translation, falling back to source text"
                );
                source
            }
        }
    }

    /// 带消歧义注释的查询
    ///
    /// 先找 (上下文, 源文本, 注释) 完全匹配的条目，再找不带注释的条目，
    /// 都没有时返回源文本。
    pub fn lookup_disambiguated<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> &'a str {
        match self.find_disambiguated(context, source, comment) {
            Some(text) => text,
            None => {
                tracing::debug!(
                    locale = %self.locale,
                    context,
                    source,
                    comment,
                    "missing translation, falling back to source text"
                );
                source
            }
        }
    }

    /// 是否存在有效翻译
    pub fn contains(&self, context: &str, source: &str) -> bool {
        self.find(context, source, None).is_some()
    }

    /// `lookup_disambiguated` 是否能找到翻译（而非回退到源文本）
    pub fn contains_disambiguated(&self, context: &str, source: &str, comment: Option<&str>) -> bool {
        self.find_disambiguated(context, source, comment).is_some()
    }

    /// 参与查询的上下文名称（排序后）
    pub fn context_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 统计信息
    pub fn statistics(&self) -> CatalogStatistics {
        let mut stats = CatalogStatistics {
            contexts: self.document.contexts.len(),
            ..CatalogStatistics::default()
        };

        for (_, message) in self.document.messages() {
            stats.messages += 1;
            match message.translation.status {
                TranslationStatus::Vanished | TranslationStatus::Obsolete => stats.stale += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Finished => {}
            }
        }
        stats.active = self
            .index
            .values()
            .flat_map(|sources| sources.values())
            .map(Vec::len)
            .sum();

        stats
    }

    fn find_disambiguated(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&str> {
        match comment {
            Some(comment) => self
                .find(context, source, Some(comment))
                .or_else(|| self.find(context, source, None)),
            None => self.find(context, source, None),
        }
    }

    fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        self.index
            .get(context)?
            .get(source)?
            .iter()
            .find(|variant| variant.comment.as_deref() == comment)
            .map(|variant| variant.text.as_str())
    }
}

/// 构建查询索引
///
/// 只收录有效且非空的翻译；同一键重复出现时保留第一条。
fn build_index(document: &TsDocument) -> LookupIndex {
    let mut index: LookupIndex = HashMap::new();

    for (context, message) in document.messages() {
        if !message.is_active() || message.translation.text.is_empty() {
            continue;
        }

        let variants = index
            .entry(context.name.clone())
            .or_default()
            .entry(message.source.clone())
            .or_default();

        let comment = message.comment.clone().filter(|c| !c.is_empty());
        if variants.iter().any(|v| v.comment == comment) {
            tracing::warn!(
                locale = %document.language,
                context = %context.name,
                source = %message.source,
                "duplicate translation entry, keeping the first one"
            );
            continue;
        }

        variants.push(Variant {
            comment,
            text: message.translation.text.clone(),
        });
    }

    index
}

// ============================================================================
// Minnow - 翻译器
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 当前生效的翻译目录及进程级翻译入口
// 边界:
//   - ✅ 按语言设置安装翻译目录（失败时回退源语言）
//   - ✅ 查询 + 占位符替换
//   - ✅ 进程级当前翻译器的读取和切换
//   - ❌ 不应包含目录解析逻辑
//   - ❌ 不应包含配置文件读写
//
// ============================================================================

use std::sync::{Arc, OnceLock, RwLock};

use crate::core::catalog::Catalog;
use crate::core::error::CatalogError;
use crate::core::loader::CatalogLoader;
use crate::core::locale;
use crate::core::placeholder::substitute;

/// 进程级当前翻译目录
static GLOBAL_CATALOG: OnceLock<RwLock<Arc<Catalog>>> = OnceLock::new();

/// 翻译器：对一个不可变目录的廉价句柄
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
}

/// 安装结果
#[derive(Debug)]
pub struct InstallOutcome {
    /// 实际使用的翻译器（失败时为源语言翻译器）
    pub translator: Translator,
    /// 加载失败的原因，供调用方展示
    pub error: Option<CatalogError>,
}

impl Translator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// 源语言翻译器：所有文本原样返回
    pub fn source_language() -> Self {
        Self::new(Catalog::source_language())
    }

    /// 根据语言设置（`System` / `zh_CN` / ...）加载翻译器
    ///
    /// 找不到目录或目录损坏时回退到源语言，错误放在 `InstallOutcome::error` 中。
    pub fn install(loader: &CatalogLoader, setting: &str) -> InstallOutcome {
        let Some(resolved) = locale::resolve_setting(setting) else {
            tracing::info!(setting, "no locale resolved, using source language");
            return InstallOutcome {
                translator: Self::source_language(),
                error: None,
            };
        };

        match loader.load(&resolved) {
            Ok(catalog) => InstallOutcome {
                translator: Self::new(catalog),
                error: None,
            },
            Err(e) => {
                if e.is_not_found() {
                    tracing::info!(locale = %resolved, "{}, using source language", e);
                } else {
                    tracing::warn!(locale = %resolved, "{}, using source language", e);
                }
                InstallOutcome {
                    translator: Self::source_language(),
                    error: Some(e),
                }
            }
        }
    }

    /// 当前目录
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 当前 locale，源语言时为 None
    pub fn locale(&self) -> Option<&str> {
        if self.catalog.is_source_language() {
            None
        } else {
            Some(self.catalog.locale())
        }
    }

    /// 翻译
    pub fn tr(&self, context: &str, source: &str) -> String {
        self.catalog.lookup(context, source).to_string()
    }

    /// 带消歧义注释的翻译
    pub fn tr_disambiguated(&self, context: &str, source: &str, comment: &str) -> String {
        self.catalog
            .lookup_disambiguated(context, source, Some(comment))
            .to_string()
    }

    /// 翻译并替换 %N 占位符
    pub fn tr_args<S: AsRef<str>>(&self, context: &str, source: &str, args: &[S]) -> String {
        substitute(self.catalog.lookup(context, source), args)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::source_language()
    }
}

fn global_slot() -> &'static RwLock<Arc<Catalog>> {
    GLOBAL_CATALOG.get_or_init(|| RwLock::new(Arc::new(Catalog::source_language())))
}

/// 切换进程级翻译器
pub fn install_global(translator: &Translator) {
    let mut slot = match global_slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = Arc::clone(&translator.catalog);
    tracing::debug!(locale = translator.locale().unwrap_or("source"), "global translator installed");
}

/// 当前进程级翻译器
pub fn global() -> Translator {
    let slot = match global_slot().read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    Translator {
        catalog: Arc::clone(&slot),
    }
}

/// 使用进程级翻译器翻译
pub fn tr(context: &str, source: &str) -> String {
    global().tr(context, source)
}

/// 使用进程级翻译器翻译并替换占位符
pub fn tr_args<S: AsRef<str>>(context: &str, source: &str, args: &[S]) -> String {
    global().tr_args(context, source, args)
}

/// 进程级翻译宏
///
/// `tr!("GeneralPage", "Language")`、`tr!("AboutPage", "Version %1", version)`
#[macro_export]
macro_rules! tr {
    ($context:expr, $source:expr) => {
        $crate::core::translator::tr($context, $source)
    };
    ($context:expr, $source:expr, $($arg:expr),+ $(,)?) => {{
        let args = vec![$(format!("{}", $arg)),+];
        $crate::core::translator::tr_args($context, $source, &args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ts::{Context, Message, TsDocument};
    use tempfile::TempDir;

    fn zh_translator() -> Translator {
        let mut doc = TsDocument::new("zh_CN");
        let mut about = Context::new("AboutPage");
        about.messages.push(Message::new("Version %1", "版本 %1"));
        doc.contexts.push(about);
        let mut pin = Context::new("PinWindow");
        pin.messages.push(Message::new("Close", "关闭"));
        pin.messages.push(Message::new("Close", "关闭窗口").with_comment("window"));
        doc.contexts.push(pin);
        Translator::new(Catalog::from_document(doc))
    }

    #[test]
    fn test_tr_args_renders_translation() {
        let translator = zh_translator();
        assert_eq!(translator.tr_args("AboutPage", "Version %1", &["2.3.0"]), "版本 2.3.0");
        assert_eq!(translator.tr_args("AboutPage", "Build %1", &["42"]), "Build 42");
        assert_eq!(translator.locale(), Some("zh_CN"));
    }

    #[test]
    fn test_tr_disambiguated() {
        let translator = zh_translator();
        assert_eq!(translator.tr("PinWindow", "Close"), "关闭");
        assert_eq!(translator.tr_disambiguated("PinWindow", "Close", "window"), "关闭窗口");
    }

    #[test]
    fn test_install_missing_locale_falls_back() {
        let loader = CatalogLoader::bundled();
        let outcome = Translator::install(&loader, "fr_FR");

        assert!(outcome.error.as_ref().is_some_and(|e| e.is_not_found()));
        assert_eq!(outcome.translator.locale(), None);
        assert_eq!(outcome.translator.tr("GeneralPage", "Language"), "Language");
    }

    #[test]
    fn test_install_malformed_catalog_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("zh_CN.ts"), "<TS><context>").unwrap();
        let loader = CatalogLoader::new()
            .with_source(crate::core::loader::DirectorySource::new(dir.path()));

        let outcome = Translator::install(&loader, "zh_CN");
        assert!(matches!(outcome.error, Some(CatalogError::MalformedResource { .. })));
        assert_eq!(outcome.translator.tr("GeneralPage", "Language"), "Language");
    }

    #[test]
    fn test_install_bundled_locale() {
        let loader = CatalogLoader::bundled();
        let outcome = Translator::install(&loader, "zh_CN");

        assert!(outcome.error.is_none());
        assert_eq!(outcome.translator.tr("GeneralPage", "Language"), "语言");
        assert_eq!(outcome.translator.tr_args("AboutPage", "Version %1", &["2.3.0"]), "版本 2.3.0");
    }

    #[test]
    fn test_global_translator_switch() {
        install_global(&zh_translator());
        assert_eq!(tr("PinWindow", "Close"), "关闭");
        assert_eq!(crate::tr!("AboutPage", "Version %1", "2.3.0"), "版本 2.3.0");

        let held = global();
        install_global(&Translator::source_language());
        assert_eq!(tr("PinWindow", "Close"), "Close");
        // 已取得的句柄不受切换影响
        assert_eq!(held.tr("PinWindow", "Close"), "关闭");
    }
}

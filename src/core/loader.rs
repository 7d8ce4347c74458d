// ============================================================================
// Minnow - 翻译目录加载器
// ============================================================================
//
// 文件: src/core/loader.rs
// 职责: 从目录或内置资源查找并加载翻译目录
// 边界:
//   - ✅ 翻译来源抽象（目录 / 内置）
//   - ✅ locale 候选链查找
//   - ✅ 可用 locale 枚举
//   - ✅ 多目录并发加载
//   - ❌ 不应包含 XML 解析细节
//   - ❌ 不应包含全局翻译器状态
//   - ❌ 不应包含 CLI 输出
//
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use walkdir::WalkDir;

use crate::core::catalog::Catalog;
use crate::core::error::CatalogError;
use crate::core::locale;

mod bundled {
    include!(concat!(env!("OUT_DIR"), "/bundled_catalogs.rs"));
}

/// 翻译文件扩展名
pub const CATALOG_EXTENSION: &str = "ts";

/// 翻译目录来源
pub trait CatalogSource: fmt::Debug + Send + Sync {
    /// 来源描述，用于日志和错误信息
    fn describe(&self) -> String;

    /// 读取指定 locale 的原始文本，不存在时返回 `Ok(None)`
    fn read(&self, locale: &str) -> Result<Option<(String, String)>, CatalogError>;

    /// 该来源提供的所有 locale
    fn locales(&self) -> Vec<String>;
}

/// 从文件系统目录读取 `<dir>/<locale>.ts`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, locale: &str) -> PathBuf {
        self.root.join(format!("{}.{}", locale, CATALOG_EXTENSION))
    }
}

impl CatalogSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn read(&self, locale: &str) -> Result<Option<(String, String)>, CatalogError> {
        let path = self.path_for(locale);
        if !path.is_file() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Some((path.display().to_string(), text)))
    }

    fn locales(&self) -> Vec<String> {
        if !self.root.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some(CATALOG_EXTENSION) {
                    return None;
                }
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .collect()
    }
}

/// 构建时打包进二进制的翻译目录（resources/i18n/*.ts）
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl BundledSource {
    fn entries(&self) -> &'static [(&'static str, &'static str)] {
        bundled::BUNDLED_CATALOGS
    }
}

impl CatalogSource for BundledSource {
    fn describe(&self) -> String {
        "bundled resources".to_string()
    }

    fn read(&self, locale: &str) -> Result<Option<(String, String)>, CatalogError> {
        Ok(self
            .entries()
            .iter()
            .find(|(name, _)| *name == locale)
            .map(|(name, text)| (format!("bundled:{}.{}", name, CATALOG_EXTENSION), text.to_string())))
    }

    fn locales(&self) -> Vec<String> {
        self.entries().iter().map(|(name, _)| name.to_string()).collect()
    }
}

/// 翻译目录加载器：按顺序查询各来源，先命中者优先
#[derive(Debug, Default)]
pub struct CatalogLoader {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl CatalogLoader {
    /// 创建没有任何来源的加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加来源
    pub fn with_source<S: CatalogSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// 仅内置资源
    pub fn bundled() -> Self {
        Self::new().with_source(BundledSource)
    }

    /// 来源描述列表
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.describe()).collect()
    }

    /// 加载指定 locale 的目录
    ///
    /// 依次尝试候选链（`zh_CN` -> `zh`），每个候选在所有来源中查找。
    pub fn load(&self, locale: &str) -> Result<Catalog, CatalogError> {
        let requested = locale::normalize(locale).ok_or_else(|| CatalogError::ResourceNotFound {
            locale: locale.to_string(),
        })?;

        for candidate in locale::candidates(&requested) {
            for source in &self.sources {
                if let Some((origin, text)) = source.read(&candidate)? {
                    tracing::debug!(locale = %candidate, origin = %origin, "loading translation catalog");
                    let catalog = Catalog::parse(&text, &origin)?;
                    tracing::info!(
                        locale = %candidate,
                        origin = %origin,
                        messages = catalog.document().message_count(),
                        "translation catalog loaded"
                    );
                    return Ok(catalog);
                }
            }
        }

        Err(CatalogError::ResourceNotFound { locale: requested })
    }

    /// 所有来源提供的 locale（排序去重）
    pub fn available_locales(&self) -> Vec<String> {
        let locales: BTreeSet<String> = self
            .sources
            .iter()
            .flat_map(|source| source.locales())
            .collect();
        locales.into_iter().collect()
    }
}

/// 并发加载多个 locale，结果顺序与输入一致
pub async fn load_many(
    loader: Arc<CatalogLoader>,
    locales: Vec<String>,
) -> Vec<(String, Result<Catalog, CatalogError>)> {
    let permits = Arc::new(Semaphore::new(num_cpus::get().max(1)));
    let mut handles = Vec::with_capacity(locales.len());

    for locale in locales {
        let loader = Arc::clone(&loader);
        let permits = Arc::clone(&permits);
        let name = locale.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await;
            tokio::task::spawn_blocking(move || loader.load(&locale)).await
        });
        handles.push((name, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (locale, handle) in handles {
        match handle.await {
            Ok(Ok(result)) => results.push((locale, result)),
            Ok(Err(e)) | Err(e) => {
                tracing::error!(locale = %locale, error = %e, "catalog loading task failed");
                let reason = format!("loading task failed: {}", e);
                results.push((
                    locale.clone(),
                    Err(CatalogError::MalformedResource {
                        origin: locale,
                        line: 0,
                        reason,
                    }),
                ));
            }
        }
    }

    results
}

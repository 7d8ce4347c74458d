// ============================================================================
// Minnow - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值
//   - ✅ 配置文件读写操作
//   - ✅ 运行时参数合并
//   - ❌ 不应包含配置应用逻辑
//   - ❌ 不应包含 CLI 参数解析
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "minnow-i18n.toml";

/// 全局配置管理器
static GLOBAL_CONFIG: OnceLock<Arc<RwLock<Config>>> = OnceLock::new();

/// minnow-i18n 配置文件结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 翻译目录配置
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// 校验配置
    #[serde(default)]
    pub check: CheckConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置（工具自身界面）
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 翻译目录配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// .ts 文件目录
    #[serde(default = "Config::default_resource_dir")]
    pub resource_dir: String,
    /// 语言设置（System / zh_CN / en_US ...）
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    /// 目录中找不到时是否使用内置翻译
    #[serde(default = "Config::default_use_bundled")]
    pub use_bundled: bool,
}

/// 校验配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CheckConfig {
    /// 忽略的上下文名称模式
    #[serde(default)]
    pub ignore_contexts: Vec<String>,
    /// 未完成条目视为错误
    #[serde(default)]
    pub fail_on_unfinished: bool,
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub language: Option<String>,
    pub resource_dir: Option<String>,
    pub locale: Option<String>,
    pub use_bundled: Option<bool>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    /// 获取默认翻译目录
    fn default_resource_dir() -> String {
        "resources/i18n".to_string()
    }

    /// 获取默认语言设置
    fn default_locale() -> String {
        crate::core::locale::SYSTEM_LOCALE.to_string()
    }

    /// 获取默认是否使用内置翻译
    fn default_use_bundled() -> bool {
        true
    }

    /// 获取默认是否详细输出
    fn default_verbose() -> bool {
        false
    }

    /// 获取默认是否彩色输出
    fn default_colored() -> bool {
        true
    }

    /// 获取默认界面语言
    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    ///
    /// 显式指定的配置文件必须存在；未指定时读取当前目录下的 `minnow-i18n.toml`，
    /// 不存在则使用默认配置。
    pub fn initialize(config_path: Option<&Path>) -> anyhow::Result<()> {
        let config = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from_path(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 从文件加载配置
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = Self::global()?;
        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply(args);
        Ok(())
    }

    /// 将运行时参数应用到配置
    pub fn apply(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
        if let Some(resource_dir) = args.resource_dir {
            self.catalog.resource_dir = resource_dir;
        }
        if let Some(locale) = args.locale {
            self.catalog.locale = locale;
        }
        if let Some(use_bundled) = args.use_bundled {
            self.catalog.use_bundled = use_bundled;
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板
    pub fn generate_default_template() -> Self {
        let mut config = Self::default();
        config.check.ignore_contexts = vec!["Debug*".to_string()];
        config
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::generate_default_template().save_to_file(config_path)
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Self::read(|config| config.i18n.language.clone())
    }

    /// 获取翻译目录（带默认值）
    pub fn get_resource_dir() -> PathBuf {
        let dir = Self::read(|config| config.catalog.resource_dir.clone())
            .unwrap_or_else(|_| Self::default_resource_dir());
        PathBuf::from(dir)
    }

    /// 获取语言设置（带默认值）
    pub fn get_locale() -> String {
        Self::read(|config| config.catalog.locale.clone()).unwrap_or_else(|_| Self::default_locale())
    }

    /// 获取是否使用内置翻译（带默认值）
    pub fn get_use_bundled() -> bool {
        Self::read(|config| config.catalog.use_bundled).unwrap_or_else(|_| Self::default_use_bundled())
    }

    /// 获取校验配置
    pub fn get_check_config() -> CheckConfig {
        Self::read(|config| config.check.clone()).unwrap_or_default()
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        Self::read(|config| config.output.verbose).unwrap_or_else(|_| Self::default_verbose())
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::read(|config| config.output.colored).unwrap_or_else(|_| Self::default_colored())
    }

    fn global() -> anyhow::Result<&'static Arc<RwLock<Config>>> {
        GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))
    }

    fn read<T>(f: impl FnOnce(&Config) -> T) -> anyhow::Result<T> {
        let config = Self::global()?
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;
        Ok(f(&config))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            check: CheckConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            resource_dir: Config::default_resource_dir(),
            locale: Config::default_locale(),
            use_bundled: Config::default_use_bundled(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbose: Config::default_verbose(),
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}

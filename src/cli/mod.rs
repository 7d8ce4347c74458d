// ============================================================================
// Minnow - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 命令路由分发
//   - ✅ 按配置构建目录加载器
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod check;
pub mod fmt;
pub mod init;
pub mod list;
pub mod lookup;
pub mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::loader::{BundledSource, CatalogLoader, DirectorySource};
use crate::core::translator::{self, Translator};
use crate::models::config::{Config, RuntimeArgs};
use crate::utils::colors::Colors;
use crate::utils::logger::Logger;
use crate::{t, tf};
use check::{handle_check, CheckArgs};
use fmt::{handle_fmt, FmtArgs};
use init::{handle_init, InitArgs};
use list::{handle_list, ListArgs};
use lookup::{handle_lookup, LookupArgs};
use render::{handle_render, RenderArgs};

/// minnow-i18n - MinnowSnap translation catalog tool
#[derive(Debug, Parser)]
#[command(name = "minnow-i18n")]
#[command(about = "Load, query and check MinnowSnap translation catalogs (Qt .ts)")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language of this tool (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Directory containing <locale>.ts catalogs
    #[arg(short = 'C', long, global = true)]
    pub resource_dir: Option<String>,

    /// Locale setting (System, zh_CN, en_US, ...)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Do not fall back to catalogs bundled into the binary
    #[arg(long, global = true)]
    pub no_bundled: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file path (default: minnow-i18n.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up the translation of a source text
    Lookup(LookupArgs),
    /// Look up a translation and fill in %N placeholders
    Render(RenderArgs),
    /// Check catalogs for unfinished entries, placeholder mismatches and duplicates
    Check(CheckArgs),
    /// Rewrite .ts files into canonical layout
    Fmt(FmtArgs),
    /// List available catalogs
    List(ListArgs),
    /// Initialize configuration file
    Init(InitArgs),
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // init 的 --config 是要写入的目标，不作为读取来源
    let config_source = match cli.command {
        Commands::Init(_) => None,
        _ => cli.config.as_deref(),
    };
    Config::initialize(config_source)?;
    Config::merge_runtime_args(build_runtime_args(&cli))?;

    Colors::configure(Config::get_colored());
    Logger::init_tracing(Config::get_verbose());

    match cli.command {
        Commands::Lookup(args) => handle_lookup(args),
        Commands::Render(args) => handle_render(args),
        Commands::Check(args) => handle_check(args).await,
        Commands::Fmt(args) => handle_fmt(args),
        Commands::List(args) => handle_list(args).await,
        Commands::Init(args) => handle_init(args, cli.config),
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        language: cli.language.clone(),
        resource_dir: cli.resource_dir.clone(),
        locale: cli.locale.clone(),
        use_bundled: if cli.no_bundled { Some(false) } else { None },
    }
}

/// 按配置构建加载器：目录优先，其次内置资源
pub fn build_loader() -> CatalogLoader {
    let mut loader = CatalogLoader::new().with_source(DirectorySource::new(Config::get_resource_dir()));
    if Config::get_use_bundled() {
        loader = loader.with_source(BundledSource);
    }

    // 走 tracing（stderr），JSON 输出时 stdout 保持干净
    tracing::debug!(sources = %loader.describe_sources().join(", "), "catalog sources");
    loader
}

/// 按配置的语言设置安装全局翻译器
///
/// 加载失败不会中断命令：回退到源语言并给出提示。
pub fn install_translator(loader: &CatalogLoader) -> Translator {
    let setting = Config::get_locale();
    let outcome = Translator::install(loader, &setting);

    match &outcome.error {
        Some(e) if e.is_not_found() => {
            if Config::get_verbose() {
                Logger::warn(tf!("catalog.source_language", setting));
            }
        }
        Some(e) => Logger::warn(tf!("catalog.load_failed", e)),
        None if Config::get_verbose() => {
            if let Some(locale) = outcome.translator.locale() {
                Logger::info(tf!("catalog.using", locale));
            }
        }
        None => {}
    }

    translator::install_global(&outcome.translator);
    outcome.translator
}

/// 输出 JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 没有找到任何目录时的输出：JSON 模式输出空数组，表格模式给出提示
pub(crate) fn report_no_catalogs(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&Vec::<()>::new()),
        OutputFormat::Table => {
            Logger::warn(t!("check.no_locales"));
            Ok(())
        }
    }
}

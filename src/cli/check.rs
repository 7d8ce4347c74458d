// ============================================================================
// Minnow - CLI Check 命令
// ============================================================================
//
// 文件: src/cli/check.rs
// 职责: 翻译目录校验命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 并发加载目录并调用校验器
//   - ✅ 校验结果输出和退出码
//   - ❌ 不应包含具体校验规则
//   - ❌ 不应包含 XML 解析逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::cli::{build_loader, print_json, report_no_catalogs, OutputFormat};
use crate::core::checker::{check_document, CheckOptions};
use crate::core::loader::{load_many, CatalogLoader};
use crate::models::config::Config;
use crate::models::report::CheckReport;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 检查翻译目录
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Locales to check (default: every available catalog)
    pub locales: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Treat unfinished translations as errors
    #[arg(long)]
    pub fail_on_unfinished: bool,
}

/// 单个目录的检查结果
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Checked(CheckReport),
    Failed { locale: String, error: String },
}

impl CheckOutcome {
    pub fn is_failure(&self) -> bool {
        match self {
            CheckOutcome::Checked(report) => report.has_errors(),
            CheckOutcome::Failed { .. } => true,
        }
    }
}

pub async fn handle_check(args: CheckArgs) -> Result<()> {
    let json = args.format == OutputFormat::Json;
    if !json {
        Logger::info(t!("check.start"));
    }

    let check_config = Config::get_check_config();
    let options = CheckOptions::new(
        &check_config.ignore_contexts,
        check_config.fail_on_unfinished || args.fail_on_unfinished,
    )
    .map_err(|e| anyhow::anyhow!(tf!("check.invalid_pattern", e)))?;

    let loader = Arc::new(build_loader());
    let locales = if args.locales.is_empty() {
        loader.available_locales()
    } else {
        args.locales
    };

    if locales.is_empty() {
        return report_no_catalogs(args.format);
    }

    let outcomes = check_catalogs(loader, locales, &options).await;
    print_outcomes(&outcomes, args.format)
}

/// 并发加载并校验各 locale，结果顺序与输入一致
pub async fn check_catalogs(
    loader: Arc<CatalogLoader>,
    locales: Vec<String>,
    options: &CheckOptions,
) -> Vec<CheckOutcome> {
    load_many(loader, locales)
        .await
        .into_iter()
        .map(|(locale, loaded)| match loaded {
            Ok(catalog) => CheckOutcome::Checked(check_document(catalog.document(), options)),
            Err(e) => CheckOutcome::Failed {
                locale,
                error: e.to_string(),
            },
        })
        .collect()
}

/// 输出校验结果；任一目录有错误或加载失败时返回错误（退出码 1）
pub fn print_outcomes(outcomes: &[CheckOutcome], format: OutputFormat) -> Result<()> {
    let failed = outcomes.iter().any(CheckOutcome::is_failure);

    match format {
        OutputFormat::Json => print_json(&outcomes)?,
        OutputFormat::Table => {
            for outcome in outcomes {
                match outcome {
                    CheckOutcome::Checked(report) => summary::print_check_report(report),
                    CheckOutcome::Failed { error, .. } => {
                        Logger::error(tf!("catalog.load_failed", error))
                    }
                }
            }
            Logger::info("");
        }
    }

    if failed {
        anyhow::bail!(t!("check.failed"));
    }
    if format == OutputFormat::Table {
        Logger::success(t!("check.all_good"));
    }
    Ok(())
}

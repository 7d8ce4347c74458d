// ============================================================================
// Minnow - CLI List 命令
// ============================================================================
//
// 文件: src/cli/list.rs
// 职责: 列出可用翻译目录及统计信息
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::cli::{build_loader, print_json, OutputFormat};
use crate::core::catalog::CatalogStatistics;
use crate::core::loader::load_many;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::tf;

/// 列出可用翻译目录
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// 单个目录的列表项
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ListEntry {
    Loaded {
        locale: String,
        statistics: CatalogStatistics,
    },
    Failed {
        locale: String,
        error: String,
    },
}

pub async fn handle_list(args: ListArgs) -> Result<()> {
    let loader = Arc::new(build_loader());
    let locales = loader.available_locales();

    let entries: Vec<ListEntry> = load_many(loader, locales)
        .await
        .into_iter()
        .map(|(locale, loaded)| match loaded {
            Ok(catalog) => ListEntry::Loaded {
                locale,
                statistics: catalog.statistics(),
            },
            Err(e) => ListEntry::Failed {
                locale,
                error: e.to_string(),
            },
        })
        .collect();

    match args.format {
        // 加载失败也写进 JSON，stdout 只有 JSON
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Table => {
            let mut rows = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    ListEntry::Loaded { locale, statistics } => rows.push((locale, statistics)),
                    ListEntry::Failed { error, .. } => {
                        Logger::warn(tf!("catalog.load_failed", error))
                    }
                }
            }
            summary::print_catalog_list(&rows);
            Ok(())
        }
    }
}

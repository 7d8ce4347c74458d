// ============================================================================
// Minnow - CLI Fmt 命令
// ============================================================================
//
// 文件: src/cli/fmt.rs
// 职责: 将 .ts 文件重写为规范布局的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 文件读取、比较和回写
//   - ❌ 不应包含 XML 解析和序列化细节
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::core::parser::parse_document;
use crate::core::writer::write_document;
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::tf;

/// 格式化 .ts 文件
#[derive(Debug, Args)]
pub struct FmtArgs {
    /// .ts files to format
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Only report files that would change
    #[arg(long)]
    pub check: bool,
}

/// 单个文件的格式化结果
#[derive(Debug, PartialEq, Eq)]
pub enum FmtStatus {
    Unchanged,
    Changed,
}

pub fn handle_fmt(args: FmtArgs) -> Result<()> {
    let verbose = Config::get_verbose();
    let mut pending = 0usize;
    let mut failed = 0usize;

    for path in &args.files {
        match format_file(path, !args.check) {
            Ok(FmtStatus::Unchanged) => {
                if verbose {
                    Logger::info(tf!("fmt.unchanged", path.display()));
                }
            }
            Ok(FmtStatus::Changed) if args.check => {
                Logger::warn(tf!("fmt.would_change", path.display()));
                pending += 1;
            }
            Ok(FmtStatus::Changed) => Logger::success(tf!("fmt.formatted", path.display())),
            Err(e) => {
                Logger::error(format!("{:#}", e));
                failed += 1;
            }
        }
    }

    if pending > 0 {
        anyhow::bail!(tf!("fmt.check_failed", pending));
    }
    if failed > 0 {
        anyhow::bail!(tf!("fmt.failed", failed));
    }
    Ok(())
}

/// 格式化单个文件；`write` 为 false 时只比较不回写
pub fn format_file(path: &Path, write: bool) -> Result<FmtStatus> {
    let text = std::fs::read_to_string(path)
        .with_context(|| tf!("fmt.read_failed", path.display()))?;
    let document = parse_document(&text, &path.display().to_string())?;
    let formatted = write_document(&document);

    if formatted == text {
        return Ok(FmtStatus::Unchanged);
    }

    if write {
        std::fs::write(path, formatted)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    tracing::debug!(path = %path.display(), write, "catalog layout differs from canonical form");
    Ok(FmtStatus::Changed)
}

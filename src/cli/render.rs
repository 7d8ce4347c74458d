// ============================================================================
// Minnow - CLI Render 命令
// ============================================================================
//
// 文件: src/cli/render.rs
// 职责: 查询翻译并替换占位符的 CLI 接口层
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::cli::{build_loader, install_translator};
use crate::core::translator::tr_args;

/// 渲染带参数的翻译
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Context name (e.g. AboutPage)
    pub context: String,

    /// Source text containing %1, %2, ...
    pub source: String,

    /// Values for %1, %2, ...
    pub args: Vec<String>,
}

pub fn handle_render(args: RenderArgs) -> Result<()> {
    let loader = build_loader();
    install_translator(&loader);

    println!("{}", tr_args(&args.context, &args.source, &args.args));
    Ok(())
}

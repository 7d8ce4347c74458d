// ============================================================================
// Minnow - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: minnow-i18n 命令行工具入口
//
// ============================================================================

use minnow_i18n::cli::run_cli;
use minnow_i18n::utils::logger::Logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run_cli().await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

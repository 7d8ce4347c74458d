// ============================================================================
// Minnow - CLI Lookup 命令
// ============================================================================
//
// 文件: src/cli/lookup.rs
// 职责: 查询单条翻译的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义
//   - ✅ 查询结果和出处输出
//   - ❌ 不应包含查询逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::cli::{build_loader, install_translator};
use crate::core::translator::Translator;
use crate::models::ts::Message;
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 查询翻译
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Context name (e.g. GeneralPage)
    pub context: String,

    /// Source text
    pub source: String,

    /// Disambiguation comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Show where the entry is used
    #[arg(long)]
    pub show_location: bool,
}

pub fn handle_lookup(args: LookupArgs) -> Result<()> {
    let loader = build_loader();
    let translator = install_translator(&loader);

    let text = match &args.comment {
        Some(comment) => translator.tr_disambiguated(&args.context, &args.source, comment),
        None => translator.tr(&args.context, &args.source),
    };
    println!("{}", text);

    let catalog = translator.catalog();
    if !catalog.is_source_language()
        && !catalog.contains_disambiguated(&args.context, &args.source, args.comment.as_deref())
    {
        Logger::warn(t!("lookup.fallback"));
    }

    if args.show_location {
        print_locations(&translator, &args);
    }

    Ok(())
}

/// 打印匹配条目的出处（含过期条目）
fn print_locations(translator: &Translator, args: &LookupArgs) {
    let messages: Vec<&Message> = translator
        .catalog()
        .document()
        .context(&args.context)
        .into_iter()
        .flat_map(|context| context.messages.iter())
        .filter(|message| message.source == args.source)
        .filter(|message| match &args.comment {
            Some(comment) => message.comment.as_deref().map_or(true, |c| c == comment.as_str()),
            None => true,
        })
        .collect();

    let locations: Vec<String> = messages
        .iter()
        .flat_map(|message| message.locations.iter())
        .map(|location| location.to_string())
        .collect();

    if locations.is_empty() {
        Logger::info(t!("lookup.no_location"));
    } else {
        Logger::info(t!("lookup.locations"));
        for location in locations {
            Logger::info(format!("  {} {}", icons::LOCATION, Colors::muted(&location)));
        }
    }

    for message in messages.iter().filter(|m| !m.is_active()) {
        Logger::warn(tf!("lookup.stale", message.translation.status));
    }
}

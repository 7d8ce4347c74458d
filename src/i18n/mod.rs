// ============================================================================
// Minnow - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 命令行工具自身界面文本的国际化
// 边界:
//   - ✅ 翻译表查找
//   - ✅ 翻译宏定义和实现
//   - ✅ 参数化翻译支持（%N 占位符）
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含 .ts 翻译目录逻辑
//   - ❌ 不应包含 CLI 相关逻辑
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

use crate::core::placeholder::substitute;

/// 获取翻译文本（界面语言取自配置）
pub fn get_translation(key: &str) -> String {
    let language = get_language_from_config().unwrap_or_else(|| "en_us".to_string());
    translate(&language, key)
}

/// 在指定语言的表中查找，缺失时退回英文，再缺失时返回键本身
pub fn translate(language: &str, key: &str) -> String {
    let table = match language {
        "zh_cn" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS,
    };

    find(table, key)
        .or_else(|| find(en_us::TRANSLATIONS, key))
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::debug!(key, language, "unknown interface translation key");
            key.to_string()
        })
}

fn find(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// 从配置获取语言设置
fn get_language_from_config() -> Option<String> {
    use crate::models::config::Config;

    // 配置未初始化时返回 None
    Config::get_language().ok()
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 带参数翻译的辅助函数
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    substitute(&template, &args)
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}

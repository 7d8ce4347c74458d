// ============================================================================
// Minnow - Locale 解析
// ============================================================================
//
// 文件: src/core/locale.rs
// 职责: 语言设置值到 locale 标签及候选链的解析
// 边界:
//   - ✅ "System" 设置值从环境变量解析
//   - ✅ locale 标签规范化
//   - ✅ 候选链生成（zh_CN -> zh）
//   - ❌ 不应包含目录加载逻辑
//   - ❌ 不应包含配置文件读写
//
// ============================================================================

/// 跟随系统语言的设置值
pub const SYSTEM_LOCALE: &str = "System";

/// 按优先级读取的环境变量
const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// 将语言设置值解析为 locale 标签
///
/// `System` 或空值从环境变量读取；返回 `None` 表示使用源语言。
pub fn resolve_setting(setting: &str) -> Option<String> {
    resolve_setting_with(setting, |name| std::env::var(name).ok())
}

/// 与 `resolve_setting` 相同，但环境变量来源可替换（便于测试）
pub fn resolve_setting_with<F>(setting: &str, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let setting = setting.trim();
    if setting.is_empty() || setting.eq_ignore_ascii_case(SYSTEM_LOCALE) {
        return system_locale_with(env);
    }
    normalize(setting)
}

/// 从环境变量读取系统 locale
fn system_locale_with<F>(env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| env(*name))
        .find(|value| !value.trim().is_empty())?;

    normalize(&value)
}

/// 规范化 locale 标签
///
/// - 去掉编码和修饰符：`zh_CN.UTF-8@euro` -> `zh_CN`
/// - `-` 统一为 `_`，语言小写，地区大写：`zh-cn` -> `zh_CN`
/// - `C` / `POSIX` 视为没有 locale
pub fn normalize(tag: &str) -> Option<String> {
    let tag = tag.trim();
    let tag = tag.split(['.', '@']).next().unwrap_or(tag);
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }

    let mut parts = tag.split(['_', '-']).filter(|p| !p.is_empty());
    let language = parts.next()?.to_ascii_lowercase();
    if !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    match parts.next() {
        Some(region) => Some(format!("{}_{}", language, region.to_ascii_uppercase())),
        None => Some(language),
    }
}

/// 生成加载候选链：完整标签在前，其次仅语言部分
pub fn candidates(locale: &str) -> Vec<String> {
    let mut chain = vec![locale.to_string()];
    if let Some((language, _)) = locale.split_once('_') {
        if !language.is_empty() {
            chain.push(language.to_string());
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[rstest]
    #[case("zh_CN", Some("zh_CN"))]
    #[case("zh-cn", Some("zh_CN"))]
    #[case("zh_CN.UTF-8", Some("zh_CN"))]
    #[case("de_DE@euro", Some("de_DE"))]
    #[case("ZH", Some("zh"))]
    #[case("  en_US  ", Some("en_US"))]
    #[case("C", None)]
    #[case("POSIX", None)]
    #[case("C.UTF-8", None)]
    #[case("", None)]
    #[case("12_34", None)]
    fn test_normalize(#[case] tag: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize(tag).as_deref(), expected);
    }

    #[rstest]
    #[case("zh_CN", &["zh_CN", "zh"])]
    #[case("zh", &["zh"])]
    #[case("en_US", &["en_US", "en"])]
    fn test_candidates(#[case] locale: &str, #[case] expected: &[&str]) {
        assert_eq!(candidates(locale), expected);
    }

    #[test]
    fn test_explicit_setting_ignores_environment() {
        let env = env_from(&[("LANG", "de_DE.UTF-8")]);
        assert_eq!(resolve_setting_with("zh_CN", env).as_deref(), Some("zh_CN"));
    }

    #[test]
    fn test_system_setting_uses_environment_priority() {
        let env = env_from(&[("LANG", "de_DE.UTF-8"), ("LC_MESSAGES", "zh_CN.UTF-8")]);
        assert_eq!(resolve_setting_with("System", &env).as_deref(), Some("zh_CN"));

        let env = env_from(&[("LC_ALL", ""), ("LANG", "ja_JP.UTF-8")]);
        assert_eq!(resolve_setting_with("", &env).as_deref(), Some("ja_JP"));
    }

    #[test]
    fn test_system_setting_without_locale() {
        let env = env_from(&[("LANG", "C")]);
        assert_eq!(resolve_setting_with("system", &env), None);
        assert_eq!(resolve_setting_with("System", env_from(&[])), None);
    }
}

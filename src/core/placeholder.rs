// ============================================================================
// Minnow - 占位符替换
// ============================================================================
//
// 文件: src/core/placeholder.rs
// 职责: %1 ~ %99 位置占位符的替换和提取
// 边界:
//   - ✅ 位置参数替换
//   - ✅ 占位符编号提取（供校验使用）
//   - ❌ 不应包含翻译查询逻辑
//   - ❌ 不应包含数字/日期本地化格式
//
// ============================================================================

use std::collections::BTreeSet;

/// 最大支持的占位符编号
pub const MAX_PLACEHOLDER: u8 = 99;

/// 用参数替换模板中的 %N 占位符
///
/// `%N` 取 `args[N-1]`；编号最多两位且贪婪匹配（`%10` 是第十个参数）。
/// 无法识别的占位符（`%0`、超出参数个数的编号、`%` 后不是数字）原样保留，
/// 替换进去的参数不会被再次扫描。
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    if args.is_empty() || !template.contains('%') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.as_ref().len()).sum::<usize>());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match parse_index(after) {
            Some((index, digits)) if index >= 1 && usize::from(index) <= args.len() => {
                out.push_str(args[usize::from(index) - 1].as_ref());
                rest = &after[digits..];
            }
            Some((_, digits)) => {
                out.push_str(&rest[pos..pos + 1 + digits]);
                rest = &after[digits..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// 提取文本中用到的占位符编号
pub fn placeholders(text: &str) -> BTreeSet<u8> {
    let mut found = BTreeSet::new();
    let mut rest = text;

    while let Some(pos) = rest.find('%') {
        let after = &rest[pos + 1..];
        match parse_index(after) {
            Some((index, digits)) => {
                if index >= 1 {
                    found.insert(index);
                }
                rest = &after[digits..];
            }
            None => rest = after,
        }
    }

    found
}

/// 解析 % 之后的一到两位数字，返回 (编号, 消耗的字节数)
fn parse_index(text: &str) -> Option<(u8, usize)> {
    let bytes = text.as_bytes();
    let first = *bytes.first()?;
    if !first.is_ascii_digit() {
        return None;
    }

    let mut value = first - b'0';
    let mut digits = 1;
    if let Some(&second) = bytes.get(1) {
        if second.is_ascii_digit() {
            value = value * 10 + (second - b'0');
            digits = 2;
        }
    }

    debug_assert!(value <= MAX_PLACEHOLDER);
    Some((value, digits))
}

// ============================================================================
// Minnow - TS 文件序列化
// ============================================================================
//
// 文件: src/core/writer.rs
// 职责: 将 TsDocument 按 lupdate 布局写回文本
// 边界:
//   - ✅ lupdate 兼容的缩进与元素顺序
//   - ✅ 文本和属性转义
//   - ✅ 过期条目原样保留
//   - ❌ 不应包含解析逻辑
//   - ❌ 不应包含文件写入逻辑
//
// ============================================================================

use quick_xml::escape::escape;
use std::fmt::Write;

use crate::models::ts::{Context, Message, TsDocument};

/// 缩进单位（lupdate 使用 4 个空格）
const INDENT: &str = "    ";

/// 序列化整个文档
pub fn write_document(document: &TsDocument) -> String {
    let mut out = String::with_capacity(256 + document.message_count() * 192);

    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    let _ = write!(
        out,
        "<TS version=\"{}\" language=\"{}\"",
        escape(&document.version),
        escape(&document.language)
    );
    if let Some(source_language) = &document.source_language {
        let _ = write!(out, " sourcelanguage=\"{}\"", escape(source_language));
    }
    out.push_str(">\n");

    for context in &document.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    let _ = writeln!(out, "{}<name>{}</name>", INDENT, escape(&context.name));
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    let _ = writeln!(out, "{}<message>", INDENT);

    for location in &message.locations {
        let _ = write!(out, "{0}{0}<location", INDENT);
        if let Some(filename) = &location.filename {
            let _ = write!(out, " filename=\"{}\"", escape(filename));
        }
        if let Some(line) = &location.line {
            let _ = write!(out, " line=\"{}\"", escape(line));
        }
        out.push_str("/>\n");
    }

    write_element(out, "source", &message.source);
    if let Some(old_source) = &message.old_source {
        write_element(out, "oldsource", old_source);
    }
    if let Some(comment) = &message.comment {
        write_element(out, "comment", comment);
    }
    if let Some(old_comment) = &message.old_comment {
        write_element(out, "oldcomment", old_comment);
    }
    if let Some(extra) = &message.extra_comment {
        write_element(out, "extracomment", extra);
    }
    if let Some(note) = &message.translator_comment {
        write_element(out, "translatorcomment", note);
    }

    let translation = &message.translation;
    match translation.status.type_attr() {
        Some(kind) => {
            let _ = writeln!(
                out,
                "{0}{0}<translation type=\"{1}\">{2}</translation>",
                INDENT,
                kind,
                escape(&translation.text)
            );
        }
        None => write_element(out, "translation", &translation.text),
    }

    if let Some(user_data) = &message.user_data {
        write_element(out, "userdata", user_data);
    }
    for extra in &message.extras {
        write_element(out, &format!("extra-{}", extra.name), &extra.text);
    }

    let _ = writeln!(out, "{}</message>", INDENT);
}

fn write_element(out: &mut String, tag: &str, text: &str) {
    let _ = writeln!(out, "{0}{0}<{1}>{2}</{1}>", INDENT, tag, escape(text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_document;
    use crate::models::ts::{Context, Message, TranslationStatus, TsDocument};

    #[test]
    fn test_write_matches_lupdate_layout() {
        let mut doc = TsDocument::new("zh_CN");
        let mut about = Context::new("AboutPage");
        about.messages.push(
            Message::new("Version 1.0.0", "版本 1.0.0").with_status(TranslationStatus::Vanished),
        );
        about.messages.push(
            Message::new("Version %1", "版本 %1")
                .with_location("../../qml/features/preferences/pages/AboutPage.qml", 51),
        );
        doc.contexts.push(about);

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="zh_CN">
<context>
    <name>AboutPage</name>
    <message>
        <source>Version 1.0.0</source>
        <translation type="vanished">版本 1.0.0</translation>
    </message>
    <message>
        <location filename="../../qml/features/preferences/pages/AboutPage.qml" line="51"/>
        <source>Version %1</source>
        <translation>版本 %1</translation>
    </message>
</context>
</TS>
"#;
        assert_eq!(write_document(&doc), expected);
    }

    #[test]
    fn test_write_escapes_and_optional_fields() {
        let mut doc = TsDocument::new("zh_CN");
        doc.source_language = Some("en_US".to_string());
        let mut ctx = Context::new("Toolbar");
        let mut message = Message::new("Save & \"Copy\"", "")
            .with_status(TranslationStatus::Unfinished)
            .with_comment("<menu>");
        message.extra_comment = Some("it's a button".to_string());
        message.locations.push(crate::models::ts::Location {
            filename: Some("qml/Toolbar.qml".to_string()),
            line: None,
        });
        ctx.messages.push(message);
        doc.contexts.push(ctx);

        let text = write_document(&doc);
        assert!(text.contains("<TS version=\"2.1\" language=\"zh_CN\" sourcelanguage=\"en_US\">"));
        assert!(text.contains("        <location filename=\"qml/Toolbar.qml\"/>\n"));
        assert!(text.contains("<source>Save &amp; &quot;Copy&quot;</source>"));
        assert!(text.contains("<comment>&lt;menu&gt;</comment>"));
        assert!(text.contains("<extracomment>it&apos;s a button</extracomment>"));
        assert!(text.contains("<translation type=\"unfinished\"></translation>"));

        let reparsed = parse_document(&text, "written.ts").unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_relative_locations_and_side_fields_round_trip() {
        let text = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="zh_CN">
<context>
    <name>SettingsPage</name>
    <message>
        <location filename="../qml/SettingsPage.qml" line="+30"/>
        <location line="-5"/>
        <source>Save to folder</source>
        <oldsource>Save to directory</oldsource>
        <comment>button</comment>
        <oldcomment>action</oldcomment>
        <extracomment>Shown in the settings page</extracomment>
        <translatorcomment>keep short</translatorcomment>
        <translation type="unfinished">保存到目录</translation>
        <userdata>id-42</userdata>
        <extra-po-flags>c-format</extra-po-flags>
    </message>
</context>
</TS>
"#;
        let doc = parse_document(text, "relative.ts").unwrap();
        assert_eq!(write_document(&doc), text);
    }

    #[test]
    fn test_write_empty_document() {
        let doc = TsDocument::new("ja_JP");
        assert_eq!(
            write_document(&doc),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\" language=\"ja_JP\">\n</TS>\n"
        );
    }
}

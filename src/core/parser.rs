// ============================================================================
// Minnow - TS 文件解析器
// ============================================================================
//
// 文件: src/core/parser.rs
// 职责: 将 Qt Linguist .ts 文本解析为 TsDocument
// 边界:
//   - ✅ XML 事件遍历和结构校验
//   - ✅ 实体与字符引用解码
//   - ✅ 出错行号定位
//   - ❌ 不应包含查询索引逻辑
//   - ❌ 不应包含文件读取逻辑
//   - ❌ 不应包含序列化逻辑
//
// ============================================================================

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use crate::core::error::CatalogError;
use crate::models::ts::{
    Context, ExtraField, Location, Message, Translation, TranslationStatus, TsDocument,
    DEFAULT_TS_VERSION,
};

/// 解析 .ts 文本
///
/// `origin` 只用于错误信息（文件路径或内置目录名）。
pub fn parse_document(text: &str, origin: &str) -> Result<TsDocument, CatalogError> {
    TsParser::new(text, origin).parse()
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
    text: &'a str,
    origin: &'a str,
}

/// 消息内可出现的文本元素
enum MessageField {
    Source,
    OldSource,
    Comment,
    OldComment,
    ExtraComment,
    TranslatorComment,
    UserData,
    /// `<extra-NAME>`，携带 NAME
    Extra(String),
}

/// 消息内已读取的文本字段
#[derive(Default)]
struct MessageFields {
    source: Option<String>,
    old_source: Option<String>,
    comment: Option<String>,
    old_comment: Option<String>,
    extra_comment: Option<String>,
    translator_comment: Option<String>,
    user_data: Option<String>,
    extras: Vec<ExtraField>,
}

impl<'a> TsParser<'a> {
    fn new(text: &'a str, origin: &'a str) -> Self {
        Self {
            reader: Reader::from_str(text),
            text,
            origin,
        }
    }

    fn parse(mut self) -> Result<TsDocument, CatalogError> {
        let document = loop {
            match self.next()? {
                Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
                Event::Text(t) if is_blank(&t) => {}
                Event::Start(e) if e.name().as_ref() == b"TS" => {
                    let mut document = self.root_attributes(&e)?;
                    self.parse_root_children(&mut document)?;
                    break document;
                }
                Event::Empty(e) if e.name().as_ref() == b"TS" => break self.root_attributes(&e)?,
                Event::Eof => return Err(self.malformed("missing <TS> root element")),
                other => return Err(self.unexpected(&other, "document")),
            }
        };

        // 根元素之后只允许空白和注释
        loop {
            match self.next()? {
                Event::Eof => break,
                Event::Comment(_) | Event::PI(_) => {}
                Event::Text(t) if is_blank(&t) => {}
                other => return Err(self.unexpected(&other, "document")),
            }
        }

        Ok(document)
    }

    fn root_attributes(&self, start: &BytesStart<'_>) -> Result<TsDocument, CatalogError> {
        let mut version = None;
        let mut language = None;
        let mut source_language = None;

        for (key, value) in self.attributes(start)? {
            match key.as_str() {
                "version" => version = Some(value),
                "language" => language = Some(value),
                "sourcelanguage" => source_language = Some(value),
                _ => tracing::debug!(origin = self.origin, attribute = %key, "ignoring <TS> attribute"),
            }
        }

        let language = language.ok_or_else(|| self.malformed("<TS> is missing the language attribute"))?;

        Ok(TsDocument {
            version: version.unwrap_or_else(|| DEFAULT_TS_VERSION.to_string()),
            language,
            source_language,
            contexts: Vec::new(),
        })
    }

    fn parse_root_children(&mut self, document: &mut TsDocument) -> Result<(), CatalogError> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"context" => {
                    let context = self.parse_context()?;
                    document.contexts.push(context);
                }
                Event::End(e) if e.name().as_ref() == b"TS" => return Ok(()),
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) => {}
                Event::Eof => return Err(self.malformed("unexpected end of file inside <TS>")),
                other => return Err(self.unexpected(&other, "TS")),
            }
        }
    }

    fn parse_context(&mut self) -> Result<Context, CatalogError> {
        let mut name: Option<String> = None;
        let mut messages = Vec::new();

        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"name" => {
                    if name.is_some() {
                        return Err(self.malformed("<context> has more than one <name>"));
                    }
                    name = Some(self.read_text(b"name")?);
                }
                Event::Start(e) if e.name().as_ref() == b"message" => {
                    let message = self.parse_message(&e)?;
                    messages.push(message);
                }
                Event::End(e) if e.name().as_ref() == b"context" => break,
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) => {}
                Event::Eof => return Err(self.malformed("unexpected end of file inside <context>")),
                other => return Err(self.unexpected(&other, "context")),
            }
        }

        let name = name.ok_or_else(|| self.malformed("<context> is missing <name>"))?;
        Ok(Context { name, messages })
    }

    fn parse_message(&mut self, start: &BytesStart<'_>) -> Result<Message, CatalogError> {
        for (key, value) in self.attributes(start)? {
            if key == "numerus" && value == "yes" {
                return Err(self.malformed("plural (numerus) messages are not supported"));
            }
            tracing::debug!(origin = self.origin, attribute = %key, "ignoring <message> attribute");
        }

        let mut locations = Vec::new();
        let mut fields = MessageFields::default();
        let mut translation = None;

        loop {
            match self.next()? {
                Event::Empty(e) if e.name().as_ref() == b"location" => {
                    locations.push(self.location(&e)?);
                }
                Event::Start(e) if e.name().as_ref() == b"location" => {
                    locations.push(self.location(&e)?);
                    self.read_text(b"location")?;
                }
                Event::Start(e) if e.name().as_ref() == b"translation" => {
                    let status = self.translation_status(&e)?;
                    let text = self.read_text(b"translation")?;
                    self.set_once(&mut translation, Translation { text, status }, "translation")?;
                }
                Event::Empty(e) if e.name().as_ref() == b"translation" => {
                    let status = self.translation_status(&e)?;
                    let text = String::new();
                    self.set_once(&mut translation, Translation { text, status }, "translation")?;
                }
                Event::Start(e) => {
                    let tag = e.name().as_ref().to_vec();
                    let field = self.message_field(&tag)?;
                    let text = self.read_text(&tag)?;
                    self.store_field(&mut fields, field, text)?;
                }
                Event::Empty(e) => {
                    let field = self.message_field(e.name().as_ref())?;
                    self.store_field(&mut fields, field, String::new())?;
                }
                Event::End(e) if e.name().as_ref() == b"message" => break,
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) => {}
                Event::Eof => return Err(self.malformed("unexpected end of file inside <message>")),
                other => return Err(self.unexpected(&other, "message")),
            }
        }

        let source = fields
            .source
            .ok_or_else(|| self.malformed("<message> is missing <source>"))?;
        // lupdate 对新字符串写出空的 unfinished 翻译，缺失时按同样含义处理
        let translation = translation.unwrap_or(Translation {
            text: String::new(),
            status: TranslationStatus::Unfinished,
        });

        Ok(Message {
            locations,
            source,
            old_source: fields.old_source,
            comment: fields.comment,
            old_comment: fields.old_comment,
            extra_comment: fields.extra_comment,
            translator_comment: fields.translator_comment,
            translation,
            user_data: fields.user_data,
            extras: fields.extras,
        })
    }

    fn message_field(&self, tag: &[u8]) -> Result<MessageField, CatalogError> {
        match tag {
            b"source" => Ok(MessageField::Source),
            b"oldsource" => Ok(MessageField::OldSource),
            b"comment" => Ok(MessageField::Comment),
            b"oldcomment" => Ok(MessageField::OldComment),
            b"extracomment" => Ok(MessageField::ExtraComment),
            b"translatorcomment" => Ok(MessageField::TranslatorComment),
            b"userdata" => Ok(MessageField::UserData),
            other => match other.strip_prefix(b"extra-") {
                Some(name) if !name.is_empty() => Ok(MessageField::Extra(
                    String::from_utf8_lossy(name).into_owned(),
                )),
                _ => Err(self.malformed(format!(
                    "unsupported element <{}> inside <message>",
                    String::from_utf8_lossy(other)
                ))),
            },
        }
    }

    fn store_field(
        &self,
        fields: &mut MessageFields,
        field: MessageField,
        text: String,
    ) -> Result<(), CatalogError> {
        match field {
            MessageField::Source => self.set_once(&mut fields.source, text, "source"),
            MessageField::OldSource => self.set_once(&mut fields.old_source, text, "oldsource"),
            MessageField::Comment => self.set_once(&mut fields.comment, text, "comment"),
            MessageField::OldComment => self.set_once(&mut fields.old_comment, text, "oldcomment"),
            MessageField::ExtraComment => {
                self.set_once(&mut fields.extra_comment, text, "extracomment")
            }
            MessageField::TranslatorComment => {
                self.set_once(&mut fields.translator_comment, text, "translatorcomment")
            }
            MessageField::UserData => self.set_once(&mut fields.user_data, text, "userdata"),
            MessageField::Extra(name) => {
                if fields.extras.iter().any(|extra| extra.name == name) {
                    return Err(self.malformed(format!(
                        "<message> has more than one <extra-{}>",
                        name
                    )));
                }
                fields.extras.push(ExtraField { name, text });
                Ok(())
            }
        }
    }

    /// 位置属性按原文保留，相对行号（`+30`、`-5`）和省略的 filename 都合法
    fn location(&self, start: &BytesStart<'_>) -> Result<Location, CatalogError> {
        let mut location = Location {
            filename: None,
            line: None,
        };

        for (key, value) in self.attributes(start)? {
            match key.as_str() {
                "filename" => location.filename = Some(value),
                "line" => location.line = Some(value),
                _ => tracing::debug!(origin = self.origin, attribute = %key, "ignoring <location> attribute"),
            }
        }

        Ok(location)
    }

    fn translation_status(&self, start: &BytesStart<'_>) -> Result<TranslationStatus, CatalogError> {
        let mut status = TranslationStatus::Finished;
        for (key, value) in self.attributes(start)? {
            if key == "type" {
                status = TranslationStatus::from_type_attr(&value).ok_or_else(|| {
                    self.malformed(format!("unknown translation type '{}'", value))
                })?;
            }
        }
        Ok(status)
    }

    /// 读取文本直到对应的结束标签
    fn read_text(&mut self, end: &[u8]) -> Result<String, CatalogError> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Event::Text(t) => {
                    let decoded = t
                        .unescape()
                        .map_err(|e| self.malformed(format!("invalid text: {}", e)))?;
                    text.push_str(&decoded);
                }
                Event::CData(c) => {
                    let raw = c.into_inner();
                    text.push_str(&String::from_utf8_lossy(&raw));
                }
                Event::End(e) if e.name().as_ref() == end => return Ok(text),
                Event::Comment(_) => {}
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"numerusform" => {
                    return Err(self.malformed("plural (numerus) messages are not supported"));
                }
                Event::Eof => {
                    return Err(self.malformed(format!(
                        "unexpected end of file inside <{}>",
                        String::from_utf8_lossy(end)
                    )))
                }
                other => return Err(self.unexpected(&other, &String::from_utf8_lossy(end))),
            }
        }
    }

    fn attributes(&self, start: &BytesStart<'_>) -> Result<Vec<(String, String)>, CatalogError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.malformed(format!("invalid attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| self.malformed(format!("invalid attribute value: {}", e)))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(attributes)
    }

    fn set_once<T>(&self, slot: &mut Option<T>, value: T, element: &str) -> Result<(), CatalogError> {
        if slot.is_some() {
            return Err(self.malformed(format!("<message> has more than one <{}>", element)));
        }
        *slot = Some(value);
        Ok(())
    }

    fn next(&mut self) -> Result<Event<'a>, CatalogError> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(e) => Err(self.malformed(format!("XML syntax error: {}", e))),
        }
    }

    fn unexpected(&self, event: &Event<'_>, parent: &str) -> CatalogError {
        let found = match event {
            Event::Start(e) | Event::Empty(e) => {
                format!("element <{}>", String::from_utf8_lossy(e.name().as_ref()))
            }
            Event::End(e) => format!("closing </{}>", String::from_utf8_lossy(e.name().as_ref())),
            Event::Text(_) | Event::CData(_) => "text".to_string(),
            _ => "content".to_string(),
        };
        self.malformed(format!("unexpected {} inside <{}>", found, parent))
    }

    fn malformed(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::MalformedResource {
            origin: self.origin.to_string(),
            line: self.current_line(),
            reason: reason.into(),
        }
    }

    /// 根据读取器当前字节偏移计算行号（从 1 开始）
    fn current_line(&self) -> usize {
        let bytes = self.text.as_bytes();
        let position = (self.reader.buffer_position() as usize).min(bytes.len());
        bytes[..position].iter().filter(|&&b| b == b'\n').count() + 1
    }
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(|b| b.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
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
<context>
    <name>GeneralPage</name>
    <message>
        <location filename="../../qml/features/preferences/pages/GeneralPage.qml" line="30"/>
        <source>Language</source>
        <translation>语言</translation>
    </message>
</context>
</TS>
"#;

    fn reason_of(err: CatalogError) -> String {
        match err {
            CatalogError::MalformedResource { reason, .. } => reason,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_sample_document() {
        let doc = parse_document(SAMPLE, "sample.ts").unwrap();

        assert_eq!(doc.version, "2.1");
        assert_eq!(doc.language, "zh_CN");
        assert_eq!(doc.source_language, None);
        assert_eq!(doc.contexts.len(), 2);

        let about = &doc.contexts[0];
        assert_eq!(about.name, "AboutPage");
        assert_eq!(about.messages.len(), 2);
        assert!(about.messages[0].locations.is_empty());
        assert_eq!(about.messages[0].translation.status, TranslationStatus::Vanished);
        assert_eq!(about.messages[1].source, "Version %1");
        assert_eq!(about.messages[1].translation.text, "版本 %1");
        assert_eq!(about.messages[1].locations[0].line.as_deref(), Some("51"));
    }

    #[test]
    fn test_parse_decodes_entities_and_keeps_whitespace() {
        let text = r#"<TS version="2.1" language="zh_CN"><context><name>A</name>
<message><source> Save &amp; Copy &lt;%1&gt; </source><translation>保存&#x20;&amp;&#32;复制</translation></message>
</context></TS>"#;
        let doc = parse_document(text, "entities.ts").unwrap();
        let message = &doc.contexts[0].messages[0];
        assert_eq!(message.source, " Save & Copy <%1> ");
        assert_eq!(message.translation.text, "保存 & 复制");
    }

    #[test]
    fn test_parse_optional_message_fields() {
        let text = r#"<TS version="2.1" language="zh_CN" sourcelanguage="en_US">
<context>
    <name>PinWindow</name>
    <message>
        <location filename="a.qml"/>
        <location filename="b.qml" line="7"/>
        <source>Close</source>
        <comment>window action</comment>
        <extracomment>Shown in the pin window menu</extracomment>
        <translatorcomment>keep short</translatorcomment>
        <translation type="unfinished"/>
    </message>
    <message>
        <source>Copy</source>
    </message>
</context>
</TS>"#;
        let doc = parse_document(text, "fields.ts").unwrap();
        assert_eq!(doc.source_language.as_deref(), Some("en_US"));

        let close = &doc.contexts[0].messages[0];
        assert_eq!(close.locations.len(), 2);
        assert_eq!(close.locations[0].filename.as_deref(), Some("a.qml"));
        assert_eq!(close.locations[0].line, None);
        assert_eq!(close.comment.as_deref(), Some("window action"));
        assert_eq!(close.extra_comment.as_deref(), Some("Shown in the pin window menu"));
        assert_eq!(close.translator_comment.as_deref(), Some("keep short"));
        assert_eq!(close.translation.status, TranslationStatus::Unfinished);
        assert_eq!(close.translation.text, "");

        let copy = &doc.contexts[0].messages[1];
        assert_eq!(copy.translation.status, TranslationStatus::Unfinished);
    }

    #[test]
    fn test_parse_lupdate_side_fields() {
        let text = r#"<TS version="2.1" language="zh_CN">
<context>
    <name>SettingsPage</name>
    <message>
        <source>Save to folder</source>
        <oldsource>Save to directory</oldsource>
        <comment>button</comment>
        <oldcomment>action</oldcomment>
        <translation type="unfinished">保存到目录</translation>
        <userdata>id-42</userdata>
        <extra-po-flags>c-format</extra-po-flags>
        <extra-po-msgid_plural/>
    </message>
</context>
</TS>"#;
        let doc = parse_document(text, "side.ts").unwrap();
        let message = &doc.contexts[0].messages[0];
        assert_eq!(message.old_source.as_deref(), Some("Save to directory"));
        assert_eq!(message.comment.as_deref(), Some("button"));
        assert_eq!(message.old_comment.as_deref(), Some("action"));
        assert_eq!(message.user_data.as_deref(), Some("id-42"));
        assert_eq!(
            message.extras,
            vec![
                ExtraField {
                    name: "po-flags".to_string(),
                    text: "c-format".to_string(),
                },
                ExtraField {
                    name: "po-msgid_plural".to_string(),
                    text: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_relative_locations() {
        let text = r#"<TS version="2.1" language="zh_CN">
<context>
    <name>PinWindow</name>
    <message>
        <location filename="../qml/PinWindow.qml" line="+30"/>
        <location line="-5"/>
        <source>Close</source>
        <translation>关闭</translation>
    </message>
</context>
</TS>"#;
        let doc = parse_document(text, "relative.ts").unwrap();
        let locations = &doc.contexts[0].messages[0].locations;
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].filename.as_deref(), Some("../qml/PinWindow.qml"));
        assert_eq!(locations[0].line.as_deref(), Some("+30"));
        assert_eq!(locations[1].filename, None);
        assert_eq!(locations[1].line.as_deref(), Some("-5"));
        assert!(locations[1].is_relative());
    }

    #[test]
    fn test_parse_cdata_text() {
        let text = r#"<TS language="zh_CN"><context><name>A</name><message><source><![CDATA[a < b]]></source><translation>甲</translation></message></context></TS>"#;
        let doc = parse_document(text, "cdata.ts").unwrap();
        assert_eq!(doc.version, DEFAULT_TS_VERSION);
        assert_eq!(doc.contexts[0].messages[0].source, "a < b");
    }

    #[rstest]
    #[case("", "missing <TS> root element")]
    #[case("<TS version=\"2.1\"></TS>", "<TS> is missing the language attribute")]
    #[case("<TS language=\"zh_CN\"><context></context></TS>", "<context> is missing <name>")]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message><translation>x</translation></message></context></TS>",
        "<message> is missing <source>"
    )]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message><source>a</source><source>b</source></message></context></TS>",
        "<message> has more than one <source>"
    )]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message><source>a</source><translation type=\"done\">x</translation></message></context></TS>",
        "unknown translation type 'done'"
    )]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message numerus=\"yes\"><source>%n file(s)</source></message></context></TS>",
        "plural (numerus) messages are not supported"
    )]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message><source>a</source><bogus>b</bogus></message></context></TS>",
        "unsupported element <bogus> inside <message>"
    )]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message><source>a</source><extra->b</extra-></message></context></TS>",
        "unsupported element <extra-> inside <message>"
    )]
    #[case(
        "<TS language=\"zh_CN\"><context><name>A</name><message><source>a</source><extra-po-flags>x</extra-po-flags><extra-po-flags>y</extra-po-flags></message></context></TS>",
        "<message> has more than one <extra-po-flags>"
    )]
    fn test_parse_rejects_malformed(#[case] text: &str, #[case] expected: &str) {
        let err = parse_document(text, "broken.ts").unwrap_err();
        assert_eq!(reason_of(err), expected);
    }

    #[test]
    fn test_malformed_error_reports_origin_and_line() {
        let text = "<TS language=\"zh_CN\">\n<context>\n<name>A</name>\n<bogus/>\n</context>\n</TS>\n";
        match parse_document(text, "resources/i18n/zh_CN.ts").unwrap_err() {
            CatalogError::MalformedResource { origin, line, reason } => {
                assert_eq!(origin, "resources/i18n/zh_CN.ts");
                assert_eq!(line, 4);
                assert_eq!(reason, "unexpected element <bogus> inside <context>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_document_is_malformed() {
        let text = "<TS language=\"zh_CN\"><context><name>A</name>";
        let err = parse_document(text, "truncated.ts").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedResource { .. }));
    }

    #[test]
    fn test_mismatched_tags_are_syntax_errors() {
        let text = "<TS language=\"zh_CN\"><context><name>A</context></TS>";
        let reason = reason_of(parse_document(text, "bad.ts").unwrap_err());
        assert!(reason.starts_with("XML syntax error"), "{reason}");
    }
}

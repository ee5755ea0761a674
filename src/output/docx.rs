//! DOCX Writer
//!
//! 段落列をWordprocessingMLパッケージ（ZIP）として書き出す。
//! 出力はタイムスタンプを含まず、同じ入力からは同じバイト列が得られます。

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PautaError;
use crate::types::{Alignment, FormattedBlock, TextRun};

/// Wordが受け付けるフォントサイズの上限（半ポイント）
pub(crate) const MAX_FONT_SIZE: u32 = 3276;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
    <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

/// DOCX形式のフォーマッター
#[derive(Debug, Clone)]
pub struct DocxFormatter {
    /// 既定フォント（全ランに適用）
    font: String,
    /// 既定のフォントサイズ（サイズ未指定のランに適用）
    default_size: u32,
}

impl DocxFormatter {
    pub fn new(font: impl Into<String>, default_size: u32) -> Self {
        Self {
            font: font.into(),
            default_size,
        }
    }

    /// 段落列をDOCXのバイト列に変換
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - DOCXファイルの内容
    /// * `Err(PautaError::Render)` - サポートされていないスタイルや文字を含む場合
    pub fn render(&self, blocks: &[FormattedBlock]) -> Result<Vec<u8>, PautaError> {
        self.validate(blocks)?;

        let document = self.document_xml(blocks)?;
        let styles = self.styles_xml()?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, &[u8]); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
            ("word/document.xml", document.as_slice()),
            ("word/styles.xml", styles.as_slice()),
        ];

        for (name, content) in parts {
            zip.start_file(name, options).map_err(zip_error)?;
            zip.write_all(content)?;
        }

        let bytes = zip.finish().map_err(zip_error)?.into_inner();
        log::debug!(
            "rendered {} paragraphs into {} bytes of DOCX",
            blocks.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// スタイルの検証
    fn validate(&self, blocks: &[FormattedBlock]) -> Result<(), PautaError> {
        if self.font.trim().is_empty() {
            return Err(PautaError::Render("font name is empty".to_string()));
        }
        check_size(self.default_size)?;

        for (idx, block) in blocks.iter().enumerate() {
            for run in &block.runs {
                if let Some(size) = run.size {
                    check_size(size)?;
                }
                if let Some(c) = run.text.chars().find(|c| !is_xml_char(*c)) {
                    return Err(PautaError::Render(format!(
                        "paragraph {} contains a character not allowed in XML: U+{:04X}",
                        idx, c as u32
                    )));
                }
            }
        }
        Ok(())
    }

    fn document_xml(&self, blocks: &[FormattedBlock]) -> Result<Vec<u8>, PautaError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("w:document");
        root.push_attribute(("xmlns:w", WORDML_NS));
        writer.write_event(Event::Start(root))?;
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;

        for block in blocks {
            self.write_paragraph(&mut writer, block)?;
        }

        write_section(&mut writer)?;

        writer.write_event(Event::End(BytesEnd::new("w:body")))?;
        writer.write_event(Event::End(BytesEnd::new("w:document")))?;
        Ok(writer.into_inner())
    }

    fn write_paragraph(
        &self,
        writer: &mut Writer<Vec<u8>>,
        block: &FormattedBlock,
    ) -> Result<(), PautaError> {
        writer.write_event(Event::Start(BytesStart::new("w:p")))?;
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        if block.spacing.before.is_some() || block.spacing.after.is_some() {
            let before = block.spacing.before.map(|v| v.to_string());
            let after = block.spacing.after.map(|v| v.to_string());
            let mut spacing = BytesStart::new("w:spacing");
            if let Some(ref before) = before {
                spacing.push_attribute(("w:before", before.as_str()));
            }
            if let Some(ref after) = after {
                spacing.push_attribute(("w:after", after.as_str()));
            }
            writer.write_event(Event::Empty(spacing))?;
        }

        if block.alignment == Alignment::Center {
            write_val(writer, "w:jc", "center")?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

        for run in &block.runs {
            self.write_run(writer, run)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }

    fn write_run(&self, writer: &mut Writer<Vec<u8>>, run: &TextRun) -> Result<(), PautaError> {
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        let mut fonts = BytesStart::new("w:rFonts");
        fonts.push_attribute(("w:ascii", self.font.as_str()));
        fonts.push_attribute(("w:hAnsi", self.font.as_str()));
        fonts.push_attribute(("w:cs", self.font.as_str()));
        writer.write_event(Event::Empty(fonts))?;

        if run.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
            writer.write_event(Event::Empty(BytesStart::new("w:bCs")))?;
        }
        if run.italic {
            writer.write_event(Event::Empty(BytesStart::new("w:i")))?;
            writer.write_event(Event::Empty(BytesStart::new("w:iCs")))?;
        }
        if let Some(color) = run.color {
            write_val(writer, "w:color", &color.to_hex())?;
        }
        if let Some(size) = run.size {
            let size = size.to_string();
            write_val(writer, "w:sz", &size)?;
            write_val(writer, "w:szCs", &size)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

        let mut text = BytesStart::new("w:t");
        text.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(text))?;
        writer.write_event(Event::Text(BytesText::new(&run.text)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;

        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        Ok(())
    }

    /// 既定フォントとサイズを定義するstyles.xml
    fn styles_xml(&self) -> Result<Vec<u8>, PautaError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("w:styles");
        root.push_attribute(("xmlns:w", WORDML_NS));
        writer.write_event(Event::Start(root))?;
        writer.write_event(Event::Start(BytesStart::new("w:docDefaults")))?;
        writer.write_event(Event::Start(BytesStart::new("w:rPrDefault")))?;
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        let mut fonts = BytesStart::new("w:rFonts");
        fonts.push_attribute(("w:ascii", self.font.as_str()));
        fonts.push_attribute(("w:hAnsi", self.font.as_str()));
        fonts.push_attribute(("w:cs", self.font.as_str()));
        writer.write_event(Event::Empty(fonts))?;
        let size = self.default_size.to_string();
        write_val(&mut writer, "w:sz", &size)?;
        write_val(&mut writer, "w:szCs", &size)?;

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        writer.write_event(Event::End(BytesEnd::new("w:rPrDefault")))?;
        writer.write_event(Event::End(BytesEnd::new("w:docDefaults")))?;
        writer.write_event(Event::End(BytesEnd::new("w:styles")))?;
        Ok(writer.into_inner())
    }
}

/// A4縦、余白1インチのセクション設定
fn write_section(writer: &mut Writer<Vec<u8>>) -> Result<(), PautaError> {
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

    let mut page_size = BytesStart::new("w:pgSz");
    page_size.push_attribute(("w:w", "11906"));
    page_size.push_attribute(("w:h", "16838"));
    writer.write_event(Event::Empty(page_size))?;

    let mut margins = BytesStart::new("w:pgMar");
    for (name, value) in [
        ("w:top", "1440"),
        ("w:right", "1440"),
        ("w:bottom", "1440"),
        ("w:left", "1440"),
        ("w:header", "708"),
        ("w:footer", "708"),
        ("w:gutter", "0"),
    ] {
        margins.push_attribute((name, value));
    }
    writer.write_event(Event::Empty(margins))?;

    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}

fn write_val(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), PautaError> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("w:val", value));
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn check_size(size: u32) -> Result<(), PautaError> {
    if size == 0 || size > MAX_FONT_SIZE {
        return Err(PautaError::Render(format!(
            "font size {} is not supported (1-{} half-points)",
            size, MAX_FONT_SIZE
        )));
    }
    Ok(())
}

/// XML 1.0で使用可能な文字か
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn zip_error(e: zip::result::ZipError) -> PautaError {
    PautaError::Zip(e.to_string())
}

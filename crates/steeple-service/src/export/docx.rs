//! Minimal WordprocessingML package: content types, package relationships
//! and a single `word/document.xml` using direct run formatting.

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ExportDocument, ExportFormat, export_failed};
use crate::error::ServiceResult;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Half-points, as WordprocessingML measures font sizes.
const TITLE_HALF_POINTS: &str = "36";
const HEADING_HALF_POINTS: &str = "26";

struct Run<'a> {
    text: &'a str,
    bold: bool,
    size: Option<&'static str>,
}

impl<'a> Run<'a> {
    const fn plain(text: &'a str) -> Self {
        Self {
            text,
            bold: false,
            size: None,
        }
    }

    const fn bold(text: &'a str) -> Self {
        Self {
            text,
            bold: true,
            size: None,
        }
    }

    const fn sized(self, size: &'static str) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn write_run(writer: &mut XmlWriter, run: &Run<'_>) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    if run.bold || run.size.is_some() {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if run.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if let Some(size) = run.size {
            writer.write_event(Event::Empty(
                BytesStart::new("w:sz").with_attributes([("w:val", size)]),
            ))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    writer.write_event(Event::Start(
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(run.text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn write_paragraph(writer: &mut XmlWriter, runs: &[Run<'_>]) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    for run in runs {
        write_run(writer, run)?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn document_xml(document: &ExportDocument) -> std::io::Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", WORDML_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    write_paragraph(
        &mut writer,
        &[Run::bold(&document.title).sized(TITLE_HALF_POINTS)],
    )?;
    if let Some(subtitle) = &document.subtitle {
        write_paragraph(&mut writer, &[Run::plain(subtitle)])?;
    }
    if document.entries.is_empty() {
        write_paragraph(&mut writer, &[Run::plain("No records selected.")])?;
    }

    for entry in &document.entries {
        write_paragraph(
            &mut writer,
            &[Run::bold(&entry.heading).sized(HEADING_HALF_POINTS)],
        )?;
        for field in &entry.fields {
            let label = format!("{}: ", field.label);
            write_paragraph(&mut writer, &[Run::bold(&label), Run::plain(&field.value)])?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner().into_inner())
}

/// ## Summary
/// Renders the document as a `.docx` package.
///
/// ## Errors
/// Returns `ExportFailed` if the XML or the zip container cannot be written.
pub fn render(document: &ExportDocument) -> ServiceResult<Vec<u8>> {
    let body = document_xml(document).map_err(|e| export_failed(ExportFormat::Word, e))?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts: [(&str, &[u8]); 3] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", &body),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options)
            .map_err(|e| export_failed(ExportFormat::Word, e))?;
        zip.write_all(bytes)
            .map_err(|e| export_failed(ExportFormat::Word, e))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| export_failed(ExportFormat::Word, e))?;
    Ok(cursor.into_inner())
}

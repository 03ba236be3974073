//! PDF rendering with the standard Helvetica faces, so no fonts are embedded.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

use super::{ExportDocument, ExportFormat, export_failed};
use crate::error::ServiceResult;

/// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;

const TITLE_SIZE: i64 = 18;
const HEADING_SIZE: i64 = 13;
const BODY_SIZE: i64 = 10;

/// Characters per body line; Helvetica at 10pt averages about five points a glyph.
const WRAP_WIDTH: usize = 95;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Heading,
    Body,
}

impl Style {
    const fn font(self) -> &'static str {
        match self {
            Self::Title | Self::Heading => BOLD_FONT,
            Self::Body => REGULAR_FONT,
        }
    }

    const fn size(self) -> i64 {
        match self {
            Self::Title => TITLE_SIZE,
            Self::Heading => HEADING_SIZE,
            Self::Body => BODY_SIZE,
        }
    }

    /// Vertical space the line occupies, including the gap above it.
    const fn advance(self) -> i64 {
        match self {
            Self::Title => 28,
            Self::Heading => 22,
            Self::Body => 14,
        }
    }
}

struct Line {
    style: Style,
    text: String,
}

fn layout(document: &ExportDocument) -> Vec<Line> {
    let mut lines = vec![Line {
        style: Style::Title,
        text: document.title.clone(),
    }];
    if let Some(subtitle) = &document.subtitle {
        lines.push(Line {
            style: Style::Body,
            text: subtitle.clone(),
        });
    }
    if document.entries.is_empty() {
        lines.push(Line {
            style: Style::Body,
            text: "No records selected.".to_string(),
        });
    }

    for entry in &document.entries {
        lines.push(Line {
            style: Style::Heading,
            text: entry.heading.clone(),
        });
        for field in &entry.fields {
            let text = format!("{}: {}", field.label, field.value);
            lines.extend(wrap(&text, WRAP_WIDTH).into_iter().map(|text| Line {
                style: Style::Body,
                text,
            }));
        }
    }
    lines
}

/// Greedy word wrap. Words longer than the width are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split = word
                    .char_indices()
                    .nth(width)
                    .map_or(word.len(), |(index, _)| index);
                let rest = word.split_off(split);
                lines.push(word);
                word = rest;
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Encodes text for the WinAnsi simple fonts. Characters outside Latin-1
/// are replaced with their closest ASCII form or `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => b'\'',
            '\u{201C}' | '\u{201D}' => b'"',
            '\u{2013}' | '\u{2014}' => b'-',
            c if u32::from(c) < 0x80 || (0xA0..=0xFF).contains(&u32::from(c)) => {
                u8::try_from(u32::from(c)).unwrap_or(b'?')
            }
            _ => b'?',
        })
        .collect()
}

fn paginate(lines: Vec<Line>) -> Vec<Vec<(Line, i64)>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = top;

    for line in lines {
        let advance = line.style.advance();
        if y - advance < MARGIN && !page.is_empty() {
            pages.push(std::mem::take(&mut page));
            y = top;
        }
        y -= advance;
        page.push((line, y));
    }
    pages.push(page);
    pages
}

fn page_content(lines: &[(Line, i64)]) -> Content {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for (line, y) in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.style.font().into(), line.style.size().into()],
        ));
        operations.push(Operation::new("Td", vec![MARGIN.into(), (*y).into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// ## Summary
/// Renders the document as a paginated A4 PDF.
///
/// ## Errors
/// Returns `ExportFailed` if a content stream or the file cannot be encoded.
pub fn render(document: &ExportDocument) -> ServiceResult<Vec<u8>> {
    let fail = |e: lopdf::Error| export_failed(ExportFormat::Pdf, e);

    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();
    let regular_id = pdf.add_object(font("Helvetica"));
    let bold_id = pdf.add_object(font("Helvetica-Bold"));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<ObjectId> = Vec::new();
    for page in paginate(layout(document)) {
        let content = page_content(&page).encode().map_err(fail)?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id);
    }

    let count = i64::try_from(kids.len()).map_err(|e| export_failed(ExportFormat::Pdf, e))?;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids.into_iter().map(Object::from).collect::<Vec<_>>(),
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes).map_err(|e| export_failed(ExportFormat::Pdf, e))?;
    Ok(bytes)
}

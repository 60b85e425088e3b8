//! Section model to PDF.
//!
//! Rendering is split in two: [`layout`] places every text row on a page, and
//! [`write_pdf`] serialises the placed rows with lopdf. Only the built-in
//! Helvetica face is used, so nothing is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat};

use super::section::Section;
use super::wrap::wrap_line;
use super::RenderError;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const LEFT_MARGIN: f32 = 60.0;
pub const TOP_Y: f32 = 740.0;
pub const LEADING: f32 = 16.0;
pub const BODY_SIZE: f32 = 11.0;
pub const SECTION_TITLE_SIZE: f32 = 12.0;
pub const DOCUMENT_TITLE_SIZE: f32 = 14.0;
pub const WRAP_CHARS: usize = 110;

/// A section starting below this starts on a fresh page.
pub const SECTION_MIN_Y: f32 = 80.0;
/// No row is drawn below this.
pub const ROW_MIN_Y: f32 = 60.0;

const TITLE_GAP: f32 = 10.0;
const SECTION_TITLE_GAP: f32 = 6.0;
const SECTION_GAP: f32 = 10.0;
const FONT_KEY: &str = "F1";

/// Options controlling the page header.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub title: Option<String>,
}

/// One row of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: String,
}

/// Rows placed on a single page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
}

struct Cursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: TOP_Y,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = TOP_Y;
    }

    fn draw_wrapped(&mut self, text: &str, size: f32) {
        for row in wrap_line(text, WRAP_CHARS) {
            if self.y < ROW_MIN_Y {
                self.new_page();
            }
            if let Some(page) = self.pages.last_mut() {
                page.runs.push(TextRun {
                    x: LEFT_MARGIN,
                    y: self.y,
                    size,
                    text: row,
                });
            }
            self.y -= LEADING;
        }
    }
}

/// Place the title and every section row, adding pages on overflow.
pub fn layout(sections: &[Section], options: &RenderOptions) -> Vec<PageLayout> {
    let mut cursor = Cursor::new();

    if let Some(title) = options.title.as_deref().filter(|t| !t.is_empty()) {
        cursor.draw_wrapped(title, DOCUMENT_TITLE_SIZE);
        cursor.y -= TITLE_GAP;
    }

    for section in sections {
        // A section title never sits alone at the bottom of a page.
        let title_drop = section
            .title
            .as_deref()
            .filter(|_| !section.lines.is_empty())
            .map(|t| wrap_line(t, WRAP_CHARS).len() as f32 * LEADING + SECTION_TITLE_GAP)
            .unwrap_or(0.0);
        if cursor.y < SECTION_MIN_Y || cursor.y - title_drop < ROW_MIN_Y {
            cursor.new_page();
        }

        if let Some(title) = section.title.as_deref() {
            cursor.draw_wrapped(title, SECTION_TITLE_SIZE);
            cursor.y -= SECTION_TITLE_GAP;
        }

        for line in &section.lines {
            cursor.draw_wrapped(line, BODY_SIZE);
        }

        cursor.y -= SECTION_GAP;
    }

    cursor.pages
}

/// Encode text for a WinAnsi simple font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{2030}' => 0x89,
            '\u{2039}' => 0x8B,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            '\u{203A}' => 0x9B,
            '\t' => b' ',
            c if (c as u32) >= 0x20 && (c as u32) < 0x7F => c as u8,
            c if (c as u32) >= 0xA0 && (c as u32) <= 0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.runs.len() * 5);
    for run in &page.runs {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![FONT_KEY.into(), run.size.into()]));
        ops.push(Operation::new("Td", vec![run.x.into(), run.y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&run.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Serialise laid-out pages into PDF bytes.
pub fn write_pdf(pages: &[PageLayout]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_KEY => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(lopdf::Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| RenderError::Save(e.to_string()))?;
    Ok(out)
}

/// Lay out and serialise `sections` in one step.
pub fn render(sections: &[Section], options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let pages = layout(sections, options);
    write_pdf(&pages)
}

//! PDF rendering with `lopdf` and the standard Type 1 fonts.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use super::{DocumentReport, NO_INTERACTIONS};
use crate::{Error, Result};

/// A4 in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const LINE_SPACING: f32 = 1.3;
const TAB_WIDTH: usize = 4;

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 16.0;
const META_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;
const MONO_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
    Mono,
}

impl Font {
    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Mono];

    const fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Mono => "F3",
        }
    }

    const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Mono => "Courier",
        }
    }

    /// Average glyph advance as a fraction of the font size. The proportional
    /// fonts use their uppercase average so all-caps text stays inside the
    /// margins.
    const fn average_advance(self) -> f32 {
        match self {
            Self::Regular => 0.68,
            Self::Bold => 0.7,
            Self::Mono => 0.6,
        }
    }

    fn chars_per_line(self, size: f32) -> usize {
        ((CONTENT_WIDTH / (size * self.average_advance())) as usize).max(1)
    }
}

/// Renders the PDF report.
pub(super) fn render(report: &DocumentReport<'_>) -> Result<Vec<u8>> {
    let document = report.document;
    let mut layout = PageLayout::new();

    layout.paragraph(
        Font::Bold,
        TITLE_SIZE,
        &format!("Report for document: {}", document.file_name),
    );
    layout.gap(META_SIZE);
    layout.paragraph(Font::Regular, META_SIZE, &format!("Status: {}", document.status));
    layout.paragraph(
        Font::Regular,
        META_SIZE,
        &format!("Created at: {}", report.created_at()),
    );
    layout.gap(2.0 * META_SIZE);

    layout.heading("Extracted text (OCR)");
    layout.paragraph(Font::Mono, MONO_SIZE, report.extracted_text());
    layout.gap(2.0 * META_SIZE);

    layout.heading("AI interactions");
    if report.interactions.is_empty() {
        layout.paragraph(Font::Regular, BODY_SIZE, NO_INTERACTIONS);
    }

    for interaction in report.interactions {
        layout.gap(BODY_SIZE);
        layout.paragraph(Font::Bold, BODY_SIZE, "Question:");
        layout.paragraph(Font::Regular, BODY_SIZE, &interaction.prompt);
        layout.gap(BODY_SIZE / 2.0);
        layout.paragraph(Font::Bold, BODY_SIZE, "Answer:");
        layout.paragraph(Font::Regular, BODY_SIZE, &interaction.answer);
    }

    let title = format!("Report for document: {}", document.file_name);
    write_document(&title, layout.finish())
}

/// Flows lines top to bottom, starting a new page when the current one is full.
struct PageLayout {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    cursor_y: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.cursor_y = PAGE_HEIGHT - MARGIN;
    }

    fn at_page_top(&self) -> bool {
        self.cursor_y >= PAGE_HEIGHT - MARGIN
    }

    /// Moves the cursor to the next line of `height`, breaking the page if needed.
    fn advance(&mut self, height: f32) {
        if self.cursor_y - height < MARGIN {
            self.new_page();
        }
        self.cursor_y -= height;
    }

    fn gap(&mut self, height: f32) {
        self.cursor_y = (self.cursor_y - height).max(MARGIN);
    }

    fn line(&mut self, font: Font, size: f32, text: &str) {
        let height = size * LINE_SPACING;

        // A blank line that fills the page ends it, and blank lines at the top
        // of a following page are dropped.
        if text.is_empty() {
            if self.cursor_y - height < MARGIN {
                self.new_page();
            } else if self.pages.is_empty() || !self.at_page_top() {
                self.cursor_y -= height;
            }
            return;
        }

        self.advance(height);

        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
            Operation::new("Td", vec![MARGIN.into(), self.cursor_y.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Writes `text`, honoring its line breaks and wrapping long lines.
    fn paragraph(&mut self, font: Font, size: f32, text: &str) {
        let width = font.chars_per_line(size);
        for source_line in text.lines() {
            for line in wrap_line(source_line, width) {
                self.line(font, size, &line);
            }
        }
    }

    /// Section title followed by a thin gray rule.
    fn heading(&mut self, title: &str) {
        self.paragraph(Font::Bold, HEADING_SIZE, title);
        self.advance(6.0);
        self.current.extend([
            Operation::new("rg", vec![0.8_f32.into(), 0.8_f32.into(), 0.8_f32.into()]),
            Operation::new(
                "re",
                vec![
                    MARGIN.into(),
                    (self.cursor_y + 3.0).into(),
                    CONTENT_WIDTH.into(),
                    1_i64.into(),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("rg", vec![0_i64.into(), 0_i64.into(), 0_i64.into()]),
        ]);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

/// Splits one line into chunks of at most `width` characters, breaking at
/// spaces where possible. An empty line yields one empty chunk.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let line = line.replace('\t', &" ".repeat(TAB_WIDTH));
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        let separator = usize::from(current_len > 0);

        if current_len + separator + word_len <= width {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_len += separator + word_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        let mut chars = word.chars().peekable();
        while chars.peek().is_some() {
            let piece: String = chars.by_ref().take(width).collect();
            let piece_len = piece.chars().count();
            if piece_len == width {
                chunks.push(piece);
            } else {
                current = piece;
                current_len = piece_len;
            }
        }
    }

    if current_len > 0 || chunks.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Maps text to single-byte WinAnsi codes; characters outside Latin-1
/// become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

fn write_document(title: &str, pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|err| Error::internal("report", format!("cannot encode page: {err}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0_i64.into(),
        0_i64.into(),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal("Lector"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|err| Error::internal("report", format!("cannot write PDF: {err}")))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use lector_postgres::types::DocumentStatus;

    use super::*;
    use crate::service::report::tests::{document, interaction};

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn short_report_fits_one_page() {
        let document = document(DocumentStatus::Completed, Some("Total: 42.00"));
        let interactions = [interaction("What is the total?", "42.00")];

        let bytes = render(&DocumentReport::new(&document, &interactions)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn long_text_is_paginated() {
        let text = "Lorem ipsum dolor sit amet.\n".repeat(200);
        let document = document(DocumentStatus::Completed, Some(&text));

        let bytes = render(&DocumentReport::new(&document, &[])).unwrap();
        assert!(page_count(&bytes) > 1);
    }

    #[test]
    fn words_wrap_at_spaces() {
        assert_eq!(wrap_line("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_line("", 10), vec![""]);
        assert_eq!(wrap_line("short", 10), vec!["short"]);
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("ab abcdefgh x", 4), vec!["ab", "abcd", "efgh", "x"]);
    }

    #[test]
    fn tabs_become_spaces() {
        assert_eq!(wrap_line("a\tb", 20), vec!["a    b"]);
    }

    #[test]
    fn non_latin1_characters_are_replaced() {
        assert_eq!(encode_win_ansi("Olá €5 ✓"), b"Ol\xE1 ?5 ?".to_vec());
    }

    /// Baselines of every text object, per page.
    fn text_positions(pages: &[Vec<Operation>]) -> Vec<Vec<f32>> {
        pages
            .iter()
            .map(|page| {
                page.iter()
                    .filter(|op| op.operator == "Td")
                    .map(|op| op.operands[1].as_float().unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn blank_runs_across_a_page_break_keep_text_on_the_page() {
        let mut layout = PageLayout::new();
        for _ in 0..50 {
            layout.line(Font::Mono, MONO_SIZE, "filler");
        }
        for _ in 0..100 {
            layout.line(Font::Mono, MONO_SIZE, "");
        }
        layout.line(Font::Mono, MONO_SIZE, "LAST LINE");

        let pages = layout.finish();
        let positions = text_positions(&pages);
        assert_eq!(positions.iter().map(Vec::len).sum::<usize>(), 51);

        for (page, ys) in positions.iter().enumerate() {
            for &y in ys {
                assert!(y >= MARGIN, "page {page}: baseline {y} below the margin");
                assert!(y <= PAGE_HEIGHT - MARGIN, "page {page}: baseline {y} above the margin");
            }
        }
    }

    #[test]
    fn blank_lines_are_dropped_at_the_top_of_a_new_page() {
        let mut layout = PageLayout::new();
        for _ in 0..200 {
            layout.line(Font::Regular, BODY_SIZE, "");
        }
        layout.line(Font::Regular, BODY_SIZE, "after");

        let pages = layout.finish();
        assert_eq!(pages.len(), 2);

        let positions = text_positions(&pages);
        let last = positions.last().and_then(|ys| ys.last()).copied().unwrap();
        assert!(last >= MARGIN);
        assert_eq!(last, PAGE_HEIGHT - MARGIN - BODY_SIZE * LINE_SPACING);
    }

    /// Uppercase advance widths from the Adobe core font metrics, per 1000 units.
    fn uppercase_width(font: Font, c: char) -> f32 {
        const HELVETICA: [u16; 26] = [
            667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
            722, 667, 611, 722, 667, 944, 667, 667, 611,
        ];
        const HELVETICA_BOLD: [u16; 26] = [
            722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778,
            722, 667, 611, 722, 667, 944, 667, 667, 611,
        ];

        let index = (c as u8 - b'A') as usize;
        let units = match font {
            Font::Regular => HELVETICA[index],
            Font::Bold => HELVETICA_BOLD[index],
            Font::Mono => 600,
        };
        f32::from(units) / 1000.0
    }

    #[test]
    fn all_caps_lines_fit_the_margins() {
        for font in Font::ALL {
            for size in [TITLE_SIZE, HEADING_SIZE, META_SIZE, BODY_SIZE, MONO_SIZE] {
                let width = font.chars_per_line(size);
                let line_width: f32 = ('A'..='Z')
                    .cycle()
                    .take(width)
                    .map(|c| uppercase_width(font, c) * size)
                    .sum();

                assert!(
                    line_width <= CONTENT_WIDTH,
                    "{font:?} at {size}pt: {width} caps measure {line_width}"
                );
            }
        }
    }
}

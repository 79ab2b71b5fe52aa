//! Writes the letter sheet into a one-page A4 PDF.
//!
//! The whole sheet is drawn once into a Form XObject (white background plus
//! text), then placed on the page with a single `cm` transform from
//! [`fit_to_page`]. Text stays selectable.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use thiserror::Error;

use crate::export::fit::{fit_to_page, Placement, A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::export::sheet::{default_sheet_style, layout_sheet, Sheet};

const FONT_RESOURCE: &str = "F1";
const SHEET_RESOURCE: &str = "Sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("pdf write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Lays out `letter` and renders it as PDF bytes.
pub fn render_letter_pdf(letter: &str) -> Result<Vec<u8>, ExportError> {
    let sheet = layout_sheet(letter, &default_sheet_style());
    let placement = fit_to_page(sheet.width, sheet.height, A4_WIDTH_PT, A4_HEIGHT_PT);
    write_pdf(&sheet, placement)
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

fn sheet_content(sheet: &Sheet) -> Content {
    let mut operations = vec![
        Operation::new("q", vec![]),
        Operation::new("rg", vec![real(1.0), real(1.0), real(1.0)]),
        Operation::new(
            "re",
            vec![real(0.0), real(0.0), real(sheet.width), real(sheet.height)],
        ),
        Operation::new("f", vec![]),
        Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), real(sheet.style.font_size_px)],
        ),
    ];

    for line in &sheet.lines {
        // Sheet y grows downward; PDF y grows upward.
        let y = sheet.height - line.baseline_y;
        operations.push(Operation::new(
            "Tm",
            vec![real(1.0), real(0.0), real(0.0), real(1.0), real(line.x), real(y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    operations.push(Operation::new("Q", vec![]));
    Content { operations }
}

fn page_content(placement: Placement) -> Content {
    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(placement.scale),
                    real(0.0),
                    real(0.0),
                    real(placement.scale),
                    real(placement.x),
                    real(placement.y),
                ],
            ),
            Operation::new("Do", vec![SHEET_RESOURCE.into()]),
            Operation::new("Q", vec![]),
        ],
    }
}

fn write_pdf(sheet: &Sheet, placement: Placement) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => sheet.style.font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });

    let sheet_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![real(0.0), real(0.0), real(sheet.width), real(sheet.height)],
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_RESOURCE => font_id },
            },
        },
        sheet_content(sheet).encode()?,
    );
    let sheet_id = doc.add_object(sheet_stream);

    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        page_content(placement).encode()?,
    ));

    let media_box = vec![real(0.0), real(0.0), real(A4_WIDTH_PT), real(A4_HEIGHT_PT)];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box.clone(),
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { SHEET_RESOURCE => sheet_id },
        },
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::from(page_id)],
        "Count" => Object::Integer(1),
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

/// Maps text onto WinAnsiEncoding for the standard Type1 fonts.
/// Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\t' => b' ',
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_box(doc: &Document) -> Vec<f32> {
        let pages = doc.get_pages();
        let page_id = *pages.values().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        page.get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect()
    }

    #[test]
    fn test_render_produces_single_a4_page() {
        let bytes = render_letter_pdf("Ada Lovelace\n\nDear Hiring Manager,\n\nSincerely,\nAda").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let mb = media_box(&doc);
        assert!((mb[2] - A4_WIDTH_PT).abs() < 1e-2);
        assert!((mb[3] - A4_HEIGHT_PT).abs() < 1e-2);
    }

    #[test]
    fn test_long_letter_still_one_page() {
        let letter = "I bring years of distributed systems experience to this role.\n".repeat(120);
        let bytes = render_letter_pdf(&letter).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_empty_letter_renders() {
        let bytes = render_letter_pdf("").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Hi (there)"), b"Hi (there)".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("\u{2019}\u{2014}"), vec![0x92, 0x97]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}

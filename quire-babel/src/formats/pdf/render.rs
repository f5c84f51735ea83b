//! PDF writer: draws a [`Layout`] onto Letter pages with lopdf.

use super::layout::{Face, Layout, Rgb};
use super::{CONTENT_HEIGHT, CONTENT_WIDTH, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::FormatError;
use crate::pagination::{paginate, visible_slice};
use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};

/// Write `layout` as a PDF document and return its bytes.
pub fn render_pdf(layout: &Layout, title: &str) -> Result<Vec<u8>, FormatError> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in Face::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let offsets = paginate(layout.total_height, CONTENT_HEIGHT);
    log::debug!(
        "pdf layout: {:.1}pt of content on {} page(s)",
        layout.total_height,
        offsets.len()
    );

    let mut kids: Vec<Object> = Vec::with_capacity(offsets.len());
    for offset in &offsets {
        let content = page_content(layout, *offset);
        let encoded = content
            .encode()
            .map_err(|e| FormatError::ConversionFailure(format!("encoding page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(PAGE_WIDTH as f32), Object::Real(PAGE_HEIGHT as f32)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal("quire"),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| FormatError::ConversionFailure(format!("writing PDF: {e}")))?;
    Ok(bytes)
}

/// Content stream for the page showing `[offset, offset + CONTENT_HEIGHT)`.
///
/// Items crossing the page edge are drawn on every page they reach, clipped
/// to the content box.
fn page_content(layout: &Layout, offset: f64) -> Content {
    // Content coordinates grow downwards; PDF user space grows upwards.
    let to_pdf_y = |y: f64| PAGE_HEIGHT - MARGIN - (y - offset);

    let mut operations = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "re",
            vec![
                real(MARGIN),
                real(MARGIN),
                real(CONTENT_WIDTH),
                real(CONTENT_HEIGHT),
            ],
        ),
        Operation::new("W", vec![]),
        Operation::new("n", vec![]),
    ];
    for rect in &layout.rects {
        let Some((top, height)) = visible_slice(rect.top, rect.height, offset, CONTENT_HEIGHT)
        else {
            continue;
        };
        operations.push(fill_color(rect.color));
        operations.push(Operation::new(
            "re",
            vec![
                real(MARGIN + rect.x),
                real(to_pdf_y(top + height)),
                real(rect.width),
                real(height),
            ],
        ));
        operations.push(Operation::new("f", vec![]));
    }

    let lines: Vec<_> = layout
        .lines
        .iter()
        .filter(|line| {
            !line.fragments.is_empty()
                && visible_slice(line.top, line.height, offset, CONTENT_HEIGHT).is_some()
        })
        .collect();
    if !lines.is_empty() {
        operations.push(Operation::new("BT", vec![]));
        for line in lines {
            for fragment in &line.fragments {
                operations.push(Operation::new(
                    "Tf",
                    vec![fragment.face.resource_name().into(), real(fragment.size)],
                ));
                operations.push(fill_color(fragment.color));
                operations.push(Operation::new(
                    "Tm",
                    vec![
                        1.into(),
                        0.into(),
                        0.into(),
                        1.into(),
                        real(MARGIN + fragment.x),
                        real(to_pdf_y(line.baseline)),
                    ],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(&fragment.text),
                        StringFormat::Literal,
                    )],
                ));
            }
        }
        operations.push(Operation::new("ET", vec![]));
    }
    operations.push(Operation::new("Q", vec![]));

    Content { operations }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn fill_color((r, g, b): Rgb) -> Operation {
    Operation::new("rg", vec![real(r), real(g), real(b)])
}

/// Encode text for a WinAnsiEncoding font. Characters outside the code page
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut substituted = 0usize;
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c as u8);
            continue;
        }
        let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        match bytes.as_ref() {
            [byte] if !had_errors => out.push(*byte),
            _ => {
                out.push(b'?');
                substituted += 1;
            }
        }
    }
    if substituted > 0 {
        log::warn!("{substituted} character(s) not representable in WinAnsiEncoding replaced with '?'");
    }
    out
}

//! Page text assembly from PDF content streams
//!
//! Walks the decoded content stream and rebuilds text lines: text-showing
//! operators append to the current line, cursor moves and `ET` end it.
//! Falls back to lopdf's built-in extraction when the walk yields nothing.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

/// Extract the text of a single page, one layout row per line.
pub(crate) fn page_text(document: &Document, number: u32, page_id: ObjectId) -> String {
    match assemble_content_text(document, page_id) {
        Some(text) if !text.trim().is_empty() => text,
        _ => document.extract_text(&[number]).unwrap_or_default(),
    }
}

fn assemble_content_text(document: &Document, page_id: ObjectId) -> Option<String> {
    let raw = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut encoding = None;

    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                push_text_operands(&mut line, encoding, &operation.operands);
            }
            "Td" | "TD" | "T*" | "ET" => flush_line(&mut lines, &mut line),
            _ => {}
        }
    }
    flush_line(&mut lines, &mut line);

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn flush_line(lines: &mut Vec<String>, line: &mut String) {
    if line.trim().is_empty() {
        line.clear();
    } else {
        lines.push(std::mem::take(line));
    }
}

fn push_text_operands(line: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                line.push_str(&Document::decode_text(encoding, bytes));
            }
            Object::Array(items) => {
                push_text_operands(line, encoding, items);
                line.push(' ');
            }
            // Large negative kerns separate columns in tabular layouts.
            Object::Integer(offset) if *offset < -100 => line.push_str("  "),
            _ => {}
        }
    }
}

use crate::error::{IngestError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph text of a DOCX file, paragraphs joined with a space.
///
/// Only the main document part is read; headers, footers and comments are
/// skipped.
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::DocxParse(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| IngestError::DocxParse(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;
    paragraphs(&xml).map(|p| p.join(" "))
}

fn paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| IngestError::DocxParse(e.to_string()))? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            // tabs and manual breaks separate words inside a run
            Event::Empty(e) if matches!(e.local_name().as_ref(), b"tab" | b"br") => current.push(' '),
            Event::Text(t) if in_text => {
                let text = t.unescape().map_err(|e| IngestError::DocxParse(e.to_string()))?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

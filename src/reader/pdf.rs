use std::path::Path;

use lopdf::{Dictionary, Document, Object};
use tracing::{debug, warn};

use super::ParsedDocument;
use super::error::{ReaderError, ReaderResult};

const FORMAT: &str = "PDF";

/// Extracts one text block per page. The first page is the author sample.
pub fn parse(path: &Path) -> ReaderResult<ParsedDocument> {
    let document = Document::load(path).map_err(|e| ReaderError::parse(FORMAT, e))?;

    let pages = document.get_pages();
    let mut blocks = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => blocks.push(text),
            Err(e) => {
                warn!(page = page_number, error = %e, "Skipping unreadable PDF page");
                blocks.push(String::new());
            }
        }
    }

    debug!(pages = blocks.len(), "Extracted PDF pages");

    let author_sections = blocks.first().cloned().into_iter().collect();

    Ok(ParsedDocument {
        title: info_title(&document),
        blocks,
        author_sections,
    })
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn info_title(document: &Document) -> Option<String> {
    let Object::String(bytes, _) = info_dictionary(document)?.get(b"Title").ok()? else {
        return None;
    };

    let title = decode_pdf_string(bytes);
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Decodes a PDF text string: UTF-16BE when it starts with a byte order mark, otherwise
/// treated as Latin-1 compatible bytes.
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

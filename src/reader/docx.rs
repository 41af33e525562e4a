use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use zip::ZipArchive;

use super::ParsedDocument;
use super::error::{ReaderError, ReaderResult};

const FORMAT: &str = "DOCX";

/// Leading paragraphs scanned for the author's name.
const AUTHOR_PARAGRAPHS: usize = 15;

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>|<w:p/>").expect("valid regex"));
static RUN_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:br/>|<w:cr/>").expect("valid regex")
});
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<dc:title[^>]*>(.*?)</dc:title>").expect("valid regex"));

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> ReaderResult<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ReaderError::parse(FORMAT, e)),
    };

    let mut buffer = String::new();
    entry
        .read_to_string(&mut buffer)
        .map_err(|e| ReaderError::parse(FORMAT, format!("failed to read {name}: {e}")))?;
    Ok(Some(buffer))
}

/// Replaces the five predefined XML entities and numeric character references.
pub(crate) fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let Some(end) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..end];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Plain text of each `<w:p>` paragraph in a WordprocessingML body.
pub(crate) fn paragraphs(document_xml: &str) -> Vec<String> {
    PARAGRAPH_RE
        .find_iter(document_xml)
        .map(|paragraph| {
            let mut text = String::new();
            for run in RUN_TEXT_RE.captures_iter(paragraph.as_str()) {
                match run.get(1) {
                    Some(t) => text.push_str(&unescape_xml(t.as_str())),
                    None if run[0].starts_with("<w:tab") => text.push('\t'),
                    None => text.push('\n'),
                }
            }
            text
        })
        .collect()
}

/// Extracts one text block per paragraph. The leading paragraphs are the author sample.
pub fn parse(bytes: &[u8]) -> ReaderResult<ParsedDocument> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ReaderError::parse(FORMAT, e))?;

    let Some(body) = read_entry(&mut archive, "word/document.xml")? else {
        return Err(ReaderError::parse(FORMAT, "missing word/document.xml"));
    };

    let blocks: Vec<String> = paragraphs(&body)
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect();

    let title = read_entry(&mut archive, "docProps/core.xml")?
        .and_then(|core| {
            TITLE_RE
                .captures(&core)
                .and_then(|c| c.get(1))
                .map(|t| unescape_xml(t.as_str()).trim().to_string())
        })
        .filter(|t| !t.is_empty());

    debug!(paragraphs = blocks.len(), "Extracted DOCX paragraphs");

    Ok(ParsedDocument {
        author_sections: blocks.iter().take(AUTHOR_PARAGRAPHS).cloned().collect(),
        blocks,
        title,
    })
}

//! Legacy Word (`application/msword`) text recovery.
//!
//! Word 97-2003 files are OLE compound documents. Instead of walking the piece table,
//! the parser recovers runs of printable text stored either as UTF-16LE or as 8-bit
//! (Windows-1252 compatible) characters, and keeps whichever encoding yields more text.

use tracing::debug;

use super::ParsedDocument;
use super::error::{ReaderError, ReaderResult};

const FORMAT: &str = "DOC";

/// Runs shorter than this are treated as binary noise.
const MIN_RUN_CHARS: usize = 12;

/// Leading characters scanned for the author's name.
const AUTHOR_SAMPLE_CHARS: usize = 1_000;

const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

fn is_text_char(c: char) -> bool {
    c == '\r' || c == '\n' || c == '\t' || (!c.is_control() && c != '\u{FFFD}')
}

fn keep_run(run: &mut String, out: &mut Vec<String>) {
    let letters = run.chars().filter(|c| c.is_alphabetic()).count();
    if run.chars().count() >= MIN_RUN_CHARS && letters * 2 >= run.chars().count() {
        out.push(run.replace('\r', "\n"));
    }
    run.clear();
}

fn utf16_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut run = String::new();

    for pair in bytes.chunks_exact(2) {
        let unit = u16::from_le_bytes([pair[0], pair[1]]);
        match char::from_u32(unit as u32).filter(|c| is_text_char(*c)) {
            Some(c) => run.push(c),
            None => keep_run(&mut run, &mut runs),
        }
    }
    keep_run(&mut run, &mut runs);

    runs
}

fn ansi_runs(bytes: &[u8]) -> Vec<String> {
    let mut runs = Vec::new();
    let mut run = String::new();

    for &byte in bytes {
        let c = byte as char;
        if is_text_char(c) && !(0x80..0xA0).contains(&byte) {
            run.push(c);
        } else {
            keep_run(&mut run, &mut runs);
        }
    }
    keep_run(&mut run, &mut runs);

    runs
}

/// Latin-script letters and digits; a misaligned UTF-16 read yields CJK code points
/// instead, so it never outweighs the aligned one.
fn text_weight(runs: &[String]) -> usize {
    runs.iter()
        .map(|r| {
            r.chars()
                .filter(|c| c.is_alphanumeric() && (*c as u32) < 0x0250)
                .count()
        })
        .sum()
}

/// Recovers the document text as one block.
pub fn parse(bytes: &[u8]) -> ReaderResult<ParsedDocument> {
    if !bytes.starts_with(&OLE_MAGIC) {
        return Err(ReaderError::parse(FORMAT, "not an OLE compound document"));
    }

    let body = &bytes[OLE_MAGIC.len()..];

    // Both byte alignments: the text stream need not start on an even offset.
    let shifted = body.get(1..).unwrap_or_default();
    let candidates = [utf16_runs(body), utf16_runs(shifted), ansi_runs(body)];
    let runs = candidates
        .into_iter()
        .max_by_key(|runs| text_weight(runs))
        .unwrap_or_default();

    let text = runs.join("\n");
    debug!(runs = runs.len(), chars = text.len(), "Recovered DOC text");

    let author_sample: String = text.chars().take(AUTHOR_SAMPLE_CHARS).collect();

    Ok(ParsedDocument {
        blocks: if text.trim().is_empty() { Vec::new() } else { vec![text] },
        author_sections: vec![author_sample],
        title: None,
    })
}

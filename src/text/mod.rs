//! Text normalization: raw extracted text to clean, ordered sentences.

pub mod normalize;

#[cfg(test)]
mod tests;

pub use normalize::{
    contains_letters_or_numbers, join_lines, normalize_block, normalize_blocks, strip_glyphs,
};

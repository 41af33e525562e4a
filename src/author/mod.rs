//! Author inference.
//!
//! Person entities found in a text sample are filtered against an exclusion list (titles,
//! known staff); the first survivor is title-cased and stripped of noise tokens. Sections
//! are scanned in order and the first one yielding a name wins.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{AuthorConfig, DEFAULT_EXCLUDED_NAMES, DEFAULT_NOISE_TOKENS};

use std::sync::Arc;

use tracing::debug;

use crate::constants::UNKNOWN_AUTHOR;
use crate::nlp::{EntityExtractor, NlpResult};

/// Upper-cases the first letter of each word and lower-cases the rest.
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Infers the author of a document from person entities.
#[derive(Clone)]
pub struct AuthorInferencer {
    extractor: Arc<dyn EntityExtractor>,
    config: AuthorConfig,
}

impl std::fmt::Debug for AuthorInferencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorInferencer")
            .field("config", &self.config)
            .finish()
    }
}

impl AuthorInferencer {
    pub fn new(extractor: Arc<dyn EntityExtractor>, config: AuthorConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &AuthorConfig {
        &self.config
    }

    /// Returns `true` if `candidate`, as written or title-cased, contains an excluded name.
    ///
    /// Matching is case-sensitive; the title-cased form catches all-caps cover pages.
    pub fn is_excluded(&self, candidate: &str) -> bool {
        let titled = title_case(candidate);
        self.config.excluded_names.iter().any(|excluded| {
            candidate.contains(excluded.as_str()) || titled.contains(excluded.as_str())
        })
    }

    /// Removes noise tokens (ignoring case and trailing punctuation) and trims.
    pub fn strip_noise(&self, name: &str) -> String {
        name.split_whitespace()
            .filter(|token| {
                let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
                !self
                    .config
                    .noise_tokens
                    .iter()
                    .any(|noise| noise.to_lowercase() == bare.to_lowercase())
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Infers an author from one text sample, or [`UNKNOWN_AUTHOR`].
    pub fn infer_one(&self, text: &str) -> NlpResult<String> {
        let persons = self.extractor.extract_persons(text)?;

        let Some(candidate) = persons.iter().find(|name| !self.is_excluded(name)) else {
            return Ok(UNKNOWN_AUTHOR.to_string());
        };

        let author = self.strip_noise(&title_case(candidate));
        if author.is_empty() {
            return Ok(UNKNOWN_AUTHOR.to_string());
        }

        Ok(author)
    }

    /// Scans sections in order; the first non-unknown result wins.
    pub fn infer<S: AsRef<str>>(&self, sections: &[S]) -> NlpResult<String> {
        for (index, section) in sections.iter().enumerate() {
            let author = self.infer_one(section.as_ref())?;
            if author != UNKNOWN_AUTHOR {
                debug!(section = index, author = %author, "Inferred author");
                return Ok(author);
            }
        }

        Ok(UNKNOWN_AUTHOR.to_string())
    }
}

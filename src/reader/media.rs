use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ReaderError;

/// Supported submission formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "application/vnd.openxmlformats-officedocument.wordprocessingml.document")]
    Docx,
    #[serde(rename = "application/msword")]
    Doc,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Pdf, MediaType::Docx, MediaType::Doc];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MediaType::Doc => "application/msword",
        }
    }

    /// Guesses the media type from a file extension (`.pdf`, `.docx`, `.doc`).
    pub fn from_extension(path: &Path) -> Option<MediaType> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(MediaType::Pdf),
            "docx" => Some(MediaType::Docx),
            "doc" => Some(MediaType::Doc),
            _ => None,
        }
    }

    /// Resolves the type of a submitted file: the declared MIME type when given, else the
    /// file extension.
    ///
    /// Fails with [`ReaderError::UnsupportedFormat`] when neither names a supported format.
    pub fn resolve(path: &Path, declared: Option<&str>) -> Result<MediaType, ReaderError> {
        if let Some(declared) = declared {
            return declared.parse();
        }

        MediaType::from_extension(path).ok_or_else(|| ReaderError::UnsupportedFormat {
            media_type: path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_else(|| path.display().to_string()),
        })
    }
}

impl FromStr for MediaType {
    type Err = ReaderError;

    /// Parses a MIME type; parameters such as `; charset=binary` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();

        MediaType::ALL
            .into_iter()
            .find(|media| media.as_str().eq_ignore_ascii_case(essence))
            .ok_or_else(|| ReaderError::UnsupportedFormat {
                media_type: s.to_string(),
            })
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::io;
use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory (or an explicit tokenizer path).
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new("tokenizer.json"))
    {
        model_path.to_path_buf()
    } else if model_path.is_dir() {
        model_path.join("tokenizer.json")
    } else {
        model_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Model path has no parent"))?
            .join("tokenizer.json")
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates inputs to `max_len` tokens.
///
/// BERT models have a fixed position-embedding table; longer inputs would fail inference.
pub fn load_tokenizer_with_truncation(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    Ok(tokenizer)
}

/// Checks that `model_dir` holds `config.json`, `model.safetensors` and a tokenizer.
pub fn check_model_dir(model_dir: &Path) -> Result<(), String> {
    if !model_dir.exists() {
        return Err(format!("model path not found: {}", model_dir.display()));
    }

    for required in ["config.json", "model.safetensors", "tokenizer.json"] {
        if !model_dir.join(required).exists() {
            return Err(format!("missing {} in {}", required, model_dir.display()));
        }
    }

    Ok(())
}

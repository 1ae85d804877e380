// src/transcripts/loader.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::InputError;

/// Resolves the input path into the list of transcript files to process.
///
/// A file path yields just that file. A directory yields every direct child
/// with a `pdf` or `txt` extension (case-insensitive, no recursion), PDFs
/// first, each group sorted by name so the run order is deterministic.
pub fn discover(input: &Path) -> Result<Vec<PathBuf>, InputError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(InputError::InvalidPath(input.display().to_string()));
    }

    let mut pdfs = Vec::new();
    let mut texts = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match extension_of(&path).as_deref() {
            Some("pdf") => pdfs.push(path),
            Some("txt") => texts.push(path),
            _ => {}
        }
    }
    pdfs.sort();
    texts.sort();
    pdfs.extend(texts);

    Ok(pdfs)
}

/// Loads the raw text of one transcript file.
///
/// PDFs go through the text-extraction collaborator; everything else is
/// read in full as UTF-8.
pub fn load_text(path: &Path) -> Result<String, InputError> {
    if extension_of(path).as_deref() == Some("pdf") {
        let text = pdf_extract::extract_text(path)
            .map_err(|e| InputError::PdfExtraction(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(
            "Extracted {} characters of text from {}",
            text.len(),
            path.display()
        );
        Ok(text)
    } else {
        let text = fs::read_to_string(path)?;
        tracing::debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

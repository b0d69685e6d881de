use std::path::Path;

use anyhow::{Context, Result};

/// Read a transcript file as UTF-8, falling back to Latin-1 when the bytes
/// do not decode.
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {path:?}"))?;
    Ok(decode_transcript(bytes))
}

fn decode_transcript(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        // Latin-1: every byte maps directly to the code point of equal value
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

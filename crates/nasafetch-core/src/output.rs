//! Output artifact: pretty-printed JSON written atomically.
//!
//! The document is written to `<path>.part`, synced, then renamed over
//! `path`, so readers see either the previous file or the complete new one.

use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Default artifact name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "output.json";

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `output.json` → `output.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Renders `value` with 2-space indentation and no trailing newline.
pub fn render(value: &Value) -> Result<String, FetchError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `value` to `path`, replacing any existing file. Returns the number of bytes written.
pub fn write_json(path: &Path, value: &Value) -> Result<u64, FetchError> {
    let text = render(value)?;
    let tmp = temp_path(path);

    if let Err(source) = write_and_sync(&tmp, text.as_bytes()) {
        let _ = std::fs::remove_file(&tmp);
        return Err(FetchError::Io { path: tmp, source });
    }
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(FetchError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(bytes = text.len(), "wrote {}", path.display());
    Ok(text.len() as u64)
}

fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(data)?;
    f.sync_all()
}

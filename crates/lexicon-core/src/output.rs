//! Lexicon serialization.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{info, warn};

use crate::error::LexiconError;
use crate::types::Lexicon;

const INDENT: &[u8] = b"    ";

/// Render a lexicon as indented JSON. Non-ASCII text is written verbatim.
pub fn to_json(lexicon: &Lexicon) -> Result<String, LexiconError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    lexicon.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// `path` with `.json` appended unless it already ends in it.
pub fn output_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|e| e == "json") {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}

/// Write a lexicon to disk and return the path actually written.
///
/// The JSON goes to a hidden sibling file first and is renamed into place, so
/// a failed run never leaves a truncated lexicon at the target path.
pub fn write_lexicon(lexicon: &Lexicon, path: &Path) -> Result<PathBuf, LexiconError> {
    let target = output_path(path);
    let json = to_json(lexicon)?;

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "lexicon.json".into());
    let staging = target.with_file_name(format!(".{file_name}.partial"));

    if let Err(e) = fs::write(&staging, json.as_bytes()) {
        fs::remove_file(&staging).ok();
        warn!(path = %staging.display(), "incomplete lexicon discarded");
        return Err(LexiconError::io(staging, e));
    }
    fs::rename(&staging, &target).map_err(|e| {
        fs::remove_file(&staging).ok();
        LexiconError::io(&target, e)
    })?;

    info!(path = %target.display(), entries = lexicon.len(), "lexicon written");
    Ok(target)
}

/// Read a lexicon previously written by [`write_lexicon`].
pub fn read_lexicon(path: &Path) -> Result<Lexicon, LexiconError> {
    let content = fs::read_to_string(path).map_err(|e| LexiconError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

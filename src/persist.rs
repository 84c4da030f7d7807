use crate::error::PersistError;
use crate::leader::LeadersByCountry;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::path::Path;

const INDENT: &[u8] = b"    ";

pub fn to_json_string(data: &LeadersByCountry) -> Result<String, PersistError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the mapping to `path`, replacing any previous file.
pub fn to_json_file(data: &LeadersByCountry, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let serialized = to_json_string(data)?;
    fs::write(path, serialized).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn from_json_file(path: impl AsRef<Path>) -> Result<LeadersByCountry, PersistError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(file)?)
}

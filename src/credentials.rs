//! Credentials loader: environment variable → file → parsed JSON document.
//!
//! The three steps run once, in order, and the first failure ends the run.
//! The path variable is resolved before anything touches the file system, so
//! a missing variable never results in file I/O.

use std::env;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use zeroize::Zeroize;

use crate::error::LoadError;
use crate::integrity::sha256_hex;

/// A parsed credentials file: a JSON object of string keys to arbitrary
/// values. Serializes back to exactly the object it was parsed from.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialsDocument(Map<String, Value>);

impl CredentialsDocument {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `type` field, e.g. `service_account` or `authorized_user`.
    pub fn kind(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    pub fn project_id(&self) -> Option<&str> {
        self.get("project_id").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CredentialsDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// Values can hold private keys, so only the field names are shown.
impl fmt::Debug for CredentialsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedCredentials {
    pub path: PathBuf,
    /// Hex SHA-256 of the raw file contents.
    pub fingerprint: String,
    pub document: CredentialsDocument,
}

/// Reads the named variable and returns the path it holds. Unset and empty
/// values are both treated as missing.
pub fn resolve_path(var: &str) -> Result<PathBuf, LoadError> {
    match env::var_os(var) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(LoadError::MissingConfiguration {
            var: var.to_string(),
        }),
    }
}

/// Reads and parses the credentials file at `path`. The file handle is
/// closed before parsing starts. The raw byte buffer is wiped on every path;
/// the parsed document still holds the values as plain strings.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<LoadedCredentials, LoadError> {
    let path = path.as_ref();
    let mut raw = read_bytes(path)?;
    let fingerprint = sha256_hex(&raw);
    let parsed = parse_document(path, &raw);
    raw.zeroize();

    let document = parsed?;
    debug!(path = %path.display(), keys = document.len(), "parsed credentials");
    Ok(LoadedCredentials {
        path: path.to_path_buf(),
        fingerprint,
        document,
    })
}

/// Resolves `var` and loads the file it points at.
pub fn load_from_env(var: &str) -> Result<LoadedCredentials, LoadError> {
    let path = resolve_path(var)?;
    debug!(var, path = %path.display(), "resolved credentials path");
    load_from_path(path)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    let access = |source: std::io::Error| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(access)?;
    let mut raw = Vec::new();
    if let Err(source) = file.read_to_end(&mut raw) {
        raw.zeroize();
        return Err(access(source));
    }
    Ok(raw)
}

fn parse_document(path: &Path, raw: &[u8]) -> Result<CredentialsDocument, LoadError> {
    let malformed = |reason: String| LoadError::MalformedData {
        path: path.to_path_buf(),
        reason,
    };
    match serde_json::from_slice::<Value>(raw).map_err(|e| malformed(format!("{e}")))? {
        Value::Object(map) => Ok(CredentialsDocument(map)),
        other => Err(malformed(format!(
            "top level is {}, expected an object",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

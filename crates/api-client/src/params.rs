//! Typed request parameters.
//!
//! The wire formats only ever see strings and raw bytes, so parameter
//! values are a closed variant instead of anything dynamic: a scalar that
//! renders to text, or a file part destined for a multipart body.

use bytes::Bytes;
use std::path::PathBuf;

use crate::error::{ApiResult, ParticleError};

/// A file destined for one part of a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Raw file content
    pub contents: Bytes,
    /// Filename reported in the part's `Content-Disposition` header
    pub filename: String,
    /// Extra headers emitted inside the part, in order
    pub headers: Vec<(String, String)>,
}

impl FilePart {
    /// Create a file part with no extra headers.
    #[must_use]
    pub fn new(contents: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            filename: filename.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header to the part.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A single parameter value.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// A text scalar
    Text(String),
    /// An integer scalar
    Int(i64),
    /// A boolean scalar
    Bool(bool),
    /// A file part; only valid in multipart bodies
    File(FilePart),
}

impl ParamValue {
    /// Render a scalar to its wire text. `None` for file parts.
    #[must_use]
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::File(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<FilePart> for ParamValue {
    fn from(value: FilePart) -> Self {
        Self::File(value)
    }
}

/// An ordered set of named parameters.
///
/// Names are unique; inserting an existing name replaces the value without
/// moving it. Order is insertion order, which fixes the part layout of
/// multipart bodies.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Whether the set holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Firmware content for an upload: a pathname read at build time, or bytes
/// already in hand.
#[derive(Debug, Clone)]
pub enum FirmwareSource {
    /// Read the file at this path while the request is built
    Path(PathBuf),
    /// Use these bytes directly
    Bytes(Bytes),
}

impl FirmwareSource {
    /// Resolve the source to raw bytes.
    ///
    /// A `Path` source opens, reads, and closes the file here; the handle
    /// never outlives the call.
    pub fn into_bytes(self) -> ApiResult<Bytes> {
        match self {
            Self::Path(path) => std::fs::read(&path)
                .map(Bytes::from)
                .map_err(|e| {
                    ParticleError::invalid_argument(format!(
                        "cannot read firmware file {}: {e}",
                        path.display()
                    ))
                }),
            Self::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<PathBuf> for FirmwareSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&std::path::Path> for FirmwareSource {
    fn from(value: &std::path::Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<Bytes> for FirmwareSource {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for FirmwareSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

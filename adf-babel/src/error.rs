//! Error types for conversion operations

use std::fmt;

/// Errors that can occur at the edges of a conversion (reading trees, writing output)
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The input could not be read as a document tree
    ParseError(String),
    /// The output could not be produced
    SerializationError(String),
    /// Reading or writing a file failed
    Io(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::ParseError(err.to_string())
    }
}

/// Errors raised by extension handlers while reading macro parameters.
///
/// These never abort a conversion: the registry turns them into an AsciiDoc comment.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionError {
    /// A required macro parameter is absent
    MissingParameter(String),
    /// A macro parameter is present but unusable
    InvalidParameter { name: String, reason: String },
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::MissingParameter(name) => {
                write!(f, "missing parameter '{name}'")
            }
            ExtensionError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for ExtensionError {}

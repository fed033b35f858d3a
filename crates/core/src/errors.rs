use std::path::PathBuf;

/// Result type alias for sundry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by all sundry utility modules
///
/// Each module fails fast with a descriptive variant at the point of
/// misuse; there is no retry logic and no partial-failure semantics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested key is missing from a mapping
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    /// Malformed input that has no more specific variant
    #[error("invalid {what}: {message}")]
    InvalidValue { what: String, message: String },

    /// A query filter came out empty and would match everything
    #[error("filter {data} not sufficient for a query")]
    InsufficientQuery { data: String },

    /// A date string matched none of the accepted formats
    #[error("didn't understand date specification '{input}'")]
    DateParse { input: String },

    /// A duration string could not be parsed
    #[error("didn't understand duration specification '{input}'")]
    DeltaParse { input: String },

    /// Byte input could not be decoded with any accepted encoding
    #[error("can't decode input: {message}")]
    Decode { message: String },

    /// An HTML entity name is not in the reference table
    #[error("unknown HTML entity '{name}'")]
    UnknownEntity { name: String },

    /// An HTTP status code has no registered reason phrase
    #[error("unknown HTTP status {code}")]
    UnknownStatus { code: u16 },

    /// An SQL identifier contains disallowed characters
    #[error("invalid SQL identifier '{name}'")]
    InvalidIdentifier { name: String },

    /// A URL does not contain a hostname
    #[error("'{input}' doesn't contain a hostname")]
    MissingHost { input: String },

    /// A frozen map refused a write
    #[error("can't add '{key}': the map is frozen")]
    Frozen { key: String },

    /// A write-once map refused to overwrite an existing value
    #[error("can't override existing value for '{key}'")]
    Overwrite { key: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    #[must_use]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Error::KeyNotFound { key: key.into() }
    }

    #[must_use]
    pub fn invalid_value(what: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidValue {
            what: what.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn date_parse(input: impl Into<String>) -> Self {
        Error::DateParse {
            input: input.into(),
        }
    }

    #[must_use]
    pub fn delta_parse(input: impl Into<String>) -> Self {
        Error::DeltaParse {
            input: input.into(),
        }
    }

    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }
}

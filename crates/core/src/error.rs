use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised by the collaborators around the core (renderer, CLI).
///
/// The smart punctuation engine and the code span tokenizer never fail.
#[derive(Debug, Error)]
pub enum MultimarkError {
    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// UTF-8 encoding error.
    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
    /// IO error on a named file.
    #[error("IO error on {path}: {source}")]
    FileIo {
        /// File being read or written
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// A named input is not valid UTF-8.
    #[error("Encoding error in {path}: {source}")]
    FileEncoding {
        /// Offending input
        path: String,
        /// Underlying error
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// Input refused before conversion.
    #[error("Invalid input {path}: {reason}")]
    InvalidInput {
        /// Refused input
        path: String,
        /// Why it was refused
        reason: String,
    },
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Configuration could not be decoded.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    /// Internal logic error (unexpected state).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl MultimarkError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::MarkdownAdapter {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Attach a file name to parse, IO and encoding errors.
    ///
    /// Errors that already name a file are returned unchanged.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::MarkdownAdapter { message, location } if location.file.is_none() => {
                Self::MarkdownAdapter {
                    message,
                    location: SourceLocation::with_file(file, location.line, location.column),
                }
            }
            Self::IoError(source) => Self::FileIo {
                path: file.into(),
                source,
            },
            Self::EncodingError(source) => Self::FileEncoding {
                path: file.into(),
                source,
            },
            other => other,
        }
    }
}

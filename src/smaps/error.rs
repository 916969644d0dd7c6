//! Error types for smaps reading.

use std::path::PathBuf;

/// Errors produced while reading a memory map description.
///
/// Every format variant carries the offending line so the caller can report
/// exactly where the input went wrong.
#[derive(Debug, thiserror::Error)]
pub enum SmapsError {
    #[error("error in compiling regex [{pattern}]: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unexpected first line [{line}]")]
    UnexpectedHeader { line: String },

    #[error("expected 3 tokens in line [{line}]")]
    TooFewTokens { line: String },

    #[error("unable to parse value [{token}] as u64 in line [{line}]")]
    InvalidNumber { line: String, token: String },

    #[error("unknown unit [{unit}] in line [{line}]")]
    UnknownUnit { line: String, unit: String },

    #[error("value overflows u64 in line [{line}]")]
    ValueOverflow { line: String },

    #[error("mapping [{line}] not terminated by VmFlags before end of input")]
    IncompleteMapping { line: String },

    #[error("error in reading file {}: {}", path.display(), source)]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SmapsError {
    /// Returns true for structural violations of the smaps line format.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SmapsError::UnexpectedHeader { .. }
                | SmapsError::TooFewTokens { .. }
                | SmapsError::InvalidNumber { .. }
                | SmapsError::UnknownUnit { .. }
                | SmapsError::ValueOverflow { .. }
                | SmapsError::IncompleteMapping { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_classification() {
        let err = SmapsError::UnknownUnit {
            line: "Size: 4 tb".into(),
            unit: "tb".into(),
        };
        assert!(err.is_format_error());

        let err = SmapsError::SourceUnavailable {
            path: PathBuf::from("/proc/0/smaps"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_error_messages_carry_line() {
        let err = SmapsError::InvalidNumber {
            line: "Rss: x kB".into(),
            token: "x".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("[x]"));
        assert!(msg.contains("Rss: x kB"));
    }
}

//! Error types for the rn-convert crate.
//!
//! None of these errors ever reach a caller of
//! [`ScriptConverter::convert`](crate::ScriptConverter::convert); they are
//! logged while probing the backend and turned into a degraded status.

use camino::Utf8PathBuf;

/// Errors raised while loading or probing a conversion backend.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The configured dictionary directory or file does not exist.
    #[error("dictionary not found: {0}")]
    MissingDictionary(Utf8PathBuf),

    /// A dictionary file could not be read.
    #[error("failed to read dictionary {path}: {source}")]
    Read {
        /// The dictionary file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line has no conversion candidate.
    #[error("malformed dictionary entry at {path}:{line}")]
    Malformed {
        /// The dictionary file.
        path: Utf8PathBuf,
        /// 1-based line number.
        line: usize,
    },

    /// The backend loaded but did not convert the probe text correctly.
    #[error("backend '{backend}' failed the probe: expected '{expected}', got '{actual}'")]
    ProbeFailed {
        /// Name of the backend.
        backend: String,
        /// Expected probe output.
        expected: String,
        /// What the backend produced.
        actual: String,
    },
}

impl ConvertError {
    /// Creates a new [`ConvertError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_display() {
        let err = ConvertError::read(
            "/opencc/STCharacters.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/opencc/STCharacters.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_probe_failed_display() {
        let err = ConvertError::ProbeFailed {
            backend: "opencc-dictionary".to_owned(),
            expected: "國".to_owned(),
            actual: "国".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "backend 'opencc-dictionary' failed the probe: expected '國', got '国'"
        );
    }
}

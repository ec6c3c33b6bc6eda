//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Why `settings.json` could not be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    #[error("{} is not valid JSON: {source}", path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// The JSON is valid but a field has the wrong type, e.g.
    /// `"pbkdf2Iterations": "many"`.
    #[error("invalid settings value: {0}")]
    Invalid(#[from] serde_json::Error),
}

impl SettingsError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn read_error_names_the_file() {
        let err = SettingsError::read(
            Path::new("/etc/taskboard.json"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/etc/taskboard.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = SettingsError::parse(Path::new("settings.json"), source);
        assert!(err.to_string().starts_with("settings.json is not valid JSON"));
    }

    #[test]
    fn shape_errors_convert() {
        let source = serde_json::from_str::<u32>("\"many\"").unwrap_err();
        let err: SettingsError = source.into();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }
}

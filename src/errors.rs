use thiserror::Error;

/// Errors that can occur while building plugins or loading manifests.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Plugin name, version, download URL, or combined string is malformed.
    #[error("{message}")]
    Format { message: String },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (or JSON) deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PluginError {
    /// Build a [`PluginError::Format`] from any message.
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}

/// Convenience alias for `Result<T, PluginError>`.
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_displays_bare_message() {
        let err = PluginError::format("invalid plugin format 'abc'");
        assert_eq!(err.to_string(), "invalid plugin format 'abc'");
    }

    #[test]
    fn io_error_converts_with_prefix() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PluginError = io.into();
        assert!(matches!(err, PluginError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}

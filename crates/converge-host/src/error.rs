/// Errors reported by host services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The registry has no plugin with this handle.
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// A lifecycle operation was rejected by the host.
    #[error("failed to {operation} plugin '{handle}': {reason}")]
    OperationFailed {
        operation: String,
        handle: String,
        reason: String,
    },
}

impl Error {
    /// Shorthand for [`Error::OperationFailed`].
    pub fn operation_failed(
        operation: impl Into<String>,
        handle: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            handle: handle.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_failed_display() {
        let err = Error::operation_failed("install", "seo", "missing files");
        assert_eq!(
            err.to_string(),
            "failed to install plugin 'seo': missing files"
        );
    }

    #[test]
    fn test_unknown_plugin_display() {
        let err = Error::UnknownPlugin("ghost".to_string());
        assert!(err.to_string().contains("ghost"));
    }
}

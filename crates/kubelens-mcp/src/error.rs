//! Dispatch error taxonomy.

use thiserror::Error;

/// Everything that can stop an invocation short of a successful envelope.
///
/// Caller errors are detected locally before any upstream I/O; upstream
/// errors are classified from the single attempted call. Conversion to the
/// wire envelope happens only at the invocation boundary, never through
/// panics or exception-style control flow.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Operation name not present in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument is absent or empty.
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// An argument is present but carries the wrong type.
    #[error("{field} must be {expected}")]
    InvalidArgument {
        field: &'static str,
        expected: &'static str,
    },

    /// The cluster API answered but refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The cluster API could not be reached at all.
    #[error(
        "Failed to reach the cluster API: {0}. Check kubeconfig, network connectivity, and proxy settings"
    )]
    Unreachable(String),
}

impl ToolError {
    /// Classify a raw upstream error from the single attempted call.
    ///
    /// An API error response means the server answered and refused; anything
    /// else is a connectivity-class failure and gets the remediation hint.
    pub fn upstream(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) => Self::Rejected(response.message),
            other => Self::Unreachable(other.to_string()),
        }
    }

    /// Whether the error was detected before any upstream I/O.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_) | Self::MissingArgument(_) | Self::InvalidArgument { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    #[test]
    fn api_errors_become_rejections_with_the_upstream_message() {
        let err = ToolError::upstream(kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: "pods \"missing\" not found".to_string(),
            reason: "NotFound".to_string(),
            code: 404,
        }));

        assert!(matches!(err, ToolError::Rejected(_)));
        assert_eq!(err.to_string(), "pods \"missing\" not found");
        assert!(!err.is_caller_error());
    }

    #[test]
    fn missing_argument_message_names_the_field() {
        assert_eq!(
            ToolError::MissingArgument("name").to_string(),
            "name is required"
        );
        assert!(ToolError::MissingArgument("name").is_caller_error());
    }

    #[test]
    fn unreachable_carries_the_remediation_hint() {
        let message = ToolError::Unreachable("connection refused".to_string()).to_string();
        assert!(message.contains("connection refused"));
        assert!(message.contains("Check kubeconfig"));
    }
}

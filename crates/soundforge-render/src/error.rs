//! Error types for the renderer.

use soundforge_spec::{BackendError, ValidationResult};
use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering.
///
/// Rendering a validated spec cannot fail; these come from the checked entry
/// points and from writing output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The spec no longer satisfies its invariants (e.g. after direct field edits).
    #[error("spec is not renderable: {} error(s)", .0.errors.len())]
    InvalidSpec(ValidationResult),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// The validation errors behind an [`RenderError::InvalidSpec`].
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            RenderError::InvalidSpec(result) => Some(result),
            RenderError::Io(_) => None,
        }
    }
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::InvalidSpec(_) => "RENDER_001",
            RenderError::Io(_) => "RENDER_002",
        }
    }

    fn category(&self) -> &'static str {
        "render"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundforge_spec::ErrorCode;

    #[test]
    fn test_codes_and_category() {
        let mut result = ValidationResult::success();
        result.error(ErrorCode::OutOfRange, "global.amp", "too loud");
        let err = RenderError::InvalidSpec(result);
        assert_eq!(err.code(), "RENDER_001");
        assert_eq!(err.category(), "render");
        assert_eq!(err.to_string(), "spec is not renderable: 1 error(s)");
        assert!(err.validation().unwrap().has_error_at("global.amp"));

        let io = RenderError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(io.code(), "RENDER_002");
        assert!(io.validation().is_none());
    }
}

//! Error types for SoundSpec validation and processing.

use thiserror::Error;

/// Error codes for SoundSpec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: JSON could not be parsed into the expected shape
    MalformedJson,
    /// E002: Unsupported format version
    UnsupportedVersion,
    /// E003: Sample rate not in the allowed set
    InvalidSampleRate,
    /// E004: Numeric value outside its declared range
    OutOfRange,
    /// E005: NaN or infinite number
    NonFiniteNumber,
    /// E006: Parameter block does not match the `type` discriminator
    UnionMismatch,
    /// E007: Duplicate layer or param id
    DuplicateId,
    /// E008: `round(sample_rate * duration)` exceeds the sample ceiling
    SampleBudgetExceeded,
    /// E009: List has too few or too many entries
    ListLength,
    /// E010: Param path does not resolve against the spec
    UnresolvablePath,
    /// E011: Param binding is internally inconsistent
    InvalidParamBinding,
    /// E012: Required identifier is empty
    EmptyIdentifier,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MalformedJson => "E001",
            ErrorCode::UnsupportedVersion => "E002",
            ErrorCode::InvalidSampleRate => "E003",
            ErrorCode::OutOfRange => "E004",
            ErrorCode::NonFiniteNumber => "E005",
            ErrorCode::UnionMismatch => "E006",
            ErrorCode::DuplicateId => "E007",
            ErrorCode::SampleBudgetExceeded => "E008",
            ErrorCode::ListLength => "E009",
            ErrorCode::UnresolvablePath => "E010",
            ErrorCode::InvalidParamBinding => "E011",
            ErrorCode::EmptyIdentifier => "E012",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for SoundSpec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Field is accepted but has no effect on rendering
    IgnoredField,
    /// W002: Empty description
    MissingDescription,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::IgnoredField => "W001",
            WarningCode::MissingDescription => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A field-level validation error.
///
/// `path` uses the same grammar as the parameter path resolver
/// (`layers[1].osc.freq`); an empty path refers to the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the offending field.
    pub path: String,
}

impl ValidationError {
    /// Creates a new validation error at the given path.
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Returns the path, or `"(root)"` for document-level errors.
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.display_path())
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning. Warnings never block a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the field the warning refers to.
    pub path: String,
}

impl ValidationWarning {
    /// Creates a new validation warning at the given path.
    pub fn new(code: WarningCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.path)
    }
}

/// Ordered collection of validation errors and warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Errors in document order.
    pub errors: Vec<ValidationError>,
    /// Warnings in document order.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates an empty (passing) result.
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a failed result holding a single error.
    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Shorthand for `add_error(ValidationError::new(..))`.
    pub fn error(&mut self, code: ErrorCode, path: impl Into<String>, message: impl Into<String>) {
        self.add_error(ValidationError::new(code, path, message));
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any error carries the given code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Returns true if any error is reported at exactly this path.
    pub fn has_error_at(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    /// `(path, message)` pairs in order.
    pub fn field_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .map(|e| (e.path.as_str(), e.message.as_str()))
            .collect()
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Spec validation failed with one or more errors.
    #[error("spec validation failed with {} error(s)", .0.errors.len())]
    ValidationFailed(ValidationResult),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Common trait for backend errors.
///
/// Gives renderers and other consumers a stable code and category for
/// reporting, independent of their concrete error enums.
pub trait BackendError: std::error::Error {
    /// Stable error code such as `"RENDER_001"`.
    fn code(&self) -> &'static str;

    /// Human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category for grouping (e.g. `"render"`).
    fn category(&self) -> &'static str;
}

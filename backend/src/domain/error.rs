//! Domain-level error type shared by services and adapters.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and response bodies; the domain only records what failed,
//! which category the failure belongs to, and the trace identifier that was
//! active when the failure was constructed.

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or missing required fields.
    InvalidRequest,
    /// Authentication failed or no session is established.
    Unauthorized,
    /// The request was understood but fails domain validation.
    Unprocessable,
    /// A backing service cannot currently be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Validation errors emitted by the [`Error`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The error message was empty or whitespace only.
    EmptyMessage,
    /// The supplied trace identifier was empty or whitespace only.
    EmptyTraceId,
    /// A validation error was constructed without any violations.
    NoViolations,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
            Self::EmptyTraceId => write!(f, "trace id must not be empty"),
            Self::NoViolations => write!(f, "validation errors need at least one violation"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

/// Domain error payload.
///
/// Construction captures the ambient [`TraceId`] when one is in scope so the
/// failure can be correlated with request logs.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `violations` is non-empty exactly when the error was built via
///   [`Error::validation`].
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::unauthorized("Invalid username or password");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    violations: Vec<String>,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            violations: Vec::new(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Build an unprocessable error carrying one message per violation.
    ///
    /// Panics when the violation list is empty; use [`Error::try_validation`]
    /// where the list is not statically known to be non-empty.
    pub fn validation(violations: Vec<String>) -> Self {
        match Self::try_validation(violations) {
            Ok(value) => value,
            Err(err) => panic!("validation errors must satisfy validation: {err}"),
        }
    }

    /// Fallible variant of [`Error::validation`].
    pub fn try_validation(violations: Vec<String>) -> Result<Self, ErrorValidationError> {
        if violations.is_empty() {
            return Err(ErrorValidationError::NoViolations);
        }
        let mut error = Self::try_new(ErrorCode::Unprocessable, violations.join("; "))?;
        error.violations = violations;
        Ok(error)
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Individual violation messages for list-shaped validation failures.
    ///
    /// Empty for every error not built via [`Error::validation`].
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Trace identifier captured when the error was constructed.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach an explicit trace identifier, panicking if it is empty.
    #[must_use]
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        match self.try_with_trace_id(trace_id) {
            Ok(value) => value,
            Err(err) => panic!("trace ids must satisfy validation: {err}"),
        }
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Unprocessable`].
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unprocessable, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

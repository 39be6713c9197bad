// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid input: {}", summarize(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidFields(vec![FieldError::new(field, message)])
    }

    /// Field-level detail, when the error carries any.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::InvalidFields(errors) => errors.clone(),
            Self::Domain(DomainError::InvalidField { field, message }) => {
                vec![FieldError::new(field, message.clone())]
            }
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects every field problem of a form before failing, so a caller sees
/// all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Keeps the value on success. Field errors are recorded under `fallback`
    /// unless the domain already named a field; other errors are returned.
    pub fn take<T>(
        &mut self,
        fallback: &'static str,
        result: Result<T, DomainError>,
    ) -> ApplicationResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(DomainError::InvalidField { field, message }) => {
                self.push(field, message);
                Ok(None)
            }
            Err(DomainError::Validation(message)) => {
                self.push(fallback, message);
                Ok(None)
            }
            Err(other) => Err(other.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> ApplicationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::InvalidFields(self.errors))
        }
    }
}

use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    fields: BTreeMap<String, Vec<String>>,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self {
            status,
            fields: group_fields(&err),
            message: err.to_string(),
        }
    }

    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }
}

fn status_for(err: &ApplicationError) -> StatusCode {
    match err {
        ApplicationError::Validation(_) | ApplicationError::InvalidFields(_) => {
            StatusCode::BAD_REQUEST
        }
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Conflict(_) => StatusCode::CONFLICT,
        ApplicationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
        ApplicationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ApplicationError::Domain(domain) => match domain {
            DomainError::Validation(_) | DomainError::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

fn group_fields(err: &ApplicationError) -> BTreeMap<String, Vec<String>> {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for error in err.field_errors() {
        fields
            .entry(error.field.to_string())
            .or_default()
            .push(error.message);
    }
    fields
}

/// Error payload returned by every JSON endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Messages keyed by the offending input field.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
            fields: self.fields,
        };
        (self.status, Json(payload)).into_response()
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::FieldError;

    #[test]
    fn field_errors_are_grouped_by_field() {
        let err = ApplicationError::InvalidFields(vec![
            FieldError::new("title", "cannot be empty"),
            FieldError::new("publisher", "publisher 3 does not exist"),
            FieldError::new("title", "too long"),
        ]);
        let http = HttpError::from_error(err);
        assert_eq!(http.status(), StatusCode::BAD_REQUEST);
        assert_eq!(http.fields()["title"].len(), 2);
        assert_eq!(http.fields()["publisher"].len(), 1);
    }

    #[test]
    fn domain_field_errors_keep_their_field() {
        let http = HttpError::from_error(ApplicationError::Domain(DomainError::invalid_field(
            "cursor",
            "malformed cursor",
        )));
        assert_eq!(http.status(), StatusCode::BAD_REQUEST);
        assert!(http.fields().contains_key("cursor"));
    }

    #[test]
    fn persistence_failures_are_server_errors() {
        let http = HttpError::from_error(ApplicationError::Domain(DomainError::Persistence(
            "down".into(),
        )));
        assert_eq!(http.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

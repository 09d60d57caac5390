//! Error handling - maps domain and repository failures to HTTP responses.

use actix_web::{
    HttpMessage, HttpRequest, HttpResponse, ResponseError,
    body::{BoxBody, EitherBody},
    dev::ServiceResponse,
    error,
    http::{
        StatusCode,
        header::{self, HeaderValue},
    },
};
use postline_core::error::{DomainError, RepoError};
use postline_core::validation::ValidationErrors;
use postline_shared::{ErrorResponse, FieldViolation};
use std::fmt;

use crate::observability::RequestId;

/// Application-level error type.
///
/// `NotFound` answers with an empty body; every other variant answers with
/// an RFC 7807 problem document.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(ValidationErrors),
    Conflict(String),
    Internal(String),
}

impl AppError {
    /// Problem document for this error, `None` when the response has no body.
    pub fn problem(&self) -> Option<ErrorResponse> {
        let problem = match self {
            AppError::NotFound(_) => return None,
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::validation_failed(
                errors
                    .errors()
                    .iter()
                    .map(|e| FieldViolation {
                        field: e.field.to_string(),
                        message: e.message.clone(),
                    })
                    .collect(),
            ),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(_) => ErrorResponse::internal_error(),
        };
        Some(problem)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "{}", errors),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(detail) => tracing::debug!("{}", detail),
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            _ => {}
        }

        match self.problem() {
            Some(problem) => HttpResponse::build(self.status_code()).json(problem),
            None => HttpResponse::build(self.status_code()).finish(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Rejects unparsable JSON bodies through [`AppError`] instead of
/// actix-web's plain-text default.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Rewrites an [`AppError`] problem body so it names the request path and
/// request ID. Any other response passes through unchanged.
pub fn with_problem_context<B>(res: ServiceResponse<B>) -> ServiceResponse<EitherBody<B>> {
    let problem = res
        .response()
        .error()
        .and_then(|e| e.as_error::<AppError>())
        .and_then(AppError::problem)
        .map(|problem| {
            let problem = problem.with_instance(res.request().path());
            match res.request().extensions().get::<RequestId>() {
                Some(id) => problem.with_request_id(id.as_str()),
                None => problem,
            }
        });

    let Some(body) = problem.and_then(|p| serde_json::to_vec(&p).ok()) else {
        return res.map_into_left_body();
    };

    // Keeps the original error attached for the request logger
    res.map_body(|head, _| {
        head.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        EitherBody::right(BoxBody::new(body))
    })
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

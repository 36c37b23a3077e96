use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::certificate::lifecycle::TransitionError;
use crate::certificate::model::CertificateKind;
use crate::certificate::validation::ValidationErrors;
use crate::id_card::cache::CardCacheError;
use crate::institution::QuickPick;
use crate::store::StoreError;
use crate::ErrorResponse;

/// Every failure an API operation can report.
///
/// None of these leave a session workspace in a half-updated state.
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("status changes are not supported for {0} certificates")]
    StatusChangeUnsupported(CertificateKind),
    #[error("no {pick:?} suggestion at position {index} for this form")]
    SuggestionUnavailable { pick: QuickPick, index: usize },
    #[error("invalid form data: {0}")]
    InvalidForm(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("another submission for this session is still in progress")]
    SubmissionInFlight,
    #[error("missing bearer token")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    CardCache(#[from] CardCacheError),
}

impl From<ValidationErrors> for CertificateError {
    fn from(errors: ValidationErrors) -> Self {
        CertificateError::Validation(errors)
    }
}

impl CertificateError {
    fn kind(&self) -> &'static str {
        match self {
            CertificateError::Validation(_) | CertificateError::InvalidForm(_) => "ValidationError",
            CertificateError::Transition(_) => "InvalidTransition",
            CertificateError::StatusChangeUnsupported(_)
            | CertificateError::SuggestionUnavailable { .. } => "BadRequest",
            CertificateError::NotFound(_) => "NotFound",
            CertificateError::SubmissionInFlight => "Conflict",
            CertificateError::Unauthorized => "Unauthorized",
            CertificateError::Store(StoreError::NotFound(_)) => "NotFound",
            CertificateError::Store(_) => "DocumentStoreError",
            CertificateError::CardCache(CardCacheError::NothingToPrint) => "BadRequest",
            CertificateError::CardCache(CardCacheError::UnknownCard(_)) => "NotFound",
            CertificateError::CardCache(_) => "InternalServerError",
        }
    }
}

impl ResponseError for CertificateError {
    fn status_code(&self) -> StatusCode {
        match self {
            CertificateError::Validation(_)
            | CertificateError::InvalidForm(_)
            | CertificateError::StatusChangeUnsupported(_)
            | CertificateError::SuggestionUnavailable { .. } => StatusCode::BAD_REQUEST,
            CertificateError::Transition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CertificateError::SubmissionInFlight => StatusCode::CONFLICT,
            CertificateError::NotFound(_) => StatusCode::NOT_FOUND,
            CertificateError::Unauthorized => StatusCode::UNAUTHORIZED,
            CertificateError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            CertificateError::Store(StoreError::Rejected { status, .. }) => {
                match StatusCode::from_u16(*status) {
                    Ok(code) if code.is_client_error() => code,
                    _ => StatusCode::BAD_GATEWAY,
                }
            }
            CertificateError::Store(_) => StatusCode::BAD_GATEWAY,
            CertificateError::CardCache(CardCacheError::NothingToPrint) => StatusCode::BAD_REQUEST,
            CertificateError::CardCache(CardCacheError::UnknownCard(_)) => StatusCode::NOT_FOUND,
            CertificateError::CardCache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ErrorResponse::new(self.kind(), &self.to_string());
        if let CertificateError::Validation(errors) = self {
            body = body.with_details(errors.errors().iter().map(ToString::to_string).collect());
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type Result<T, E = CertificateError> = std::result::Result<T, E>;

//! API error type and its JSON rendering.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use charades_shared::{ErrorCode, ErrorResponse};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::catalog::CatalogError;
use crate::use_cases::hint::HintError;
use crate::use_cases::leaderboard::LeaderboardError;
use crate::use_cases::session::SessionError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// 400, with a code telling the client which rule was broken.
    BadRequest {
        code: ErrorCode,
        message: String,
    },
    Conflict(String),
    /// The completion service failed; the client may resubmit.
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: ErrorCode::BadRequest,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound, msg),
            ),
            ApiError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(code, message))
            }
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(ErrorCode::Conflict, msg),
            ),
            ApiError::Unavailable(detail) => {
                tracing::warn!(error = %detail, "Completion service unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(ErrorCode::AiUnavailable, "AI response failed"),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError, "Internal error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::bad_request(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::bad_request(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::bad_request(e.body_text())
    }
}

impl From<HintError> for ApiError {
    fn from(e: HintError) -> Self {
        match e {
            HintError::MissingFields | HintError::HintTooLong { .. } => {
                ApiError::bad_request(e.to_string())
            }
            HintError::GameNotFound(_) => ApiError::NotFound("Game not found".to_string()),
            HintError::GameNotActive(_) | HintError::NoTarget(_) => ApiError::BadRequest {
                code: ErrorCode::GameNotActive,
                message: e.to_string(),
            },
            HintError::ForbiddenWords => ApiError::BadRequest {
                code: ErrorCode::ForbiddenWords,
                message: e.to_string(),
            },
            HintError::Completion(inner) => ApiError::Unavailable(inner.to_string()),
            HintError::Repo(inner) => inner.into(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidUsername(_) => ApiError::bad_request("Username is required"),
            SessionError::EmptyTheme(_) | SessionError::CharacterNotInTheme { .. } => {
                ApiError::bad_request(e.to_string())
            }
            SessionError::ThemeNotFound(_) | SessionError::NoCharacters(_) => {
                ApiError::NotFound(e.to_string())
            }
            SessionError::Repo(inner) => inner.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Validation(_)
            | CatalogError::MissingFields(_)
            | CatalogError::InvalidImage(_) => ApiError::bad_request(e.to_string()),
            CatalogError::ThemeNotFound(_) | CatalogError::CharacterNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            CatalogError::DuplicateTheme(_) | CatalogError::DuplicateForbiddenWord(_) => {
                ApiError::Conflict(e.to_string())
            }
            CatalogError::Blob(inner) => ApiError::Internal(inner.to_string()),
            CatalogError::Repo(inner) => inner.into(),
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(e: LeaderboardError) -> Self {
        match e {
            LeaderboardError::Repo(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::hint::CompletionError;
    use charades_domain::GameId;

    fn status_and_code(error: ApiError) -> (StatusCode, ErrorCode) {
        match &error {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            ApiError::BadRequest { code, .. } => (StatusCode::BAD_REQUEST, *code),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
            ApiError::Unavailable(_) => (StatusCode::BAD_GATEWAY, ErrorCode::AiUnavailable),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError),
        }
    }

    #[test]
    fn hint_errors_map_to_client_codes() {
        let id = GameId::from_i64(1);
        assert_eq!(
            status_and_code(HintError::GameNotActive(id).into()),
            (StatusCode::BAD_REQUEST, ErrorCode::GameNotActive)
        );
        assert_eq!(
            status_and_code(HintError::ForbiddenWords.into()),
            (StatusCode::BAD_REQUEST, ErrorCode::ForbiddenWords)
        );
        assert_eq!(
            status_and_code(HintError::GameNotFound(id).into()),
            (StatusCode::NOT_FOUND, ErrorCode::NotFound)
        );
        assert_eq!(
            status_and_code(HintError::Completion(CompletionError::Empty).into()),
            (StatusCode::BAD_GATEWAY, ErrorCode::AiUnavailable)
        );
    }

    #[test]
    fn internal_detail_is_not_rendered() {
        let response = ApiError::Internal("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

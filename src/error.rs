use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::pages;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("failed to remove profile image {filename}: {source}")]
    ImageCleanup {
        filename: String,
        source: anyhow::Error,
    },

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            // signup failures re-render the signup page with the error text
            AppError::DuplicateUser => {
                (StatusCode::CONFLICT, Html(pages::render_signup(Some(&message)))).into_response()
            }
            AppError::MissingField(_) => (
                StatusCode::BAD_REQUEST,
                Html(pages::render_signup(Some(&message))),
            )
                .into_response(),
            // login failures land back on the landing page; the message never
            // says which of email/password was wrong
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Html(pages::render_index(Some(&message))),
            )
                .into_response(),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::ImageCleanup { .. } | AppError::Hashing(_) | AppError::Internal(_) => {
                error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_user_maps_to_conflict() {
        let res = AppError::DuplicateUser.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_credentials_maps_to_unauthorized() {
        let res = AppError::InvalidCredentials.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn user_not_found_maps_to_not_found() {
        let res = AppError::UserNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_field_maps_to_bad_request() {
        let res = AppError::MissingField("email").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unexpected_errors_map_to_server_error() {
        let res = AppError::Hashing("out of memory".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = AppError::Internal(anyhow::anyhow!("disk on fire")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

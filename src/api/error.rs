use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::services::{FavoriteError, RecipeError};
use crate::store::StoreError;
use crate::views::ViewError;

#[derive(Debug)]
pub enum ApiError {
    MissingField(&'static str),

    StorageError(String),

    ExternalApiError { service: String, message: String },

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingField(field) => write!(f, "Missing field: {}", field),
            ApiError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ApiError::ExternalApiError { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            ApiError::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{} service is unavailable", service),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_corrupt() {
            ApiError::StorageError(format!("corrupt data file: {err}"))
        } else {
            ApiError::StorageError(err.to_string())
        }
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<RecipeError> for ApiError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::Provider(message) | RecipeError::MalformedRecipe(message) => {
                ApiError::spoonacular_error(message)
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::Store(e) => e.into(),
            FavoriteError::Recipe(e) => e.into(),
        }
    }
}

impl ApiError {
    pub fn spoonacular_error(msg: impl Into<String>) -> Self {
        ApiError::ExternalApiError {
            service: "Spoonacular".to_string(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingField("email").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::spoonacular_error("timeout").into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::StorageError("bad csv".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_corrupt_table_is_flagged() {
        let err: ApiError = StoreError::MissingColumn {
            path: "data/favorites.csv".into(),
            column: "Title",
        }
        .into();
        let ApiError::StorageError(message) = &err else {
            panic!("expected a storage error");
        };
        assert!(message.starts_with("corrupt data file:"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let err: ApiError = StoreError::Task("join failed".into()).into();
        let ApiError::StorageError(message) = &err else {
            panic!("expected a storage error");
        };
        assert!(!message.starts_with("corrupt"));
    }

    #[test]
    fn test_recipe_error_mapping() {
        let err: ApiError = RecipeError::Provider("401".into()).into();
        assert!(matches!(err, ApiError::ExternalApiError { .. }));

        let err: ApiError = RecipeError::MalformedRecipe("no title".into()).into();
        assert!(matches!(err, ApiError::ExternalApiError { .. }));
    }
}

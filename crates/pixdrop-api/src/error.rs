//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors from the
//! processing and storage crates convert into `HttpAppError` and render as a 500 with
//! an `{"error", "code"}` JSON body.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixdrop_core::{AppError, ErrorMetadata, LogLevel};
use pixdrop_processing::TransformError;
use pixdrop_storage::StorageError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from pixdrop-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that renders deserialization failures with our ErrorResponse format
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<TransformError> for HttpAppError {
    fn from(err: TransformError) -> Self {
        let app = match err {
            TransformError::UnsupportedFormat(format) => AppError::UnsupportedFormat(format),
            TransformError::InvalidInput(msg) => AppError::InvalidInput(msg),
            TransformError::Base64(err) => {
                AppError::InvalidInput(format!("Invalid base64 buffer: {}", err))
            }
            TransformError::Decode(err) => AppError::ImageProcessing(err.to_string()),
            TransformError::Encode(msg) => AppError::ImageProcessing(msg),
            TransformError::Io(err) => AppError::Internal(format!("IO error: {}", err)),
            TransformError::Join(err) => AppError::Internal(format!("Image task failed: {}", err)),
        };
        HttpAppError(app)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::Storage(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transform_error_unsupported_format() {
        let HttpAppError(app_err) = TransformError::UnsupportedFormat("foo".to_string()).into();
        match app_err {
            AppError::UnsupportedFormat(ref format) => assert_eq!(format, "foo"),
            _ => panic!("Expected UnsupportedFormat variant"),
        }
        assert_eq!(app_err.client_message(), "Unsupported output format foo");
    }

    #[test]
    fn test_from_transform_error_missing_source() {
        let HttpAppError(app_err) = TransformError::missing_source().into();
        match app_err {
            AppError::InvalidInput(msg) => {
                assert_eq!(msg, "Either localPath or buffer must be provided")
            }
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_transform_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let HttpAppError(app_err) = TransformError::Io(io_err).into();
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("no such file")),
            _ => panic!("Expected Internal variant"),
        }
    }

    #[test]
    fn test_from_storage_error_upload_failed_is_verbatim() {
        let HttpAppError(app_err) = StorageError::UploadFailed("Access Denied".to_string()).into();
        assert_eq!(app_err.client_message(), "Access Denied");
        assert_eq!(app_err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_from_storage_error_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "IO error");
        let HttpAppError(app_err) = StorageError::IoError(io_err).into();
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("IO error")),
            _ => panic!("Expected Internal variant"),
        }
    }

    #[test]
    fn test_error_response_is_500_json() {
        let response =
            HttpAppError(AppError::UnsupportedFormat("foo".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Unsupported output format foo".to_string(),
            code: "UNSUPPORTED_FORMAT".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Unsupported output format foo",
                "code": "UNSUPPORTED_FORMAT"
            })
        );
    }
}

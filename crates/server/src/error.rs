use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use notewise_common::NotewiseError;
use serde_json::json;
use std::fmt;

/// HTTP-facing wrapper around [`NotewiseError`]
#[derive(Debug)]
pub struct ApiError(pub NotewiseError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NotewiseError> for ApiError {
    fn from(e: NotewiseError) -> Self {
        Self(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.0.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_error_kind() {
        let err = ApiError::from(NotewiseError::invalid_input("too long"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(NotewiseError::Generation {
            code: 503,
            message: "busy".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_out_of_range_code_falls_back_to_500() {
        let err = ApiError::from(NotewiseError::Connection {
            code: 42,
            message: "weird".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

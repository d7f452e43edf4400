use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use notewise_common::NotewiseError;
use std::future::{ready, Ready};
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "api-key";

const AUTH_FAILED: &str = "Could not validate api-key!";

/// Extractor that only succeeds when `api-key` matches the configured key
#[derive(Debug)]
pub struct ApiKey;

impl FromRequest for ApiKey {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(validate(req))
    }
}

fn validate(req: &HttpRequest) -> Result<ApiKey, ApiError> {
    let state = req
        .app_data::<web::Data<Arc<AppState>>>()
        .ok_or_else(|| NotewiseError::internal("application state not configured"))?;

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if !state.config.app_api_key.is_empty() && key == state.config.app_api_key => {
            Ok(ApiKey)
        }
        _ => {
            warn!("Rejected request to {} with missing or wrong api-key", req.path());
            Err(NotewiseError::auth(AUTH_FAILED).into())
        }
    }
}

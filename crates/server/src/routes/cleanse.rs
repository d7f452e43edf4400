use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::auth::ApiKey;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{CleanseResultResponse, CleanseStatusResponse, Note};

/// Start a background cleansing job
#[post("/cleanse-note")]
pub async fn submit_cleanse(
    _key: ApiKey,
    req: web::Json<Note>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let job = state.job_manager.submit().await;
    let work = state.workflow.cleanse_job(req.into_inner().work_note);

    // Not awaited, the client polls the status endpoint
    state.job_manager.spawn(job.id.clone(), work);
    info!("Cleansing job {} accepted", job.id);

    Ok(HttpResponse::Accepted().json(CleanseStatusResponse {
        transaction_id: job.id,
        status: job.status,
    }))
}

#[get("/cleanse-note/status/{transaction_id}")]
pub async fn cleanse_status(
    _key: ApiKey,
    transaction_id: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let transaction_id = transaction_id.into_inner();
    let status = state.job_manager.get_status(&transaction_id).await;

    Ok(HttpResponse::Ok().json(CleanseStatusResponse {
        transaction_id,
        status,
    }))
}

#[get("/cleanse-note/{transaction_id}")]
pub async fn cleanse_result(
    _key: ApiKey,
    transaction_id: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let transaction_id = transaction_id.into_inner();
    let (status, result) = state.job_manager.get_result(&transaction_id).await;

    Ok(HttpResponse::Ok().json(CleanseResultResponse {
        transaction_id,
        status,
        result,
    }))
}

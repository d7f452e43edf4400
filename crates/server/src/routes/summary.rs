use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::auth::ApiKey;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{BuildLogs, MajorIncidentCommunication, Note, Telemetry, UnstructuredSummary};

/// Local extractive summary, no LLM call
#[post("/short-summary")]
pub async fn short_summary(
    _key: ApiKey,
    req: web::Json<Note>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let summary = state.workflow.short_summary(&req.work_note);
    Ok(HttpResponse::Ok().json(UnstructuredSummary { summary }))
}

#[post("/long-summary")]
pub async fn long_summary(
    _key: ApiKey,
    req: web::Json<Note>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    info!("Long summary requested ({} chars)", req.work_note.len());
    let summary = state.workflow.long_summary(&req.work_note).await?;
    Ok(HttpResponse::Ok().json(UnstructuredSummary { summary }))
}

#[post("/structured-summary")]
pub async fn structured_summary(
    _key: ApiKey,
    req: web::Json<Note>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    info!("Structured summary requested ({} chars)", req.work_note.len());
    let summary = state.workflow.structured_summary(&req.work_note).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[post("/build-summary/")]
pub async fn build_summary(
    _key: ApiKey,
    req: web::Json<BuildLogs>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    info!("Build summary requested ({} chars)", req.logs.len());
    let summary = state.workflow.build_summary(&req.logs).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[post("/major-incident-communication")]
pub async fn major_incident_communication(
    _key: ApiKey,
    req: web::Json<Note>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let email_content = state
        .workflow
        .major_incident_communication(&req.work_note)
        .await?;
    Ok(HttpResponse::Ok().json(MajorIncidentCommunication { email_content }))
}

#[post("/telemetry-summary")]
pub async fn telemetry_summary(
    _key: ApiKey,
    req: web::Json<Telemetry>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let summary = state
        .workflow
        .telemetry_summary(&req.anomaly, &req.metric, &req.error)
        .await?;
    Ok(HttpResponse::Ok().json(UnstructuredSummary { summary }))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job status as reported on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobStatus {
    #[serde(rename = "In progress")]
    InProgress,
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "Error")]
    Error,
    #[serde(rename = "Not found")]
    NotFound,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Background cleansing job
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    /// Transaction id handed to the client
    pub id: String,

    pub status: JobStatus,

    /// Cleansed text, failure message or placeholder
    pub result: String,

    pub created_at: DateTime<Utc>,

    pub finished_at: Option<DateTime<Utc>>,
}

/// Free-text note request
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub work_note: String,
}

/// Build log request
#[derive(Debug, Clone, Deserialize)]
pub struct BuildLogs {
    pub logs: String,
}

/// Telemetry anomaly request
#[derive(Debug, Clone, Deserialize)]
pub struct Telemetry {
    pub anomaly: String,
    pub metric: String,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CleanseStatusResponse {
    pub transaction_id: String,
    pub status: JobStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CleanseResultResponse {
    pub transaction_id: String,
    pub status: JobStatus,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnstructuredSummary {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MajorIncidentCommunication {
    pub email_content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub platform: String,
}

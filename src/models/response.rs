use serde::{Deserialize, Serialize};

use crate::models::chat::ChatMessage;
use crate::models::query::QueryResult;
use crate::models::record::{DataStats, Record};

/// Severity of one cleaning/ingestion log line shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One log line emitted while ingesting or cleaning a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningLog {
    pub message: String,
    #[serde(rename = "type")]
    pub level: LogLevel,
}

impl CleaningLog {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

/// Response for the file upload endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub stats: DataStats,
    pub logs: Vec<CleaningLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for the clean endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct CleanResponse {
    pub logs: Vec<CleaningLog>,
    pub before: DataStats,
    pub after: DataStats,
}

/// Response for the dataset preview endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub stats: DataStats,
    pub preview: Vec<Record>,
    pub logs: Vec<CleaningLog>,
}

/// Request to run a query string against the current dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub result: QueryResult,
}

/// Request to ask one of the predefined catalog questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Request for the free-text pipeline chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Response carrying the transcript entries appended by one chat turn
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
    pub result: QueryResult,
}

/// Request for the strategic consultant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantRequest {
    pub query: String,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
}

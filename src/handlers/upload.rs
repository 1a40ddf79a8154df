use actix_web::{web, Error, HttpResponse};
use actix_multipart::Multipart;
use futures::StreamExt;
use std::io::Write;

use crate::models::response::{CleaningLog, ErrorResponse, LogLevel, UploadResponse};
use crate::services::{ingest, DatasetStore};

/// Handle a dataset file upload and replace the raw dataset wholesale.
///
/// Only `.csv` is parsed. The dashboard's file picker also advertises `.xlsx`
/// and `.json`, but nothing ever parsed those; here they are rejected with an
/// explicit message instead of silently producing zero rows.
pub async fn upload_dataset(
    mut payload: Multipart,
    store: web::Data<DatasetStore>,
) -> Result<HttpResponse, Error> {
    let mut file_content = Vec::new();
    let mut filename = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let content_disposition = field.content_disposition();

        if content_disposition.get_name() == Some("file") {
            if let Some(fname) = content_disposition.get_filename() {
                filename = fname.to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk?;
                file_content.write_all(&data)?;
            }
        }
    }

    if file_content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "No file uploaded".to_string(),
            status_code: 400,
        }));
    }

    let lower_name = filename.to_lowercase();
    if lower_name.ends_with(".xlsx") || lower_name.ends_with(".json") {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("{filename} is not supported; upload a CSV file"),
            status_code: 400,
        }));
    }
    if !lower_name.ends_with(".csv") {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "File must be a CSV".to_string(),
            status_code: 400,
        }));
    }

    let text = match String::from_utf8(file_content) {
        Ok(text) => text,
        Err(e) => {
            // A decode failure is terminal for this upload: it becomes an
            // error log entry, nothing is retried and the previous dataset
            // stays in place.
            log::error!("Failed to decode uploaded file {}: {}", filename, e);
            let logs = vec![CleaningLog::new(
                LogLevel::Error,
                format!("Error reading file: {e}"),
            )];
            if let Err(store_err) = store.record_logs(logs) {
                log::error!("Failed to record upload failure: {}", store_err);
            }
            return Ok(HttpResponse::BadRequest().json(ErrorResponse {
                error: format!("Error reading file: {e}"),
                status_code: 400,
            }));
        }
    };

    let dataset = ingest::parse_csv(&text);
    let stats = dataset.stats();
    let logs = vec![CleaningLog::new(
        LogLevel::Success,
        format!("File uploaded successfully: {filename}"),
    )];

    match store.replace_raw(dataset, logs.clone()) {
        Ok(()) => {
            log::info!(
                "📤 Uploaded {}: {} rows, {} columns",
                filename,
                stats.shape.0,
                stats.shape.1
            );
            Ok(HttpResponse::Ok().json(UploadResponse {
                filename,
                stats,
                logs,
                message: Some("File uploaded and ready for cleaning".to_string()),
            }))
        }
        Err(e) => Ok(HttpResponse::InternalServerError().json(ErrorResponse {
            error: format!("Failed to store dataset: {e}"),
            status_code: 500,
        })),
    }
}

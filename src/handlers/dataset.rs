use actix_web::{web, Error, HttpResponse};

use crate::models::response::{CleanResponse, DatasetResponse, ErrorResponse};
use crate::services::{ingest, DatasetStore};

/// Canonicalize the uploaded dataset's columns and swap in the cleaned copy.
pub async fn clean_dataset(store: web::Data<DatasetStore>) -> Result<HttpResponse, Error> {
    let raw = match store.raw() {
        Ok(raw) => raw,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to read dataset: {e}"),
                status_code: 500,
            }))
        }
    };

    if raw.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "No uploaded data to clean".to_string(),
            status_code: 400,
        }));
    }

    let before = raw.stats();
    let (cleaned, logs) = ingest::clean(&raw);
    let after = cleaned.stats();

    match store.replace_cleaned(cleaned, logs.clone()) {
        Ok(()) => Ok(HttpResponse::Ok().json(CleanResponse { logs, before, after })),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ErrorResponse {
            error: format!("Failed to store cleaned dataset: {e}"),
            status_code: 500,
        })),
    }
}

/// Current cleaned dataset stats plus a 5-row preview.
pub async fn get_dataset(store: web::Data<DatasetStore>) -> Result<HttpResponse, Error> {
    let dataset = match store.cleaned() {
        Ok(dataset) => dataset,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to read dataset: {e}"),
                status_code: 500,
            }))
        }
    };
    let logs = store.logs().unwrap_or_default();

    Ok(HttpResponse::Ok().json(DatasetResponse {
        stats: dataset.stats(),
        preview: dataset.head(5),
        logs,
    }))
}

use actix_web::{web, Error, HttpResponse};
use log::info;
use uuid::Uuid;

use crate::models::chat::ChatMessage;
use crate::models::response::{
    ChatResponse, ErrorResponse, QueryRequest, QueryResponse, QuestionRequest,
};
use crate::services::{catalog, ChatStore, DatasetStore, QueryService};

/// Run a raw query string against the cleaned dataset.
pub async fn run_query(
    request: web::Json<QueryRequest>,
    store: web::Data<DatasetStore>,
    query_service: web::Data<QueryService>,
) -> Result<HttpResponse, Error> {
    info!("Received query: {}", request.query);

    let dataset = match store.cleaned() {
        Ok(dataset) => dataset,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to read dataset: {e}"),
                status_code: 500,
            }))
        }
    };

    let result = query_service
        .run(&request.query, &dataset.records, None)
        .await;
    Ok(HttpResponse::Ok().json(QueryResponse { result }))
}

/// The predefined question catalog (questions and their SQL, answers withheld
/// until asked).
pub async fn list_questions() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(catalog::PREDEFINED_QUERIES))
}

/// Ask one predefined question: execute its SQL, attach its canned answer,
/// and append both sides of the exchange to the session transcript.
pub async fn ask_question(
    request: web::Json<QuestionRequest>,
    store: web::Data<DatasetStore>,
    chat_store: web::Data<ChatStore>,
    query_service: web::Data<QueryService>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();

    let entry = match catalog::find(&request.question) {
        Some(entry) => entry,
        None => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse {
                error: format!("Unknown question: {}", request.question),
                status_code: 404,
            }))
        }
    };

    let dataset = match store.cleaned() {
        Ok(dataset) => dataset,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to read dataset: {e}"),
                status_code: 500,
            }))
        }
    };

    let result = query_service
        .run(entry.sql, &dataset.records, Some(entry.answer.to_string()))
        .await;

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let messages = vec![
        ChatMessage::user(entry.question),
        ChatMessage::assistant(entry.answer, Some(entry.sql.to_string())),
    ];
    if let Err(e) = chat_store.append(&session_id, &messages) {
        return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
            error: format!("Failed to record chat messages: {e}"),
            status_code: 500,
        }));
    }

    Ok(HttpResponse::Ok().json(ChatResponse {
        session_id,
        messages,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::time::Duration;

    #[actix_web::test]
    async fn query_endpoint_round_trip() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DatasetStore::new()))
                .app_data(web::Data::new(QueryService::new(Duration::ZERO)))
                .service(web::resource("/query").route(web::post().to(run_query))),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/query")
            .set_json(QueryRequest {
                query: "Which brand had the highest revenue?".to_string(),
            })
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["result"]["rows"][0]["brand"], "RAYMOND");
        assert_eq!(body["result"]["columns"][0], "brand");
    }

    #[actix_web::test]
    async fn unknown_predefined_question_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DatasetStore::new()))
                .app_data(web::Data::new(ChatStore::new()))
                .app_data(web::Data::new(QueryService::new(Duration::ZERO)))
                .service(web::resource("/questions").route(web::post().to(ask_question))),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/questions")
            .set_json(QuestionRequest {
                question: "not in the catalog".to_string(),
                session_id: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}

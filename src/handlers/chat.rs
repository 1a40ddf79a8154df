use actix_web::{web, Error, HttpResponse};
use log::info;
use uuid::Uuid;

use crate::models::chat::ChatMessage;
use crate::models::response::{ChatRequest, ChatResponse, ErrorResponse};
use crate::services::{ChatStore, DatasetStore, PromptTranslator, QueryService};

/// Free-text pipeline chat: translate the prompt into a query, execute it,
/// and append the exchange to the session transcript.
pub async fn chat(
    request: web::Json<ChatRequest>,
    store: web::Data<DatasetStore>,
    chat_store: web::Data<ChatStore>,
    translator: web::Data<PromptTranslator>,
    query_service: web::Data<QueryService>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();
    info!("Received chat prompt: {}", request.prompt);

    let dataset = match store.cleaned() {
        Ok(dataset) => dataset,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to read dataset: {e}"),
                status_code: 500,
            }))
        }
    };

    let generated = translator.translate(&request.prompt).await;
    let result = query_service
        .run(&generated.sql, &dataset.records, Some(generated.answer.clone()))
        .await;

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let messages = vec![
        ChatMessage::user(request.prompt),
        ChatMessage::assistant(generated.answer, Some(generated.sql)),
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

/// Full transcript for one chat session.
pub async fn get_transcript(
    session_id: web::Path<String>,
    chat_store: web::Data<ChatStore>,
) -> Result<HttpResponse, Error> {
    let session_id = session_id.into_inner();
    match chat_store.transcript(&session_id) {
        Ok(Some(messages)) => Ok(HttpResponse::Ok().json(messages)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse {
            error: format!("Session {session_id} not found"),
            status_code: 404,
        })),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ErrorResponse {
            error: format!("Failed to read transcript: {e}"),
            status_code: 500,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::time::Duration;

    fn test_app() -> (
        web::Data<DatasetStore>,
        web::Data<ChatStore>,
        web::Data<PromptTranslator>,
        web::Data<QueryService>,
    ) {
        (
            web::Data::new(DatasetStore::new()),
            web::Data::new(ChatStore::new()),
            web::Data::new(PromptTranslator::new(Duration::ZERO)),
            web::Data::new(QueryService::new(Duration::ZERO)),
        )
    }

    #[actix_web::test]
    async fn chat_appends_user_and_assistant_messages() {
        let (store, chat_store, translator, query_service) = test_app();
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(chat_store.clone())
                .app_data(translator)
                .app_data(query_service)
                .service(web::resource("/chat").route(web::post().to(chat))),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/chat")
            .set_json(ChatRequest {
                prompt: "Show me revenue by brand".to_string(),
                session_id: Some("s1".to_string()),
            })
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["session_id"], "s1");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert!(body["result"]["query"]
            .as_str()
            .expect("query string")
            .contains("SUM(final_price * quantity)"));

        let transcript = chat_store
            .transcript("s1")
            .expect("lookup")
            .expect("session exists");
        assert_eq!(transcript.len(), 2);
    }
}

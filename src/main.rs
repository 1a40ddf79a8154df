mod config;
mod models;
mod services;
mod handlers;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use config::Config;
use handlers::{
    ask_question, chat, clean_dataset, consult, get_dataset, get_transcript, list_questions,
    run_query, upload_dataset,
};
use services::{ChatStore, ConsultantService, DatasetStore, PromptTranslator, QueryService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("🚀 Starting Foresight retail analytics API");

    // Load configuration from environment variables
    let config = Config::from_env();

    // All state is in-memory; nothing survives a restart.
    let dataset_store = DatasetStore::new();
    let chat_store = ChatStore::new();
    let query_service = QueryService::new(config.query_delay);
    let translator = PromptTranslator::new(config.translate_delay);
    let consultant = ConsultantService::new(config.consultant_delay);

    let server_url = format!("http://127.0.0.1:{}", config.server_port);
    log::info!("🌐 Starting server at {}", server_url);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(dataset_store.clone()))
            .app_data(web::Data::new(chat_store.clone()))
            .app_data(web::Data::new(query_service.clone()))
            .app_data(web::Data::new(translator.clone()))
            .app_data(web::Data::new(consultant.clone()))
            .service(web::resource("/upload").route(web::post().to(upload_dataset)))
            .service(web::resource("/clean").route(web::post().to(clean_dataset)))
            .service(web::resource("/dataset").route(web::get().to(get_dataset)))
            .service(web::resource("/query").route(web::post().to(run_query)))
            .service(
                web::resource("/questions")
                    .route(web::get().to(list_questions))
                    .route(web::post().to(ask_question)),
            )
            .service(web::resource("/chat").route(web::post().to(chat)))
            .service(web::resource("/chat/{session_id}").route(web::get().to(get_transcript)))
            .service(web::resource("/consultant").route(web::post().to(consult)))
    })
    .bind(format!("127.0.0.1:{}", config.server_port))
    .map_err(|e| {
        log::error!("❌ Failed to bind to port {}: {}", config.server_port, e);
        e
    })?
    .run()
    .await
}

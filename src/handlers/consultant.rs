use actix_web::{web, Error, HttpResponse};
use log::{error, info};

use crate::models::response::{ConsultantRequest, ErrorResponse};
use crate::services::ConsultantService;

/// Run a prompt through the strategic consultant.
pub async fn consult(
    request: web::Json<ConsultantRequest>,
    consultant: web::Data<ConsultantService>,
) -> Result<HttpResponse, Error> {
    info!("Received consultant prompt: {}", request.query);

    match consultant.process_prompt(&request.query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Error processing consultant prompt: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Error processing prompt: {e}"),
                status_code: 500,
            }))
        }
    }
}

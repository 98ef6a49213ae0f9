use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::{Value, json};

use crate::chat_api::server_api::{Assistant, ChatRequest, ENDPOINTS, ErrorBody, SERVICE_NAME};

pub async fn chat(assistant: web::Data<Assistant>, body: web::Json<ChatRequest>) -> HttpResponse {
    assistant.chat(body.into_inner()).await
}

pub async fn chat_stream(
    assistant: web::Data<Assistant>,
    body: web::Json<ChatRequest>,
) -> HttpResponse {
    assistant.chat_stream(body.into_inner()).await
}

pub async fn get_team_data(assistant: web::Data<Assistant>) -> HttpResponse {
    assistant.team_data()
}

pub async fn update_team_data(
    assistant: web::Data<Assistant>,
    body: web::Json<Value>,
) -> HttpResponse {
    assistant.update_team_data(body.into_inner())
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "healthy", "service": SERVICE_NAME}))
}

pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("{SERVICE_NAME} is running"),
        "endpoints": ENDPOINTS,
    }))
}

/// Unparsable JSON bodies get the same `{error}` shape as every other failure.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let resp = HttpResponse::BadRequest().json(ErrorBody::new(format!("{err}")));
    InternalError::from_response(err, resp).into()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(home))
        .route("/health", web::get().to(health))
        .route("/api/chat", web::post().to(chat))
        .route("/api/chat/stream", web::post().to(chat_stream))
        .service(
            web::resource("/api/team-data")
                .route(web::get().to(get_team_data))
                .route(web::post().to(update_team_data)),
        );
}

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::intent::classifier::IntentClassifier;
use crate::intent::model::IntentKind;
use crate::ner::interface::EntityRecognizer;
use crate::ner::model::EntityBag;
use crate::responder::generator::ResponseGenerator;
use crate::team_data::interface::TeamRepository;
use crate::team_data::model::TeamData;
use crate::team_data::store::StoreError;

pub const SERVICE_NAME: &str = "AI Football Assistant";

pub const ENDPOINTS: &[&str] = &["/health", "/api/chat", "/api/chat/stream", "/api/team-data"];

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Client context; only `userId` is read.
    #[serde(default)]
    pub context: Option<Value>,
}

impl ChatRequest {
    fn user_id(&self) -> Option<&str> {
        self.context.as_ref()?.get("userId")?.as_str()
    }
}

#[derive(Serialize, Debug)]
pub struct ChatReply {
    pub response: String,
    pub intent: IntentKind,
    pub entities: EntityBag,
}

/// Everything the message endpoints need, shared across workers.
pub struct Assistant {
    classifier: IntentClassifier,
    recognizer: Arc<dyn EntityRecognizer>,
    generator: ResponseGenerator,
    repo: Arc<dyn TeamRepository>,
}

/// A message after classification, ready for the generator.
struct Turn {
    message: String,
    intent: IntentKind,
    entities: EntityBag,
    data: TeamData,
}

fn store_error(e: StoreError) -> HttpResponse {
    let body = ErrorBody::new(format!("{e}"));
    match e {
        StoreError::InvalidPatch(_) => HttpResponse::BadRequest().json(body),
        StoreError::Poisoned => HttpResponse::InternalServerError().json(body),
    }
}

impl Assistant {
    pub fn new(
        classifier: IntentClassifier,
        recognizer: Arc<dyn EntityRecognizer>,
        generator: ResponseGenerator,
        repo: Arc<dyn TeamRepository>,
    ) -> Self {
        Assistant {
            classifier,
            recognizer,
            generator,
            repo,
        }
    }

    fn prepare(&self, req: &ChatRequest) -> Result<Turn, HttpResponse> {
        let message = req.message.trim();
        if message.is_empty() {
            return Err(HttpResponse::BadRequest().json(ErrorBody::new("No message provided")));
        }

        let data = self.repo.snapshot_for(req.user_id()).map_err(store_error)?;
        let intent = self.classifier.classify(message);
        let entities = self.recognizer.extract(message);
        log::debug!("intent {intent}, entities {entities:?}");

        Ok(Turn {
            message: message.to_string(),
            intent,
            entities,
            data,
        })
    }

    pub async fn chat(&self, req: ChatRequest) -> HttpResponse {
        let turn = match self.prepare(&req) {
            Ok(turn) => turn,
            Err(resp) => return resp,
        };

        let response = self
            .generator
            .generate(&turn.message, turn.intent, &turn.entities, &turn.data)
            .await;

        HttpResponse::Ok().json(ChatReply {
            response,
            intent: turn.intent,
            entities: turn.entities,
        })
    }

    /// Server-sent events: one `data: {"content": ...}` event per chunk, then `data: [DONE]`.
    pub async fn chat_stream(&self, req: ChatRequest) -> HttpResponse {
        let turn = match self.prepare(&req) {
            Ok(turn) => turn,
            Err(resp) => return resp,
        };

        let chunks = self
            .generator
            .generate_stream(&turn.message, turn.intent, &turn.entities, &turn.data)
            .await;
        let events = chunks
            .map(|chunk| format!("data: {}\n\n", json!({ "content": chunk })))
            .chain(stream::once(async { "data: [DONE]\n\n".to_string() }))
            .map(|event| Ok::<_, actix_web::Error>(web::Bytes::from(event)));

        HttpResponse::Ok()
            .content_type("text/event-stream")
            .insert_header(("Cache-Control", "no-cache"))
            .streaming(events)
    }

    pub fn team_data(&self) -> HttpResponse {
        match self.repo.document() {
            Ok(document) => HttpResponse::Ok().json(document),
            Err(e) => store_error(e),
        }
    }

    pub fn update_team_data(&self, patch: Value) -> HttpResponse {
        match self.repo.merge(patch) {
            Ok(()) => {
                log::info!("team data updated");
                HttpResponse::Ok().json(json!({"message": "Team data updated successfully"}))
            }
            Err(e) => {
                log::warn!("team data update rejected: {e}");
                store_error(e)
            }
        }
    }
}

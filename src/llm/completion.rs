use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::config::settings::LlmSettings;
use crate::llm::interface::ChatCompletion;
use crate::llm::model::{Message, Prompt, Request, Response};
use crate::llm::stream::content_stream;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("completion has no content")]
    Empty,
}

/// OpenAI-compatible chat-completion client.
pub struct LlmClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(settings: &LlmSettings) -> Self {
        LlmClient {
            client: reqwest::Client::new(),
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, prompt: &Prompt, stream: bool) -> Request {
        Request {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            top_p: 1.0,
            stream,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }

    async fn send(&self, prompt: &Prompt, stream: bool) -> Result<reqwest::Response, LlmError> {
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt, stream))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    pub async fn try_complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let bytes = self.send(prompt, false).await?.bytes().await?;
        let response: Response = serde_json::from_slice(&bytes)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::Empty)
    }
}

#[async_trait]
impl ChatCompletion for LlmClient {
    async fn complete(&self, prompt: &Prompt) -> Option<String> {
        match self.try_complete(prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("LLM completion unavailable: {e}");
                None
            }
        }
    }

    async fn complete_stream(&self, prompt: &Prompt) -> Option<BoxStream<'static, String>> {
        match self.send(prompt, true).await {
            Ok(resp) => Some(content_stream(resp.bytes_stream())),
            Err(e) => {
                log::warn!("LLM stream unavailable: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use futures::StreamExt;
    use serde_json::{Value, json};

    fn settings(api_url: &str) -> LlmSettings {
        LlmSettings {
            api_key: "test-key".to_string(),
            api_url: api_url.to_string(),
            model: "gemma2-9b-it".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    fn prompt() -> Prompt {
        Prompt {
            system: "You are a helpful football assistant.".to_string(),
            user: "Who should start up front?".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    async fn fake_completions(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
        let authorized = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer test-key");
        if !authorized {
            return HttpResponse::Unauthorized().json(json!({"error": "invalid api key"}));
        }
        let body = body.into_inner();

        let user = body["messages"][1]["content"].as_str().unwrap_or_default();
        if user == "malformed" {
            return HttpResponse::Ok().body("{\"choices\": ");
        }

        if body["stream"] == json!(true) {
            let events = [
                json!({"choices": [{"delta": {"role": "assistant"}}]}),
                json!({"choices": [{"delta": {"content": "Start "}}]}),
                json!({"choices": [{"delta": {"content": "Messi."}}]}),
            ];
            let mut sse: String = events.iter().map(|e| format!("data: {e}\n\n")).collect();
            sse.push_str("data: [DONE]\n\n");
            return HttpResponse::Ok().content_type("text/event-stream").body(sse);
        }

        HttpResponse::Ok().json(json!({
            "choices": [{"message": {"role": "assistant", "content": format!(
                "{} | {} | {}",
                body["model"].as_str().unwrap_or_default(),
                body["messages"][0]["role"].as_str().unwrap_or_default(),
                user
            )}}]
        }))
    }

    #[test]
    fn test_request_body_shape() {
        let client = LlmClient::new(&settings("http://localhost"));
        let body = serde_json::to_value(client.request(&prompt(), true)).unwrap();

        assert_eq!(body["model"], "gemma2-9b-it");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Who should start up front?");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["top_p"], 1.0);
        assert_eq!(body["stream"], true);
    }

    #[actix_web::test]
    async fn test_against_local_server() {
        let server = HttpServer::new(|| {
            App::new().route("/v1/chat/completions", web::post().to(fake_completions))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let running = server.run();
        let handle = running.handle();
        actix_web::rt::spawn(running);

        let url = format!("http://{addr}/v1/chat/completions");
        let client = LlmClient::new(&settings(&url));

        assert_eq!(
            client.complete(&prompt()).await.as_deref(),
            Some("gemma2-9b-it | system | Who should start up front?")
        );

        let mut malformed = prompt();
        malformed.user = "malformed".to_string();
        assert!(matches!(
            client.try_complete(&malformed).await,
            Err(LlmError::Malformed(_))
        ));
        assert!(client.complete(&malformed).await.is_none());

        let stream = client.complete_stream(&prompt()).await.unwrap();
        let text: Vec<String> = stream.collect().await;
        assert_eq!(text.concat(), "Start Messi.");

        let mut wrong_key = settings(&url);
        wrong_key.api_key = "nope".to_string();
        let unauthorized = LlmClient::new(&wrong_key);
        assert!(matches!(
            unauthorized.try_complete(&prompt()).await,
            Err(LlmError::Status { status: 401, .. })
        ));
        assert!(unauthorized.complete_stream(&prompt()).await.is_none());

        handle.stop(false).await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_gives_no_result() {
        let client = LlmClient::new(&settings("http://127.0.0.1:9/v1/chat/completions"));
        assert!(client.complete(&prompt()).await.is_none());
        assert!(client.complete_stream(&prompt()).await.is_none());
    }
}

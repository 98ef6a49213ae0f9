mod chat_api;
mod config;
mod intent;
mod llm;
mod ner;
mod nlp;
mod responder;
mod team_data;
mod utils;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use dotenv::dotenv;

use chat_api::handlers::routes;
use chat_api::server_api::Assistant;
use config::settings::Settings;
use intent::classifier::IntentClassifier;
use llm::completion::LlmClient;
use llm::interface::ChatCompletion;
use ner::entities::build_recognizer;
use nlp::tokenizer::build_tokenizer;
use responder::generator::ResponseGenerator;
use team_data::mock::demo_team_data;
use team_data::store::InMemoryTeamStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().context("failed to read configuration")?;

    let tokenizer = build_tokenizer(settings.tokenizer, settings.lemma_lexicon_path.as_deref());
    let recognizer = build_recognizer(settings.ner_backend);
    let classifier = IntentClassifier::new(tokenizer, settings.match_threshold);

    let llm: Option<Arc<dyn ChatCompletion>> = match &settings.llm {
        Some(llm_settings) => {
            let client = LlmClient::new(llm_settings);
            log::info!("LLM completions enabled (model {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            log::warn!("GROQ_API_KEY is not set; replies come from templates only");
            None
        }
    };
    let generator = ResponseGenerator::new(llm, &settings);

    let repo = Arc::new(InMemoryTeamStore::new(
        &demo_team_data(),
        &settings.backend_api_url,
    ));

    log::info!(
        "tokenizer: {}, entity recognizer: {}, intent threshold: {}, llm: {}",
        classifier.tokenizer().name(),
        recognizer.name(),
        settings.match_threshold,
        generator.has_llm()
    );

    let assistant = web::Data::new(Assistant::new(classifier, recognizer, generator, repo));

    log::info!("starting server on {}", settings.bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(assistant.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(&settings.bind_addr)
    .with_context(|| format!("failed to bind {}", settings.bind_addr))?
    .run()
    .await?;

    Ok(())
}

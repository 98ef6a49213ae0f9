use std::sync::Arc;

use chrono::NaiveDate;
use futures::StreamExt;
use futures::stream::{self, BoxStream};

use crate::config::settings::Settings;
use crate::intent::model::IntentKind;
use crate::llm::interface::ChatCompletion;
use crate::llm::model::Prompt;
use crate::ner::model::EntityBag;
use crate::responder::insight::{data_driven_summary, match_odds};
use crate::responder::prompt::{PromptKind, build_prompt};
use crate::responder::templates;
use crate::team_data::model::TeamData;

/// Messages with more words than this skip the per-intent templates.
const SHORT_MESSAGE_WORDS: usize = 5;

const SIMULATION_NOTE: &str =
    " (Note: I'm currently in simulation mode, so I can't perform actual actions.)";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Produces replies: the LLM first when one is configured, templates otherwise.
pub struct ResponseGenerator {
    llm: Option<Arc<dyn ChatCompletion>>,
    venue_adjustment: f64,
    contract_reference_date: NaiveDate,
    temperature: f32,
    max_tokens: u32,
}

impl ResponseGenerator {
    pub fn new(llm: Option<Arc<dyn ChatCompletion>>, settings: &Settings) -> Self {
        let (temperature, max_tokens) = settings
            .llm
            .as_ref()
            .map(|l| (l.temperature, l.max_tokens))
            .unwrap_or((DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS));

        ResponseGenerator {
            llm,
            venue_adjustment: settings.venue_adjustment,
            contract_reference_date: settings.contract_reference_date,
            temperature,
            max_tokens,
        }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    fn prompt(&self, message: &str, intent: IntentKind, data: &TeamData) -> Prompt {
        build_prompt(
            PromptKind::for_intent(intent),
            message,
            data,
            self.temperature,
            self.max_tokens,
        )
    }

    pub async fn generate(
        &self,
        message: &str,
        intent: IntentKind,
        entities: &EntityBag,
        data: &TeamData,
    ) -> String {
        if let Some(llm) = &self.llm {
            if let Some(reply) = llm.complete(&self.prompt(message, intent, data)).await {
                return reply;
            }
        }
        self.fallback(message, intent, entities, data)
    }

    /// Reply as text chunks. A stream that ends without producing anything is
    /// replaced by the fallback reply.
    pub async fn generate_stream(
        &self,
        message: &str,
        intent: IntentKind,
        entities: &EntityBag,
        data: &TeamData,
    ) -> BoxStream<'static, String> {
        let fallback = self.fallback(message, intent, entities, data);

        let Some(llm) = &self.llm else {
            return stream::once(async move { fallback }).boxed();
        };
        match llm.complete_stream(&self.prompt(message, intent, data)).await {
            Some(chunks) => with_fallback(chunks, fallback),
            None => stream::once(async move { fallback }).boxed(),
        }
    }

    /// Reply built from the snapshot alone. Never empty.
    pub fn fallback(
        &self,
        message: &str,
        intent: IntentKind,
        entities: &EntityBag,
        data: &TeamData,
    ) -> String {
        match intent {
            IntentKind::AgentAction => {
                let canned = templates::canned(intent).unwrap_or("I can help you manage your team.");
                return format!("{canned}{SIMULATION_NOTE}");
            }
            IntentKind::Analysis => return self.summary(data),
            IntentKind::Prediction => return self.prediction(data),
            _ => {}
        }

        if intent == IntentKind::Unknown || message.split_whitespace().count() > SHORT_MESSAGE_WORDS {
            return self.summary(data);
        }

        match intent {
            IntentKind::Greeting | IntentKind::Goodbye => templates::canned(intent)
                .map(str::to_string)
                .unwrap_or_else(|| self.summary(data)),
            IntentKind::PlayerInfo => templates::player_info(entities, data),
            IntentKind::TeamInfo => templates::team_info(message, data),
            IntentKind::MatchInfo => templates::match_info(message, data),
            IntentKind::Tactics => templates::tactics(data),
            IntentKind::Training => templates::training(data),
            IntentKind::Injury => templates::injury(data),
            _ => self.summary(data),
        }
    }

    fn summary(&self, data: &TeamData) -> String {
        data_driven_summary(data, self.contract_reference_date)
    }

    fn prediction(&self, data: &TeamData) -> String {
        match data.upcoming_matches.first() {
            Some(fixture) => {
                let odds = match_odds(&data.team, fixture, self.venue_adjustment);
                templates::prediction(data, fixture, odds)
            }
            None => self.summary(data),
        }
    }
}

enum Relay {
    Streaming {
        chunks: BoxStream<'static, String>,
        fallback: String,
        sent: bool,
    },
    Finished,
}

fn with_fallback(chunks: BoxStream<'static, String>, fallback: String) -> BoxStream<'static, String> {
    let start = Relay::Streaming {
        chunks,
        fallback,
        sent: false,
    };
    stream::unfold(start, |state| async move {
        match state {
            Relay::Streaming {
                mut chunks,
                fallback,
                sent,
            } => match chunks.next().await {
                Some(chunk) => Some((
                    chunk,
                    Relay::Streaming {
                        chunks,
                        fallback,
                        sent: true,
                    },
                )),
                None if sent => None,
                None => Some((fallback, Relay::Finished)),
            },
            Relay::Finished => None,
        }
    })
    .boxed()
}

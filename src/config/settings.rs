use std::env;
use std::str::FromStr;

use anyhow::{Context, Error, bail};
use chrono::NaiveDate;

const DEFAULT_LLM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "gemma2-9b-it";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    Lemma,
    Stem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NerBackend {
    Rules,
    Regex,
}

/// Connection parameters for the chat-completion API.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub backend_api_url: String,
    /// `None` when no API key is configured: replies come from templates only.
    pub llm: Option<LlmSettings>,
    pub match_threshold: f64,
    pub venue_adjustment: f64,
    pub contract_reference_date: NaiveDate,
    pub tokenizer: TokenizerKind,
    pub lemma_lexicon_path: Option<String>,
    pub ner_backend: NerBackend,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: "0.0.0.0:5000".to_string(),
            backend_api_url: "http://localhost:3001/api/v1".to_string(),
            llm: None,
            match_threshold: 0.2,
            venue_adjustment: 5.0,
            contract_reference_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default(),
            tokenizer: TokenizerKind::Lemma,
            lemma_lexicon_path: None,
            ner_backend: NerBackend::Rules,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Settings::default();

        let llm = match get("GROQ_API_KEY") {
            None => None,
            Some(api_key) => Some(LlmSettings {
                api_key,
                api_url: get("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_URL.to_string()),
                model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                temperature: parse_or(get("LLM_TEMPERATURE"), "LLM_TEMPERATURE", 0.7)?,
                max_tokens: parse_or(get("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", 1000)?,
            }),
        };

        let tokenizer = match get("NLP_TOKENIZER").as_deref() {
            None | Some("lemma") => TokenizerKind::Lemma,
            Some("stem") => TokenizerKind::Stem,
            Some(other) => bail!("NLP_TOKENIZER must be 'lemma' or 'stem', got '{other}'"),
        };

        let ner_backend = match get("NER_BACKEND").as_deref() {
            None | Some("rules") => NerBackend::Rules,
            Some("regex") => NerBackend::Regex,
            Some(other) => bail!("NER_BACKEND must be 'rules' or 'regex', got '{other}'"),
        };

        Ok(Settings {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            backend_api_url: get("BACKEND_API_URL").unwrap_or(defaults.backend_api_url),
            llm,
            match_threshold: parse_or(
                get("INTENT_MATCH_THRESHOLD"),
                "INTENT_MATCH_THRESHOLD",
                defaults.match_threshold,
            )?,
            venue_adjustment: parse_or(
                get("VENUE_ADJUSTMENT"),
                "VENUE_ADJUSTMENT",
                defaults.venue_adjustment,
            )?,
            contract_reference_date: parse_or(
                get("CONTRACT_REFERENCE_DATE"),
                "CONTRACT_REFERENCE_DATE",
                defaults.contract_reference_date,
            )?,
            tokenizer,
            lemma_lexicon_path: get("LEMMA_LEXICON_PATH"),
            ner_backend,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("invalid value '{v}' for {key}")),
    }
}

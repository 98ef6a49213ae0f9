use std::sync::Arc;

use regex::Regex;

use crate::config::settings::NerBackend;
use crate::ner::interface::EntityRecognizer;
use crate::ner::model::Entity;
use crate::nlp::stopwords::is_stop_word;

/// Lowercase words that join the parts of a name: "Virgil van Dijk", "Frenkie de Jong".
const NAME_PARTICLES: &[&str] = &[
    "van", "von", "de", "der", "den", "da", "di", "del", "dos", "du", "la", "le",
];

/// Words that make a capitalized span a club rather than a person.
const CLUB_MARKERS: &[&str] = &[
    "FC", "CF", "AC", "SC", "United", "City", "Club", "Real", "Atletico", "Athletic", "Sporting",
    "Inter", "Bayern", "Borussia", "Olympique", "Rovers", "Wanderers",
];

/// Ordinary words that are capitalized only because they open a sentence.
const SENTENCE_OPENERS: &[&str] = &[
    "tell", "show", "give", "list", "add", "create", "remove", "delete", "schedule", "predict",
    "sign", "buy", "sell", "release", "compare", "analyze", "find", "get", "hello", "hi", "hey",
    "thanks", "thank", "please", "yes", "yeah", "okay", "ok", "good", "great", "bye", "goodbye",
    "next", "last", "update", "edit", "organize", "manage", "transfer", "plan", "help",
];

enum Token<'a> {
    Word(&'a str),
    Date(&'a str),
    Time(&'a str),
    Number(&'a str),
    Stop,
}

/// Capitalized-span recognizer with date, time and number patterns.
pub struct RuleRecognizer {
    token_re: Regex,
}

impl RuleRecognizer {
    pub fn new() -> Self {
        RuleRecognizer {
            token_re: Regex::new(
                r"(?P<date>\d{4}-\d{2}-\d{2})|(?P<time>\d{1,2}:\d{2})|(?P<num>\d+(?:\.\d+)?%?)|(?P<word>[^\W\d_]+(?:['\u{2019}][^\W\d_]+)?)|(?P<stop>[.!?])",
            )
            .unwrap(),
        }
    }

    fn tokens<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        self.token_re
            .captures_iter(text)
            .filter_map(|caps| {
                if let Some(m) = caps.name("date") {
                    Some(Token::Date(m.as_str()))
                } else if let Some(m) = caps.name("time") {
                    Some(Token::Time(m.as_str()))
                } else if let Some(m) = caps.name("num") {
                    Some(Token::Number(m.as_str()))
                } else if let Some(m) = caps.name("word") {
                    Some(Token::Word(m.as_str()))
                } else {
                    caps.name("stop").map(|_| Token::Stop)
                }
            })
            .collect()
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_all_caps(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().all(char::is_uppercase)
}

fn label_for(span: &[&str]) -> &'static str {
    let is_club = span.iter().any(|w| CLUB_MARKERS.contains(w))
        || (span.len() == 1 && is_all_caps(span[0]));
    if is_club { "ORG" } else { "PERSON" }
}

impl Default for RuleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for RuleRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let tokens = self.tokens(text);
        let mut entities = Vec::new();
        let mut sentence_start = true;
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::Stop => {
                    sentence_start = true;
                    i += 1;
                    continue;
                }
                Token::Date(s) => entities.push(Entity::new(s, "DATE")),
                Token::Time(s) => entities.push(Entity::new(s, "TIME")),
                Token::Number(s) if s.ends_with('%') => entities.push(Entity::new(s, "PERCENT")),
                Token::Number(s) => entities.push(Entity::new(s, "CARDINAL")),
                Token::Word(w) if is_capitalized(w) => {
                    let mut span = vec![*w];
                    let mut j = i + 1;
                    while j < tokens.len() {
                        match &tokens[j] {
                            Token::Word(next) if is_capitalized(next) => span.push(*next),
                            Token::Word(next)
                                if NAME_PARTICLES.contains(next)
                                    && matches!(tokens.get(j + 1), Some(Token::Word(after)) if is_capitalized(after)) =>
                            {
                                span.push(*next)
                            }
                            _ => break,
                        }
                        j += 1;
                    }

                    let mut words: &[&str] = &span;
                    if sentence_start {
                        let lower = words[0].to_lowercase();
                        if is_stop_word(&lower) || SENTENCE_OPENERS.contains(&lower.as_str()) {
                            words = &words[1..];
                        }
                    }
                    if words.len() == 1 && is_stop_word(&words[0].to_lowercase()) {
                        words = &[];
                    }
                    if !words.is_empty() {
                        entities.push(Entity::new(&words.join(" "), label_for(words)));
                    }

                    sentence_start = false;
                    i = j;
                    continue;
                }
                Token::Word(_) => {}
            }
            sentence_start = false;
            i += 1;
        }

        entities
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// First capitalized word, reported as a person.
pub struct RegexRecognizer {
    name_re: Regex,
}

impl RegexRecognizer {
    pub fn new() -> Self {
        RegexRecognizer {
            name_re: Regex::new(r"\b[A-Z][a-z]+\b").unwrap(),
        }
    }
}

impl Default for RegexRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for RegexRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        self.name_re
            .find(text)
            .map(|m| vec![Entity::new(m.as_str(), "PERSON")])
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

pub fn build_recognizer(backend: NerBackend) -> Arc<dyn EntityRecognizer> {
    match backend {
        NerBackend::Rules => Arc::new(RuleRecognizer::new()),
        NerBackend::Regex => Arc::new(RegexRecognizer::new()),
    }
}

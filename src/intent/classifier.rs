use std::collections::HashSet;
use std::sync::Arc;

use crate::intent::model::IntentKind;
use crate::intent::table::{AGENT_KEYWORDS, INTENTS};
use crate::nlp::interface::Tokenizer;

struct Phrase {
    /// Normalized phrase; matched as a plain substring, so "team" also fires inside "teammate".
    text: String,
    words: HashSet<String>,
}

struct CompiledIntent {
    kind: IntentKind,
    phrases: Vec<Phrase>,
}

/// Keyword classifier over the static intent table.
pub struct IntentClassifier {
    tokenizer: Arc<dyn Tokenizer>,
    intents: Vec<CompiledIntent>,
    agent_keywords: Vec<String>,
    threshold: f64,
}

impl IntentClassifier {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, threshold: f64) -> Self {
        let intents = INTENTS
            .iter()
            .map(|intent| {
                let phrases = intent
                    .phrases
                    .iter()
                    .filter_map(|raw| {
                        let tokens = tokenizer.tokenize(raw);
                        if tokens.is_empty() {
                            log::warn!(
                                "trigger phrase '{raw}' of {} is all stop-words; skipped",
                                intent.kind
                            );
                            return None;
                        }
                        Some(Phrase {
                            text: tokens.join(" "),
                            words: tokens.into_iter().collect(),
                        })
                    })
                    .collect();
                CompiledIntent {
                    kind: intent.kind,
                    phrases,
                }
            })
            .collect();

        let agent_keywords = AGENT_KEYWORDS
            .iter()
            .map(|k| tokenizer.normalize(k))
            .filter(|k| !k.is_empty())
            .collect();

        IntentClassifier {
            tokenizer,
            intents,
            agent_keywords,
            threshold,
        }
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Normalizes `message` and classifies it.
    pub fn classify(&self, message: &str) -> IntentKind {
        let normalized = self.tokenizer.normalize(message);
        let kind = self.classify_normalized(&normalized);
        log::debug!("classified '{normalized}' as {kind}");
        kind
    }

    /// Classifies already-normalized text (space-separated tokens).
    pub fn classify_normalized(&self, text: &str) -> IntentKind {
        let input_words: HashSet<&str> = text.split_whitespace().collect();

        let mut best_kind = IntentKind::Unknown;
        let mut best_score = 0.0_f64;

        for intent in &self.intents {
            for phrase in &intent.phrases {
                if text.contains(phrase.text.as_str()) {
                    return intent.kind;
                }

                let shared = phrase
                    .words
                    .iter()
                    .filter(|w| input_words.contains(w.as_str()))
                    .count();
                let score = shared as f64 / phrase.words.len() as f64;
                // Strictly greater: the first phrase to reach a score keeps it.
                if score > best_score {
                    best_score = score;
                    best_kind = intent.kind;
                }
            }
        }

        if best_score > self.threshold {
            return best_kind;
        }

        if self.agent_keywords.iter().any(|k| text.contains(k.as_str())) {
            return IntentKind::AgentAction;
        }

        IntentKind::Unknown
    }

    /// Normalized trigger phrases per intent, in table order.
    pub fn phrases(&self) -> Vec<(IntentKind, String)> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent
                    .phrases
                    .iter()
                    .map(move |p| (intent.kind, p.text.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tokenizer::{LemmaTokenizer, StemTokenizer};

    fn lemma_classifier() -> IntentClassifier {
        IntentClassifier::new(Arc::new(LemmaTokenizer::new()), 0.2)
    }

    #[test]
    fn test_every_trigger_phrase_selects_its_intent() {
        let tokenizers: Vec<Arc<dyn Tokenizer>> =
            vec![Arc::new(LemmaTokenizer::new()), Arc::new(StemTokenizer::new())];

        for tokenizer in tokenizers {
            let name = tokenizer.name();
            let classifier = IntentClassifier::new(tokenizer, 0.2);
            for intent in INTENTS {
                for phrase in intent.phrases {
                    assert_eq!(
                        classifier.classify(phrase),
                        intent.kind,
                        "phrase '{phrase}' with {name} tokenizer"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_phrase_is_dropped() {
        let classifier = lemma_classifier();
        let total: usize = INTENTS.iter().map(|i| i.phrases.len()).sum();
        assert_eq!(classifier.phrases().len(), total);
    }

    #[test]
    fn test_known_messages() {
        let classifier = lemma_classifier();
        assert_eq!(classifier.classify("hello"), IntentKind::Greeting);
        assert_eq!(classifier.classify("add a new player"), IntentKind::AgentAction);
        assert_eq!(
            classifier.classify("Tell me about my players"),
            IntentKind::PlayerInfo
        );
        assert_eq!(
            classifier.classify("When is our next match?"),
            IntentKind::MatchInfo
        );
        // "squad" belongs to player_info, which is scanned before injury.
        assert_eq!(
            classifier.classify("Any injuries in the squad?"),
            IntentKind::PlayerInfo
        );
        assert_eq!(classifier.classify("Any injuries?"), IntentKind::Injury);
        assert_eq!(classifier.classify("Thanks a lot"), IntentKind::Goodbye);
    }

    #[test]
    fn test_phrases_match_inside_longer_words() {
        let tokenizers: Vec<Arc<dyn Tokenizer>> =
            vec![Arc::new(LemmaTokenizer::new()), Arc::new(StemTokenizer::new())];

        for tokenizer in tokenizers {
            let classifier = IntentClassifier::new(tokenizer, 0.2);
            assert_eq!(classifier.classify("how are my teammates"), IntentKind::TeamInfo);
            assert_eq!(classifier.classify("who is our goalkeeper"), IntentKind::PlayerInfo);
            assert_eq!(classifier.classify("any tactical tweaks"), IntentKind::Tactics);
        }
    }

    #[test]
    fn test_restored_phrases() {
        let classifier = lemma_classifier();
        assert_eq!(
            classifier.classify("How is Messi's performance"),
            IntentKind::PlayerInfo
        );
        assert_eq!(classifier.classify("what system should we use"), IntentKind::Tactics);
        assert_eq!(classifier.classify("counter attack"), IntentKind::Tactics);
        assert_eq!(
            classifier.classify("how likely are we to beat Sevilla"),
            IntentKind::Prediction
        );
        assert_eq!(classifier.classify("plan the week"), IntentKind::Training);
        // "form" sits in player_info, ahead of every row that mentions formations.
        assert_eq!(classifier.classify("recent form"), IntentKind::PlayerInfo);
    }

    #[test]
    fn test_overlap_picks_partial_phrase() {
        let classifier = lemma_classifier();
        // No phrase occurs whole, but "sign" covers half of "sign player".
        assert_eq!(classifier.classify("sign Haaland"), IntentKind::AgentAction);
        // Half of "clean sheet".
        assert_eq!(classifier.classify("sheet"), IntentKind::TeamInfo);
    }

    #[test]
    fn test_overlap_ties_keep_first_intent() {
        let classifier = lemma_classifier();
        // "good" is half of "good morning" (greeting), which precedes every other half match.
        assert_eq!(classifier.classify("good stuff"), IntentKind::Greeting);
    }

    #[test]
    fn test_agent_keywords_apply_below_threshold() {
        let classifier = IntentClassifier::new(Arc::new(LemmaTokenizer::new()), 0.6);
        assert_eq!(
            classifier.classify("schedule tomorrow"),
            IntentKind::AgentAction
        );
        assert_eq!(classifier.classify("sheet"), IntentKind::Unknown);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        let classifier = lemma_classifier();
        assert_eq!(classifier.classify("who is the best keeper"), IntentKind::Unknown);
        assert_eq!(classifier.classify(""), IntentKind::Unknown);
        assert_eq!(classifier.classify("?!"), IntentKind::Unknown);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = lemma_classifier();
        let first = classifier.classify("predict the Sevilla result");
        for _ in 0..10 {
            assert_eq!(classifier.classify("predict the Sevilla result"), first);
        }
    }
}

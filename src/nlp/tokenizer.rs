use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use anyhow::{Context, Error};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::settings::TokenizerKind;
use crate::nlp::interface::Tokenizer;
use crate::nlp::stopwords::is_stop_word;

/// Irregular forms the suffix rules get wrong.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("news", "news"),
    ("always", "always"),
    ("series", "series"),
    ("won", "win"),
    ("winning", "win"),
    ("lost", "lose"),
    ("losing", "lose"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("scored", "score"),
    ("scoring", "score"),
    ("played", "play"),
    ("playing", "play"),
    ("added", "add"),
    ("adding", "add"),
    ("created", "create"),
    ("creating", "create"),
    ("deleted", "delete"),
    ("deleting", "delete"),
    ("removed", "remove"),
    ("removing", "remove"),
    ("signed", "sign"),
    ("signing", "sign"),
    ("scheduled", "schedule"),
    ("scheduling", "schedule"),
    ("released", "release"),
    ("releasing", "release"),
    ("bought", "buy"),
    ("buying", "buy"),
    ("sold", "sell"),
    ("selling", "sell"),
    ("managed", "manage"),
    ("managing", "manage"),
    ("organized", "organize"),
    ("organizing", "organize"),
    ("updated", "update"),
    ("updating", "update"),
    ("predicted", "predict"),
    ("predicting", "predict"),
    ("told", "tell"),
    ("telling", "tell"),
    ("got", "get"),
    ("went", "go"),
    ("gave", "give"),
    ("took", "take"),
    ("saw", "see"),
    ("said", "say"),
    ("thought", "think"),
    ("injured", "injure"),
];

/// Strips English plural endings, leaving short words alone.
fn singular(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    for suffix in ["ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Dictionary lemmatizer over Unicode word boundaries.
pub struct LemmaTokenizer {
    lemmas: HashMap<String, String>,
}

impl LemmaTokenizer {
    pub fn new() -> Self {
        let lemmas = IRREGULAR_LEMMAS
            .iter()
            .map(|(w, l)| (w.to_string(), l.to_string()))
            .collect();
        LemmaTokenizer { lemmas }
    }

    /// Built-in table extended with `word<TAB>lemma` lines from `path`.
    pub fn with_lexicon(path: &str) -> Result<Self, Error> {
        let content =
            fs::read_to_string(path).with_context(|| format!("cannot read lexicon '{path}'"))?;

        let mut tokenizer = LemmaTokenizer::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, lemma) = line
                .split_once('\t')
                .with_context(|| format!("{path}:{}: expected 'word<TAB>lemma'", line_no + 1))?;
            tokenizer
                .lemmas
                .insert(word.trim().to_lowercase(), lemma.trim().to_lowercase());
        }
        Ok(tokenizer)
    }

    fn lemmatize(&self, word: &str) -> String {
        match self.lemmas.get(word) {
            Some(lemma) => lemma.clone(),
            None => singular(word),
        }
    }
}

impl Default for LemmaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for LemmaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        lower
            .unicode_words()
            .map(|w| w.trim_end_matches("'s").trim_end_matches("\u{2019}s"))
            .filter(|w| is_alphabetic(w) && !is_stop_word(w))
            .map(|w| self.lemmatize(w))
            .collect()
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

/// Regex word split plus a light suffix-stripping stemmer.
pub struct StemTokenizer {
    word_re: Regex,
}

impl StemTokenizer {
    pub fn new() -> Self {
        StemTokenizer {
            word_re: Regex::new(r"[a-z]+").unwrap(),
        }
    }

    fn stem(word: &str) -> String {
        let word = singular(word);
        for suffix in ["ing", "ed", "ly"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 3 {
                    return undouble(stem);
                }
            }
        }
        word
    }
}

/// `runn` -> `run`, but `press` and `fall` keep their double letters.
fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && !matches!(bytes[n - 1], b'l' | b's' | b'z') {
        let last = bytes[n - 1];
        if !matches!(last, b'a' | b'e' | b'i' | b'o' | b'u') {
            return stem[..n - 1].to_string();
        }
    }
    stem.to_string()
}

impl Default for StemTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for StemTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.word_re
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !is_stop_word(w))
            .map(Self::stem)
            .collect()
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

/// Picks the tokenizer for the process. A lemma tokenizer whose lexicon cannot
/// be loaded degrades to the stemmer instead of failing start-up.
pub fn build_tokenizer(kind: TokenizerKind, lexicon_path: Option<&str>) -> Arc<dyn Tokenizer> {
    match (kind, lexicon_path) {
        (TokenizerKind::Stem, _) => Arc::new(StemTokenizer::new()),
        (TokenizerKind::Lemma, None) => Arc::new(LemmaTokenizer::new()),
        (TokenizerKind::Lemma, Some(path)) => match LemmaTokenizer::with_lexicon(path) {
            Ok(tokenizer) => Arc::new(tokenizer),
            Err(e) => {
                log::warn!("{e:#}; falling back to the stemming tokenizer");
                Arc::new(StemTokenizer::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lemma_tokenizer_strips_stop_words_and_plurals() {
        let tokenizer = LemmaTokenizer::new();
        assert_eq!(
            tokenizer.tokenize("Tell me about my players!"),
            vec!["tell", "player"]
        );
        assert_eq!(tokenizer.tokenize("add a new player"), vec!["add", "new", "player"]);
        assert_eq!(tokenizer.tokenize("Any injuries this week?"), vec!["injury", "week"]);
        assert_eq!(tokenizer.tokenize("next matches"), vec!["next", "match"]);
    }

    #[test]
    fn test_lemma_tokenizer_drops_non_words() {
        let tokenizer = LemmaTokenizer::new();
        assert_eq!(tokenizer.tokenize("what's up?? 4-3-3"), Vec::<String>::new());
        assert_eq!(tokenizer.tokenize("Messi's goals"), vec!["messi", "goal"]);
        assert_eq!(tokenizer.tokenize("analysis"), vec!["analysis"]);
    }

    #[test]
    fn test_lemma_tokenizer_irregulars() {
        let tokenizer = LemmaTokenizer::new();
        assert_eq!(tokenizer.tokenize("we won and scored"), vec!["win", "score"]);
    }

    #[test]
    fn test_stem_tokenizer() {
        let tokenizer = StemTokenizer::new();
        assert_eq!(tokenizer.tokenize("Training sessions"), vec!["train", "session"]);
        assert_eq!(tokenizer.tokenize("winning the pressing"), vec!["win", "press"]);
        assert_eq!(tokenizer.tokenize("scheduled matches"), vec!["schedul", "match"]);
    }

    #[test]
    fn test_normalize_joins_tokens() {
        assert_eq!(LemmaTokenizer::new().normalize("Hello there, coach"), "hello coach");
    }

    #[test]
    fn test_lexicon_extends_lemmas() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# extra forms").unwrap();
        writeln!(file, "keepers\tgoalkeeper").unwrap();
        let tokenizer = LemmaTokenizer::with_lexicon(file.path().to_str().unwrap()).unwrap();
        assert_eq!(tokenizer.tokenize("our keepers"), vec!["goalkeeper"]);
    }

    #[test]
    fn test_missing_lexicon_falls_back_to_stemmer() {
        let tokenizer = build_tokenizer(TokenizerKind::Lemma, Some("/nonexistent/lexicon.tsv"));
        assert_eq!(tokenizer.name(), "stem");
        let tokenizer = build_tokenizer(TokenizerKind::Lemma, None);
        assert_eq!(tokenizer.name(), "lemma");
    }
}

pub trait Tokenizer: Send + Sync {
    /// Lower-cased content words of `text`, stop-words removed, each reduced to its base form.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Tokens joined by single spaces.
    fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }
}

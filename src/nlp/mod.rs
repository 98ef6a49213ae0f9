pub mod interface;
pub mod stopwords;
pub mod tokenizer;

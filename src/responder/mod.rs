pub mod generator;
pub mod insight;
pub mod prompt;
pub mod templates;

use std::collections::BTreeMap;

use serde::Serialize;

/// Label -> text, one value per label.
pub type EntityBag = BTreeMap<String, String>;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub label: String,
}

impl Entity {
    pub fn new(text: &str, label: &str) -> Self {
        Entity {
            text: text.to_string(),
            label: label.to_string(),
        }
    }
}

use crate::ner::model::{Entity, EntityBag};

pub trait EntityRecognizer: Send + Sync {
    /// Entities in order of appearance.
    fn recognize(&self, text: &str) -> Vec<Entity>;

    fn name(&self) -> &'static str;

    /// Collapses entities by label; a later entity replaces an earlier one with the same label.
    fn extract(&self, text: &str) -> EntityBag {
        let mut bag = EntityBag::new();
        for entity in self.recognize(text) {
            bag.insert(entity.label, entity.text);
        }
        bag
    }
}

use std::sync::RwLock;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::team_data::interface::TeamRepository;
use crate::team_data::model::TeamData;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid team data: {0}")]
    InvalidPatch(String),
    #[error("team data store is unavailable: lock poisoned")]
    Poisoned,
}

/// Process-wide snapshot kept as the JSON document clients posted.
/// Top-level keys are replaced wholesale and the last write wins.
pub struct InMemoryTeamStore {
    document: RwLock<Map<String, Value>>,
    backend_url: String,
}

impl InMemoryTeamStore {
    pub fn new(data: &TeamData, backend_url: &str) -> Self {
        InMemoryTeamStore {
            document: RwLock::new(data.to_document()),
            backend_url: backend_url.to_string(),
        }
    }
}

impl TeamRepository for InMemoryTeamStore {
    fn document(&self) -> Result<Map<String, Value>, StoreError> {
        let document = self.document.read().map_err(|_| StoreError::Poisoned)?;
        Ok(document.clone())
    }

    fn snapshot(&self) -> Result<TeamData, StoreError> {
        let document = self.document.read().map_err(|_| StoreError::Poisoned)?;
        Ok(TeamData::from_document(&document))
    }

    fn snapshot_for(&self, user_id: Option<&str>) -> Result<TeamData, StoreError> {
        if let Some(id) = user_id {
            log::debug!(
                "serving mock team data for user {id} (backend {} not queried)",
                self.backend_url
            );
        }
        self.snapshot()
    }

    fn merge(&self, patch: Value) -> Result<(), StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::InvalidPatch(
                "team data update must be a JSON object".to_string(),
            ));
        };
        let mut document = self.document.write().map_err(|_| StoreError::Poisoned)?;
        document.extend(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team_data::mock::demo_team_data;
    use serde_json::json;

    fn demo_store() -> InMemoryTeamStore {
        InMemoryTeamStore::new(&demo_team_data(), "http://localhost:3001/api/v1")
    }

    #[test]
    fn test_merge_is_visible_to_later_snapshots() {
        let store = demo_store();
        store
            .merge(json!({"upcoming_matches": [{"opponent": "Valencia", "venue": "Away"}]}))
            .unwrap();

        let data = store.snapshot_for(Some("user-7")).unwrap();
        assert_eq!(data.upcoming_matches.len(), 1);
        assert_eq!(data.upcoming_matches[0].opponent, "Valencia");
        assert_eq!(data.players.len(), 4);
    }

    #[test]
    fn test_merge_replaces_whole_keys() {
        let store = demo_store();
        store.merge(json!({"team": {"name": "Girona FC", "wins": 3}})).unwrap();

        let data = store.snapshot().unwrap();
        assert_eq!(data.team.name, "Girona FC");
        assert_eq!(data.team.wins, 3);
        assert_eq!(data.team.manager, "");
        assert_eq!(data.players, demo_team_data().players);
    }

    #[test]
    fn test_merge_keeps_nested_fields_verbatim() {
        let store = demo_store();
        store
            .merge(json!({
                "team": {"name": "Girona FC", "stadium": "Montilivi"},
                "players": [{"name": "New Guy", "height": 185}],
            }))
            .unwrap();

        let document = store.document().unwrap();
        assert_eq!(document["team"]["stadium"], "Montilivi");
        assert_eq!(document["players"][0]["height"], 185);

        let data = store.snapshot().unwrap();
        assert_eq!(data.team.name, "Girona FC");
        assert_eq!(data.players.len(), 1);
        assert_eq!(data.players[0].name, "New Guy");
    }

    #[test]
    fn test_mistyped_values_are_accepted() {
        let store = demo_store();
        store.merge(json!({"team": {"name": "Girona FC", "wins": "24"}})).unwrap();

        assert_eq!(store.document().unwrap()["team"]["wins"], "24");
        let data = store.snapshot().unwrap();
        assert_eq!(data.team.name, "Girona FC");
        assert_eq!(data.team.wins, 0);
    }

    #[test]
    fn test_non_object_patch_leaves_snapshot_untouched() {
        let store = demo_store();
        let before = store.document().unwrap();

        for patch in [json!([1, 2, 3]), json!("everyone"), json!(42), Value::Null] {
            let err = store.merge(patch).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPatch(_)));
        }
        assert_eq!(store.document().unwrap(), before);
    }

    #[test]
    fn test_concurrent_merges_all_land() {
        let store = demo_store();
        std::thread::scope(|s| {
            for i in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for j in 0..25 {
                        store.merge(json!({ format!("key_{i}_{j}"): j })).unwrap();
                    }
                });
            }
        });

        let document = store.document().unwrap();
        for i in 0..8 {
            for j in 0..25 {
                assert_eq!(document[&format!("key_{i}_{j}")], j);
            }
        }
        assert_eq!(store.snapshot().unwrap().players.len(), 4);
    }
}

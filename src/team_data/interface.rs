use serde_json::{Map, Value};

use crate::team_data::model::TeamData;
use crate::team_data::store::StoreError;

pub trait TeamRepository: Send + Sync {
    /// The snapshot exactly as stored, unknown fields included.
    fn document(&self) -> Result<Map<String, Value>, StoreError>;

    /// Typed view of the snapshot used for rendering replies.
    fn snapshot(&self) -> Result<TeamData, StoreError>;

    /// Snapshot as seen by a given user. The demo backend serves one shared snapshot.
    fn snapshot_for(&self, user_id: Option<&str>) -> Result<TeamData, StoreError>;

    /// Replaces the top-level keys of the snapshot with those of `patch`.
    /// Only a non-object patch is rejected.
    fn merge(&self, patch: Value) -> Result<(), StoreError>;
}

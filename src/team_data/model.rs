use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A value of the wrong shape reads as the default instead of failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the well-formed items of a list; anything that is not a list reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Player {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub position: String,
    #[serde(deserialize_with = "lenient")]
    pub goals: u32,
    #[serde(deserialize_with = "lenient")]
    pub assists: u32,
    #[serde(deserialize_with = "lenient")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient")]
    pub fitness: u32,
    #[serde(deserialize_with = "lenient_list")]
    pub injuries: Vec<Value>,
    #[serde(deserialize_with = "lenient")]
    pub age: u32,
    #[serde(deserialize_with = "lenient")]
    pub nationality: String,
    /// Free-form value such as `"45M"`.
    #[serde(deserialize_with = "lenient")]
    pub market_value: String,
    #[serde(deserialize_with = "lenient")]
    pub contract_expiry: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_list")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub weaknesses: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub formation: String,
    #[serde(deserialize_with = "lenient")]
    pub wins: u32,
    #[serde(deserialize_with = "lenient")]
    pub losses: u32,
    #[serde(deserialize_with = "lenient")]
    pub draws: u32,
    #[serde(deserialize_with = "lenient")]
    pub goals_for: u32,
    #[serde(deserialize_with = "lenient")]
    pub goals_against: u32,
    #[serde(deserialize_with = "lenient")]
    pub clean_sheets: u32,
    #[serde(deserialize_with = "lenient")]
    pub league_position: u32,
    #[serde(deserialize_with = "lenient")]
    pub manager: String,
    #[serde(deserialize_with = "lenient_list")]
    pub recent_form: Vec<String>,
}

impl Team {
    pub fn games_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GoalEvent {
    #[serde(deserialize_with = "lenient")]
    pub minute: u32,
    #[serde(deserialize_with = "lenient")]
    pub scorer: String,
    /// `"None"` for unassisted goals.
    #[serde(deserialize_with = "lenient")]
    pub assist: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Match {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub opponent: String,
    #[serde(deserialize_with = "lenient")]
    pub date: String,
    #[serde(deserialize_with = "lenient")]
    pub result: String,
    #[serde(deserialize_with = "lenient")]
    pub score: String,
    #[serde(deserialize_with = "lenient")]
    pub home_away: String,
    #[serde(deserialize_with = "lenient")]
    pub competition: String,
    #[serde(deserialize_with = "lenient_list")]
    pub goals: Vec<GoalEvent>,
    #[serde(deserialize_with = "lenient")]
    pub tactical_notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Training {
    #[serde(deserialize_with = "lenient")]
    pub last_session: String,
    #[serde(deserialize_with = "lenient_list")]
    pub focus_areas: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub attendance: u32,
    #[serde(deserialize_with = "lenient")]
    pub duration_minutes: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UpcomingMatch {
    #[serde(deserialize_with = "lenient")]
    pub opponent: String,
    #[serde(deserialize_with = "lenient")]
    pub date: String,
    #[serde(deserialize_with = "lenient")]
    pub time: String,
    #[serde(deserialize_with = "lenient")]
    pub venue: String,
    #[serde(deserialize_with = "lenient")]
    pub competition: String,
}

/// Everything the assistant knows about the user's team.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TeamData {
    #[serde(deserialize_with = "lenient_list")]
    pub players: Vec<Player>,
    #[serde(deserialize_with = "lenient")]
    pub team: Team,
    /// Most recent first.
    #[serde(deserialize_with = "lenient_list")]
    pub matches: Vec<Match>,
    #[serde(deserialize_with = "lenient")]
    pub training: Training,
    #[serde(deserialize_with = "lenient_list")]
    pub upcoming_matches: Vec<UpcomingMatch>,
    /// Top-level keys posted by clients that the assistant does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TeamData {
    /// Typed view of a raw snapshot. Missing or mistyped fields take their defaults.
    pub fn from_document(document: &Map<String, Value>) -> TeamData {
        serde_json::from_value(Value::Object(document.clone())).unwrap_or_default()
    }

    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

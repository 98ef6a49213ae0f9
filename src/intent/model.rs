use std::fmt;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Greeting,
    AgentAction,
    PlayerInfo,
    TeamInfo,
    MatchInfo,
    Tactics,
    Training,
    Injury,
    Analysis,
    Prediction,
    Goodbye,
    Unknown,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Greeting => "greeting",
            IntentKind::AgentAction => "agent_action",
            IntentKind::PlayerInfo => "player_info",
            IntentKind::TeamInfo => "team_info",
            IntentKind::MatchInfo => "match_info",
            IntentKind::Tactics => "tactics",
            IntentKind::Training => "training",
            IntentKind::Injury => "injury",
            IntentKind::Analysis => "analysis",
            IntentKind::Prediction => "prediction",
            IntentKind::Goodbye => "goodbye",
            IntentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the intent table.
#[derive(Debug)]
pub struct Intent {
    pub kind: IntentKind,
    /// Raw trigger phrases; normalized with the active tokenizer when the classifier is built.
    pub phrases: &'static [&'static str],
    pub responses: &'static [&'static str],
}

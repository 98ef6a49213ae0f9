use crate::intent::model::{Intent, IntentKind};

/// Classification order. A phrase hit returns at once, so earlier rows shadow later ones:
/// agent actions sit ahead of the info intents because most of them mention a player or match.
pub static INTENTS: &[Intent] = &[
    Intent {
        kind: IntentKind::Greeting,
        phrases: &[
            "hello",
            "hi",
            "hey",
            "good morning",
            "good afternoon",
            "good evening",
            "greetings",
            "howdy",
        ],
        responses: &[
            "Hello! I'm your AI Football Assistant. How can I help you today?",
            "Hi there! What would you like to know about your team?",
            "Greetings! I'm here to help with tactical advice and team analysis.",
        ],
    },
    Intent {
        kind: IntentKind::AgentAction,
        phrases: &[
            "new player",
            "add player",
            "create player",
            "remove player",
            "delete player",
            "update player",
            "edit player",
            "sign player",
            "buy player",
            "sell player",
            "release player",
            "transfer player",
            "transfer",
            "add match",
            "create match",
            "schedule match",
            "arrange match",
            "organize match",
            "set up match",
            "plan match",
            "manage team",
            "team management",
        ],
        responses: &[
            "I can help you manage your team by adding or updating players and matches.",
            "Let me assist you with team management tasks.",
            "I can perform administrative actions for your team.",
        ],
    },
    Intent {
        kind: IntentKind::PlayerInfo,
        phrases: &[
            "player",
            "tell me about",
            "information about",
            "stats for",
            "performance",
            "goals",
            "assists",
            "contract",
            "strength",
            "weakness",
            "form",
            "condition",
            "squad",
            "team member",
            "top scorer",
        ],
        responses: &[
            "I can provide detailed information about your players. Which player would you like to know more about?",
            "Let me share some insights about your squad members. Who are you interested in?",
            "I have detailed stats on all your players. Just tell me the name of the player you're interested in.",
        ],
    },
    Intent {
        kind: IntentKind::TeamInfo,
        phrases: &[
            "team",
            "club",
            "record",
            "league",
            "position",
            "manager",
            "clean sheet",
            "season",
            "standings",
            "table",
        ],
        responses: &[
            "I can provide detailed information about your team's performance and setup.",
            "Let me share insights about your team's current status and achievements.",
            "I have comprehensive data on your team's season performance and tactical setup.",
        ],
    },
    Intent {
        kind: IntentKind::MatchInfo,
        phrases: &[
            "match",
            "game",
            "fixture",
            "opponent",
            "score",
            "result",
            "competition",
            "upcoming",
            "recent",
            "next match",
            "last match",
        ],
        responses: &[
            "I can provide details about your upcoming or past matches.",
            "Let me share match information and tactical insights.",
            "I have data on your recent performances and upcoming fixtures.",
        ],
    },
    Intent {
        kind: IntentKind::Tactics,
        phrases: &[
            "tactic",
            "strategy",
            "play style",
            "approach",
            "lineup",
            "system",
            "counter",
            "pressing",
            "defend",
            "attack",
            "shape",
            "setup",
            "style",
        ],
        responses: &[
            "I can offer tactical advice for your team's formation and strategy.",
            "Let me provide insights on tactical approaches and formations.",
            "I can analyze your tactical setup and suggest improvements.",
        ],
    },
    Intent {
        kind: IntentKind::Training,
        phrases: &[
            "training",
            "practice",
            "drill",
            "workout",
            "exercise",
            "session",
            "focus",
            "plan",
        ],
        responses: &[
            "I can suggest training drills and focus areas for your team.",
            "Let me recommend specific training exercises based on your team's needs.",
            "I can help you plan effective training sessions for your players.",
        ],
    },
    Intent {
        kind: IntentKind::Injury,
        phrases: &[
            "injury",
            "injured",
            "hurt",
            "fitness",
            "recovery",
            "medical",
            "suspension",
            "absence",
            "rest",
            "health",
            "wellness",
        ],
        responses: &[
            "I can provide information about player fitness and injury status.",
            "Let me check on your squad's current fitness levels and any concerns.",
            "I can help you manage player workload and recovery.",
        ],
    },
    Intent {
        kind: IntentKind::Analysis,
        phrases: &[
            "analysis",
            "analyze",
            "insight",
            "recommendation",
            "advice",
            "suggestion",
            "improve",
            "data",
            "metrics",
            "review",
            "evaluate",
        ],
        responses: &[
            "I can provide data-driven insights and recommendations for your team.",
            "Let me analyze your team's performance and offer suggestions.",
            "I can identify key strengths and areas for improvement in your setup.",
        ],
    },
    Intent {
        kind: IntentKind::Prediction,
        phrases: &[
            "predict",
            "prediction",
            "chance",
            "probability",
            "win",
            "lose",
            "draw",
            "outcome",
            "expect",
            "forecast",
            "odds",
            "likely",
        ],
        responses: &[
            "I can make predictions based on your team's current form and data.",
            "Let me analyze the factors that could influence your next match.",
            "I can provide statistical predictions for upcoming fixtures.",
        ],
    },
    Intent {
        kind: IntentKind::Goodbye,
        phrases: &[
            "bye",
            "goodbye",
            "see you",
            "farewell",
            "thanks",
            "thank you",
            "later",
            "cheers",
        ],
        responses: &[
            "Goodbye! Feel free to ask me anytime about your team.",
            "Thanks for chatting! I'm here whenever you need tactical advice.",
            "See you later! Remember, I'm always available for football insights.",
        ],
    },
];

/// Checked only when no phrase overlaps enough.
pub static AGENT_KEYWORDS: &[&str] = &[
    "add", "remove", "create", "delete", "sign", "transfer", "buy", "sell", "release", "manage",
    "organize", "schedule",
];

pub fn intent(kind: IntentKind) -> Option<&'static Intent> {
    INTENTS.iter().find(|i| i.kind == kind)
}

/// Canned replies for `kind`; empty for `Unknown`.
pub fn responses(kind: IntentKind) -> &'static [&'static str] {
    intent(kind).map(|i| i.responses).unwrap_or(&[])
}

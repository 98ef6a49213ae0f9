use crate::intent::model::IntentKind;
use crate::llm::model::Prompt;
use crate::team_data::model::TeamData;

const ANALYST_SYSTEM: &str = "You are an expert football analyst and tactical advisor. \
Always provide detailed, data-driven responses using football terminology.";

const ADVISOR_SYSTEM: &str = "You are an expert football analyst and tactical advisor. \
Always provide detailed, helpful responses using football terminology.";

const MANAGER_SYSTEM: &str = "You are an AI assistant that can help manage football teams. \
You can analyze requests to add players, schedule matches, etc. \
Always provide detailed, helpful responses using football terminology.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AgentAction,
    Analysis,
    General,
}

impl PromptKind {
    pub fn for_intent(intent: IntentKind) -> Self {
        match intent {
            IntentKind::AgentAction => PromptKind::AgentAction,
            IntentKind::Analysis | IntentKind::Prediction => PromptKind::Analysis,
            _ => PromptKind::General,
        }
    }

    fn system(&self) -> &'static str {
        match self {
            PromptKind::AgentAction => MANAGER_SYSTEM,
            PromptKind::Analysis => ANALYST_SYSTEM,
            PromptKind::General => ADVISOR_SYSTEM,
        }
    }

    fn lead(&self) -> &'static str {
        match self {
            PromptKind::AgentAction => "User wants to perform a team management action",
            _ => "User asked",
        }
    }

    fn instructions(&self) -> &'static [&'static str] {
        match self {
            PromptKind::AgentAction => &[
                "Acknowledges the specific request (e.g., adding a player, scheduling a match, etc.)",
                "Explains what action would be taken in a real system",
                "Provides any necessary information or next steps",
                "Uses football-specific terminology and knowledge",
                "Reminds the user that this is a simulation and real actions would require proper authentication",
            ],
            PromptKind::Analysis => &[
                "Directly answers the user's question",
                "Uses the provided team data to support your analysis",
                "Provides actionable insights or recommendations",
                "Uses football-specific terminology and knowledge",
                "Includes specific statistics and examples from the data when relevant",
            ],
            PromptKind::General => &[
                "Directly addresses the user's question",
                "Uses the provided team data when relevant",
                "Provides specific, actionable advice when possible",
                "Uses football-specific terminology and knowledge",
                "Is detailed and comprehensive, showing expertise in football management",
            ],
        }
    }

    fn request_line(&self) -> &'static str {
        match self {
            PromptKind::AgentAction | PromptKind::General => {
                "Please provide a detailed, helpful response that:"
            }
            PromptKind::Analysis => "Please provide a detailed, data-driven response that:",
        }
    }
}

pub fn build_prompt(
    kind: PromptKind,
    message: &str,
    data: &TeamData,
    temperature: f32,
    max_tokens: u32,
) -> Prompt {
    let data_json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
    let steps: Vec<String> = kind
        .instructions()
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect();

    let user = format!(
        "{}: {message}\nCurrent team data: {data_json}\n\n{}\n{}",
        kind.lead(),
        kind.request_line(),
        steps.join("\n")
    );

    Prompt {
        system: kind.system().to_string(),
        user,
        temperature,
        max_tokens,
    }
}

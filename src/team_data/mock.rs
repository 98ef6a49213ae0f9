use chrono::NaiveDate;
use serde_json::Map;

use crate::team_data::model::{GoalEvent, Match, Player, Team, TeamData, Training, UpcomingMatch};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn goal(minute: u32, scorer: &str, assist: &str) -> GoalEvent {
    GoalEvent {
        minute,
        scorer: scorer.to_string(),
        assist: assist.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn player(
    id: &str,
    name: &str,
    position: &str,
    goals: u32,
    assists: u32,
    rating: f64,
    fitness: u32,
    age: u32,
    nationality: &str,
    market_value: &str,
    contract_expiry: (i32, u32, u32),
    strengths: &[&str],
    weaknesses: &[&str],
) -> Player {
    let (y, m, d) = contract_expiry;
    Player {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        goals,
        assists,
        rating,
        fitness,
        injuries: Vec::new(),
        age,
        nationality: nationality.to_string(),
        market_value: market_value.to_string(),
        contract_expiry: NaiveDate::from_ymd_opt(y, m, d),
        strengths: strings(strengths),
        weaknesses: strings(weaknesses),
    }
}

/// The demo squad served until a client posts its own data.
pub fn demo_team_data() -> TeamData {
    TeamData {
        players: vec![
            player(
                "1",
                "Lionel Messi",
                "Forward",
                28,
                15,
                9.2,
                95,
                36,
                "Argentina",
                "45M",
                (2025, 6, 30),
                &["Finishing", "Dribbling", "Vision"],
                &["Pace", "Defensive work"],
            ),
            player(
                "2",
                "Kevin De Bruyne",
                "Midfielder",
                8,
                22,
                8.8,
                92,
                32,
                "Belgium",
                "35M",
                (2026, 6, 30),
                &["Passing", "Vision", "Set pieces"],
                &["Defensive positioning"],
            ),
            player(
                "3",
                "Virgil van Dijk",
                "Defender",
                3,
                1,
                8.5,
                94,
                32,
                "Netherlands",
                "25M",
                (2027, 6, 30),
                &["Aerial ability", "Leadership", "Passing"],
                &["Pace"],
            ),
            player(
                "4",
                "Alisson Becker",
                "Goalkeeper",
                0,
                0,
                8.7,
                96,
                31,
                "Brazil",
                "20M",
                (2028, 6, 30),
                &["Shot stopping", "Distribution", "Command of area"],
                &["Occasional mistakes under pressure"],
            ),
        ],
        team: Team {
            name: "FC Barcelona".to_string(),
            formation: "4-3-3".to_string(),
            wins: 24,
            losses: 4,
            draws: 6,
            goals_for: 78,
            goals_against: 32,
            clean_sheets: 14,
            league_position: 2,
            manager: "Xavi Hernandez".to_string(),
            recent_form: strings(&["W", "D", "W", "W", "L"]),
        },
        matches: vec![
            Match {
                id: "1".to_string(),
                opponent: "Real Madrid".to_string(),
                date: "2023-10-15".to_string(),
                result: "Win".to_string(),
                score: "3-1".to_string(),
                home_away: "Home".to_string(),
                competition: "La Liga".to_string(),
                goals: vec![
                    goal(23, "Lionel Messi", "Kevin De Bruyne"),
                    goal(67, "Lionel Messi", "None"),
                    goal(89, "Kevin De Bruyne", "Lionel Messi"),
                ],
                tactical_notes: Some(
                    "Effective pressing in midfield, Messi's movement caused problems for the opponent's defense"
                        .to_string(),
                ),
            },
            Match {
                id: "2".to_string(),
                opponent: "Bayern Munich".to_string(),
                date: "2023-10-22".to_string(),
                result: "Draw".to_string(),
                score: "2-2".to_string(),
                home_away: "Away".to_string(),
                competition: "Champions League".to_string(),
                goals: vec![
                    goal(15, "Lionel Messi", "Kevin De Bruyne"),
                    goal(42, "Thomas Muller", "Kingsley Coman"),
                    goal(68, "Robert Lewandowski", "None"),
                    goal(85, "Kevin De Bruyne", "Lionel Messi"),
                ],
                tactical_notes: Some(
                    "Strong defensive performance but struggled to maintain possession in the second half"
                        .to_string(),
                ),
            },
            Match {
                id: "3".to_string(),
                opponent: "Atletico Madrid".to_string(),
                date: "2023-10-29".to_string(),
                result: "Win".to_string(),
                score: "2-0".to_string(),
                home_away: "Home".to_string(),
                competition: "La Liga".to_string(),
                goals: vec![
                    goal(34, "Lionel Messi", "Kevin De Bruyne"),
                    goal(76, "Frenkie de Jong", "Lionel Messi"),
                ],
                tactical_notes: Some(
                    "Solid defensive shape, effective counter-pressing after losing possession"
                        .to_string(),
                ),
            },
        ],
        training: Training {
            last_session: "2023-10-25".to_string(),
            focus_areas: strings(&["Possession", "Set Pieces", "Fitness"]),
            attendance: 95,
            duration_minutes: 90,
        },
        upcoming_matches: vec![
            UpcomingMatch {
                opponent: "Sevilla".to_string(),
                date: "2023-11-05".to_string(),
                time: "20:00".to_string(),
                venue: "Home".to_string(),
                competition: "La Liga".to_string(),
            },
            UpcomingMatch {
                opponent: "PSG".to_string(),
                date: "2023-11-08".to_string(),
                time: "20:00".to_string(),
                venue: "Away".to_string(),
                competition: "Champions League".to_string(),
            },
        ],
        extra: Map::new(),
    }
}

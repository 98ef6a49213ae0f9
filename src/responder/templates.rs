use crate::intent::model::IntentKind;
use crate::intent::table::responses;
use crate::ner::model::EntityBag;
use crate::responder::insight::{MatchOdds, average_fitness};
use crate::team_data::model::{Player, TeamData, UpcomingMatch};
use crate::utils::funcs::name_distance;

/// Largest edit distance still accepted as a misspelling of a player name.
const MAX_NAME_DISTANCE: usize = 2;

/// A random canned reply for `kind`, if the table has any.
pub fn canned(kind: IntentKind) -> Option<&'static str> {
    let options = responses(kind);
    if options.is_empty() {
        return None;
    }
    Some(options[fastrand::usize(..options.len())])
}

/// Exact (case-insensitive substring) match first, then the closest spelling within reach.
pub fn find_player<'a>(players: &'a [Player], query: &str) -> Option<&'a Player> {
    let needle = query.to_lowercase();
    if let Some(p) = players
        .iter()
        .find(|p| p.name.to_lowercase().contains(&needle))
    {
        return Some(p);
    }

    players
        .iter()
        .map(|p| (name_distance(query, &p.name), p))
        .filter(|(d, _)| *d <= MAX_NAME_DISTANCE)
        .min_by_key(|(d, _)| *d)
        .map(|(_, p)| p)
}

pub fn player_profile(player: &Player) -> String {
    let contract = match player.contract_expiry {
        Some(date) => format!("Contract until {date}"),
        None => "Contract details not available".to_string(),
    };

    format!(
        "{name} is a {age}-year-old {position} from {nationality}.

📊 Performance Stats:
• Goals: {goals}
• Assists: {assists}
• Rating: {rating}/10
• Fitness: {fitness}%

💼 Contract Information:
• {contract}
• Market Value: {value}

⚡ Strengths:
• {strengths}

⚠️ Areas for Improvement:
• {weaknesses}

Is there anything specific about {name} you'd like to know?",
        name = player.name,
        age = player.age,
        position = player.position,
        nationality = player.nationality,
        goals = player.goals,
        assists = player.assists,
        rating = player.rating,
        fitness = player.fitness,
        value = player.market_value,
        strengths = player.strengths.join(", "),
        weaknesses = player.weaknesses.join(", "),
    )
}

pub fn squad_list(data: &TeamData) -> String {
    let lines: Vec<String> = data
        .players
        .iter()
        .map(|p| format!("• {} - {} (Rating: {}/10)", p.name, p.position, p.rating))
        .collect();
    format!(
        "Your squad includes:\n{}\n\nYou can ask me about specific players for more detailed information.",
        lines.join("\n")
    )
}

pub fn player_info(entities: &EntityBag, data: &TeamData) -> String {
    let Some(query) = entities.get("PERSON") else {
        return squad_list(data);
    };

    match find_player(&data.players, query) {
        Some(player) => player_profile(player),
        None => {
            let names: Vec<&str> = data.players.iter().map(|p| p.name.as_str()).collect();
            format!(
                "I couldn't find information about {query}. Here are the players in your squad: {}",
                names.join(", ")
            )
        }
    }
}

pub fn team_info(message: &str, data: &TeamData) -> String {
    let team = &data.team;
    let league = if message.to_lowercase().contains("la liga") {
        "La Liga"
    } else {
        "the league"
    };
    let start = team.recent_form.len().saturating_sub(5);
    let form = if team.recent_form.is_empty() {
        "N/A".to_string()
    } else {
        team.recent_form[start..].concat()
    };

    format!(
        "Your team is {} managed by {}.

📋 Season Record:
• Position: {} in {league}
• Wins: {}
• Draws: {}
• Losses: {}
• Goals For: {}
• Goals Against: {}
• Clean Sheets: {}

🧠 Tactics:
Currently playing in a {} formation.

📈 Recent Form: {form}

Would you like tactical advice for your current formation?",
        team.name,
        team.manager,
        team.league_position,
        team.wins,
        team.draws,
        team.losses,
        team.goals_for,
        team.goals_against,
        team.clean_sheets,
        team.formation,
    )
}

fn next_match(data: &TeamData) -> String {
    let Some(fixture) = data.upcoming_matches.first() else {
        return "I don't have information about upcoming matches at the moment.".to_string();
    };
    format!(
        "Your next match is against {}:

📅 Date: {}
⏰ Time: {}
📍 Venue: {}
🏆 Competition: {}

Would you like tactical advice for this match?",
        fixture.opponent, fixture.date, fixture.time, fixture.venue, fixture.competition
    )
}

fn last_match(data: &TeamData) -> String {
    let Some(game) = data.matches.first() else {
        return "I don't have any match information recorded yet.".to_string();
    };

    let goals: Vec<String> = game
        .goals
        .iter()
        .map(|g| {
            let assist = if g.assist.is_empty() || g.assist == "None" {
                "unassisted".to_string()
            } else {
                format!("assist: {}", g.assist)
            };
            format!("  ⚽ {}': {} ({assist})", g.minute, g.scorer)
        })
        .collect();
    let goals = if goals.is_empty() {
        "  No goals recorded".to_string()
    } else {
        goals.join("\n")
    };
    let notes = game
        .tactical_notes
        .as_deref()
        .unwrap_or("No specific tactical notes available");

    format!(
        "Your last match was against {} on {} ({}).

🎯 Result: {} ({})
🏆 Competition: {}

⚽ Goals:
{goals}

📋 Tactical Notes:
{notes}

Would you like an analysis of this match?",
        game.opponent, game.date, game.home_away, game.result, game.score, game.competition
    )
}

pub fn match_info(message: &str, data: &TeamData) -> String {
    let lower = message.to_lowercase();
    if lower.contains("next") || lower.contains("upcoming") {
        next_match(data)
    } else {
        last_match(data)
    }
}

pub fn tactics(data: &TeamData) -> String {
    let team = &data.team;
    format!(
        "Your team typically plays in a {} formation under manager {}.

📋 Formation Analysis:
• This formation provides width through the wingers
• Strong midfield presence with three central midfielders
• High pressing potential with forwards tracking back

💡 Tactical Recommendations:
1. Use the wings to stretch the opposition defense
2. Maintain compactness between lines
3. Quick transitions from defense to attack

Would you like specific advice for an upcoming opponent?",
        team.formation, team.manager
    )
}

pub fn training(data: &TeamData) -> String {
    let session = &data.training;
    let focus = if session.focus_areas.is_empty() {
        "• None recorded".to_string()
    } else {
        session
            .focus_areas
            .iter()
            .map(|area| format!("• {area}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Your last training session was on {}.

🎯 Focus Areas:
{focus}

📊 Session Details:
• Duration: {} minutes
• Attendance: {}%

💡 Training Recommendations:
1. Continue possession drills to improve ball control
2. Work on set-piece variations for more scoring opportunities
3. Include fitness training to maintain high energy levels

Would you like a specific training plan for the upcoming match?",
        session.last_session, session.duration_minutes, session.attendance
    )
}

pub fn injury(data: &TeamData) -> String {
    let injured: Vec<String> = data
        .players
        .iter()
        .filter(|p| !p.injuries.is_empty())
        .map(|p| format!("• {} - {} injuries", p.name, p.injuries.len()))
        .collect();

    if !injured.is_empty() {
        return format!(
            "Currently, the following players have injury concerns:\n{}\n\nWould you like recommendations for managing these injuries?",
            injured.join("\n")
        );
    }

    let Some(avg) = average_fitness(&data.players) else {
        return "There are no players in your squad yet, so there are no injury concerns to report."
            .to_string();
    };
    let lowest = data.players.iter().map(|p| p.fitness).min().unwrap_or(0);

    format!(
        "All players are currently fit and available for selection.

📊 Team Fitness:
• Average Fitness Level: {avg:.1}%
• Lowest Individual Fitness: {lowest}%

This is excellent news for upcoming matches!"
    )
}

pub fn prediction(data: &TeamData, fixture: &UpcomingMatch, odds: MatchOdds) -> String {
    format!(
        "Based on your current form, I predict:

🎯 Match: {} vs {}
📈 Win Probability: {:.1}%
⚖️ Draw Probability: {:.1}%
📉 Loss Probability: {:.1}%

Factors supporting this prediction:
• Strong home form (if home match)
• Good recent results
• High team fitness levels

Would you like tactical advice to improve these chances?",
        data.team.name, fixture.opponent, odds.win, odds.draw, odds.loss
    )
}

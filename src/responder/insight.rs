use chrono::NaiveDate;

use crate::team_data::model::{Player, Team, TeamData, UpcomingMatch};
use crate::utils::funcs::{mean, parse_market_value};

const SUMMARY_CLOSING: &str =
    "Is there anything specific you'd like to know about your team or would you like tactical advice?";

/// Win/draw/loss percentages for one fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOdds {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

/// Player with the highest `key`; ties go to the earliest in squad order.
pub fn top_by<F>(players: &[Player], key: F) -> Option<&Player>
where
    F: Fn(&Player) -> u32,
{
    players.iter().fold(None, |best, p| match best {
        Some(b) if key(b) >= key(p) => Some(b),
        _ => Some(p),
    })
}

pub fn average_fitness(players: &[Player]) -> Option<f64> {
    mean(players.iter().map(|p| p.fitness as f64))
}

/// Sum of the parseable market values, in millions.
pub fn squad_value(players: &[Player]) -> f64 {
    players
        .iter()
        .filter_map(|p| parse_market_value(&p.market_value))
        .fold(0.0, |acc, v| acc + v)
}

pub fn win_rate(team: &Team) -> Option<f64> {
    let games = team.games_played();
    if games == 0 {
        return None;
    }
    Some(team.wins as f64 / games as f64 * 100.0)
}

pub fn expiring_contracts(players: &[Player], before: NaiveDate) -> Vec<&Player> {
    players
        .iter()
        .filter(|p| p.contract_expiry.is_some_and(|d| d < before))
        .collect()
}

/// Season win rate (50 with no games played) shifted by `venue_adjustment` toward or against
/// the team depending on venue, clamped to [5, 95]. Draw and loss split the remainder.
pub fn match_odds(team: &Team, fixture: &UpcomingMatch, venue_adjustment: f64) -> MatchOdds {
    let base = win_rate(team).unwrap_or(50.0);
    let shift = if fixture.venue.eq_ignore_ascii_case("home") {
        venue_adjustment
    } else {
        -venue_adjustment
    };

    let win = (base + shift).clamp(5.0, 95.0);
    let rest = (100.0 - win) / 2.0;
    MatchOdds {
        win,
        draw: rest,
        loss: rest,
    }
}

fn recent_form(data: &TeamData) -> Option<String> {
    if data.matches.len() < 3 {
        return None;
    }
    Some(
        data.matches
            .iter()
            .take(3)
            .filter_map(|m| m.result.chars().next())
            .collect(),
    )
}

fn fitness_statement(avg: f64) -> String {
    if avg > 90.0 {
        format!("💪 Your squad is in excellent physical condition (avg fitness: {avg:.1}%).")
    } else if avg > 80.0 {
        format!("👍 Your squad has good fitness levels (avg fitness: {avg:.1}%).")
    } else {
        format!(
            "⚠️ Consider focusing on fitness training to improve overall team performance (avg fitness: {avg:.1}%)."
        )
    }
}

/// Season overview built from the snapshot alone.
pub fn data_driven_summary(data: &TeamData, contract_reference_date: NaiveDate) -> String {
    let team = &data.team;
    let players = &data.players;
    let mut statements = Vec::new();

    if let Some(p) = top_by(players, |p| p.goals) {
        statements.push(format!("⚽ Your top scorer is {} with {} goals.", p.name, p.goals));
    }
    if let Some(p) = top_by(players, |p| p.assists) {
        statements.push(format!(
            "🎯 Your most creative player is {} with {} assists.",
            p.name, p.assists
        ));
    }
    if let Some(rate) = win_rate(team) {
        statements.push(format!(
            "📈 Your team's win rate this season is {rate:.1}% ({}W-{}D-{}L).",
            team.wins, team.draws, team.losses
        ));
    }

    let difference = team.goals_for as i64 - team.goals_against as i64;
    statements.push(format!("⚖️ Goal Difference: {difference:+}"));
    statements.push(format!(
        "🛡️ Clean Sheets: {} out of {} matches.",
        team.clean_sheets,
        team.games_played()
    ));

    if let Some(form) = recent_form(data) {
        statements.push(format!("🔥 Recent Form (Last 3): {form}"));
    }
    if let Some(avg) = average_fitness(players) {
        statements.push(fitness_statement(avg));
    }

    let expiring = expiring_contracts(players, contract_reference_date);
    if !expiring.is_empty() {
        let names: Vec<&str> = expiring.iter().map(|p| p.name.as_str()).collect();
        statements.push(format!(
            "📝 Contract Alert: {} have contracts expiring soon.",
            names.join(", ")
        ));
    }

    statements.push(format!("💰 Squad Value: €{:.0}M", squad_value(players)));

    format!("{}\n\n{SUMMARY_CLOSING}", statements.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team_data::mock::demo_team_data;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn fixture(venue: &str) -> UpcomingMatch {
        UpcomingMatch {
            opponent: "Sevilla".to_string(),
            venue: venue.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_top_scorer_ties_go_to_first_player() {
        let mut data = demo_team_data();
        data.players[2].goals = 28;

        let top = top_by(&data.players, |p| p.goals).unwrap();
        assert_eq!(top.name, "Lionel Messi");
        assert!(top_by(&[], |p| p.goals).is_none());
    }

    #[test]
    fn test_top_assists() {
        let data = demo_team_data();
        assert_eq!(
            top_by(&data.players, |p| p.assists).unwrap().name,
            "Kevin De Bruyne"
        );
    }

    #[test]
    fn test_squad_value_skips_unparseable() {
        let mut data = demo_team_data();
        assert_eq!(squad_value(&data.players), 125.0);

        data.players[3].market_value = "n/a".to_string();
        assert_eq!(squad_value(&data.players), 105.0);
    }

    #[test]
    fn test_squad_value_of_nothing_is_positive_zero() {
        assert!(squad_value(&[]).is_sign_positive());

        let mut data = demo_team_data();
        for p in &mut data.players {
            p.market_value = "unknown".to_string();
        }
        assert_eq!(format!("€{:.0}M", squad_value(&data.players)), "€0M");
    }

    #[test]
    fn test_expiring_contracts_are_strictly_before_cutoff() {
        let data = demo_team_data();
        assert!(expiring_contracts(&data.players, reference_date()).is_empty());

        let later = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let names: Vec<&str> = expiring_contracts(&data.players, later)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Lionel Messi", "Kevin De Bruyne"]);
    }

    #[test]
    fn test_match_odds_venue() {
        let team = demo_team_data().team;

        let home = match_odds(&team, &fixture("Home"), 5.0);
        assert!((home.win - 75.588).abs() < 0.01);
        assert!((home.draw - home.loss).abs() < f64::EPSILON);
        assert!((home.win + home.draw + home.loss - 100.0).abs() < 1e-9);

        let away = match_odds(&team, &fixture("Away"), 5.0);
        assert!((away.win - 65.588).abs() < 0.01);
    }

    #[test]
    fn test_match_odds_clamped_and_default() {
        let mut team = Team::default();
        let odds = match_odds(&team, &fixture("Home"), 5.0);
        assert_eq!(odds.win, 55.0);
        assert_eq!(odds.draw, 22.5);

        team.wins = 10;
        let odds = match_odds(&team, &fixture("Home"), 5.0);
        assert_eq!(odds.win, 95.0);

        team.wins = 0;
        team.losses = 10;
        let odds = match_odds(&team, &fixture("Away"), 5.0);
        assert_eq!(odds.win, 5.0);
    }

    #[test]
    fn test_summary_for_demo_data() {
        let summary = data_driven_summary(&demo_team_data(), reference_date());

        assert!(summary.starts_with("⚽ Your top scorer is Lionel Messi with 28 goals."));
        assert!(summary.contains("Kevin De Bruyne with 22 assists"));
        assert!(summary.contains("70.6% (24W-6D-4L)"));
        assert!(summary.contains("Goal Difference: +46"));
        assert!(summary.contains("Clean Sheets: 14 out of 34 matches."));
        assert!(summary.contains("Recent Form (Last 3): WDW"));
        assert!(summary.contains("excellent physical condition (avg fitness: 94."));
        assert!(!summary.contains("Contract Alert"));
        assert!(summary.contains("Squad Value: €125M"));
        assert!(summary.ends_with(SUMMARY_CLOSING));
    }

    #[test]
    fn test_summary_for_empty_data() {
        let summary = data_driven_summary(&TeamData::default(), reference_date());

        assert!(summary.contains("Goal Difference: +0"));
        assert!(!summary.contains("win rate"));
        assert!(!summary.contains("Recent Form"));
        assert!(summary.contains("Squad Value: €0M"));
    }
}

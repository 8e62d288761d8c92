use serde::Serialize;

use super::{
    consistency_pct, entries_for_team, mean, round_half_up, round_tenths, std_dev,
    AnalyticsError,
};
use crate::entries::domain::DEFAULT_RATING;
use crate::entries::ScoutingEntry;

const CLOSE_SCORE_MARGIN: u64 = 5;
const AUTO_MARGIN: i64 = 3;
const TELEOP_MARGIN: i64 = 5;
const CONSISTENCY_MARGIN: i64 = 10;
const PICK_MARGIN: i64 = 10;

/// Rounded head-to-head profile for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProfile {
    pub team_number: String,
    pub entries: usize,
    pub avg_total: i64,
    pub avg_auto: i64,
    pub avg_teleop: i64,
    pub avg_endgame: i64,
    pub high_score: i64,
    pub avg_defense: f64,
    pub avg_speed: f64,
    pub consistency: i64,
}

impl TeamProfile {
    pub fn from_entries(entries: &[ScoutingEntry], team_number: &str) -> Option<Self> {
        let team: Vec<&ScoutingEntry> = entries_for_team(entries, team_number).collect();
        if team.is_empty() {
            return None;
        }

        let totals: Vec<f64> = team.iter().map(|e| e.scores.total_score as f64).collect();
        let avg_total = round_half_up(mean(totals.iter().copied()));
        let rounded = |field: fn(&ScoutingEntry) -> i64| {
            round_half_up(mean(team.iter().map(|&e| field(e) as f64))) as i64
        };
        let rating = |field: fn(&ScoutingEntry) -> u8| {
            round_tenths(mean(team.iter().map(|&e| match field(e) {
                0 => DEFAULT_RATING as f64,
                value => value as f64,
            })))
        };

        Some(Self {
            team_number: team_number.to_string(),
            entries: team.len(),
            avg_total: avg_total as i64,
            avg_auto: rounded(|e| e.scores.auto_score),
            avg_teleop: rounded(|e| e.scores.teleop_score),
            avg_endgame: rounded(|e| e.scores.endgame_score),
            high_score: team
                .iter()
                .map(|e| e.scores.total_score)
                .max()
                .unwrap_or_default(),
            avg_defense: rating(|e| e.ratings.defense_rating),
            avg_speed: rating(|e| e.ratings.speed_rating),
            consistency: consistency_pct(std_dev(&totals), avg_total),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComparison {
    pub team_a: TeamProfile,
    pub team_b: TeamProfile,
    pub narrative: String,
}

pub fn compare_teams(
    entries: &[ScoutingEntry],
    team_a: &str,
    team_b: &str,
) -> Result<TeamComparison, AnalyticsError> {
    let (team_a, team_b) = (team_a.trim(), team_b.trim());
    if team_a.is_empty() || team_b.is_empty() || team_a == team_b {
        return Err(AnalyticsError::SameTeam);
    }

    let a = TeamProfile::from_entries(entries, team_a)
        .ok_or_else(|| AnalyticsError::NoData(team_a.to_string()))?;
    let b = TeamProfile::from_entries(entries, team_b)
        .ok_or_else(|| AnalyticsError::NoData(team_b.to_string()))?;

    let narrative = narrate(&a, &b);
    Ok(TeamComparison {
        team_a: a,
        team_b: b,
        narrative,
    })
}

fn narrate(a: &TeamProfile, b: &TeamProfile) -> String {
    let mut lines = vec![format!("Team {} vs Team {}", a.team_number, b.team_number)];

    let score_diff = a.avg_total.saturating_sub(b.avg_total);
    lines.push(if score_diff.unsigned_abs() <= CLOSE_SCORE_MARGIN {
        format!(
            "Scoring: Very close! Both teams average around {}-{} points.",
            a.avg_total, b.avg_total
        )
    } else {
        let (lead, trail) = if score_diff > 0 { (a, b) } else { (b, a) };
        format!(
            "Scoring: Team {} leads with {} avg pts vs {}. (+{})",
            lead.team_number,
            lead.avg_total,
            trail.avg_total,
            score_diff.unsigned_abs()
        )
    });

    lines.push(if a.avg_auto > b.avg_auto.saturating_add(AUTO_MARGIN) {
        stronger_auto(a, b)
    } else if b.avg_auto > a.avg_auto.saturating_add(AUTO_MARGIN) {
        stronger_auto(b, a)
    } else {
        "Autonomous: Both teams are comparable in auto phase.".to_string()
    });

    if a.avg_teleop > b.avg_teleop.saturating_add(TELEOP_MARGIN) {
        lines.push(stronger_teleop(a, b));
    } else if b.avg_teleop > a.avg_teleop.saturating_add(TELEOP_MARGIN) {
        lines.push(stronger_teleop(b, a));
    }

    if a.consistency > b.consistency.saturating_add(CONSISTENCY_MARGIN) {
        lines.push(more_consistent(a, b));
    } else if b.consistency > a.consistency.saturating_add(CONSISTENCY_MARGIN) {
        lines.push(more_consistent(b, a));
    }

    lines.push(format!(
        "Peak Scores: Team {}: {} | Team {}: {}",
        a.team_number, a.high_score, b.team_number, b.high_score
    ));

    lines.push(if score_diff > PICK_MARGIN {
        stronger_pick(a)
    } else if score_diff < -PICK_MARGIN {
        stronger_pick(b)
    } else {
        "Recommendation: Both teams are evenly matched. Consider other factors like driver skill and specific game tasks.".to_string()
    });

    lines.join("\n")
}

fn stronger_auto(winner: &TeamProfile, other: &TeamProfile) -> String {
    format!(
        "Autonomous: Team {} has stronger auto ({} vs {}).",
        winner.team_number, winner.avg_auto, other.avg_auto
    )
}

fn stronger_teleop(winner: &TeamProfile, other: &TeamProfile) -> String {
    format!(
        "Tele-Op: Team {} excels in tele-op ({} vs {}).",
        winner.team_number, winner.avg_teleop, other.avg_teleop
    )
}

fn more_consistent(winner: &TeamProfile, other: &TeamProfile) -> String {
    format!(
        "Consistency: Team {} is more consistent ({}% vs {}%).",
        winner.team_number, winner.consistency, other.consistency
    )
}

fn stronger_pick(winner: &TeamProfile) -> String {
    format!(
        "Recommendation: Team {} is the stronger pick overall based on scoring data.",
        winner.team_number
    )
}

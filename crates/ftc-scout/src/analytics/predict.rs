use serde::Serialize;

use super::{consistency_pct, entries_for_team, mean, round_half_up, std_dev, AnalyticsError};
use crate::entries::{Alliance, ScoutingEntry};

const STRONG_AUTO: f64 = 15.0;
const HIGH_TELEOP: f64 = 25.0;
const RELIABLE_ENDGAME: f64 = 15.0;
const VARIANCE_FACTOR: f64 = 0.15;
const MAX_WIN_PROBABILITY: f64 = 95.0;
const AUTO_ADVANTAGE_MARGIN: u64 = 10;
const CONSISTENCY_MARGIN: f64 = 15.0;
const HIGH_CONFIDENCE_TEAMS: usize = 3;

/// What one team is expected to bring to an alliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceTeam {
    pub team_number: String,
    pub avg_score: i64,
    pub avg_auto: i64,
    pub avg_teleop: i64,
    pub avg_endgame: i64,
    pub consistency: i64,
    pub strengths: Vec<String>,
    pub matches: usize,
}

impl AllianceTeam {
    pub fn from_entries(entries: &[ScoutingEntry], team_number: &str) -> Option<Self> {
        let team: Vec<&ScoutingEntry> = entries_for_team(entries, team_number).collect();
        if team.is_empty() {
            return None;
        }

        let totals: Vec<f64> = team.iter().map(|e| e.scores.total_score as f64).collect();
        let avg = mean(totals.iter().copied());
        let avg_auto = mean(team.iter().map(|e| e.scores.auto_score as f64));
        let avg_teleop = mean(team.iter().map(|e| e.scores.teleop_score as f64));
        let avg_endgame = mean(team.iter().map(|e| e.scores.endgame_score as f64));

        let mut strengths = Vec::new();
        if avg_auto >= STRONG_AUTO {
            strengths.push("Strong Auto".to_string());
        }
        if avg_teleop >= HIGH_TELEOP {
            strengths.push("High Tele-Op".to_string());
        }
        if avg_endgame >= RELIABLE_ENDGAME {
            strengths.push("Reliable Endgame".to_string());
        }

        Some(Self {
            team_number: team_number.to_string(),
            avg_score: round_half_up(avg) as i64,
            avg_auto: round_half_up(avg_auto) as i64,
            avg_teleop: round_half_up(avg_teleop) as i64,
            avg_endgame: round_half_up(avg_endgame) as i64,
            consistency: consistency_pct(std_dev(&totals), avg),
            strengths,
            matches: team.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub low: i64,
    pub expected: i64,
    pub high: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPrediction {
    pub winner: Alliance,
    pub red_score: ScoreRange,
    pub blue_score: ScoreRange,
    /// Chance the predicted winner takes the match, in percent.
    pub win_probability: i64,
    pub key_factors: Vec<String>,
    pub confidence: String,
    pub red_alliance: Vec<AllianceTeam>,
    pub blue_alliance: Vec<AllianceTeam>,
}

fn saturating_total(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

struct AllianceOutlook {
    total: i64,
    auto_total: i64,
    consistency: f64,
    range: ScoreRange,
}

impl AllianceOutlook {
    fn from_teams(teams: &[AllianceTeam]) -> Self {
        let total = saturating_total(teams.iter().map(|team| team.avg_score));
        let consistency = mean(teams.iter().map(|team| team.consistency as f64));
        let variance = (100.0 - consistency) / 100.0 * total as f64 * VARIANCE_FACTOR;

        Self {
            total,
            auto_total: saturating_total(teams.iter().map(|team| team.avg_auto)),
            consistency,
            range: ScoreRange {
                low: round_half_up(total as f64 - variance) as i64,
                expected: total,
                high: round_half_up(total as f64 + variance) as i64,
            },
        }
    }
}

fn alliance_profiles(entries: &[ScoutingEntry], teams: &[String]) -> Vec<AllianceTeam> {
    teams
        .iter()
        .map(|team| team.trim())
        .filter(|team| !team.is_empty())
        .filter_map(|team| AllianceTeam::from_entries(entries, team))
        .collect()
}

/// Predicts a red vs blue match from each listed team's scouting history.
///
/// Teams without any entries are skipped. Each alliance needs at least one
/// team with data.
pub fn predict_match(
    entries: &[ScoutingEntry],
    red: &[String],
    blue: &[String],
) -> Result<MatchPrediction, AnalyticsError> {
    let red_alliance = alliance_profiles(entries, red);
    if red_alliance.is_empty() {
        return Err(AnalyticsError::EmptyAlliance(Alliance::Red.label()));
    }
    let blue_alliance = alliance_profiles(entries, blue);
    if blue_alliance.is_empty() {
        return Err(AnalyticsError::EmptyAlliance(Alliance::Blue.label()));
    }

    let red_outlook = AllianceOutlook::from_teams(&red_alliance);
    let blue_outlook = AllianceOutlook::from_teams(&blue_alliance);

    let diff = red_outlook.total.saturating_sub(blue_outlook.total);
    let winner = if diff >= 0 { Alliance::Red } else { Alliance::Blue };
    let win_probability =
        round_half_up((50.0 + diff.unsigned_abs() as f64 / 2.0).min(MAX_WIN_PROBABILITY)) as i64;

    let mut key_factors = Vec::new();
    let auto_gap = red_outlook.auto_total.saturating_sub(blue_outlook.auto_total);
    if auto_gap.unsigned_abs() > AUTO_ADVANTAGE_MARGIN {
        let side = if auto_gap > 0 { "Red" } else { "Blue" };
        key_factors.push(format!(
            "{side} has auto advantage (+{} pts)",
            auto_gap.unsigned_abs()
        ));
    }
    let consistency_gap = red_outlook.consistency - blue_outlook.consistency;
    if consistency_gap.abs() > CONSISTENCY_MARGIN {
        let side = if consistency_gap > 0.0 { "Red" } else { "Blue" };
        key_factors.push(format!("{side} alliance is more consistent"));
    }

    let confidence = if red_alliance.len().min(blue_alliance.len()) >= HIGH_CONFIDENCE_TEAMS {
        "High"
    } else {
        "Low (need more data)"
    };

    Ok(MatchPrediction {
        winner,
        red_score: red_outlook.range,
        blue_score: blue_outlook.range,
        win_probability,
        key_factors,
        confidence: confidence.to_string(),
        red_alliance,
        blue_alliance,
    })
}

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{
    consistency_pct, entries_for_team, mean, round_half_up, round_tenths, std_dev,
    teams_in_order,
};
use crate::entries::{ScoutingEntry, SortOrder};

/// Headline numbers for a scout's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub entries: usize,
    pub unique_teams: usize,
    pub avg_score: i64,
    pub high_score: i64,
}

pub fn dashboard_summary(entries: &[ScoutingEntry]) -> DashboardSummary {
    if entries.is_empty() {
        return DashboardSummary::default();
    }

    let totals: Vec<f64> = entries
        .iter()
        .map(|entry| entry.scores.total_score as f64)
        .collect();

    DashboardSummary {
        entries: entries.len(),
        unique_teams: teams_in_order(entries).len(),
        avg_score: round_half_up(mean(totals.iter().copied())) as i64,
        high_score: entries
            .iter()
            .map(|entry| entry.scores.total_score)
            .max()
            .unwrap_or_default(),
    }
}

/// Per-team aggregate. Averages are rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub team_number: String,
    pub match_count: usize,
    pub avg_auto_score: f64,
    pub avg_teleop_score: f64,
    pub avg_endgame_score: f64,
    pub avg_total_score: f64,
    pub avg_defense_rating: f64,
    pub avg_speed_rating: f64,
    pub max_total_score: i64,
    pub min_total_score: i64,
    pub score_std_dev: f64,
    pub consistency: i64,
    pub avg_auto_leave_robots: f64,
    pub avg_auto_classified: f64,
    pub avg_auto_overflow: f64,
    pub avg_auto_pattern_matches: f64,
    pub avg_teleop_classified: f64,
    pub avg_teleop_overflow: f64,
    pub avg_teleop_depot: f64,
    pub avg_teleop_pattern_matches: f64,
    pub avg_teleop_cycles: f64,
    pub avg_endgame_partial: f64,
    pub avg_endgame_full: f64,
}

impl TeamStatistics {
    fn from_entries(team_number: &str, entries: &[&ScoutingEntry]) -> Self {
        let totals: Vec<f64> = entries
            .iter()
            .map(|entry| entry.scores.total_score as f64)
            .collect();
        let raw_avg_total = mean(totals.iter().copied());
        let spread = std_dev(&totals);

        Self {
            team_number: team_number.to_string(),
            match_count: entries.len(),
            avg_auto_score: avg_by(entries, |e| e.scores.auto_score as f64),
            avg_teleop_score: avg_by(entries, |e| e.scores.teleop_score as f64),
            avg_endgame_score: avg_by(entries, |e| e.scores.endgame_score as f64),
            avg_total_score: round_tenths(raw_avg_total),
            avg_defense_rating: avg_by(entries, |e| e.ratings.defense_rating as f64),
            avg_speed_rating: avg_by(entries, |e| e.ratings.speed_rating as f64),
            max_total_score: entries
                .iter()
                .map(|entry| entry.scores.total_score)
                .max()
                .unwrap_or_default(),
            min_total_score: entries
                .iter()
                .map(|entry| entry.scores.total_score)
                .min()
                .unwrap_or_default(),
            score_std_dev: round_tenths(spread),
            consistency: consistency_pct(spread, raw_avg_total),
            avg_auto_leave_robots: avg_by(entries, |e| e.auto.counts.leave_robots as f64),
            avg_auto_classified: avg_by(entries, |e| e.auto.counts.classified_artifacts as f64),
            avg_auto_overflow: avg_by(entries, |e| e.auto.counts.overflow_artifacts as f64),
            avg_auto_pattern_matches: avg_by(entries, |e| e.auto.counts.pattern_matches as f64),
            avg_teleop_classified: avg_by(entries, |e| e.teleop.classified_artifacts as f64),
            avg_teleop_overflow: avg_by(entries, |e| e.teleop.overflow_artifacts as f64),
            avg_teleop_depot: avg_by(entries, |e| e.teleop.depot_artifacts as f64),
            avg_teleop_pattern_matches: avg_by(entries, |e| e.teleop.pattern_matches as f64),
            avg_teleop_cycles: avg_by(entries, |e| e.teleop.cycles_completed as f64),
            avg_endgame_partial: avg_by(entries, |e| e.endgame.base_partial_robots as f64),
            avg_endgame_full: avg_by(entries, |e| e.endgame.base_full_robots as f64),
        }
    }
}

fn avg_by(entries: &[&ScoutingEntry], field: impl Fn(&ScoutingEntry) -> f64) -> f64 {
    round_tenths(mean(entries.iter().map(|&entry| field(entry))))
}

/// One statistics row per team, in order of each team's first entry.
pub fn team_statistics(entries: &[ScoutingEntry]) -> Vec<TeamStatistics> {
    teams_in_order(entries)
        .into_iter()
        .map(|team| {
            let team_entries: Vec<&ScoutingEntry> = entries_for_team(entries, team).collect();
            TeamStatistics::from_entries(team, &team_entries)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamSort {
    #[default]
    AvgTotalScore,
    MatchCount,
    TeamNumber,
}

/// Filters teams by a case-insensitive number search, then sorts them.
pub fn rank_teams(
    mut stats: Vec<TeamStatistics>,
    sort: TeamSort,
    order: SortOrder,
    search: Option<&str>,
) -> Vec<TeamStatistics> {
    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
        let term = term.to_lowercase();
        stats.retain(|team| team.team_number.to_lowercase().contains(&term));
    }

    stats.sort_by(|a, b| {
        let ordering = match sort {
            TeamSort::AvgTotalScore => a
                .avg_total_score
                .partial_cmp(&b.avg_total_score)
                .unwrap_or(Ordering::Equal),
            TeamSort::MatchCount => a.match_count.cmp(&b.match_count),
            TeamSort::TeamNumber => a.team_number.cmp(&b.team_number),
        };
        order.apply(ordering)
    });
    stats
}

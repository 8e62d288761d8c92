//! Aggregations and heuristic write-ups over stored score snapshots.
//!
//! Nothing here recomputes points from raw counts: `entry.scores` is the
//! ground truth. Rounding follows the half-up convention the scouting
//! dashboards have always displayed (2.5 -> 3, -2.5 -> -2).

mod compare;
mod insights;
mod predict;
pub mod router;
mod stats;
mod summary;

pub use compare::{compare_teams, TeamComparison, TeamProfile};
pub use insights::{field_insights, Insight, InsightKind};
pub use predict::{predict_match, AllianceTeam, MatchPrediction, ScoreRange};
pub use router::analytics_router;
pub use stats::{
    dashboard_summary, rank_teams, team_statistics, DashboardSummary, TeamSort, TeamStatistics,
};
pub use summary::summarize_entry;

use crate::entries::ScoutingEntry;

/// Failures for analytics that need specific teams to have data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    #[error("select two different teams to compare")]
    SameTeam,
    #[error("no scouting data for team {0}")]
    NoData(String),
    #[error("{0} alliance has no teams with scouting data")]
    EmptyAlliance(&'static str),
}

pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn round_tenths(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Population standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values.iter().copied());
    let variance = mean(values.iter().map(|value| (value - avg).powi(2)));
    variance.sqrt()
}

/// `1 - stddev / avg` as a percentage; an average of zero divides by one.
pub(crate) fn consistency_pct(std_dev: f64, avg: f64) -> i64 {
    let denominator = if avg == 0.0 { 1.0 } else { avg };
    round_half_up((1.0 - std_dev / denominator) * 100.0) as i64
}

/// Distinct team numbers in order of first appearance.
pub(crate) fn teams_in_order(entries: &[ScoutingEntry]) -> Vec<&str> {
    let mut teams: Vec<&str> = Vec::new();
    for entry in entries {
        if !teams.contains(&entry.team_number.as_str()) {
            teams.push(&entry.team_number);
        }
    }
    teams
}

pub(crate) fn entries_for_team<'a>(
    entries: &'a [ScoutingEntry],
    team: &'a str,
) -> impl Iterator<Item = &'a ScoutingEntry> + 'a {
    entries.iter().filter(move |entry| entry.team_number == team)
}

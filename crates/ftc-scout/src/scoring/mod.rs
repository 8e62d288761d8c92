//! Point calculator for DECODE match observations.
//!
//! [`calculate_scores`] is a pure function: the same [`ScoreInput`] always
//! produces the same [`ScoreResult`], and it never fails. Domain validation
//! (for example limiting robot counts to the alliance size) belongs to the
//! caller; the calculator only applies the endgame clamp described on
//! [`clamp_base_return`].

mod input;
pub mod table;


pub use input::{AutoCounts, EndgameCounts, ScoreInput, TeleopCounts};
pub use table::MAX_ROBOTS_PER_ALLIANCE;

use serde::{Deserialize, Serialize};

/// Phase-by-phase point breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub auto_score: i64,
    pub teleop_score: i64,
    /// Includes the all-robots-full bonus when earned.
    pub endgame_score: i64,
    pub total_score: i64,
}

impl ScoreResult {
    fn from_phases(auto_score: i64, teleop_score: i64, endgame_score: i64) -> Self {
        Self {
            auto_score,
            teleop_score,
            endgame_score,
            total_score: auto_score
                .saturating_add(teleop_score)
                .saturating_add(endgame_score),
        }
    }
}

/// Robots credited in the endgame after resolving full/partial overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseReturn {
    pub full: i64,
    pub partial: i64,
}

impl BaseReturn {
    pub fn all_robots_full(self) -> bool {
        self.full == MAX_ROBOTS_PER_ALLIANCE
    }
}

/// Caps full returns at the alliance size, then caps partial returns at the
/// robot slots left over. A robot counted as fully returned is never also
/// counted as partially returned.
pub fn clamp_base_return(raw_full: i64, raw_partial: i64) -> BaseReturn {
    let full = raw_full.min(MAX_ROBOTS_PER_ALLIANCE);
    let remaining = MAX_ROBOTS_PER_ALLIANCE.saturating_sub(full);
    let partial = raw_partial.min(remaining);
    BaseReturn { full, partial }
}

pub fn auto_points(counts: &AutoCounts) -> i64 {
    weighted(&[
        (counts.leave_robots, table::auto::LEAVE_PER_ROBOT),
        (counts.classified_artifacts, table::auto::ARTIFACT_CLASSIFIED),
        (counts.overflow_artifacts, table::auto::ARTIFACT_OVERFLOW),
        (counts.pattern_matches, table::auto::PATTERN_MATCH),
    ])
}

pub fn teleop_points(counts: &TeleopCounts) -> i64 {
    weighted(&[
        (counts.classified_artifacts, table::teleop::ARTIFACT_CLASSIFIED),
        (counts.overflow_artifacts, table::teleop::ARTIFACT_OVERFLOW),
        (counts.depot_artifacts, table::teleop::DEPOT_ARTIFACT),
        (counts.pattern_matches, table::teleop::PATTERN_MATCH),
    ])
}

pub fn endgame_points(counts: &EndgameCounts) -> i64 {
    let base = clamp_base_return(counts.base_full_robots, counts.base_partial_robots);
    let mut points = weighted(&[
        (base.full, table::endgame::BASE_FULL),
        (base.partial, table::endgame::BASE_PARTIAL),
    ]);
    if base.all_robots_full() {
        points = points.saturating_add(table::endgame::ALL_ROBOTS_FULL_BONUS);
    }
    points
}

/// Convert raw observation counts into the scored breakdown.
pub fn calculate_scores(input: &ScoreInput) -> ScoreResult {
    ScoreResult::from_phases(
        auto_points(&input.auto),
        teleop_points(&input.teleop),
        endgame_points(&input.endgame),
    )
}

fn weighted(terms: &[(i64, i64)]) -> i64 {
    terms.iter().fold(0i64, |acc, (count, points)| {
        acc.saturating_add(count.saturating_mul(*points))
    })
}

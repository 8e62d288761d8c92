use serde::{Deserialize, Serialize};

/// Autonomous-period event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCounts {
    pub leave_robots: i64,
    pub classified_artifacts: i64,
    pub overflow_artifacts: i64,
    pub pattern_matches: i64,
}

/// Driver-controlled period event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeleopCounts {
    pub classified_artifacts: i64,
    pub overflow_artifacts: i64,
    /// Artifacts resting over the alliance depot when the match ends.
    pub depot_artifacts: i64,
    pub pattern_matches: i64,
    /// Efficiency tracking only; never scored.
    pub cycles_completed: i64,
}

/// Base-return observations at the end of the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndgameCounts {
    pub base_full_robots: i64,
    pub base_partial_robots: i64,
}

/// Raw counts for one robot team in one match, grouped by phase.
///
/// Every field defaults to zero when omitted, so `{}` deserializes to an
/// all-zero input. Values are not range checked here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreInput {
    pub auto: AutoCounts,
    pub teleop: TeleopCounts,
    pub endgame: EndgameCounts,
}

impl ScoreInput {
    pub fn new(auto: AutoCounts, teleop: TeleopCounts, endgame: EndgameCounts) -> Self {
        Self {
            auto,
            teleop,
            endgame,
        }
    }
}

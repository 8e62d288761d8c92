use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scoring::{AutoCounts, EndgameCounts, ScoreInput, ScoreResult, TeleopCounts};

/// Identifier wrapper for stored scouting entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

/// Field tile the robot started autonomous from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartPosition {
    #[default]
    BlueClassifier,
    BlueLaunch,
    RedClassifier,
    RedLaunch,
}

impl StartPosition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BlueClassifier => "blue-classifier",
            Self::BlueLaunch => "blue-launch",
            Self::RedClassifier => "red-classifier",
            Self::RedLaunch => "red-launch",
        }
    }
}

/// Autonomous observations: scored counts plus the scout's path sketch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoObservation {
    pub start_position: StartPosition,
    #[serde(flatten)]
    pub counts: AutoCounts,
    /// Canvas drawing captured by the client. Stored as-is, never inspected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_path: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_notes: Option<String>,
}

pub const DEFAULT_RATING: u8 = 3;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Subjective 1-5 ratings recorded alongside the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ratings {
    pub defense_rating: u8,
    pub speed_rating: u8,
    pub driver_skill: u8,
    pub reliability: u8,
}

impl Default for Ratings {
    fn default() -> Self {
        Self {
            defense_rating: DEFAULT_RATING,
            speed_rating: DEFAULT_RATING,
            driver_skill: DEFAULT_RATING,
            reliability: DEFAULT_RATING,
        }
    }
}

impl Ratings {
    pub(crate) fn fields(&self) -> [(&'static str, u8); 4] {
        [
            ("defenseRating", self.defense_rating),
            ("speedRating", self.speed_rating),
            ("driverSkill", self.driver_skill),
            ("reliability", self.reliability),
        ]
    }
}

/// Payload a scout submits for one team in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySubmission {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    pub team_number: String,
    pub match_number: String,
    pub alliance: Alliance,
    #[serde(default)]
    pub auto: AutoObservation,
    #[serde(default)]
    pub teleop: TeleopCounts,
    #[serde(default)]
    pub endgame: EndgameCounts,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub ratings: Ratings,
}

impl EntrySubmission {
    pub fn score_input(&self) -> ScoreInput {
        ScoreInput::new(self.auto.counts, self.teleop, self.endgame)
    }
}

/// Persisted scouting record with the score snapshot taken at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutingEntry {
    pub id: EntryId,
    pub user_id: String,
    pub username: String,
    pub team_number: String,
    pub match_number: String,
    pub alliance: Alliance,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub auto: AutoObservation,
    #[serde(default)]
    pub teleop: TeleopCounts,
    #[serde(default)]
    pub endgame: EndgameCounts,
    /// Authoritative once stored; reads never recompute it.
    pub scores: ScoreResult,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub ratings: Ratings,
}

impl ScoutingEntry {
    pub fn score_input(&self) -> ScoreInput {
        ScoreInput::new(self.auto.counts, self.teleop, self.endgame)
    }
}

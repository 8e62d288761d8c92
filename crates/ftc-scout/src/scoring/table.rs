//! Point values from the DECODE 2025-2026 game manual.

/// Robots that make up one alliance in a match.
pub const MAX_ROBOTS_PER_ALLIANCE: i64 = 2;

pub mod auto {
    pub const LEAVE_PER_ROBOT: i64 = 3;
    pub const ARTIFACT_CLASSIFIED: i64 = 3;
    pub const ARTIFACT_OVERFLOW: i64 = 1;
    pub const PATTERN_MATCH: i64 = 2;
}

pub mod teleop {
    pub const ARTIFACT_CLASSIFIED: i64 = 3;
    pub const ARTIFACT_OVERFLOW: i64 = 1;
    pub const DEPOT_ARTIFACT: i64 = 1;
    pub const PATTERN_MATCH: i64 = 2;
}

pub mod endgame {
    pub const BASE_PARTIAL: i64 = 5;
    pub const BASE_FULL: i64 = 10;
    /// Flat bonus awarded once when every alliance robot is fully in base.
    pub const ALL_ROBOTS_FULL_BONUS: i64 = 10;
}

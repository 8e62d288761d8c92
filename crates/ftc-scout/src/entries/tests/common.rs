use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::entries::{
    Alliance, AutoObservation, EntryId, EntryRepository, EntrySubmission, InMemoryEntryRepository,
    Ratings, RepositoryError, ScoutingEntry, ScoutingService, StartPosition,
};
use crate::scoring::{AutoCounts, EndgameCounts, TeleopCounts};

pub(super) fn match_time(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 8, 10, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Scores 18 auto, 24 tele-op and 15 endgame for 57 total.
pub(super) fn submission() -> EntrySubmission {
    EntrySubmission {
        user_id: "scout-1".to_string(),
        username: "Scout One".to_string(),
        team_number: " 12345 ".to_string(),
        match_number: "Q5".to_string(),
        alliance: Alliance::Red,
        auto: AutoObservation {
            start_position: StartPosition::RedLaunch,
            counts: AutoCounts {
                leave_robots: 2,
                classified_artifacts: 3,
                overflow_artifacts: 1,
                pattern_matches: 1,
            },
            auto_path: None,
            path_notes: None,
        },
        teleop: TeleopCounts {
            classified_artifacts: 5,
            overflow_artifacts: 2,
            depot_artifacts: 3,
            pattern_matches: 2,
            cycles_completed: 6,
        },
        endgame: EndgameCounts {
            base_full_robots: 1,
            base_partial_robots: 1,
        },
        notes: "Fast intake, missed one park".to_string(),
        ratings: Ratings {
            defense_rating: 4,
            speed_rating: 5,
            ..Ratings::default()
        },
    }
}

pub(super) fn submission_for(team: &str, match_number: &str, alliance: Alliance) -> EntrySubmission {
    EntrySubmission {
        team_number: team.to_string(),
        match_number: match_number.to_string(),
        alliance,
        ..submission()
    }
}

pub(super) fn memory_service() -> (
    Arc<ScoutingService<InMemoryEntryRepository>>,
    Arc<InMemoryEntryRepository>,
) {
    let repository = Arc::new(InMemoryEntryRepository::default());
    let service = Arc::new(ScoutingService::new(repository.clone()));
    (service, repository)
}

pub(super) struct ConflictRepository;

impl EntryRepository for ConflictRepository {
    fn insert(&self, _entry: ScoutingEntry) -> Result<ScoutingEntry, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _entry: ScoutingEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &EntryId) -> Result<Option<ScoutingEntry>, RepositoryError> {
        Ok(None)
    }

    fn delete(&self, _id: &EntryId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<ScoutingEntry>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl EntryRepository for UnavailableRepository {
    fn insert(&self, _entry: ScoutingEntry) -> Result<ScoutingEntry, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn update(&self, _entry: ScoutingEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn fetch(&self, _id: &EntryId) -> Result<Option<ScoutingEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn delete(&self, _id: &EntryId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn all(&self) -> Result<Vec<ScoutingEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

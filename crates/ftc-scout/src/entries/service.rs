use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{EntryId, EntrySubmission, ScoutingEntry};
use super::filter::EntryFilter;
use super::repository::{EntryRepository, RepositoryError};
use super::validation::{normalize_submission, ValidationError};
use crate::scoring::calculate_scores;

/// Service composing submission validation, the scorer, and the repository.
pub struct ScoutingService<R> {
    repository: Arc<R>,
}

static ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_entry_id(timestamp: DateTime<Utc>) -> EntryId {
    let sequence = ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntryId(format!(
        "entry-{}-{sequence:04}",
        timestamp.timestamp_millis()
    ))
}

impl<R> ScoutingService<R>
where
    R: EntryRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validate, score, and store a new entry stamped with the current time.
    pub fn submit(
        &self,
        submission: EntrySubmission,
    ) -> Result<ScoutingEntry, ScoutingServiceError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &self,
        submission: EntrySubmission,
        timestamp: DateTime<Utc>,
    ) -> Result<ScoutingEntry, ScoutingServiceError> {
        let submission = normalize_submission(submission)?;
        let scores = calculate_scores(&submission.score_input());

        let entry = ScoutingEntry {
            id: next_entry_id(timestamp),
            user_id: submission.user_id,
            username: submission.username,
            team_number: submission.team_number,
            match_number: submission.match_number,
            alliance: submission.alliance,
            timestamp,
            auto: submission.auto,
            teleop: submission.teleop,
            endgame: submission.endgame,
            scores,
            notes: submission.notes,
            ratings: submission.ratings,
        };

        let stored = self.repository.insert(entry)?;
        info!(
            entry_id = %stored.id,
            team = %stored.team_number,
            match_number = %stored.match_number,
            total_score = stored.scores.total_score,
            "scouting entry recorded"
        );
        Ok(stored)
    }

    /// Replace an entry's observations and re-score them. The id, author, and
    /// original timestamp are kept.
    pub fn update(
        &self,
        id: &EntryId,
        submission: EntrySubmission,
    ) -> Result<ScoutingEntry, ScoutingServiceError> {
        let existing = self.get(id)?;
        let submission = normalize_submission(submission)?;
        let scores = calculate_scores(&submission.score_input());

        let entry = ScoutingEntry {
            team_number: submission.team_number,
            match_number: submission.match_number,
            alliance: submission.alliance,
            auto: submission.auto,
            teleop: submission.teleop,
            endgame: submission.endgame,
            scores,
            notes: submission.notes,
            ratings: submission.ratings,
            ..existing
        };

        self.repository.update(entry.clone())?;
        info!(entry_id = %entry.id, total_score = entry.scores.total_score, "scouting entry updated");
        Ok(entry)
    }

    pub fn delete(&self, id: &EntryId) -> Result<(), ScoutingServiceError> {
        self.repository.delete(id)?;
        info!(entry_id = %id, "scouting entry deleted");
        Ok(())
    }

    pub fn get(&self, id: &EntryId) -> Result<ScoutingEntry, ScoutingServiceError> {
        let entry = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(entry)
    }

    pub fn list(&self, filter: &EntryFilter) -> Result<Vec<ScoutingEntry>, ScoutingServiceError> {
        let entries = filter.apply(self.repository.all()?);
        debug!(count = entries.len(), "listed scouting entries");
        Ok(entries)
    }

    /// Entries visible to analytics, optionally scoped to one scout.
    pub fn entries_for(
        &self,
        user_id: Option<&str>,
    ) -> Result<Vec<ScoutingEntry>, ScoutingServiceError> {
        let entries = self.repository.all()?;
        Ok(match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(user_id) => entries
                .into_iter()
                .filter(|entry| entry.user_id == user_id)
                .collect(),
            None => entries,
        })
    }
}

/// Error raised by the scouting service.
#[derive(Debug, thiserror::Error)]
pub enum ScoutingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

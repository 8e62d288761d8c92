use super::domain::{EntrySubmission, MAX_RATING, MIN_RATING};

/// Submission problems detected before an entry is stored.
///
/// Event counts are not checked: the scorer accepts any integer, so
/// range checks on counts stay with the client form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("user id is required")]
    MissingUser,
    #[error("team number is required")]
    MissingTeamNumber,
    #[error("match number is required")]
    MissingMatchNumber,
    #[error("{field} must be between {} and {} (found {value})", MIN_RATING, MAX_RATING)]
    RatingOutOfRange { field: &'static str, value: u8 },
}

/// Trims identifiers and checks required fields and rating bounds.
pub fn normalize_submission(
    mut submission: EntrySubmission,
) -> Result<EntrySubmission, ValidationError> {
    submission.user_id = submission.user_id.trim().to_string();
    submission.team_number = submission.team_number.trim().to_string();
    submission.match_number = submission.match_number.trim().to_string();

    if submission.user_id.is_empty() {
        return Err(ValidationError::MissingUser);
    }
    if submission.team_number.is_empty() {
        return Err(ValidationError::MissingTeamNumber);
    }
    if submission.match_number.is_empty() {
        return Err(ValidationError::MissingMatchNumber);
    }

    for (field, value) in submission.ratings.fields() {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(ValidationError::RatingOutOfRange { field, value });
        }
    }

    if submission.username.trim().is_empty() {
        submission.username = submission.user_id.clone();
    }

    Ok(submission)
}

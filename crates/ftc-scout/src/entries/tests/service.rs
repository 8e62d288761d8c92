use std::sync::Arc;

use super::common::*;

use crate::entries::{
    Alliance, EntryFilter, EntryId, EntryRepository, RepositoryError, ScoutingService,
    ScoutingServiceError, ValidationError,
};
use crate::scoring::ScoreResult;

#[test]
fn submit_scores_and_stores_entry() {
    let (service, repository) = memory_service();

    let entry = service
        .submit_at(submission(), match_time(5))
        .expect("submission accepted");

    assert!(entry.id.0.starts_with("entry-"));
    assert_eq!(entry.team_number, "12345");
    assert_eq!(entry.timestamp, match_time(5));
    assert_eq!(
        entry.scores,
        ScoreResult {
            auto_score: 18,
            teleop_score: 24,
            endgame_score: 15,
            total_score: 57,
        }
    );

    let stored = repository
        .fetch(&entry.id)
        .expect("fetch")
        .expect("entry stored");
    assert_eq!(stored, entry);
}

#[test]
fn submit_assigns_distinct_ids() {
    let (service, _) = memory_service();
    let first = service
        .submit_at(submission(), match_time(1))
        .expect("first");
    let second = service
        .submit_at(submission(), match_time(1))
        .expect("second");
    assert_ne!(first.id, second.id);
}

#[test]
fn submit_rejects_invalid_payload() {
    let (service, repository) = memory_service();
    let mut raw = submission();
    raw.team_number = "  ".to_string();

    let error = service.submit(raw).expect_err("validation failure");
    assert!(matches!(
        error,
        ScoutingServiceError::Validation(ValidationError::MissingTeamNumber)
    ));
    assert!(repository.all().expect("all").is_empty());
}

#[test]
fn submit_surfaces_repository_conflict() {
    let service = ScoutingService::new(Arc::new(ConflictRepository));
    let error = service.submit(submission()).expect_err("conflict");
    assert!(matches!(
        error,
        ScoutingServiceError::Repository(RepositoryError::Conflict)
    ));
}

#[test]
fn update_rescores_and_keeps_identity() {
    let (service, _) = memory_service();
    let original = service
        .submit_at(submission(), match_time(5))
        .expect("submission accepted");

    let mut edited = submission_for("777", "Q9", Alliance::Blue);
    edited.user_id = "someone-else".to_string();
    edited.endgame.base_full_robots = 2;
    edited.endgame.base_partial_robots = 0;

    let updated = service.update(&original.id, edited).expect("update");
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.user_id, "scout-1");
    assert_eq!(updated.timestamp, original.timestamp);
    assert_eq!(updated.team_number, "777");
    assert_eq!(updated.alliance, Alliance::Blue);
    assert_eq!(updated.scores.endgame_score, 30);
    assert_eq!(updated.scores.total_score, 72);

    assert_eq!(service.get(&original.id).expect("get"), updated);
}

#[test]
fn update_and_delete_missing_entry_are_not_found() {
    let (service, _) = memory_service();
    let missing = EntryId("entry-missing".to_string());

    assert!(matches!(
        service.update(&missing, submission()),
        Err(ScoutingServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.delete(&missing),
        Err(ScoutingServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.get(&missing),
        Err(ScoutingServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn delete_removes_entry() {
    let (service, _) = memory_service();
    let entry = service.submit(submission()).expect("submit");
    service.delete(&entry.id).expect("delete");
    assert!(service
        .list(&EntryFilter::default())
        .expect("list")
        .is_empty());
}

#[test]
fn entries_for_scopes_by_user() {
    let (service, _) = memory_service();
    service.submit(submission()).expect("submit");
    let mut other = submission();
    other.user_id = "scout-2".to_string();
    service.submit(other).expect("submit");

    assert_eq!(service.entries_for(None).expect("all").len(), 2);
    assert_eq!(service.entries_for(Some(" ")).expect("blank").len(), 2);
    let scoped = service.entries_for(Some("scout-2")).expect("scoped");
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].user_id, "scout-2");
}

#[test]
fn unavailable_repository_propagates() {
    let service = ScoutingService::new(Arc::new(UnavailableRepository));
    assert!(matches!(
        service.list(&EntryFilter::default()),
        Err(ScoutingServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

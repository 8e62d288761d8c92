//! Scouting entry intake, storage, and listing.
//!
//! Entries carry the raw counts a scout recorded plus the score snapshot
//! computed when they were submitted. The snapshot is the value analytics
//! read; it is only recomputed when the counts themselves are edited.

pub mod domain;
pub mod export;
pub mod filter;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Alliance, AutoObservation, EntryId, EntrySubmission, Ratings, ScoutingEntry, StartPosition,
};
pub use export::{export_csv, export_csv_string};
pub use filter::{AllianceFilter, EntryFilter, EntrySort, SortOrder};
pub use repository::{
    read_entries, EntryRepository, InMemoryEntryRepository, JsonFileEntryRepository,
    RepositoryError,
};
pub use router::entry_router;
pub use service::{ScoutingService, ScoutingServiceError};
pub use validation::{normalize_submission, ValidationError};

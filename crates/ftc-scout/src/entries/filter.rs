use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Alliance, ScoutingEntry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntrySort {
    #[default]
    Timestamp,
    TeamNumber,
    MatchNumber,
    TotalScore,
}

impl EntrySort {
    /// Identifiers read naturally A to Z; times and scores newest or highest first.
    pub fn default_order(self) -> SortOrder {
        match self {
            Self::TeamNumber | Self::MatchNumber => SortOrder::Asc,
            Self::Timestamp | Self::TotalScore => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllianceFilter {
    #[default]
    All,
    Red,
    Blue,
}

impl AllianceFilter {
    fn admits(self, alliance: Alliance) -> bool {
        match self {
            Self::All => true,
            Self::Red => alliance == Alliance::Red,
            Self::Blue => alliance == Alliance::Blue,
        }
    }
}

/// Dashboard query over stored entries. The default lists everything, most
/// recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntryFilter {
    pub user_id: Option<String>,
    /// Case-insensitive substring matched against team or match number.
    pub search: Option<String>,
    pub team_number: Option<String>,
    pub match_number: Option<String>,
    pub alliance: AllianceFilter,
    pub sort_by: EntrySort,
    /// Falls back to the sort key's natural order when absent.
    pub sort_order: Option<SortOrder>,
}

impl EntryFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, entry: &ScoutingEntry) -> bool {
        if let Some(user_id) = non_empty(&self.user_id) {
            if entry.user_id != user_id {
                return false;
            }
        }
        if let Some(team) = non_empty(&self.team_number) {
            if entry.team_number != team {
                return false;
            }
        }
        if let Some(match_number) = non_empty(&self.match_number) {
            if entry.match_number != match_number {
                return false;
            }
        }
        if !self.alliance.admits(entry.alliance) {
            return false;
        }
        match non_empty(&self.search) {
            Some(term) => {
                let term = term.to_lowercase();
                entry.team_number.to_lowercase().contains(&term)
                    || entry.match_number.to_lowercase().contains(&term)
            }
            None => true,
        }
    }

    /// Filters then sorts; ties keep their stored order.
    pub fn apply(&self, entries: Vec<ScoutingEntry>) -> Vec<ScoutingEntry> {
        let mut selected: Vec<ScoutingEntry> = entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .collect();

        let order = self
            .sort_order
            .unwrap_or_else(|| self.sort_by.default_order());
        selected.sort_by(|a, b| {
            let ordering = match self.sort_by {
                EntrySort::Timestamp => a.timestamp.cmp(&b.timestamp),
                EntrySort::TeamNumber => a.team_number.cmp(&b.team_number),
                EntrySort::MatchNumber => a.match_number.cmp(&b.match_number),
                EntrySort::TotalScore => a.scores.total_score.cmp(&b.scores.total_score),
            };
            order.apply(ordering)
        });

        selected
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

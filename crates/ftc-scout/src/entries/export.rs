use std::io::Write;

use chrono::SecondsFormat;
use serde::Serialize;

use super::domain::ScoutingEntry;

#[derive(Debug, Serialize)]
struct EntryCsvRow<'a> {
    #[serde(rename = "Entry ID")]
    id: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Scout")]
    username: &'a str,
    #[serde(rename = "Team")]
    team_number: &'a str,
    #[serde(rename = "Match")]
    match_number: &'a str,
    #[serde(rename = "Alliance")]
    alliance: &'static str,
    #[serde(rename = "Start Position")]
    start_position: &'static str,
    #[serde(rename = "Auto Leave")]
    auto_leave: i64,
    #[serde(rename = "Auto Classified")]
    auto_classified: i64,
    #[serde(rename = "Auto Overflow")]
    auto_overflow: i64,
    #[serde(rename = "Auto Pattern")]
    auto_pattern: i64,
    #[serde(rename = "Tele-Op Classified")]
    teleop_classified: i64,
    #[serde(rename = "Tele-Op Overflow")]
    teleop_overflow: i64,
    #[serde(rename = "Tele-Op Depot")]
    teleop_depot: i64,
    #[serde(rename = "Tele-Op Pattern")]
    teleop_pattern: i64,
    #[serde(rename = "Tele-Op Cycles")]
    teleop_cycles: i64,
    #[serde(rename = "Base Partial")]
    base_partial: i64,
    #[serde(rename = "Base Full")]
    base_full: i64,
    #[serde(rename = "Auto Score")]
    auto_score: i64,
    #[serde(rename = "Tele-Op Score")]
    teleop_score: i64,
    #[serde(rename = "Endgame Score")]
    endgame_score: i64,
    #[serde(rename = "Total Score")]
    total_score: i64,
    #[serde(rename = "Defense")]
    defense_rating: u8,
    #[serde(rename = "Speed")]
    speed_rating: u8,
    #[serde(rename = "Driver Skill")]
    driver_skill: u8,
    #[serde(rename = "Reliability")]
    reliability: u8,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

impl<'a> From<&'a ScoutingEntry> for EntryCsvRow<'a> {
    fn from(entry: &'a ScoutingEntry) -> Self {
        Self {
            id: &entry.id.0,
            timestamp: entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            username: &entry.username,
            team_number: &entry.team_number,
            match_number: &entry.match_number,
            alliance: entry.alliance.label(),
            start_position: entry.auto.start_position.label(),
            auto_leave: entry.auto.counts.leave_robots,
            auto_classified: entry.auto.counts.classified_artifacts,
            auto_overflow: entry.auto.counts.overflow_artifacts,
            auto_pattern: entry.auto.counts.pattern_matches,
            teleop_classified: entry.teleop.classified_artifacts,
            teleop_overflow: entry.teleop.overflow_artifacts,
            teleop_depot: entry.teleop.depot_artifacts,
            teleop_pattern: entry.teleop.pattern_matches,
            teleop_cycles: entry.teleop.cycles_completed,
            base_partial: entry.endgame.base_partial_robots,
            base_full: entry.endgame.base_full_robots,
            auto_score: entry.scores.auto_score,
            teleop_score: entry.scores.teleop_score,
            endgame_score: entry.scores.endgame_score,
            total_score: entry.scores.total_score,
            defense_rating: entry.ratings.defense_rating,
            speed_rating: entry.ratings.speed_rating,
            driver_skill: entry.ratings.driver_skill,
            reliability: entry.ratings.reliability,
            notes: &entry.notes,
        }
    }
}

/// Writes one CSV row per entry using the stored score snapshot. Headers are
/// emitted with the first row, so an empty slice yields an empty document.
pub fn export_csv<W: Write>(entries: &[ScoutingEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for entry in entries {
        csv_writer.serialize(EntryCsvRow::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv_string(entries: &[ScoutingEntry]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    export_csv(entries, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

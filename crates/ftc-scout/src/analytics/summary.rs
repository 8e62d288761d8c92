use crate::entries::ScoutingEntry;

const NOTES_LIMIT: usize = 250;
const NOTES_KEEP: usize = 247;

/// Deterministic one-paragraph write-up of a single entry.
pub fn summarize_entry(entry: &ScoutingEntry) -> String {
    let scores = &entry.scores;
    let mut parts = vec![
        format!(
            "Team {} - Match {} ({} alliance).",
            entry.team_number,
            entry.match_number,
            entry.alliance.label()
        ),
        format!(
            "Total score: {} (Auto {}, Tele-Op {}, Endgame {}).",
            scores.total_score, scores.auto_score, scores.teleop_score, scores.endgame_score
        ),
    ];

    if scores.auto_score >= 20 {
        parts.push("Strong autonomous performance - reliable early scoring.".to_string());
    }
    if scores.teleop_score >= 30 {
        parts.push("High tele-op throughput - efficient cycles.".to_string());
    }
    if scores.endgame_score >= 15 {
        parts.push("Good endgame - returns/parking consistent.".to_string());
    }
    if entry.ratings.defense_rating >= 4 {
        parts.push("Plays strong defense when needed.".to_string());
    }
    if entry.ratings.speed_rating >= 4 {
        parts.push("Above-average speed/agility.".to_string());
    }

    let mut suggestions = Vec::new();
    let cycles = entry.teleop.cycles_completed;
    if cycles != 0 && cycles < 3 {
        suggestions.push("Improve cycle efficiency to increase tele-op scoring.");
    }
    if entry.endgame.base_full_robots == 0 {
        suggestions.push("Practice full-base returns for the +10 bonus.");
    }

    if !entry.notes.trim().is_empty() {
        parts.push(format!("Scout notes: {}", truncate_notes(&entry.notes)));
    }

    if !suggestions.is_empty() {
        parts.push(format!("Suggestions: {}", suggestions.join(" ")));
    }

    parts.join(" ")
}

fn truncate_notes(notes: &str) -> String {
    if notes.chars().count() > NOTES_LIMIT {
        let kept: String = notes.chars().take(NOTES_KEEP).collect();
        format!("{kept}...")
    } else {
        notes.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::scored_entry;

    #[test]
    fn quiet_entry_gets_headline_and_return_suggestion() {
        let entry = scored_entry("12345", 5, 6, 10, 5);
        assert_eq!(
            summarize_entry(&entry),
            "Team 12345 - Match Q5 (red alliance). Total score: 21 (Auto 6, Tele-Op 10, Endgame 5). \
             Suggestions: Practice full-base returns for the +10 bonus."
        );
    }

    #[test]
    fn highlights_fire_at_thresholds() {
        let mut entry = scored_entry("999", 2, 20, 30, 15);
        entry.ratings.defense_rating = 4;
        entry.ratings.speed_rating = 5;
        entry.endgame.base_full_robots = 1;
        entry.teleop.cycles_completed = 2;

        let summary = summarize_entry(&entry);
        assert!(summary.contains("Strong autonomous performance"));
        assert!(summary.contains("High tele-op throughput"));
        assert!(summary.contains("Good endgame"));
        assert!(summary.contains("Plays strong defense when needed."));
        assert!(summary.contains("Above-average speed/agility."));
        assert!(summary.ends_with("Suggestions: Improve cycle efficiency to increase tele-op scoring."));
    }

    #[test]
    fn zero_cycles_is_not_flagged() {
        let mut entry = scored_entry("999", 2, 0, 0, 10);
        entry.endgame.base_full_robots = 1;
        assert!(!summarize_entry(&entry).contains("Suggestions"));
    }

    #[test]
    fn long_notes_are_truncated() {
        let mut entry = scored_entry("999", 2, 0, 0, 0);
        entry.notes = "x".repeat(300);
        let summary = summarize_entry(&entry);
        let expected = format!("Scout notes: {}...", "x".repeat(NOTES_KEEP));
        assert!(summary.contains(&expected));
        assert!(!summary.contains(&"x".repeat(NOTES_KEEP + 1)));
    }

    #[test]
    fn blank_notes_are_skipped() {
        let mut entry = scored_entry("999", 2, 0, 0, 0);
        entry.notes = "   ".to_string();
        assert!(!summarize_entry(&entry).contains("Scout notes"));
    }
}

use std::cmp::Ordering;

use serde::Serialize;

use super::{entries_for_team, mean, round_half_up, std_dev, teams_in_order};
use crate::entries::ScoutingEntry;

const MAX_INSIGHTS: usize = 5;
const STANDOUT_FACTOR: f64 = 1.2;
const HIGH_VARIANCE_RATIO: f64 = 0.3;
const ENDGAME_OPPORTUNITY_THRESHOLD: f64 = 10.0;
const RISING_STAR_FACTOR: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    fn new(kind: InsightKind, title: String, description: String) -> Self {
        Self {
            kind,
            title,
            description,
        }
    }
}

struct TeamAverages<'a> {
    team: &'a str,
    matches: usize,
    total: f64,
    auto: f64,
    teleop: f64,
}

struct FieldAverages {
    total: f64,
    auto: f64,
    teleop: f64,
    endgame: f64,
}

fn score_of(entry: &ScoutingEntry) -> f64 {
    entry.scores.total_score as f64
}

fn percent_above(value: f64, baseline: f64) -> i64 {
    if baseline == 0.0 {
        return 0;
    }
    round_half_up((value / baseline - 1.0) * 100.0) as i64
}

/// Field-wide observations, at most five, in a fixed priority order.
pub fn field_insights(entries: &[ScoutingEntry]) -> Vec<Insight> {
    if entries.is_empty() {
        return Vec::new();
    }

    let field = FieldAverages {
        total: mean(entries.iter().map(score_of)),
        auto: mean(entries.iter().map(|e| e.scores.auto_score as f64)),
        teleop: mean(entries.iter().map(|e| e.scores.teleop_score as f64)),
        endgame: mean(entries.iter().map(|e| e.scores.endgame_score as f64)),
    };

    let teams: Vec<TeamAverages<'_>> = teams_in_order(entries)
        .into_iter()
        .map(|team| {
            let team_entries: Vec<&ScoutingEntry> = entries_for_team(entries, team).collect();
            TeamAverages {
                team,
                matches: team_entries.len(),
                total: mean(team_entries.iter().map(|e| score_of(e))),
                auto: mean(team_entries.iter().map(|e| e.scores.auto_score as f64)),
                teleop: mean(team_entries.iter().map(|e| e.scores.teleop_score as f64)),
            }
        })
        .collect();

    let by_total = sorted_desc(&teams, |t| t.total);
    let by_auto = sorted_desc(&teams, |t| t.auto);
    let by_teleop = sorted_desc(&teams, |t| t.teleop);

    let mut insights = Vec::new();

    if let Some(top) = by_total.first() {
        insights.push(Insight::new(
            InsightKind::Positive,
            format!("Team {} leads scoring", top.team),
            format!(
                "Averaging {} pts/match across {} matches. {}% above average.",
                round_half_up(top.total),
                top.matches,
                percent_above(top.total, field.total)
            ),
        ));
    }

    if let Some(top) = by_auto
        .first()
        .filter(|top| top.auto > field.auto * STANDOUT_FACTOR)
    {
        insights.push(Insight::new(
            InsightKind::Positive,
            format!("Strong autonomous: Team {}", top.team),
            format!(
                "Scores {} pts in auto phase, {}% above field average.",
                round_half_up(top.auto),
                percent_above(top.auto, field.auto)
            ),
        ));
    }

    let top_scorer = by_total.first().map(|top| top.team);
    if let Some(top) = by_teleop.first().filter(|top| {
        Some(top.team) != top_scorer && top.teleop > field.teleop * STANDOUT_FACTOR
    }) {
        insights.push(Insight::new(
            InsightKind::Positive,
            format!("Tele-Op specialist: Team {}", top.team),
            format!(
                "Dominates in tele-op with {} avg pts. Great cycle efficiency.",
                round_half_up(top.teleop)
            ),
        ));
    }

    let inconsistent: Vec<&str> = teams
        .iter()
        .filter(|team| {
            if team.matches < 2 {
                return false;
            }
            let totals: Vec<f64> = entries_for_team(entries, team.team).map(score_of).collect();
            std_dev(&totals) > team.total * HIGH_VARIANCE_RATIO
        })
        .map(|team| team.team)
        .collect();
    if !inconsistent.is_empty() {
        let listed: Vec<&str> = inconsistent.iter().take(3).copied().collect();
        insights.push(Insight::new(
            InsightKind::Warning,
            "Watch: Inconsistent performance".to_string(),
            format!(
                "Teams {} show high score variance. Consider match-by-match analysis.",
                listed.join(", ")
            ),
        ));
    }

    if field.endgame < ENDGAME_OPPORTUNITY_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Info,
            "Field-wide: Endgame opportunity".to_string(),
            format!(
                "Average endgame score is only {} pts. Teams with reliable returns will have an advantage.",
                round_half_up(field.endgame)
            ),
        ));
    }

    if let Some(insight) = rising_star(entries, &teams) {
        insights.push(insight);
    }

    if by_total.len() >= 3 {
        let picks: Vec<String> = by_total
            .iter()
            .take(3)
            .map(|team| format!("Team {} ({})", team.team, round_half_up(team.total)))
            .collect();
        insights.push(Insight::new(
            InsightKind::Info,
            "Pick recommendation".to_string(),
            format!("Top picks: {}", picks.join(", ")),
        ));
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}

fn sorted_desc<'t, 'a>(
    teams: &'t [TeamAverages<'a>],
    key: impl Fn(&TeamAverages<'a>) -> f64,
) -> Vec<&'t TeamAverages<'a>> {
    let mut sorted: Vec<&TeamAverages<'a>> = teams.iter().collect();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted
}

/// First team whose later half of matches outscores the earlier half by 25%.
fn rising_star(entries: &[ScoutingEntry], teams: &[TeamAverages<'_>]) -> Option<Insight> {
    teams
        .iter()
        .filter(|team| team.matches >= 2)
        .find_map(|team| {
            let mut history: Vec<&ScoutingEntry> = entries_for_team(entries, team.team).collect();
            history.sort_by_key(|entry| entry.timestamp);
            let (early, late) = history.split_at(history.len() / 2);
            let early_avg = mean(early.iter().map(|e| score_of(e)));
            let late_avg = mean(late.iter().map(|e| score_of(e)));

            (late_avg > early_avg * RISING_STAR_FACTOR).then(|| {
                Insight::new(
                    InsightKind::Positive,
                    format!("Rising star: Team {}", team.team),
                    format!(
                        "Improved from {} to {} avg pts. Watch for their next matches!",
                        round_half_up(early_avg),
                        round_half_up(late_avg)
                    ),
                )
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::scored_entry;

    #[test]
    fn no_entries_no_insights() {
        assert!(field_insights(&[]).is_empty());
    }

    #[test]
    fn top_scorer_leads_and_list_is_capped() {
        let entries = vec![
            scored_entry("100", 1, 30, 40, 30),
            scored_entry("200", 2, 2, 60, 0),
            scored_entry("300", 3, 0, 10, 0),
            scored_entry("400", 4, 0, 5, 0),
            scored_entry("400", 5, 0, 45, 0),
        ];

        let insights = field_insights(&entries);
        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert_eq!(insights[0].title, "Team 100 leads scoring");
        assert_eq!(insights[0].kind, InsightKind::Positive);
        // field avg total = (100 + 62 + 10 + 5 + 45) / 5 = 44.4
        assert_eq!(
            insights[0].description,
            "Averaging 100 pts/match across 1 matches. 125% above average."
        );
        assert_eq!(insights[1].title, "Strong autonomous: Team 100");
        assert_eq!(insights[2].title, "Tele-Op specialist: Team 200");
        assert_eq!(insights[3].title, "Watch: Inconsistent performance");
        assert_eq!(
            insights[3].description,
            "Teams 400 show high score variance. Consider match-by-match analysis."
        );
        assert_eq!(insights[4].title, "Field-wide: Endgame opportunity");
    }

    #[test]
    fn rising_star_and_picks() {
        let entries = vec![
            scored_entry("100", 1, 10, 10, 30),
            scored_entry("100", 2, 10, 12, 30),
            scored_entry("200", 3, 10, 10, 30),
            scored_entry("200", 4, 20, 30, 30),
            scored_entry("300", 5, 10, 15, 30),
        ];

        let insights = field_insights(&entries);
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert!(titles.contains(&"Rising star: Team 200"));
        let picks = insights
            .iter()
            .find(|insight| insight.title == "Pick recommendation")
            .expect("pick recommendation present");
        assert_eq!(
            picks.description,
            "Top picks: Team 200 (65), Team 300 (55), Team 100 (51)"
        );
    }
}

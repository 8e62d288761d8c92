use crate::infra::ConfiguredRepository;
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::{Args, ValueEnum};
use ftc_scout::analytics::{
    compare_teams, dashboard_summary, field_insights, predict_match, rank_teams, summarize_entry,
    team_statistics, Insight, TeamSort, TeamStatistics,
};
use ftc_scout::config::StorageConfig;
use ftc_scout::entries::{
    read_entries, Alliance, AutoObservation, EntryFilter, EntrySubmission, Ratings,
    ScoutingService, SortOrder, StartPosition,
};
use ftc_scout::error::AppError;
use ftc_scout::scoring::{
    calculate_scores, AutoCounts, EndgameCounts, ScoreInput, ScoreResult, TeleopCounts,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Robots that left the starting area in auto
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) auto_leave: i64,
    /// Artifacts classified during auto
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) auto_classified: i64,
    /// Artifacts in overflow during auto
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) auto_overflow: i64,
    /// Pattern matches during auto
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) auto_pattern: i64,
    /// Artifacts classified during tele-op
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) teleop_classified: i64,
    /// Artifacts in overflow during tele-op
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) teleop_overflow: i64,
    /// Depot artifacts during tele-op
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) teleop_depot: i64,
    /// Pattern matches during tele-op
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) teleop_pattern: i64,
    /// Completed cycles (recorded, worth no points)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) teleop_cycles: i64,
    /// Robots fully returned to base
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) base_full: i64,
    /// Robots partially returned to base
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) base_partial: i64,
    /// Print the breakdown as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    pub(crate) fn score_input(&self) -> ScoreInput {
        ScoreInput::new(
            AutoCounts {
                leave_robots: self.auto_leave,
                classified_artifacts: self.auto_classified,
                overflow_artifacts: self.auto_overflow,
                pattern_matches: self.auto_pattern,
            },
            TeleopCounts {
                classified_artifacts: self.teleop_classified,
                overflow_artifacts: self.teleop_overflow,
                depot_artifacts: self.teleop_depot,
                pattern_matches: self.teleop_pattern,
                cycles_completed: self.teleop_cycles,
            },
            EndgameCounts {
                base_full_robots: self.base_full,
                base_partial_robots: self.base_partial,
            },
        )
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum ReportSort {
    #[default]
    Average,
    Matches,
    Team,
}

impl From<ReportSort> for TeamSort {
    fn from(value: ReportSort) -> Self {
        match value {
            ReportSort::Average => TeamSort::AvgTotalScore,
            ReportSort::Matches => TeamSort::MatchCount,
            ReportSort::Team => TeamSort::TeamNumber,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON array of scouting entries, as written by the server's data file
    #[arg(long)]
    pub(crate) data: PathBuf,
    /// Only include entries recorded by this scout
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Ranking order for the team table
    #[arg(long, value_enum, default_value_t = ReportSort::Average)]
    pub(crate) sort: ReportSort,
    /// Case-insensitive team number search
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Print rankings and insights as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Persist the seeded entries to this JSON file instead of memory
    #[arg(long)]
    pub(crate) save: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let result = calculate_scores(&args.score_input());
    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Score payload unavailable: {err}"),
        }
    } else {
        println!("{}", render_breakdown(&result));
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        data,
        user,
        sort,
        search,
        json: as_json,
    } = args;

    let mut entries = read_entries(&data)?;
    if let Some(user) = user.as_deref().map(str::trim).filter(|user| !user.is_empty()) {
        entries.retain(|entry| entry.user_id == user);
    }

    let teams = rank_teams(
        team_statistics(&entries),
        sort.into(),
        SortOrder::Desc,
        search.as_deref(),
    );
    let insights = field_insights(&entries);

    if as_json {
        let payload = json!({
            "summary": dashboard_summary(&entries),
            "teams": teams,
            "insights": insights,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
        return Ok(());
    }

    let summary = dashboard_summary(&entries);
    println!("Scouting report for {}", data.display());
    println!(
        "- {} entries | {} teams | avg {} pts | high {} pts",
        summary.entries, summary.unique_teams, summary.avg_score, summary.high_score
    );
    println!("\n{}", render_rankings(&teams));
    println!("\n{}", render_insights(&insights));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = ConfiguredRepository::from_config(&StorageConfig {
        data_path: args.save,
    });
    println!("FTC DECODE scouting demo (storage: {})", repository.describe());
    let service = Arc::new(ScoutingService::new(Arc::new(repository)));

    println!("\nRecorded entries");
    for (offset, submission) in demo_submissions().into_iter().enumerate() {
        let recorded_at = demo_start() + Duration::minutes(7 * offset as i64);
        let entry = service.submit_at(submission, recorded_at)?;
        println!(
            "- {} {:<4} Team {:<5} {:>3} pts (auto {} | tele-op {} | endgame {})",
            entry.match_number,
            entry.alliance.label(),
            entry.team_number,
            entry.scores.total_score,
            entry.scores.auto_score,
            entry.scores.teleop_score,
            entry.scores.endgame_score
        );
    }

    let entries = service.list(&EntryFilter {
        sort_order: Some(SortOrder::Asc),
        ..EntryFilter::default()
    })?;

    let summary = dashboard_summary(&entries);
    println!(
        "\nDashboard: {} entries | {} teams | avg {} pts | high {} pts",
        summary.entries, summary.unique_teams, summary.avg_score, summary.high_score
    );

    let teams = rank_teams(
        team_statistics(&entries),
        TeamSort::AvgTotalScore,
        SortOrder::Desc,
        None,
    );
    println!("\n{}", render_rankings(&teams));
    println!("\n{}", render_insights(&field_insights(&entries)));

    if let Some(entry) = entries.first() {
        println!("\nEntry summary ({})", entry.id);
        println!("  {}", summarize_entry(entry));
    }

    if let [first, second, ..] = teams.as_slice() {
        println!("\nTeam comparison");
        match compare_teams(&entries, &first.team_number, &second.team_number) {
            Ok(comparison) => {
                for line in comparison.narrative.lines() {
                    println!("  {line}");
                }
            }
            Err(err) => println!("  Comparison unavailable: {err}"),
        }
    }

    let (red, blue) = split_alliances(&teams);
    println!("\nMatch prediction: red {:?} vs blue {:?}", red, blue);
    match predict_match(&entries, &red, &blue) {
        Ok(prediction) => {
            println!(
                "  Winner: {} ({}% | confidence {})",
                prediction.winner.label(),
                prediction.win_probability,
                prediction.confidence
            );
            println!(
                "  Red {}-{}-{} | Blue {}-{}-{}",
                prediction.red_score.low,
                prediction.red_score.expected,
                prediction.red_score.high,
                prediction.blue_score.low,
                prediction.blue_score.expected,
                prediction.blue_score.high
            );
            for factor in &prediction.key_factors {
                println!("  - {factor}");
            }
        }
        Err(err) => println!("  Prediction unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn render_breakdown(result: &ScoreResult) -> String {
    format!(
        "Auto:    {:>4}\nTele-Op: {:>4}\nEndgame: {:>4}\nTotal:   {:>4}",
        result.auto_score, result.teleop_score, result.endgame_score, result.total_score
    )
}

pub(crate) fn render_rankings(teams: &[TeamStatistics]) -> String {
    if teams.is_empty() {
        return "Team rankings: no scouting data".to_string();
    }

    let mut lines = vec![
        "Team rankings".to_string(),
        format!(
            "  {:<4} {:<7} {:>7} {:>6} {:>7} {:>7} {:>5} {:>6}",
            "#", "Team", "Matches", "Avg", "Auto", "TeleOp", "Max", "Cons%"
        ),
    ];
    for (rank, team) in teams.iter().enumerate() {
        lines.push(format!(
            "  {:<4} {:<7} {:>7} {:>6.1} {:>7.1} {:>7.1} {:>5} {:>6}",
            rank + 1,
            team.team_number,
            team.match_count,
            team.avg_total_score,
            team.avg_auto_score,
            team.avg_teleop_score,
            team.max_total_score,
            team.consistency
        ));
    }
    lines.join("\n")
}

pub(crate) fn render_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "Field insights: none yet".to_string();
    }

    let mut lines = vec!["Field insights".to_string()];
    for insight in insights {
        lines.push(format!(
            "  [{:?}] {}: {}",
            insight.kind, insight.title, insight.description
        ));
    }
    lines.join("\n")
}

/// Top two ranked teams play red, the next two blue.
fn split_alliances(teams: &[TeamStatistics]) -> (Vec<String>, Vec<String>) {
    let numbers: Vec<String> = teams.iter().map(|team| team.team_number.clone()).collect();
    let red = numbers.iter().take(2).cloned().collect();
    let blue = numbers.iter().skip(2).take(2).cloned().collect();
    (red, blue)
}

fn demo_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 8, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

struct DemoObservation {
    team: &'static str,
    match_number: &'static str,
    alliance: Alliance,
    start: StartPosition,
    auto: [i64; 4],
    teleop: [i64; 5],
    endgame: [i64; 2],
    ratings: [u8; 2],
    notes: &'static str,
}

const DEMO_OBSERVATIONS: [DemoObservation; 8] = [
    DemoObservation {
        team: "12345",
        match_number: "Q1",
        alliance: Alliance::Red,
        start: StartPosition::RedClassifier,
        auto: [2, 3, 1, 2],
        teleop: [8, 2, 3, 2, 6],
        endgame: [2, 0],
        ratings: [3, 5],
        notes: "Consistent intake, parked both robots.",
    },
    DemoObservation {
        team: "7777",
        match_number: "Q1",
        alliance: Alliance::Blue,
        start: StartPosition::BlueLaunch,
        auto: [1, 1, 0, 0],
        teleop: [4, 3, 2, 0, 3],
        endgame: [0, 1],
        ratings: [4, 3],
        notes: "Played heavy defense in the second half.",
    },
    DemoObservation {
        team: "2468",
        match_number: "Q2",
        alliance: Alliance::Red,
        start: StartPosition::RedLaunch,
        auto: [1, 2, 1, 0],
        teleop: [6, 1, 1, 1, 2],
        endgame: [1, 1],
        ratings: [2, 4],
        notes: "",
    },
    DemoObservation {
        team: "13579",
        match_number: "Q2",
        alliance: Alliance::Blue,
        start: StartPosition::BlueClassifier,
        auto: [0, 1, 0, 0],
        teleop: [3, 2, 4, 0, 2],
        endgame: [0, 0],
        ratings: [3, 2],
        notes: "Drivetrain stalled twice.",
    },
    DemoObservation {
        team: "12345",
        match_number: "Q5",
        alliance: Alliance::Blue,
        start: StartPosition::BlueClassifier,
        auto: [2, 4, 0, 2],
        teleop: [9, 1, 2, 2, 7],
        endgame: [2, 0],
        ratings: [3, 5],
        notes: "Fastest cycles of the morning.",
    },
    DemoObservation {
        team: "7777",
        match_number: "Q6",
        alliance: Alliance::Red,
        start: StartPosition::RedClassifier,
        auto: [1, 2, 1, 0],
        teleop: [5, 2, 2, 1, 4],
        endgame: [1, 0],
        ratings: [5, 3],
        notes: "",
    },
    DemoObservation {
        team: "2468",
        match_number: "Q7",
        alliance: Alliance::Blue,
        start: StartPosition::BlueLaunch,
        auto: [2, 3, 1, 1],
        teleop: [10, 2, 2, 2, 8],
        endgame: [1, 1],
        ratings: [2, 5],
        notes: "Big improvement after swapping the intake.",
    },
    DemoObservation {
        team: "13579",
        match_number: "Q8",
        alliance: Alliance::Red,
        start: StartPosition::RedLaunch,
        auto: [1, 1, 1, 0],
        teleop: [4, 1, 3, 1, 3],
        endgame: [0, 2],
        ratings: [3, 3],
        notes: "",
    },
];

pub(crate) fn demo_submissions() -> Vec<EntrySubmission> {
    DEMO_OBSERVATIONS
        .iter()
        .map(|observation| EntrySubmission {
            user_id: "demo-scout".to_string(),
            username: "Demo Scout".to_string(),
            team_number: observation.team.to_string(),
            match_number: observation.match_number.to_string(),
            alliance: observation.alliance,
            auto: AutoObservation {
                start_position: observation.start,
                counts: AutoCounts {
                    leave_robots: observation.auto[0],
                    classified_artifacts: observation.auto[1],
                    overflow_artifacts: observation.auto[2],
                    pattern_matches: observation.auto[3],
                },
                auto_path: None,
                path_notes: None,
            },
            teleop: TeleopCounts {
                classified_artifacts: observation.teleop[0],
                overflow_artifacts: observation.teleop[1],
                depot_artifacts: observation.teleop[2],
                pattern_matches: observation.teleop[3],
                cycles_completed: observation.teleop[4],
            },
            endgame: EndgameCounts {
                base_full_robots: observation.endgame[0],
                base_partial_robots: observation.endgame[1],
            },
            notes: observation.notes.to_string(),
            ratings: Ratings {
                defense_rating: observation.ratings[0],
                speed_rating: observation.ratings[1],
                ..Ratings::default()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftc_scout::entries::{
        normalize_submission, InMemoryEntryRepository, RepositoryError, ScoutingEntry,
    };

    #[test]
    fn demo_submissions_are_valid() {
        let submissions = demo_submissions();
        assert_eq!(submissions.len(), DEMO_OBSERVATIONS.len());
        for submission in submissions {
            normalize_submission(submission).expect("demo data validates");
        }
    }

    #[test]
    fn demo_event_feeds_every_view() {
        let service = ScoutingService::new(Arc::new(InMemoryEntryRepository::default()));
        for submission in demo_submissions() {
            service
                .submit_at(submission, demo_start())
                .expect("submission stored");
        }
        let entries: Vec<ScoutingEntry> = service
            .list(&EntryFilter::default())
            .expect("entries listed");

        let teams = rank_teams(
            team_statistics(&entries),
            TeamSort::AvgTotalScore,
            SortOrder::Desc,
            None,
        );
        assert_eq!(teams.len(), 4);
        assert_eq!(teams[0].team_number, "12345");

        let (red, blue) = split_alliances(&teams);
        assert_eq!(red.len(), 2);
        assert_eq!(blue.len(), 2);
        assert!(predict_match(&entries, &red, &blue).is_ok());
        assert!(!field_insights(&entries).is_empty());
    }

    #[test]
    fn breakdown_lists_each_phase() {
        let rendered = render_breakdown(&ScoreResult {
            auto_score: 20,
            teleop_score: 22,
            endgame_score: 30,
            total_score: 72,
        });
        assert_eq!(
            rendered,
            "Auto:      20\nTele-Op:   22\nEndgame:   30\nTotal:     72"
        );
    }

    #[test]
    fn empty_views_render_placeholders() {
        assert_eq!(render_rankings(&[]), "Team rankings: no scouting data");
        assert_eq!(render_insights(&[]), "Field insights: none yet");
    }

    #[test]
    fn rankings_show_one_row_per_team() {
        let service = ScoutingService::new(Arc::new(InMemoryEntryRepository::default()));
        for submission in demo_submissions().into_iter().take(2) {
            service.submit(submission).expect("stored");
        }
        let entries = service.list(&EntryFilter::default()).expect("listed");
        let rendered = render_rankings(&team_statistics(&entries));
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("12345"));
        assert!(rendered.contains("7777"));
    }

    #[test]
    fn demo_save_fails_when_the_store_cannot_be_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = run_demo(DemoArgs {
            save: Some(dir.path().to_path_buf()),
        });
        assert!(matches!(
            result,
            Err(AppError::Storage(RepositoryError::Unavailable(_)))
        ));
    }

    #[test]
    fn demo_save_persists_the_event() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("event.json");
        run_demo(DemoArgs {
            save: Some(path.clone()),
        })
        .expect("demo runs");
        let saved = read_entries(&path).expect("saved entries");
        assert_eq!(saved.len(), demo_submissions().len());
    }
}

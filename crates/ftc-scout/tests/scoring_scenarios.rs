//! Rule-table walkthroughs exercised through the JSON shape clients send.

use ftc_scout::scoring::{calculate_scores, ScoreInput, ScoreResult};
use serde_json::json;

fn score(payload: serde_json::Value) -> ScoreResult {
    let input: ScoreInput = serde_json::from_value(payload).expect("score input");
    calculate_scores(&input)
}

#[test]
fn autonomous_only_match() {
    let result = score(json!({
        "auto": { "leaveRobots": 2, "classifiedArtifacts": 3, "overflowArtifacts": 1, "patternMatches": 2 },
        "teleop": {},
        "endgame": {}
    }));
    assert_eq!(
        result,
        ScoreResult {
            auto_score: 20,
            teleop_score: 0,
            endgame_score: 0,
            total_score: 20
        }
    );
}

#[test]
fn teleop_only_match_ignores_cycles() {
    let result = score(json!({
        "teleop": {
            "classifiedArtifacts": 5,
            "overflowArtifacts": 2,
            "depotArtifacts": 3,
            "patternMatches": 1,
            "cyclesCompleted": 10
        }
    }));
    assert_eq!(result.teleop_score, 22);
    assert_eq!(result.total_score, 22);
}

#[test]
fn endgame_returns() {
    let both_full = score(json!({ "endgame": { "baseFullRobots": 2, "basePartialRobots": 0 } }));
    assert_eq!(both_full.endgame_score, 30);

    let one_each = score(json!({ "endgame": { "baseFullRobots": 1, "basePartialRobots": 1 } }));
    assert_eq!(one_each.endgame_score, 15);

    let overcounted = score(json!({ "endgame": { "baseFullRobots": 5 } }));
    assert_eq!(overcounted.endgame_score, 30);

    let crowded = score(json!({ "endgame": { "baseFullRobots": 2, "basePartialRobots": 5 } }));
    assert_eq!(crowded.endgame_score, 30);

    let partial_only = score(json!({ "endgame": { "basePartialRobots": 2 } }));
    assert_eq!(partial_only.endgame_score, 10);
}

#[test]
fn full_match_sums_every_phase() {
    let result = score(json!({
        "auto": { "leaveRobots": 2, "classifiedArtifacts": 3, "overflowArtifacts": 1, "patternMatches": 2 },
        "teleop": { "classifiedArtifacts": 5, "overflowArtifacts": 2, "depotArtifacts": 3, "patternMatches": 1 },
        "endgame": { "baseFullRobots": 2 }
    }));
    assert_eq!(result.total_score, 72);
    assert_eq!(
        result.total_score,
        result.auto_score + result.teleop_score + result.endgame_score
    );
}

#[test]
fn empty_record_scores_zero() {
    assert_eq!(score(json!({})), ScoreResult::default());
}

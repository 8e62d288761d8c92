use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::{
    compare_teams, dashboard_summary, field_insights, predict_match, rank_teams, team_statistics,
    AnalyticsError, TeamSort,
};
use crate::entries::router::{run_blocking, service_error_response};
use crate::entries::{EntryRepository, ScoutingEntry, ScoutingService, SortOrder};

/// Router builder exposing dashboard, team, and heuristic analytics.
pub fn analytics_router<R>(service: Arc<ScoutingService<R>>) -> Router
where
    R: EntryRepository + 'static,
{
    Router::new()
        .route("/api/v1/analytics/dashboard", get(dashboard_handler::<R>))
        .route("/api/v1/analytics/teams", get(teams_handler::<R>))
        .route("/api/v1/analytics/insights", get(insights_handler::<R>))
        .route("/api/v1/analytics/compare", post(compare_handler::<R>))
        .route("/api/v1/analytics/predict", post(predict_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ScopeQuery {
    user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct TeamQuery {
    user_id: Option<String>,
    search: Option<String>,
    sort_by: TeamSort,
    sort_order: SortOrder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompareRequest {
    team_a: String,
    team_b: String,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictRequest {
    #[serde(default)]
    red: Vec<String>,
    #[serde(default)]
    blue: Vec<String>,
    #[serde(default)]
    user_id: Option<String>,
}

fn analytics_error_response(error: AnalyticsError) -> Response {
    let status = match error {
        AnalyticsError::NoData(_) => StatusCode::NOT_FOUND,
        AnalyticsError::SameTeam | AnalyticsError::EmptyAlliance(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

async fn scoped_entries<R>(
    service: Arc<ScoutingService<R>>,
    user_id: Option<String>,
) -> Result<Vec<ScoutingEntry>, Response>
where
    R: EntryRepository + 'static,
{
    run_blocking(service, move |service| service.entries_for(user_id.as_deref()))
        .await
        .map_err(service_error_response)
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Query(query): Query<ScopeQuery>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match scoped_entries(service, query.user_id).await {
        Ok(entries) => (StatusCode::OK, Json(dashboard_summary(&entries))).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn teams_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Query(query): Query<TeamQuery>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match scoped_entries(service, query.user_id).await {
        Ok(entries) => {
            let ranked = rank_teams(
                team_statistics(&entries),
                query.sort_by,
                query.sort_order,
                query.search.as_deref(),
            );
            (StatusCode::OK, Json(ranked)).into_response()
        }
        Err(response) => response,
    }
}

pub(crate) async fn insights_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Query(query): Query<ScopeQuery>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match scoped_entries(service, query.user_id).await {
        Ok(entries) => (StatusCode::OK, Json(field_insights(&entries))).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn compare_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Json(request): Json<CompareRequest>,
) -> Response
where
    R: EntryRepository + 'static,
{
    let entries = match scoped_entries(service, request.user_id).await {
        Ok(entries) => entries,
        Err(response) => return response,
    };

    match compare_teams(&entries, &request.team_a, &request.team_b) {
        Ok(comparison) => (StatusCode::OK, Json(comparison)).into_response(),
        Err(error) => analytics_error_response(error),
    }
}

pub(crate) async fn predict_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Json(request): Json<PredictRequest>,
) -> Response
where
    R: EntryRepository + 'static,
{
    let entries = match scoped_entries(service, request.user_id).await {
        Ok(entries) => entries,
        Err(response) => return response,
    };

    match predict_match(&entries, &request.red, &request.blue) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(error) => analytics_error_response(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analytics::fixtures::scored_entry;
    use crate::entries::InMemoryEntryRepository;

    fn router() -> Router {
        let mut other_scout = scored_entry("300", 4, 0, 5, 0);
        other_scout.user_id = "scout-2".to_string();
        let repository = Arc::new(InMemoryEntryRepository::with_entries(vec![
            scored_entry("100", 1, 20, 40, 30),
            scored_entry("200", 2, 5, 20, 5),
            scored_entry("200", 3, 5, 40, 5),
            other_scout,
        ]));
        analytics_router(Arc::new(ScoutingService::new(repository)))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn dashboard_scopes_to_user() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/analytics/dashboard?userId=scout-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["entries"], 3);
        assert_eq!(body["uniqueTeams"], 2);
        assert_eq!(body["highScore"], 90);
    }

    #[tokio::test]
    async fn teams_are_ranked_by_query() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/analytics/teams?sortBy=matchCount&sortOrder=desc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let teams: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|team| team["teamNumber"].as_str())
            .collect();
        assert_eq!(teams.first(), Some(&"200"));
        assert_eq!(teams.len(), 3);
    }

    #[tokio::test]
    async fn compare_maps_errors() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/analytics/compare",
                serde_json::json!({ "teamA": "100", "teamB": "100" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router()
            .oneshot(post_json(
                "/api/v1/analytics/compare",
                serde_json::json!({ "teamA": "100", "teamB": "300", "userId": "scout-1" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn predict_returns_winner() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/analytics/predict",
                serde_json::json!({ "red": ["100"], "blue": ["200", "300"] }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["winner"], "red");
        assert_eq!(body["redScore"]["expected"], 90);
        assert_eq!(body["blueScore"]["expected"], 45);
        assert_eq!(body["confidence"], "Low (need more data)");
    }
}

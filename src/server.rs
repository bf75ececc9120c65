// Web dashboard: HTML page plus a small JSON API over the loaded dataset

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::aggregate::{selection_from_json, YearlyCount};
use crate::dashboard::{Dashboard, Layout};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

/// API Response wrapper
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<Value> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: Value::Null,
            error: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub ideology: Option<String>,
}

/// Dataset summary response
#[derive(Serialize)]
struct SummaryResponse {
    source: String,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
    total_records: usize,
    first_year: Option<i32>,
    last_year: Option<i32>,
    by_ideology: BTreeMap<String, usize>,
    unrecognized_records: usize,
}

impl AppState {
    fn selection(&self, query: TrendQuery) -> String {
        query
            .ideology
            .unwrap_or_else(|| self.dashboard.default_selection().as_str().to_string())
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/layout - Heading, selector options and default value
async fn get_layout(State(state): State<AppState>) -> Json<ApiResponse<Layout>> {
    Json(ApiResponse::ok(state.dashboard.layout()))
}

/// GET /api/trend?ideology=... - Chart figure for a selection
async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Json<ApiResponse<Value>> {
    let selected = state.selection(query);
    let chart = state.dashboard.update_chart(&selected);
    Json(ApiResponse::ok(chart.to_figure()))
}

/// POST /api/trend - Same as GET, selection in a JSON body
async fn post_trend(State(state): State<AppState>, Json(payload): Json<Value>) -> impl IntoResponse {
    match selection_from_json(&payload, "ideology") {
        Ok(selected) => {
            let chart = state.dashboard.update_chart(&selected);
            (StatusCode::OK, Json(ApiResponse::ok(chart.to_figure()))).into_response()
        }
        Err(e) => {
            warn!("Rejected selection payload: {}", e);
            (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e.to_string()))).into_response()
        }
    }
}

/// GET /api/counts?ideology=... - Raw yearly counts
async fn get_counts(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Json<ApiResponse<Vec<YearlyCount>>> {
    let selected = state.selection(query);
    Json(ApiResponse::ok(state.dashboard.counts(&selected)))
}

/// GET /api/summary - Dataset provenance and totals
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let ds = state.dashboard.dataset();
    let range = ds.year_range();

    let summary = SummaryResponse {
        source: ds.source.clone(),
        fingerprint: ds.fingerprint.clone(),
        loaded_at: ds.loaded_at,
        total_records: ds.len(),
        first_year: range.map(|(first, _)| first),
        last_year: range.map(|(_, last)| last),
        by_ideology: ds.ideology_totals(),
        unrecognized_records: ds.unrecognized_count(),
    };

    Json(ApiResponse::ok(summary))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /static/style.css - Stylesheet, embedded like the page
async fn serve_stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../web/style.css"),
    )
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/layout", get(get_layout))
        .route("/trend", get(get_trend).post(post_trend))
        .route("/counts", get(get_counts))
        .route("/summary", get(get_summary))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .route("/static/style.css", get(serve_stylesheet))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, LeaderRecord};
    use crate::ideology::Ideology;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with_default(default: Ideology) -> Router {
        let ds = Dataset::from_records(vec![
            LeaderRecord::new(2000, "leftist"),
            LeaderRecord::new(2000, "leftist"),
            LeaderRecord::new(2001, "rightist"),
            LeaderRecord::new(2002, "Rightist"),
            LeaderRecord::new(2002, "populist"),
        ]);
        router(AppState {
            dashboard: Dashboard::with_default(Arc::new(ds), default),
        })
    }

    fn app() -> Router {
        app_with_default(Ideology::Leftist)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": "OK"}));
    }

    #[tokio::test]
    async fn test_layout() {
        let (_, body) = get_json(app_with_default(Ideology::Centrist), "/api/layout").await;
        assert_eq!(body["data"]["default_value"], "centrist");
        assert_eq!(body["data"]["options"][2]["label"], "Rightist");
        assert_eq!(body["data"]["clearable"], false);
    }

    #[tokio::test]
    async fn test_trend_with_query() {
        let (status, body) = get_json(app(), "/api/trend?ideology=rightist").await;
        assert_eq!(status, StatusCode::OK);

        let fig = &body["data"];
        assert_eq!(fig["data"][0]["x"], json!([2001, 2002]));
        assert_eq!(fig["data"][0]["y"], json!([1, 1]));
        assert_eq!(
            fig["layout"]["title"]["text"],
            "Number of Rightist Governments Over Time"
        );
    }

    #[tokio::test]
    async fn test_trend_defaults_to_configured_selection() {
        let (_, body) = get_json(app(), "/api/trend").await;
        assert_eq!(body["data"]["data"][0]["x"], json!([2000]));
        assert_eq!(body["data"]["data"][0]["y"], json!([2]));
    }

    #[tokio::test]
    async fn test_unknown_selection_is_empty_not_error() {
        let (status, body) = get_json(app(), "/api/trend?ideology=populist_party").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["data"][0]["x"], json!([]));
    }

    #[tokio::test]
    async fn test_post_trend() {
        let (status, body) = post_json(app(), "/api/trend", json!({"ideology": "leftist"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["data"][1]["mode"], "lines");
        assert_eq!(body["data"]["data"][1]["y"], json!([2]));
    }

    #[tokio::test]
    async fn test_post_non_string_selection_is_bad_request() {
        let (status, body) = post_json(app(), "/api/trend", json!({"ideology": 7})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("invalid selection"));
    }

    #[tokio::test]
    async fn test_post_missing_selection_is_bad_request() {
        let (status, body) = post_json(app(), "/api/trend", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "invalid selection: expected a string, got nothing"
        );
    }

    #[tokio::test]
    async fn test_stylesheet_is_embedded() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("#trend_chart"));
    }

    #[tokio::test]
    async fn test_counts() {
        let (_, body) = get_json(app(), "/api/counts?ideology=rightist").await;
        assert_eq!(
            body["data"],
            json!([{"year": 2001, "count": 1}, {"year": 2002, "count": 1}])
        );
    }

    #[tokio::test]
    async fn test_summary() {
        let (_, body) = get_json(app(), "/api/summary").await;
        let data = &body["data"];
        assert_eq!(data["total_records"], 5);
        assert_eq!(data["first_year"], 2000);
        assert_eq!(data["last_year"], 2002);
        assert_eq!(data["by_ideology"]["rightist"], 2);
        assert_eq!(data["unrecognized_records"], 1);
        assert_eq!(data["source"], "<memory>");
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("ideology_selector"));
    }
}

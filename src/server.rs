//! HTTP surface: the dashboard page and the JSON routes it polls.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::dashboard::{Charts, Dashboard, Indicators};
use crate::types::{FilterOptions, Selection};

const INDEX_HTML: &str = include_str!("index.html");

/// Dropdown values as sent by the page. Missing and empty both mean cleared.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    city: Option<String>,
    gender: Option<String>,
}

impl From<SelectionQuery> for Selection {
    fn from(q: SelectionQuery) -> Self {
        Selection::new(q.city, q.gender)
    }
}

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/options", get(options_handler))
        .route("/api/indicators", get(indicators_handler))
        .route("/api/charts", get(charts_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(dashboard)
}

/// Binds `addr` and serves until Ctrl+C.
pub async fn serve(dashboard: Arc<Dashboard>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("dashboard available at http://{}", listener.local_addr()?);

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler(State(dashboard): State<Arc<Dashboard>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "records": dashboard.records().len(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn options_handler(State(dashboard): State<Arc<Dashboard>>) -> Json<FilterOptions> {
    Json(dashboard.options().clone())
}

async fn indicators_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<SelectionQuery>,
) -> Json<Indicators> {
    let selection = Selection::from(query);
    debug!(?selection, "recomputing indicators");
    Json(dashboard.indicators(&selection))
}

async fn charts_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<SelectionQuery>,
) -> Json<Charts> {
    let selection = Selection::from(query);
    debug!(?selection, "recomputing charts");
    Json(dashboard.charts(&selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Record, RecordSet};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let w1 = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let w2 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let records = RecordSet::new(vec![
            Record::new("Yangon", "Male", "Food and beverages", 100.0, 8.0, w1),
            Record::new("Yangon", "Female", "Health and beauty", 50.0, 6.0, w1),
            Record::new("Naypyitaw", "Male", "Food and beverages", 200.0, 9.0, w2),
        ]);
        router(Arc::new(Dashboard::new(records)))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn serves_index_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("id=\"city\""));
        assert!(page.contains("fetchLatest('charts')"));
        assert!(page.contains("fetchLatest('indicators')"));
        // stale replies are dropped by comparing against the latest sequence number
        assert!(page.contains("seq === latest[kind]"));
    }

    #[tokio::test]
    async fn health_reports_record_count() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["records"], 3);
    }

    #[tokio::test]
    async fn options_list_distinct_values() {
        let (_, body) = get_json("/api/options").await;
        assert_eq!(
            body,
            json!({ "cities": ["Yangon", "Naypyitaw"], "genders": ["Male", "Female"] })
        );
    }

    #[tokio::test]
    async fn indicators_respect_query() {
        let (status, body) = get_json("/api/indicators?city=Yangon").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], "150.00 $");
        assert_eq!(body["rating"]["headline"], "7.00 / 10");
        assert_eq!(body["rating"]["detail"]["tone"], "good");
    }

    #[tokio::test]
    async fn empty_params_mean_no_filter() {
        let (_, body) = get_json("/api/indicators?city=&gender=").await;
        assert_eq!(body["total_revenue"], "350.00 $");
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let (status, body) = get_json("/api/indicators?city=Naypyitaw&gender=Female").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], "0.00 $");
        assert_eq!(body["rating"]["detail"], Value::Null);
    }

    #[tokio::test]
    async fn charts_route_returns_three_figures() {
        let (status, body) = get_json("/api/charts?gender=Female").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["line"]["data"][0]["x"], json!(["S1"]));
        assert_eq!(body["line"]["data"][0]["line"]["color"], "#4169E1");
        assert_eq!(body["histogram"]["data"][0]["name"], "Female");
        assert_eq!(body["pie"]["data"][0]["labels"], json!(["Health and beauty"]));
    }
}

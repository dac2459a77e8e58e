//! HTTP routes.
//!
//! - `GET /health`
//! - `GET /api/ical-feeds[?room=<id>]`

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::{AvailabilityService, FeedsReport};

/// State shared by all handlers.
pub type SharedState = Arc<AvailabilityService>;

/// Builds the application router.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/ical-feeds", get(ical_feeds))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Query parameters of `/api/ical-feeds`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedsQuery {
    /// Restrict the report to this room id.
    pub room: Option<String>,
}

/// GET /api/ical-feeds - availability of every room
///
/// Answers 200 whenever the room list could be read, whatever happened to
/// the individual feeds, and 500 otherwise.
async fn ical_feeds(
    State(service): State<SharedState>,
    Query(query): Query<FeedsQuery>,
) -> (StatusCode, Json<FeedsReport>) {
    let report = service.report(query.room.as_deref()).await;
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use riadops_feeds::{BoxFuture, FeedAggregator, FeedResult, FeedSource};
    use tower::ServiceExt;
    use url::Url;

    use crate::store::CsvTableStore;

    struct NoNetwork;

    impl FeedSource for NoNetwork {
        fn name(&self) -> &str {
            "none"
        }

        fn fetch<'a>(&'a self, _url: &'a Url) -> BoxFuture<'a, FeedResult<String>> {
            Box::pin(async {
                Err::<String, _>(riadops_feeds::FeedError::network("Request failed: offline"))
            })
        }
    }

    fn app(dir: &std::path::Path) -> Router {
        let service = AvailabilityService::new(
            Arc::new(CsvTableStore::new(dir)),
            FeedAggregator::new(Arc::new(NoNetwork)),
        );
        router(Arc::new(service))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn feeds_succeed_with_room_level_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Rooms.csv"),
            "Room ID,Room Name,Property,iCal URL\n\
             r1,Jasmine,Riad Nour,https://a.test/r1.ics\n\
             r2,Saffron,Riad Nour,\n",
        )
        .unwrap();

        let (status, body) = get_json(app(dir.path()), "/api/ical-feeds").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let rooms = body["rooms"].as_array().unwrap();
        assert_eq!(rooms.len(), 2);

        assert_eq!(rooms[0]["roomId"], "r1");
        assert_eq!(rooms[0]["error"], "Request failed: offline");
        assert_eq!(rooms[0]["blockedDates"].as_array().unwrap().len(), 0);

        assert_eq!(rooms[1]["roomId"], "r2");
        assert!(rooms[1]["icalUrl"].is_null());
        assert!(rooms[1].get("error").is_none());
    }

    #[tokio::test]
    async fn feeds_filter_by_room_query() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Rooms.csv"),
            "Room ID,Room Name\nr1,Jasmine\nr2,Saffron\n",
        )
        .unwrap();

        let (status, body) = get_json(app(dir.path()), "/api/ical-feeds?room=r2").await;

        assert_eq!(status, StatusCode::OK);
        let rooms = body["rooms"].as_array().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0]["roomName"], "Saffron");
    }

    #[tokio::test]
    async fn missing_room_table_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/ical-feeds").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["rooms"].as_array().unwrap().len(), 0);
        assert!(body["error"].as_str().unwrap().contains("Rooms"));
    }
}

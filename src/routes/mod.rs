// src/routes/mod.rs

use axum::http::StatusCode;
use axum::response::Redirect;
use tracing::error;

use crate::dashboard::page::{Notice, Tab};

pub mod health;
pub mod page;
pub mod flights;
pub mod gates;
pub mod alerts;
pub mod kpi;
pub mod analytics;
pub mod refresh;

// Common error mapper
pub fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("internal error: {e}"))
}

// Back to the page after a form post (303, so the browser re-GETs)
pub fn back_to(tab: Tab, notice: Option<Notice>) -> Redirect {
    match notice {
        Some(n) => Redirect::to(&format!("/?tab={}&notice={}", tab.slug(), n.slug())),
        None => Redirect::to(&format!("/?tab={}", tab.slug())),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::fixture::{self, FlightRow};
    use crate::{router, AppState};

    async fn app() -> (Router, sqlx::SqlitePool) {
        let pool = fixture::pool().await;
        let config =
            Config::from_lookup(|k| (k == "DATABASE_URL").then(|| "sqlite::memory:".to_string()))
                .unwrap();
        (router(AppState::new(pool.clone(), config)), pool)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let location = res
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn page_renders_every_tab() {
        let (app, pool) = app().await;
        fixture::add_flight(&pool, FlightRow { delay_min: Some(12), ..FlightRow::new("AI202") }).await;

        for tab in ["operations", "alerts", "analytics", "control"] {
            let (status, _, body) = send(&app, get(&format!("/?tab={tab}"))).await;
            assert_eq!(status, StatusCode::OK, "{tab}");
            assert!(body.contains("AOCC - Airport Operations Control Centre"));
        }

        let (_, _, body) = send(&app, get("/")).await;
        assert!(body.contains("AI202"));
    }

    #[tokio::test]
    async fn unknown_tab_or_notice_falls_back_to_defaults() {
        let (app, _) = app().await;
        for uri in ["/?tab=bogus", "/?notice=whatever", "/?tab=bogus&notice=whatever"] {
            let (status, _, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.contains(r#"<a class="tab active" href="/?tab=operations">"#), "{uri}");
            assert!(!body.contains(r#"class="banner"#), "{uri}");
        }

        let (status, location, _) = send(&app, post_form("/refresh", "tab=bogus")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/?tab=operations"));
    }

    #[tokio::test]
    async fn form_submit_adds_flight_and_redirects() {
        let (app, pool) = app().await;
        let (status, location, _) = send(
            &app,
            post_form("/flights", "flight_id=AI101&origin=DEL&eta=2030-01-01T10%3A00&status=On+Time"),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/?tab=control&notice=added"));
        assert_eq!(fixture::flight_count(&pool).await, 1);

        let (_, _, page) = send(&app, get("/?tab=control&notice=added")).await;
        assert!(page.contains("Flight added successfully!"));
    }

    #[tokio::test]
    async fn malformed_eta_is_reported_without_a_row() {
        let (app, pool) = app().await;
        let (status, location, _) = send(
            &app,
            post_form("/flights", "flight_id=AI101&origin=DEL&eta=soon&status=On+Time"),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/?tab=control&notice=invalid"));
        assert_eq!(fixture::flight_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn json_add_flight_maps_errors_to_status_codes() {
        let (app, pool) = app().await;
        let body = serde_json::json!({
            "flight_id": "AI101", "origin": "DEL", "eta": "2030-01-01T10:00:00Z", "status": "On Time"
        });

        let (status, _, created) = send(&app, post_json("/api/v1/flights", body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: serde_json::Value = serde_json::from_str(&created).unwrap();
        assert!(created["id"].as_i64().unwrap() > 0);

        let (status, _, _) = send(&app, post_json("/api/v1/flights", body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let bad = serde_json::json!({
            "flight_id": "AI102", "origin": "DEL", "eta": "31/12/2030", "status": "On Time"
        });
        let (status, _, msg) = send(&app, post_json("/api/v1/flights", bad)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(msg.contains("eta"));

        assert_eq!(fixture::flight_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn widgets_are_cached_until_refresh() {
        let (app, pool) = app().await;

        let (_, _, before) = send(&app, get("/api/v1/kpis")).await;
        let before: serde_json::Value = serde_json::from_str(&before).unwrap();
        assert_eq!(before["total_flights"], 0);
        assert_eq!(before["total_gates"], 10);

        fixture::add_flight(&pool, FlightRow::new("AI1")).await;
        let (_, _, cached) = send(&app, get("/api/v1/kpis")).await;
        let cached: serde_json::Value = serde_json::from_str(&cached).unwrap();
        assert_eq!(cached["total_flights"], 0);

        let (status, _, _) = send(
            &app,
            Request::builder().method("POST").uri("/api/v1/refresh").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, _, after) = send(&app, get("/api/v1/kpis")).await;
        let after: serde_json::Value = serde_json::from_str(&after).unwrap();
        assert_eq!(after["total_flights"], 1);
    }

    #[tokio::test]
    async fn page_refresh_keeps_the_tab() {
        let (app, _) = app().await;
        let (status, location, _) = send(&app, post_form("/refresh", "tab=analytics")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/?tab=analytics"));
    }

    #[tokio::test]
    async fn auto_assign_is_a_stub() {
        let (app, _) = app().await;
        let (status, _, body) = send(
            &app,
            Request::builder().method("POST").uri("/api/v1/gates/auto-assign").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["assigned"], 0);

        let (status, location, _) = send(&app, post_form("/gates/auto-assign", "")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/?tab=control&notice=assign"));
    }

    #[tokio::test]
    async fn widget_endpoints_return_rows() {
        let (app, pool) = app().await;
        fixture::add_gate(&pool, "A1", "Occupied").await;
        fixture::add_alert(&pool, "High", "Bird strike reported", false, 1).await;
        fixture::add_flight(&pool, FlightRow { delay_min: Some(8), status: "Delayed", gate: Some("A1"), ..FlightRow::new("AI9") }).await;

        let (_, _, gates) = send(&app, get("/api/v1/gates/utilization")).await;
        assert!(gates.contains("Occupied"));
        let (_, _, alerts) = send(&app, get("/api/v1/alerts")).await;
        assert!(alerts.contains("Bird strike reported"));
        let (_, _, live) = send(&app, get("/api/v1/flights/live")).await;
        assert!(live.contains("\"gate_status\":\"Occupied\""));
        let (_, _, delays) = send(&app, get("/api/v1/analytics/delays")).await;
        let delays: serde_json::Value = serde_json::from_str(&delays).unwrap();
        assert_eq!(delays["delays"], serde_json::json!([8]));
        let (_, _, statuses) = send(&app, get("/api/v1/analytics/status")).await;
        assert!(statuses.contains("Delayed"));
    }

    #[tokio::test]
    async fn query_failure_is_a_500() {
        let (app, pool) = app().await;
        sqlx::query("DROP TABLE alerts").execute(&pool).await.unwrap();
        let (status, _, body) = send(&app, get("/api/v1/alerts")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("internal error"));
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (app, _) = app().await;
        let (status, _, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"database\":\"ok\""));
    }

    #[tokio::test]
    async fn health_reports_closed_database() {
        let (app, pool) = app().await;
        pool.close().await;
        let (status, _, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"database\":\"unavailable\""));
    }
}

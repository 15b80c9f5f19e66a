//! Health check handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::contact::ContactService, infrastructure::http::state::AppState};

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UptimeResponse {
    /// Whole seconds since the relay started
    #[schema(example = 123)]
    pub uptime: i64,

    /// When the relay started
    pub started_at: DateTime<Utc>,
}

/// Report how long the relay has been running
#[utoipa::path(
    get,
    operation_id = "uptime",
    tag = "System",
    path = "/api/uptime",
    responses(
        (status = 200, description = "The relay is up", body = UptimeResponse),
    )
)]
pub async fn handler<C: ContactService>(State(state): State<AppState<C>>) -> Json<UptimeResponse> {
    let uptime = (Utc::now() - state.start_time).num_seconds();

    Json(UptimeResponse {
        uptime,
        started_at: state.start_time,
    })
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use testresult::TestResult;

    use super::UptimeResponse;
    use crate::infrastructure::http::{router, state::test_state};

    #[tokio::test]
    async fn test_uptime_counts_from_start() -> TestResult {
        let state = test_state(None);
        let start_time = state.start_time;

        let response = TestServer::new(router(state))?.get("/api/uptime").await;

        response.assert_status_ok();

        let health = response.json::<UptimeResponse>();

        assert_eq!(health.started_at, start_time);
        assert!((0..=1).contains(&health.uptime), "{}", health.uptime);

        Ok(())
    }
}

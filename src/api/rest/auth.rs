use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;
use crate::models::session::DriverSession;
use crate::service::auth::AuthService;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<DriverSession>, AppError> {
    let start = Instant::now();
    let result = AuthService::new(&state.store).authenticate(&payload.email, &payload.password);

    let outcome = match &result {
        Ok(_) => "success",
        Err(err) => err.outcome(),
    };
    state
        .metrics
        .auth_attempts_total
        .with_label_values(&[outcome])
        .inc();
    state
        .metrics
        .auth_duration_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());

    if result.is_err() {
        warn!(outcome, "login rejected");
    }

    result.map(Json)
}

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::models::account::{DriverAccount, VehicleType};
use crate::repo::accounts::AccountRepo;
use crate::service::auth::{hash_password, validate_email, validate_password};
use crate::state::AppState;

/// Administrative surface: accounts are provisioned by the business,
/// never self-registered by drivers.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/accounts", post(create_account).get(list_accounts))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
    pub driver_name: String,
    pub phone_number: String,
    pub vehicle_type: VehicleType,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<Json<DriverAccount>, AppError> {
    let email = validate_email(&payload.email)?.to_string();
    validate_password(&payload.password)?;

    if payload.driver_name.trim().is_empty() {
        return Err(AppError::Validation("driverName must not be blank".to_string()));
    }

    let account = DriverAccount {
        email,
        password_hash: hash_password(&payload.password)?,
        driver_name: payload.driver_name,
        phone_number: payload.phone_number,
        vehicle_type: payload.vehicle_type,
        is_active: payload.is_active,
        created_at: Utc::now(),
    };

    let created = AccountRepo::new(&state.store).create(account)?;
    info!(email = %created.email, "driver account created");

    Ok(Json(created))
}

async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<Vec<DriverAccount>> {
    Json(AccountRepo::new(&state.store).list_active())
}

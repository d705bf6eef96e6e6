use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::account::{DriverAccount, VehicleType};

/// Ephemeral proof of a successful login. Held by the client, never persisted,
/// no server-side revocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSession {
    pub email: String,
    pub driver_name: String,
    pub phone_number: String,
    pub vehicle_type: VehicleType,
    pub logged_in_at: DateTime<Utc>,
}

impl DriverSession {
    pub fn for_account(account: &DriverAccount) -> Self {
        Self {
            email: account.email.clone(),
            driver_name: account.driver_name.clone(),
            phone_number: account.phone_number.clone(),
            vehicle_type: account.vehicle_type,
            logged_in_at: Utc::now(),
        }
    }
}

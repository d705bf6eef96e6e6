use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Car,
    Van,
}

/// A driver's durable credential and profile record, keyed by email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverAccount {
    pub email: String,
    /// Argon2id PHC string. Never serialized out.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub driver_name: String,
    pub phone_number: String,
    pub vehicle_type: VehicleType,
    /// Gate on authentication; inactive accounts keep their orders but cannot log in.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn password_hash_never_leaves_the_service() {
        let account = DriverAccount {
            email: "a@b.nl".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            driver_name: "A".to_string(),
            phone_number: "+31 6 00000000".to_string(),
            vehicle_type: VehicleType::Van,
            is_active: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["vehicleType"], "van");
    }
}

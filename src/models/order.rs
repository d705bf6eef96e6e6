use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed status set; anything outside it is rejected at the boundary.
/// Legal transitions live in `service::lifecycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Wire/display name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Assigned => "assigned",
            OrderStatus::InProgress => "inProgress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Independent of the delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Unpaid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder {
    pub order_id: Uuid,
    pub sender_name: String,
    pub sender_address: String,
    pub destination_name: Option<String>,
    pub destination_address: String,
    pub delivery_mode: String,
    pub status: OrderStatus,
    pub assigned_driver_email: Option<String>,
    pub is_urgent: bool,
    pub notes: Option<String>,
    #[serde(with = "base64_blob", default, skip_serializing_if = "Option::is_none")]
    pub attachment_image_data: Option<Vec<u8>>,
    pub payment_status: Option<PaymentStatus>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Customer-supplied fields for a new order; everything else is stamped at creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub sender_name: String,
    pub sender_address: String,
    #[serde(default)]
    pub destination_name: Option<String>,
    pub destination_address: String,
    pub delivery_mode: String,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "base64_blob", default)]
    pub attachment_image_data: Option<Vec<u8>>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Attachment photos travel as base64 strings on the wire.
mod base64_blob {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}

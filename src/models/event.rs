use serde::Serialize;

use crate::models::order::DeliveryOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderEventKind {
    Created,
    Accepted,
    Started,
    Completed,
    Cancelled,
}

/// Published on the broadcast channel after every successful mutation so
/// subscribed UIs can refresh. Best-effort; delivery is not guaranteed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub kind: OrderEventKind,
    pub order: DeliveryOrder,
}

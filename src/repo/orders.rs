use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::event::{OrderEvent, OrderEventKind};
use crate::models::order::{DeliveryOrder, NewOrder, OrderStatus};
use crate::state::AppState;

/// Order creation and the query layer. Lists are read-only snapshots,
/// newest first; live updates come from the change feed, not from here.
pub struct OrderRepo<'a> {
    state: &'a AppState,
}

impl<'a> OrderRepo<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn create(&self, params: NewOrder) -> Result<DeliveryOrder, AppError> {
        require_non_blank("senderName", &params.sender_name)?;
        require_non_blank("senderAddress", &params.sender_address)?;
        require_non_blank("destinationAddress", &params.destination_address)?;
        require_non_blank("deliveryMode", &params.delivery_mode)?;

        let now = Utc::now();
        let order = DeliveryOrder {
            order_id: Uuid::new_v4(),
            sender_name: params.sender_name,
            sender_address: params.sender_address,
            destination_name: params.destination_name,
            destination_address: params.destination_address,
            delivery_mode: params.delivery_mode,
            status: OrderStatus::Pending,
            assigned_driver_email: None,
            is_urgent: params.is_urgent,
            notes: params.notes,
            attachment_image_data: params.attachment_image_data,
            payment_status: params.payment_status,
            created_at: now,
            updated_at: now,
        };

        self.state.store.insert_order(order.clone());
        self.state.metrics.orders_created_total.inc();
        let _ = self.state.order_events_tx.send(OrderEvent {
            kind: OrderEventKind::Created,
            order: order.clone(),
        });

        info!(order_id = %order.order_id, urgent = order.is_urgent, "order created");
        Ok(order)
    }

    pub fn get(&self, id: Uuid) -> Result<DeliveryOrder, AppError> {
        self.state
            .store
            .get_order(id)
            .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))
    }

    /// Orders still up for grabs by any driver.
    pub fn list_available(&self) -> Vec<DeliveryOrder> {
        self.sorted(
            self.state
                .store
                .orders_where(|order| order.status == OrderStatus::Pending),
        )
    }

    /// A driver's active workload: accepted but not yet delivered.
    pub fn list_for_driver(&self, email: &str) -> Vec<DeliveryOrder> {
        self.sorted(self.state.store.orders_where(|order| {
            order.assigned_driver_email.as_deref() == Some(email)
                && matches!(order.status, OrderStatus::Assigned | OrderStatus::InProgress)
        }))
    }

    pub fn list_all(&self) -> Vec<DeliveryOrder> {
        self.sorted(self.state.store.orders_where(|_| true))
    }

    fn sorted(&self, mut orders: Vec<DeliveryOrder>) -> Vec<DeliveryOrder> {
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

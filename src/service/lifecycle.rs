use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::event::{OrderEvent, OrderEventKind};
use crate::models::order::{DeliveryOrder, OrderStatus};
use crate::repo::accounts::AccountRepo;
use crate::state::AppState;
use crate::store::CasError;

/// The four legal moves over `OrderStatus`. Everything not in this table is
/// rejected with no partial mutation.
///
/// ```text
/// pending --accept--> assigned --start--> inProgress --complete--> completed
/// pending | assigned | inProgress --cancel--> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Accept,
    Start,
    Complete,
    Cancel,
}

impl Transition {
    pub fn allows_from(self, status: OrderStatus) -> bool {
        matches!(
            (self, status),
            (Transition::Accept, OrderStatus::Pending)
                | (Transition::Start, OrderStatus::Assigned)
                | (Transition::Complete, OrderStatus::InProgress)
                | (
                    Transition::Cancel,
                    OrderStatus::Pending | OrderStatus::Assigned | OrderStatus::InProgress,
                )
        )
    }

    pub fn target(self) -> OrderStatus {
        match self {
            Transition::Accept => OrderStatus::Assigned,
            Transition::Start => OrderStatus::InProgress,
            Transition::Complete => OrderStatus::Completed,
            Transition::Cancel => OrderStatus::Cancelled,
        }
    }

    fn event_kind(self) -> OrderEventKind {
        match self {
            Transition::Accept => OrderEventKind::Accepted,
            Transition::Start => OrderEventKind::Started,
            Transition::Complete => OrderEventKind::Completed,
            Transition::Cancel => OrderEventKind::Cancelled,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Transition::Accept => "accept",
            Transition::Start => "start",
            Transition::Complete => "complete",
            Transition::Cancel => "cancel",
        }
    }
}

pub struct LifecycleService<'a> {
    state: &'a AppState,
}

impl<'a> LifecycleService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Claims a pending order for a driver. The driver must be a known active
    /// account. Under concurrent accepts exactly one caller wins; the status
    /// check and write run under one store entry lock.
    pub fn accept(&self, id: Uuid, driver_email: &str) -> Result<DeliveryOrder, AppError> {
        let email = driver_email.trim();
        let driver = AccountRepo::new(&self.state.store)
            .find_by_email(email)
            .ok_or_else(|| {
                AppError::Validation(format!("driverEmail {email} does not match a known account"))
            })?;

        if !driver.is_active {
            return Err(AppError::AccountInactive);
        }

        self.apply(id, Transition::Accept, |order| {
            order.assigned_driver_email = Some(driver.email.clone());
        })
    }

    pub fn start(&self, id: Uuid) -> Result<DeliveryOrder, AppError> {
        self.apply(id, Transition::Start, |_| {})
    }

    pub fn complete(&self, id: Uuid) -> Result<DeliveryOrder, AppError> {
        self.apply(id, Transition::Complete, |_| {})
    }

    /// Cancelling releases the driver: the order would only return to the
    /// available pool if explicitly re-opened, and a cancelled order must not
    /// keep showing up in a driver's workload.
    pub fn cancel(&self, id: Uuid) -> Result<DeliveryOrder, AppError> {
        self.apply(id, Transition::Cancel, |order| {
            order.assigned_driver_email = None;
        })
    }

    fn apply(
        &self,
        id: Uuid,
        transition: Transition,
        mutate: impl FnOnce(&mut DeliveryOrder),
    ) -> Result<DeliveryOrder, AppError> {
        let result = self.state.store.update_order_if(
            id,
            |order| transition.allows_from(order.status),
            |order| {
                order.status = transition.target();
                mutate(order);
                order.updated_at = Utc::now();
            },
        );

        let updated = match result {
            Ok(updated) => updated,
            Err(CasError::NotFound) => {
                return Err(AppError::NotFound(format!("order {id} not found")));
            }
            Err(CasError::Rejected(observed)) => {
                self.state
                    .metrics
                    .order_transitions_total
                    .with_label_values(&[transition.as_str(), "conflict"])
                    .inc();
                return Err(AppError::IllegalTransition(format!(
                    "cannot {} order {id} in status {}",
                    transition.as_str(),
                    observed.status.as_str(),
                )));
            }
        };

        self.state
            .metrics
            .order_transitions_total
            .with_label_values(&[transition.as_str(), "success"])
            .inc();
        let _ = self.state.order_events_tx.send(OrderEvent {
            kind: transition.event_kind(),
            order: updated.clone(),
        });

        info!(
            order_id = %id,
            transition = transition.as_str(),
            status = updated.status.as_str(),
            driver = updated.assigned_driver_email.as_deref().unwrap_or("-"),
            "order transitioned"
        );

        Ok(updated)
    }
}

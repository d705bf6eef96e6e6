use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::account::DriverAccount;
use crate::models::order::DeliveryOrder;

/// Why a conditional order update did not apply.
#[derive(Debug)]
pub enum CasError {
    NotFound,
    /// The precondition failed; carries the order as it was observed.
    Rejected(DeliveryOrder),
}

/// In-process store of record for accounts and orders.
///
/// Constructed once and passed explicitly into every repository and service;
/// there is no process-wide handle. DashMap's per-entry locking supplies the
/// two primitives the business rules need: insert-if-absent for account
/// uniqueness and seeding, and check-then-write under one entry lock for
/// status transitions.
pub struct MemStore {
    accounts: DashMap<String, DriverAccount>,
    orders: DashMap<Uuid, DeliveryOrder>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            orders: DashMap::new(),
        }
    }

    /// Atomic insert-if-absent. Returns the rejected account on a duplicate email.
    pub fn insert_account_if_absent(
        &self,
        account: DriverAccount,
    ) -> Result<DriverAccount, DriverAccount> {
        match self.accounts.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(account),
            Entry::Vacant(slot) => Ok(slot.insert(account).clone()),
        }
    }

    pub fn get_account(&self, email: &str) -> Option<DriverAccount> {
        self.accounts.get(email).map(|entry| entry.value().clone())
    }

    pub fn accounts_where(
        &self,
        predicate: impl Fn(&DriverAccount) -> bool,
    ) -> Vec<DriverAccount> {
        self.accounts
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn has_accounts(&self) -> bool {
        !self.accounts.is_empty()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn insert_order(&self, order: DeliveryOrder) {
        self.orders.insert(order.order_id, order);
    }

    pub fn get_order(&self, id: Uuid) -> Option<DeliveryOrder> {
        self.orders.get(&id).map(|entry| entry.value().clone())
    }

    /// Snapshot scan; callers sort.
    pub fn orders_where(&self, predicate: impl Fn(&DeliveryOrder) -> bool) -> Vec<DeliveryOrder> {
        self.orders
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Conditional update: `check` and `apply` run while the entry lock is
    /// held, so concurrent callers serialize and at most one passing `check`
    /// wins. Returns the updated order.
    pub fn update_order_if(
        &self,
        id: Uuid,
        check: impl FnOnce(&DeliveryOrder) -> bool,
        apply: impl FnOnce(&mut DeliveryOrder),
    ) -> Result<DeliveryOrder, CasError> {
        let mut entry = self.orders.get_mut(&id).ok_or(CasError::NotFound)?;

        if !check(entry.value()) {
            return Err(CasError::Rejected(entry.value().clone()));
        }

        apply(entry.value_mut());
        Ok(entry.value().clone())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::VehicleType;
    use crate::models::order::OrderStatus;
    use chrono::Utc;

    fn account(email: &str) -> DriverAccount {
        DriverAccount {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            driver_name: "Test".to_string(),
            phone_number: "+31 6 12345678".to_string(),
            vehicle_type: VehicleType::Bike,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn order(status: OrderStatus) -> DeliveryOrder {
        let now = Utc::now();
        DeliveryOrder {
            order_id: Uuid::new_v4(),
            sender_name: "Sender".to_string(),
            sender_address: "Herengracht 201".to_string(),
            destination_name: None,
            destination_address: "Cornelis Schuytstraat 45".to_string(),
            delivery_mode: "bike".to_string(),
            status,
            assigned_driver_email: None,
            is_urgent: false,
            notes: None,
            attachment_image_data: None,
            payment_status: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn duplicate_account_insert_is_rejected() {
        let store = MemStore::new();
        assert!(store.insert_account_if_absent(account("a@b.nl")).is_ok());
        assert!(store.insert_account_if_absent(account("a@b.nl")).is_err());
        assert_eq!(store.account_count(), 1);
    }

    #[test]
    fn conditional_update_applies_when_check_passes() {
        let store = MemStore::new();
        let order = order(OrderStatus::Pending);
        let id = order.order_id;
        store.insert_order(order);

        let updated = store
            .update_order_if(
                id,
                |o| o.status == OrderStatus::Pending,
                |o| o.status = OrderStatus::Assigned,
            )
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Assigned);
        assert_eq!(store.get_order(id).unwrap().status, OrderStatus::Assigned);
    }

    #[test]
    fn conditional_update_rejects_and_leaves_order_untouched() {
        let store = MemStore::new();
        let order = order(OrderStatus::Completed);
        let id = order.order_id;
        store.insert_order(order);

        let result = store.update_order_if(
            id,
            |o| o.status == OrderStatus::Pending,
            |o| o.status = OrderStatus::Assigned,
        );

        match result {
            Err(CasError::Rejected(observed)) => assert_eq!(observed.status, OrderStatus::Completed),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(store.get_order(id).unwrap().status, OrderStatus::Completed);
    }

    #[test]
    fn conditional_update_on_missing_order_is_not_found() {
        let store = MemStore::new();
        let result = store.update_order_if(Uuid::new_v4(), |_| true, |_| {});
        assert!(matches!(result, Err(CasError::NotFound)));
    }
}

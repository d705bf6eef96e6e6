use crate::error::AppError;
use crate::models::account::DriverAccount;
use crate::store::MemStore;

/// Account reads and writes. Adds no business rule beyond email uniqueness,
/// which the store enforces atomically.
pub struct AccountRepo<'a> {
    store: &'a MemStore,
}

impl<'a> AccountRepo<'a> {
    pub fn new(store: &'a MemStore) -> Self {
        Self { store }
    }

    pub fn create(&self, account: DriverAccount) -> Result<DriverAccount, AppError> {
        self.store
            .insert_account_if_absent(account)
            .map_err(|rejected| AppError::DuplicateKey(rejected.email))
    }

    pub fn find_by_email(&self, email: &str) -> Option<DriverAccount> {
        self.store.get_account(email)
    }

    pub fn list_active(&self) -> Vec<DriverAccount> {
        let mut accounts = self.store.accounts_where(|account| account.is_active);
        accounts.sort_by(|a, b| a.email.cmp(&b.email));
        accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::VehicleType;
    use chrono::Utc;

    fn account(email: &str, is_active: bool) -> DriverAccount {
        DriverAccount {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            driver_name: "Test".to_string(),
            phone_number: "+31 6 12345678".to_string(),
            vehicle_type: VehicleType::Bike,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_rejects_duplicate_email() {
        let store = MemStore::new();
        let repo = AccountRepo::new(&store);

        repo.create(account("a@b.nl", true)).unwrap();
        let err = repo.create(account("a@b.nl", true)).unwrap_err();

        assert!(matches!(err, AppError::DuplicateKey(email) if email == "a@b.nl"));
    }

    #[test]
    fn list_active_excludes_inactive_accounts() {
        let store = MemStore::new();
        let repo = AccountRepo::new(&store);

        repo.create(account("active@b.nl", true)).unwrap();
        repo.create(account("retired@b.nl", false)).unwrap();

        let active = repo.list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].email, "active@b.nl");
    }
}

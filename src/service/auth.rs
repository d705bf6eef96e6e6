use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::config::SeedAccount;
use crate::error::AppError;
use crate::models::account::{DriverAccount, VehicleType};
use crate::models::session::DriverSession;
use crate::repo::accounts::AccountRepo;
use crate::store::MemStore;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

const MIN_PASSWORD_CHARS: usize = 6;

/// Rejects before any store access. Returns the trimmed email.
pub fn validate_email(email: &str) -> Result<&str, AppError> {
    let email = email.trim();
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation(
            "email must look like name@host.tld".to_string(),
        ));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

/// Argon2id with a fresh random salt, encoded as a PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::Internal(format!("password hashing failed: {err}")))?;
    Ok(hash.to_string())
}

fn verify_password(stored_hash: &str, password: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| AppError::Internal(format!("stored password hash is malformed: {err}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct AuthService<'a> {
    accounts: AccountRepo<'a>,
    store: &'a MemStore,
}

impl<'a> AuthService<'a> {
    pub fn new(store: &'a MemStore) -> Self {
        Self {
            accounts: AccountRepo::new(store),
            store,
        }
    }

    /// Inserts the well-known default account if the account collection is
    /// empty. Idempotent and race-safe: the existence probe short-circuits,
    /// and the insert itself is insert-if-absent, so concurrent first boots
    /// leave at most one seed record.
    pub fn ensure_seeded(&self, seed: &SeedAccount) -> Result<(), AppError> {
        if self.store.has_accounts() {
            return Ok(());
        }

        let account = DriverAccount {
            email: seed.email.clone(),
            password_hash: hash_password(&seed.password)?,
            driver_name: seed.driver_name.clone(),
            phone_number: seed.phone_number.clone(),
            vehicle_type: VehicleType::Bike,
            is_active: true,
            created_at: Utc::now(),
        };

        match self.accounts.create(account) {
            Ok(created) => {
                info!(email = %created.email, "seeded default driver account");
                Ok(())
            }
            // Another process won the first-boot race.
            Err(AppError::DuplicateKey(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<DriverSession, AppError> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let account = self
            .accounts
            .find_by_email(email)
            .ok_or(AppError::InvalidCredentials)?;

        if !account.is_active {
            return Err(AppError::AccountInactive);
        }

        if !verify_password(&account.password_hash, password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(DriverSession::for_account(&account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> SeedAccount {
        SeedAccount::default()
    }

    #[test]
    fn validate_email_trims_and_matches() {
        assert_eq!(validate_email("  a@b.nl  ").unwrap(), "a@b.nl");
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("spaces in@host.nl").is_err());
    }

    #[test]
    fn short_passwords_fail_before_store_access() {
        let store = MemStore::new();
        let auth = AuthService::new(&store);

        let err = auth.authenticate("a@b.nl", "12345").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn ensure_seeded_is_idempotent() {
        let store = MemStore::new();
        let auth = AuthService::new(&store);

        auth.ensure_seeded(&seed()).unwrap();
        auth.ensure_seeded(&seed()).unwrap();

        assert_eq!(store.account_count(), 1);
    }

    #[test]
    fn authenticate_returns_session_mirroring_the_account() {
        let store = MemStore::new();
        let auth = AuthService::new(&store);
        auth.ensure_seeded(&seed()).unwrap();

        let session = auth.authenticate(&seed().email, &seed().password).unwrap();

        assert_eq!(session.email, seed().email);
        assert_eq!(session.driver_name, seed().driver_name);
        assert_eq!(session.phone_number, seed().phone_number);
        assert_eq!(session.vehicle_type, VehicleType::Bike);
    }

    #[test]
    fn wrong_password_and_unknown_email_are_indistinguishable() {
        let store = MemStore::new();
        let auth = AuthService::new(&store);
        auth.ensure_seeded(&seed()).unwrap();

        let wrong_password = auth.authenticate(&seed().email, "not-the-password").unwrap_err();
        let unknown_email = auth.authenticate("nobody@b.nl", "whatever-pass").unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
    }

    #[test]
    fn inactive_account_fails_even_with_correct_password() {
        let store = MemStore::new();
        let auth = AuthService::new(&store);

        let account = DriverAccount {
            email: "retired@b.nl".to_string(),
            password_hash: hash_password("goodpass").unwrap(),
            driver_name: "Retired".to_string(),
            phone_number: "+31 6 00000000".to_string(),
            vehicle_type: VehicleType::Car,
            is_active: false,
            created_at: Utc::now(),
        };
        AccountRepo::new(&store).create(account).unwrap();

        let err = auth.authenticate("retired@b.nl", "goodpass").unwrap_err();
        assert!(matches!(err, AppError::AccountInactive));
    }

    #[test]
    fn seeded_password_is_hashed_not_plaintext() {
        let store = MemStore::new();
        let auth = AuthService::new(&store);
        auth.ensure_seeded(&seed()).unwrap();

        let account = store.get_account(&seed().email).unwrap();
        assert_ne!(account.password_hash, seed().password);
        assert!(account.password_hash.starts_with("$argon2"));
    }
}

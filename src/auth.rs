//! Registration and login. Passwords are salted argon2 digests, identity is
//! handed back as a signed token, and the follow-up notifications are
//! best-effort: losing one is logged, never surfaced to the caller.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use sea_orm::entity::prelude::DateTimeUtc;
use sea_orm::{DatabaseConnection, SqlErr};

use crate::config::JwtConfig;
use crate::entities::notification::NotificationType;
use crate::entities::user;
use crate::error::ShopError;
use crate::middleware::auth::generate_token;
use crate::store;

pub struct AuthOutcome {
    pub token: String,
    pub expires_at: DateTimeUtc,
    pub user: user::Model,
}

/// Request-shape checks shared by both flows, before any store access.
pub fn validate_credentials(
    username: &str,
    password: &str,
    enforce_password_length: bool,
) -> Result<(), ShopError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ShopError::validation("All fields are required."));
    }

    if enforce_password_length && password.len() < 6 {
        return Err(ShopError::validation(
            "Password must be at least 6 characters long.",
        ));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// A malformed stored hash counts as a failed verification, not a crash.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hashed) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub async fn register(
    db: &DatabaseConnection,
    jwt: &JwtConfig,
    username: &str,
    password: &str,
) -> Result<AuthOutcome, ShopError> {
    validate_credentials(username, password, true)?;

    if store::user_exists_by_username(db, username).await? {
        return Err(ShopError::validation("User already exists"));
    }

    let hashed = hash_password(password).map_err(|_| ShopError::PasswordHash)?;

    // The unique constraint is the authority under concurrent registration;
    // the existence check above is only an early exit.
    let user = match store::create_user(db, username, &hashed).await {
        Ok(user) => user,
        Err(err) => {
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ShopError::validation("User already exists")
                }
                _ => ShopError::Db(err),
            })
        }
    };

    notify(db, user.id, NotificationType::Welcome, "Welcome to Lavka Shop!").await;

    let (token, expires_at) = generate_token(jwt, user.id)?;

    Ok(AuthOutcome {
        token,
        expires_at,
        user,
    })
}

pub async fn login(
    db: &DatabaseConnection,
    jwt: &JwtConfig,
    username: &str,
    password: &str,
) -> Result<AuthOutcome, ShopError> {
    validate_credentials(username, password, false)?;

    if !store::user_exists_by_username(db, username).await? {
        return Err(ShopError::validation("User does not exist"));
    }

    // A wrong password and a user vanishing between the two lookups read the
    // same from outside.
    let user = match store::user_by_username(db, username).await? {
        Some(record) if verify_password(password, &record.user.hashed_password) => record.user,
        _ => return Err(ShopError::validation("Invalid credentials")),
    };

    notify(
        db,
        user.id,
        NotificationType::Login,
        "You have successfully logged in!",
    )
    .await;

    let (token, expires_at) = generate_token(jwt, user.id)?;

    Ok(AuthOutcome {
        token,
        expires_at,
        user,
    })
}

async fn notify(db: &DatabaseConnection, user_id: i32, kind: NotificationType, message: &str) {
    if let Err(err) = store::create_notification(db, user_id, kind, message).await {
        tracing::warn!("failed to record {kind:?} notification for user {user_id}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_salts_vary() {
        let first = hash_password("secret1").expect("hash failed");
        let second = hash_password("secret1").expect("hash failed");

        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
        assert!(!verify_password("secret2", &first));
    }

    #[test]
    fn malformed_stored_hash_fails_verification() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
        assert!(!verify_password("secret1", ""));
    }

    #[test]
    fn credentials_must_be_non_blank() {
        assert!(validate_credentials("alice", "secret1", true).is_ok());
        assert!(validate_credentials("", "secret1", true).is_err());
        assert!(validate_credentials("   ", "secret1", true).is_err());
        assert!(validate_credentials("alice", "", false).is_err());
        assert!(validate_credentials("alice", "\t ", false).is_err());
    }

    #[test]
    fn password_length_only_enforced_for_registration() {
        assert!(validate_credentials("alice", "short", true).is_err());
        assert!(validate_credentials("alice", "short", false).is_ok());
    }
}

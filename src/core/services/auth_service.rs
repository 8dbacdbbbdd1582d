//! Login, registration, and password management.
//!
//! Hashes are salted PBKDF2-SHA256, encoded as
//! `pbkdf2-sha256$<rounds>$<salt_b64>$<hash_b64>`. Login failures never say
//! whether the email or the password was wrong.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDateTime;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::info;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Session, Shop, User};

const PBKDF2_ROUNDS: u32 = 10_000;
const HASH_LEN: usize = 32;
const SCHEME: &str = "pbkdf2-sha256";

pub struct AuthService;

impl AuthService {
    /// Derives a fresh salted hash for storage on the user record.
    pub fn hash_password(password: &str) -> String {
        let salt = Uuid::new_v4();
        let mut derived = [0u8; HASH_LEN];
        pbkdf2_hmac::<Sha256>(
            password.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            &mut derived,
        );
        format!(
            "{SCHEME}${PBKDF2_ROUNDS}${}${}",
            BASE64.encode(salt.as_bytes()),
            BASE64.encode(derived)
        )
    }

    /// Checks a candidate password against an encoded hash. Malformed
    /// hashes verify as false rather than erroring.
    pub fn verify_password(password: &str, encoded: &str) -> bool {
        let mut parts = encoded.split('$');
        let (Some(scheme), Some(rounds), Some(salt), Some(hash)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if scheme != SCHEME || parts.next().is_some() {
            return false;
        }
        let Ok(rounds) = rounds.parse::<u32>() else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (BASE64.decode(salt), BASE64.decode(hash)) else {
            return false;
        };
        let mut derived = vec![0u8; expected.len()];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, rounds, &mut derived);
        constant_time_eq(&derived, &expected)
    }

    /// Authenticates a user and stamps their last login time.
    pub fn login(
        shop: &mut Shop,
        email: &str,
        password: &str,
        now: NaiveDateTime,
    ) -> ServiceResult<Session> {
        let user_id = shop
            .user_by_email(email)
            .filter(|user| user.is_active)
            .filter(|user| Self::verify_password(password, &user.password_hash))
            .map(|user| user.id)
            .ok_or(ServiceError::AuthFailed)?;

        let user = shop
            .user_mut(user_id)
            .ok_or(ServiceError::AuthFailed)?;
        user.last_login = Some(now);
        let session = Session::for_user(user, now);
        shop.touch();
        info!(user = session.user_id, "user signed in");
        Ok(session)
    }

    /// Creates a user account with a hashed password and returns its id.
    pub fn register(
        shop: &mut Shop,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        is_admin: bool,
        now: NaiveDateTime,
    ) -> ServiceResult<u64> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::Invalid(
                "Email address entered is invalid".into(),
            ));
        }
        if shop.user_by_email(email).is_some() {
            return Err(ServiceError::Invalid(format!(
                "A user with email `{email}` already exists"
            )));
        }
        if password.is_empty() {
            return Err(ServiceError::Invalid("Password must not be empty".into()));
        }
        let user = User::new(
            email,
            first_name,
            last_name,
            Self::hash_password(password),
            is_admin,
            now.date(),
        );
        Ok(shop.add_user(user))
    }

    /// Changes a user's password after verifying the old one; the two new
    /// entries must match.
    pub fn change_password(
        shop: &mut Shop,
        user_id: u64,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ServiceResult<()> {
        if new_password != confirm_password {
            return Err(ServiceError::Invalid(
                "Password must be the same in password one and two fields".into(),
            ));
        }
        if new_password.is_empty() {
            return Err(ServiceError::Invalid("Password must not be empty".into()));
        }
        let user = shop
            .user_mut(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))?;
        if !Self::verify_password(old_password, &user.password_hash) {
            return Err(ServiceError::Invalid("Invalid Password entered".into()));
        }
        user.password_hash = Self::hash_password(new_password);
        shop.touch();
        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

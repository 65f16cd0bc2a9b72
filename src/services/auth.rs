use crate::error::{unique_violation_on, Error, Result};
use crate::models::{RegisterUser, User};
use crate::services::{slug, users};
use crate::Database;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use rusqlite::OptionalExtension;
use sha2::{Digest, Sha256};

pub const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_NAME_LENGTH: usize = 120;
const MAX_EMAIL_LENGTH: usize = 254;

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::validation("Email cannot be empty"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(Error::validation(format!(
            "Email must be {} characters or less",
            MAX_EMAIL_LENGTH
        )));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(Error::validation("Invalid email format"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(Error::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::validation(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String> {
    validate_password(password)?;
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::validation(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bg$0000000000000000000000000000000000000000000";

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => {
            if let Ok(dummy) = PasswordHash::new(DUMMY_HASH) {
                let _ = Argon2::default().verify_password(password.as_bytes(), &dummy);
            }
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn generate_access_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Tokens are stored hashed; a leaked database does not leak live sessions.
fn hash_token(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    hex::encode(digest)
}

/// Create a user account. The slug is derived from the name, falling back to
/// the local part of the email, and made unique across all users inside the
/// same transaction as the insert.
pub fn register(db: &Database, input: &RegisterUser) -> Result<User> {
    validate_email(&input.email)?;
    let password_hash = hash_password(&input.password)?;
    if let Some(name) = &input.name {
        validate_name(name)?;
    }

    let source = match input.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => input
            .email
            .split('@')
            .next()
            .unwrap_or("user")
            .to_string(),
    };

    let mut conn = db.get()?;
    slug::retry_on_conflict(|| {
        let tx = conn.transaction()?;

        let taken: i64 = tx.query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?",
            [&input.email],
            |row| row.get(0),
        )?;
        if taken > 0 {
            return Err(Error::Duplicate {
                resource: "user",
                field: "email",
            });
        }

        let slug_value = slug::assign_slug(&source, |candidate| {
            let count: i64 = tx.query_row(
                "SELECT COUNT(*) FROM users WHERE slug = ?",
                [candidate],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })?;

        match tx.execute(
            "INSERT INTO users (email, password_hash, name, slug) VALUES (?, ?, ?, ?)",
            (&input.email, &password_hash, &input.name, &slug_value),
        ) {
            Ok(_) => {
                let id = tx.last_insert_rowid();
                tx.commit()?;
                Ok(id)
            }
            Err(e) if unique_violation_on(&e, "users.email") => Err(Error::Duplicate {
                resource: "user",
                field: "email",
            }),
            Err(e) => Err(e.into()),
        }
    })
    .and_then(|id| {
        users::find_by_id(db, id)?.ok_or_else(|| Error::not_found("user", id.to_string()))
    })
}

/// Verify credentials. Failures are indistinguishable between unknown email
/// and wrong password, and both cost a hash verification.
pub fn authenticate(db: &Database, email: &str, password: &str) -> Result<User> {
    match users::find_by_email(db, email)? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        Some(_) => Err(Error::InvalidCredentials),
        None => {
            let _ = verify_password(password, DUMMY_HASH);
            Err(Error::InvalidCredentials)
        }
    }
}

pub fn create_session(db: &Database, user_id: i64, duration_days: i64) -> Result<String> {
    let token = generate_access_token();
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO sessions (user_id, token_hash, expires_at) VALUES (?, ?, datetime('now', ?||' days'))",
        (user_id, hash_token(&token), duration_days),
    )?;
    Ok(token)
}

pub fn validate_session(db: &Database, token: &str) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            r#"
            SELECT u.id, u.email, u.password_hash, u.name, u.slug, u.created_at, u.updated_at
            FROM users u
            JOIN sessions s ON s.user_id = u.id
            WHERE s.token_hash = ? AND s.expires_at > datetime('now')
            "#,
            [hash_token(token)],
            users::row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn delete_session(db: &Database, token: &str) -> Result<()> {
    let conn = db.get()?;
    conn.execute(
        "DELETE FROM sessions WHERE token_hash = ?",
        [hash_token(token)],
    )?;
    Ok(())
}

pub fn cleanup_expired_sessions(db: &Database) -> Result<usize> {
    let conn = db.get()?;
    let removed = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= datetime('now')",
        [],
    )?;
    Ok(removed)
}

pub fn update_password(db: &Database, email: &str, password: &str) -> Result<()> {
    let password_hash = hash_password(password)?;
    let conn = db.get()?;
    conn.execute(
        "UPDATE users SET password_hash = ?, updated_at = CURRENT_TIMESTAMP WHERE email = ?",
        (&password_hash, email),
    )?;
    Ok(())
}

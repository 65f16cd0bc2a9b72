use crate::error::Result;
use crate::models::User;
use crate::Database;
use rusqlite::OptionalExtension;

pub(crate) fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        slug: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn find_by_id(db: &Database, id: i64) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            "SELECT id, email, password_hash, name, slug, created_at, updated_at FROM users WHERE id = ?",
            [id],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn find_by_email(db: &Database, email: &str) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            "SELECT id, email, password_hash, name, slug, created_at, updated_at FROM users WHERE email = ?",
            [email],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

/// Global-scope slug lookup, backing the public profile route.
pub fn find_by_slug(db: &Database, slug: &str) -> Result<Option<User>> {
    let conn = db.get()?;
    let user = conn
        .query_row(
            "SELECT id, email, password_hash, name, slug, created_at, updated_at FROM users WHERE slug = ?",
            [slug],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

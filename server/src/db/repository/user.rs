//! User Repository (staff accounts)

use shared::models::User;
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, role FROM user WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Insert a staff account (used by seeding and tests)
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: &str,
) -> RepoResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO user (username, password_hash, role) VALUES (?, ?, ?)
         RETURNING id, username, password_hash, role",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

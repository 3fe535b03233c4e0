use bcrypt::{DEFAULT_COST, hash};
use sqlx::PgPool;

use catalog_models::{UserId, normalize_email};

use super::SeedResult;

/// What [`create_or_promote_admin`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    Created(UserId),
    /// The email already belonged to a user, who is now an administrator.
    /// The existing password is kept.
    Promoted(UserId),
}

/// Creates an administrator, or promotes the existing user with that email.
pub async fn create_or_promote_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> SeedResult<AdminOutcome> {
    let email = normalize_email(email);

    let promoted: Option<UserId> = sqlx::query_scalar(
        "UPDATE users SET is_admin = TRUE, updated_at = NOW() WHERE email = $1 RETURNING id",
    )
    .bind(&email)
    .fetch_optional(db)
    .await?;

    if let Some(id) = promoted {
        return Ok(AdminOutcome::Promoted(id));
    }

    if password.len() < 6 {
        return Err("Password must be at least 6 characters".into());
    }

    let id = UserId::new();
    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, is_admin) VALUES ($1, $2, $3, $4, TRUE)",
    )
    .bind(id)
    .bind(name.trim())
    .bind(&email)
    .bind(hash(password, DEFAULT_COST)?)
    .execute(db)
    .await?;

    Ok(AdminOutcome::Created(id))
}

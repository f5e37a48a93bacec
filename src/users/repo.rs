use sqlx::{FromRow, MySqlPool};

/// User record as stored. `password` holds the argon2 PHC string; the
/// row type deliberately has no serialization path, `PublicUser` is the
/// only JSON projection.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
}

impl User {
    /// Find a user by email (the authentication lookup key).
    pub async fn find_by_email(
        db: &MySqlPool,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, profile_picture
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &MySqlPool, id: u64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, profile_picture
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new record and return the store-assigned id. Absent
    /// fields are bound as NULL; the schema's constraints decide whether
    /// the row is acceptable.
    pub async fn create(
        db: &MySqlPool,
        name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
        profile_picture: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password, profile_picture)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(profile_picture)
        .execute(db)
        .await?;
        Ok(result.last_insert_id())
    }
}

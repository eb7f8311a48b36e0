use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::{
    database::{Connection, ErrorExt, Result},
    types::id::{marker::UserMarker, Id},
};

/// Public part of an account. Credentials live in the same table
/// but they are never selected here.
#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[tracing::instrument(skip(conn, id), fields(id = "<hidden>"), name = "db.users.by_id")]
    pub async fn by_id(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, avatar, created_at FROM "users" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .into_db_error()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_by_id(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        sqlx::query(
            r#"INSERT INTO "users" (id, name, avatar, password_hash) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(Id::<UserMarker>::new(1))
        .bind("alice")
        .bind("//avatars/alice.png")
        .bind("secret")
        .execute(&mut *conn)
        .await
        .unwrap();

        let user = User::by_id(&mut conn, Id::new(1)).await.unwrap().unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.avatar, "//avatars/alice.png");

        assert!(User::by_id(&mut conn, Id::new(2)).await.unwrap().is_none());
    }
}

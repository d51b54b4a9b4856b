use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::user::{NewUser, User};
use crate::error::Error;
use crate::infra::db::Db;

/// Persistence gateway for the user table, split out as a trait so the
/// directory service can be exercised without a live database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn select_older_than(&self, age_from: i64, limit: i64) -> Result<Vec<User>, Error>;

    async fn select_by_names(&self, names: &[String]) -> Result<Vec<User>, Error>;

    /// Insert the whole batch in one transaction: either every row commits
    /// or none do. Returns generated ids in input order.
    async fn insert_batch(&self, users: &[NewUser]) -> Result<Vec<i64>, Error>;
}

/// Postgres-backed implementation over the shared pool. All user-supplied
/// values travel as bound parameters.
#[derive(Clone)]
pub struct PgUserGateway {
    db: Db,
}

impl PgUserGateway {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    fn map_row(row: PgRow) -> User {
        let settings: serde_json::Value = row.get("settings");
        User {
            id: row.get("id"),
            name: row.get("name"),
            last_name: row.get("last_name"),
            origin: row.get("origin"),
            age: row.get("age"),
            key: User::key_from_settings(&settings),
        }
    }
}

#[async_trait]
impl UserGateway for PgUserGateway {
    async fn select_older_than(&self, age_from: i64, limit: i64) -> Result<Vec<User>, Error> {
        let rows = sqlx::query(
            "SELECT id, name, last_name, origin, age, settings \
             FROM users WHERE age > $1 ORDER BY id LIMIT $2",
        )
        .bind(age_from)
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }

    async fn select_by_names(&self, names: &[String]) -> Result<Vec<User>, Error> {
        // One round trip for the whole list; absent names simply produce
        // no rows.
        let rows = sqlx::query(
            "SELECT id, name, last_name, origin, age, settings \
             FROM users WHERE name = ANY($1) ORDER BY id",
        )
        .bind(names)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }

    async fn insert_batch(&self, users: &[NewUser]) -> Result<Vec<i64>, Error> {
        let names: Vec<String> = users.iter().map(|user| user.name.clone()).collect();
        let last_names: Vec<String> = users.iter().map(|user| user.last_name.clone()).collect();
        let ages: Vec<i32> = users.iter().map(|user| user.age).collect();

        let mut tx = self.db.begin().await?;

        let rows = sqlx::query(
            "INSERT INTO users (name, last_name, age) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::int4[]) \
             RETURNING id",
        )
        .bind(&names)
        .bind(&last_names)
        .bind(&ages)
        .fetch_all(&mut *tx)
        .await
        .map_err(into_write_error)?;

        tx.commit().await?;

        tracing::debug!(count = rows.len(), "inserted user batch");
        Ok(rows.into_iter().map(|row| row.get("id")).collect())
    }
}

fn into_write_error(err: sqlx::Error) -> Error {
    use sqlx::error::ErrorKind;

    match err {
        sqlx::Error::Database(db)
            if matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) =>
        {
            Error::Conflict(db.message().to_string())
        }
        err => Error::Database(err),
    }
}

// src/db.rs

use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgRow;

/// Outcome of one query execution. Exactly one variant is ever populated and
/// consumers must branch on it before touching the rows. A result is built
/// fresh per request and discarded once rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum QueryResult<T> {
    Success(Vec<T>),
    Failure(String),
}

impl<T> QueryResult<T> {
    pub fn is_failure(&self) -> bool {
        matches!(self, QueryResult::Failure(_))
    }
}

/// Runs a read-only query with positionally bound string parameters.
///
/// Numeric values (limit, offset) are stringified by the caller and cast
/// inside the SQL itself (`$1::bigint`). Every execution error comes back as
/// `Failure` carrying the driver's message; there are no retries here.
pub async fn execute_query<T>(pool: &PgPool, sql: &str, params: &[String]) -> QueryResult<T>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let mut query = sqlx::query_as::<_, T>(sql);
    for param in params {
        query = query.bind(param.as_str());
    }

    match query.fetch_all(pool).await {
        Ok(rows) => QueryResult::Success(rows),
        Err(e) => {
            tracing::error!("Query execution failed: {:?}", e);
            QueryResult::Failure(e.to_string())
        }
    }
}

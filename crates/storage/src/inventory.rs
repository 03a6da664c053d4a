//! Inventory history queries against PostgreSQL.

use chrono::{DateTime, Duration, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use locator_common::{Item, LocatorError, LocatorResult, RestockRecord, StockObservation};

/// Trailing window of stock history shown on preview charts, in days.
pub const HISTORY_WINDOW_DAYS: i64 = 90;

/// Database connection pool and inventory queries.
pub struct Inventory {
    pool: PgPool,
}

impl Inventory {
    /// Create a new inventory connection from a database URL.
    pub async fn connect(database_url: &str) -> LocatorResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| LocatorError::Database(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> LocatorResult<()> {
        for statement in schema_statements() {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| LocatorError::Database(format!("Migration failed: {}", e)))?;
        }

        Ok(())
    }

    /// Stock observations for (item, store) within the trailing window,
    /// oldest first.
    pub async fn stock_history(
        &self,
        item: Item,
        store_id: &str,
    ) -> LocatorResult<Vec<StockObservation>> {
        let since = Utc::now() - Duration::days(HISTORY_WINDOW_DAYS);

        let rows = sqlx::query_as::<_, StockRow>(
            "SELECT quantity, reported_at FROM stock \
             WHERE store_id = $1 AND type = $2 AND created_at > $3 \
             ORDER BY created_at ASC",
        )
        .bind(store_id)
        .bind(item.slug())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LocatorError::Database(format!("Stock query failed: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// The single most recent pending restock for (item, store), ordered by
    /// earliest window start descending.
    pub async fn latest_restock(
        &self,
        item: Item,
        store_id: &str,
    ) -> LocatorResult<Option<RestockRecord>> {
        let row = sqlx::query_as::<_, RestockRow>(
            "SELECT quantity, reported_at, earliest, latest FROM restock \
             WHERE store_id = $1 AND type = $2 \
             ORDER BY earliest DESC LIMIT 1",
        )
        .bind(store_id)
        .bind(item.slug())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LocatorError::Database(format!("Restock query failed: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }
}

#[derive(FromRow)]
struct StockRow {
    quantity: i64,
    reported_at: DateTime<Utc>,
}

impl From<StockRow> for StockObservation {
    fn from(row: StockRow) -> Self {
        StockObservation {
            quantity: row.quantity,
            reported_at: row.reported_at,
        }
    }
}

#[derive(FromRow)]
struct RestockRow {
    quantity: i64,
    reported_at: DateTime<Utc>,
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
}

impl From<RestockRow> for RestockRecord {
    fn from(row: RestockRow) -> Self {
        RestockRecord {
            quantity: row.quantity,
            reported_at: row.reported_at,
            earliest: row.earliest,
            latest: row.latest,
        }
    }
}

/// Schema statements in execution order. Tables come before their indexes.
fn schema_statements() -> impl Iterator<Item = &'static str> {
    SCHEMA_SQL
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS stock (
    id BIGSERIAL PRIMARY KEY,
    store_id TEXT NOT NULL,
    type TEXT NOT NULL,
    quantity BIGINT NOT NULL,
    reported_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_stock_lookup
    ON stock (store_id, type, created_at);

CREATE TABLE IF NOT EXISTS restock (
    id BIGSERIAL PRIMARY KEY,
    store_id TEXT NOT NULL,
    type TEXT NOT NULL,
    quantity BIGINT NOT NULL,
    reported_at TIMESTAMPTZ NOT NULL,
    earliest TIMESTAMPTZ NOT NULL,
    latest TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_restock_lookup
    ON restock (store_id, type, earliest DESC)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_both_queried_tables() {
        let statements: Vec<_> = schema_statements().collect();

        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS stock"));
        assert!(statements[1].starts_with("CREATE INDEX IF NOT EXISTS idx_stock_lookup"));
        assert!(statements[2].starts_with("CREATE TABLE IF NOT EXISTS restock"));
        assert!(statements[3].starts_with("CREATE INDEX IF NOT EXISTS idx_restock_lookup"));
    }

    #[test]
    fn test_schema_statements_are_executable_units() {
        for statement in schema_statements() {
            assert!(!statement.contains(';'));
            assert!(!statement.trim().is_empty());
        }
    }
}

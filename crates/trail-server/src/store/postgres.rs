//! PostgreSQL-backed trail store
//!
//! Talks to the `cw2` schema (see `migrations/`):
//!
//! - `cw2.trail_details_view` - full detail projection used for listing
//! - `cw2.get_trail(id)` - single-row fetch
//! - `cw2.add_trail(...)` - insert, returns the new id
//! - `cw2.update_trail(...)` / `cw2.delete_trail(id)` - procedures
//! - `cw2.trail` - base table, only checked for existence

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    types::BigDecimal,
    FromRow, PgPool,
};
use std::time::Duration;

use super::{StoreResult, TrailStore};
use crate::config::DatabaseConfig;
use crate::models::{Trail, TrailFields, TrailId};
use crate::normalize::decimal_to_f64;

const LIST_TRAILS_SQL: &str = "SELECT * FROM cw2.trail_details_view";
const GET_TRAIL_SQL: &str = "SELECT * FROM cw2.get_trail($1)";
const TRAIL_EXISTS_SQL: &str = "SELECT EXISTS (SELECT 1 FROM cw2.trail WHERE trail_id = $1)";
const ADD_TRAIL_SQL: &str = "SELECT cw2.add_trail($1, $2, $3, $4, $5, $6::numeric, $7, $8)";
const UPDATE_TRAIL_SQL: &str =
    "CALL cw2.update_trail($1, $2, $3, $4::numeric, $5, $6, $7, $8, $9)";
const DELETE_TRAIL_SQL: &str = "CALL cw2.delete_trail($1)";

/// Row shape shared by the detail view and `cw2.get_trail`
#[derive(Debug, FromRow)]
struct TrailRecord {
    trail_id: i32,
    trail_name: String,
    description: Option<String>,
    length_km: BigDecimal,
    start_location: String,
    end_location: String,
    difficulty_id: i32,
    routetype_id: i32,
    user_id: i32,
    #[sqlx(default)]
    difficulty: Option<String>,
    #[sqlx(default)]
    route_type: Option<String>,
}

impl From<TrailRecord> for Trail {
    fn from(record: TrailRecord) -> Self {
        Trail {
            trail_id: record.trail_id,
            trail_name: record.trail_name,
            description: record.description,
            length_km: decimal_to_f64(&record.length_km),
            start_location: record.start_location,
            end_location: record.end_location,
            difficulty_id: record.difficulty_id,
            route_type_id: record.routetype_id,
            user_id: record.user_id,
            difficulty: record.difficulty,
            route_type: record.route_type,
        }
    }
}

/// [`TrailStore`] over a bounded connection pool
#[derive(Clone)]
pub struct PgTrailStore {
    pool: PgPool,
}

impl PgTrailStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool described by `config`
    ///
    /// Each connection gets a server-side `statement_timeout` so a stuck
    /// procedure cannot hold a request forever.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = config
            .url
            .parse::<PgConnectOptions>()?
            .options([("statement_timeout", format!("{}s", config.statement_timeout_secs))]);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TrailStore for PgTrailStore {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Trail>> {
        let mut conn = self.pool.acquire().await?;

        let records = sqlx::query_as::<_, TrailRecord>(LIST_TRAILS_SQL)
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(count = records.len(), "Fetched trail details");
        Ok(records.into_iter().map(Trail::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: TrailId) -> StoreResult<Option<Trail>> {
        let mut conn = self.pool.acquire().await?;

        let record = sqlx::query_as::<_, TrailRecord>(GET_TRAIL_SQL)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(record.map(Trail::from))
    }

    #[tracing::instrument(skip(self, fields), fields(trail_name = %fields.trail_name, user_id = fields.user_id))]
    async fn create(&self, fields: &TrailFields) -> StoreResult<TrailId> {
        let mut conn = self.pool.acquire().await?;

        let id = sqlx::query_scalar::<_, i32>(ADD_TRAIL_SQL)
            .bind(fields.user_id)
            .bind(fields.difficulty_id)
            .bind(fields.route_type_id)
            .bind(&fields.trail_name)
            .bind(&fields.description)
            .bind(fields.length_km)
            .bind(&fields.start_location)
            .bind(&fields.end_location)
            .fetch_one(&mut *conn)
            .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: TrailId) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;

        let exists = sqlx::query_scalar::<_, bool>(TRAIL_EXISTS_SQL)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update(&self, id: TrailId, fields: &TrailFields) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query(UPDATE_TRAIL_SQL)
            .bind(id)
            .bind(&fields.trail_name)
            .bind(&fields.description)
            .bind(fields.length_km)
            .bind(&fields.start_location)
            .bind(&fields.end_location)
            .bind(fields.difficulty_id)
            .bind(fields.route_type_id)
            .bind(fields.user_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: TrailId) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query(DELETE_TRAIL_SQL)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

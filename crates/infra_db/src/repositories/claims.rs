//! Claims repository implementation
//!
//! PostgreSQL adapter for the `ClaimStore` port. Claims are listed in
//! insertion order using the `seq` column.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimQuery, ClaimStatus, ClaimStore, NewClaim};

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id,
    lecturer_name,
    notes,
    supporting_document_path,
    status,
    hours_worked,
    hourly_rate,
    submitted_at
"#;

/// Database representation of claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "lowercase")]
pub enum ClaimStatusRow {
    Pending,
    Approved,
    Rejected,
}

impl From<ClaimStatus> for ClaimStatusRow {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Pending => ClaimStatusRow::Pending,
            ClaimStatus::Approved => ClaimStatusRow::Approved,
            ClaimStatus::Rejected => ClaimStatusRow::Rejected,
        }
    }
}

impl From<ClaimStatusRow> for ClaimStatus {
    fn from(status: ClaimStatusRow) -> Self {
        match status {
            ClaimStatusRow::Pending => ClaimStatus::Pending,
            ClaimStatusRow::Approved => ClaimStatus::Approved,
            ClaimStatusRow::Rejected => ClaimStatus::Rejected,
        }
    }
}

/// Row in the `claims` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: i64,
    pub lecturer_name: String,
    pub notes: String,
    pub supporting_document_path: String,
    pub status: ClaimStatusRow,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub submitted_at: DateTime<Utc>,
}

impl From<ClaimRow> for Claim {
    fn from(row: ClaimRow) -> Self {
        Claim {
            id: ClaimId::new(row.claim_id),
            lecturer_name: row.lecturer_name,
            notes: row.notes,
            supporting_document_path: row.supporting_document_path,
            status: row.status.into(),
            hours_worked: row.hours_worked,
            hourly_rate: row.hourly_rate,
            submitted_at: row.submitted_at,
        }
    }
}

/// Claim store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgClaimStore {
    pool: PgPool,
}

impl PgClaimStore {
    /// Creates a new store with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts a claim, keeping the id sequence ahead of caller-supplied ids
    async fn insert(&self, claim: NewClaim) -> Result<ClaimRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO claims (
                claim_id, lecturer_name, notes, supporting_document_path,
                status, hours_worked, hourly_rate
            ) VALUES (
                COALESCE($1, nextval('claims_claim_id_seq')), $2, $3, $4, $5, $6, $7
            )
            RETURNING {}
            "#,
            CLAIM_COLUMNS
        );

        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim.id.map(i64::from))
            .bind(&claim.lecturer_name)
            .bind(&claim.notes)
            .bind(&claim.supporting_document_path)
            .bind(ClaimStatusRow::from(claim.status))
            .bind(claim.hours_worked)
            .bind(claim.hourly_rate)
            .fetch_one(&mut *tx)
            .await?;

        if claim.id.is_some() {
            sqlx::query(
                "SELECT setval('claims_claim_id_seq', GREATEST((SELECT MAX(claim_id) FROM claims), 1))",
            )
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    async fn fetch(&self, id: ClaimId) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {} FROM claims WHERE claim_id = $1", CLAIM_COLUMNS);
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_all(&self, query: ClaimQuery) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM claims
            WHERE ($1::claim_status IS NULL OR status = $1)
            ORDER BY seq
            "#,
            CLAIM_COLUMNS
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(query.status.map(ClaimStatusRow::from))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn overwrite(&self, claim: &Claim) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE claims SET
                lecturer_name = $2,
                notes = $3,
                supporting_document_path = $4,
                status = $5,
                hours_worked = $6,
                hourly_rate = $7
            WHERE claim_id = $1
            "#,
        )
        .bind(claim.id.value())
        .bind(&claim.lecturer_name)
        .bind(&claim.notes)
        .bind(&claim.supporting_document_path)
        .bind(ClaimStatusRow::from(claim.status))
        .bind(claim.hours_worked)
        .bind(claim.hourly_rate)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", claim.id));
        }
        Ok(())
    }

    async fn remove(&self, id: ClaimId) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE claim_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

impl DomainPort for PgClaimStore {}

#[async_trait]
impl HealthCheckable for PgClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = sqlx::query("SELECT 1").execute(&self.pool).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(_) => HealthCheckResult::healthy("postgres", latency_ms),
            Err(e) => HealthCheckResult::unhealthy("postgres", latency_ms, e.to_string()),
        }
    }
}

#[async_trait]
impl ClaimStore for PgClaimStore {
    async fn create(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let row = self.insert(claim).await?;
        debug!(claim_id = row.claim_id, "claim row inserted");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        Ok(self.fetch(id).await?.map(Claim::from))
    }

    async fn list(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let rows = self.fetch_all(query).await?;
        Ok(rows.into_iter().map(Claim::from).collect())
    }

    async fn update(&self, claim: &Claim) -> Result<(), PortError> {
        self.overwrite(claim).await.map_err(|e| match e {
            DatabaseError::NotFound(_) => PortError::not_found("Claim", claim.id),
            other => other.into(),
        })
    }

    async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        let removed = self.remove(id).await?;
        debug!(claim_id = %id, removed, "claim delete executed");
        Ok(())
    }
}

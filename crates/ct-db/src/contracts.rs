//! Postgres contract store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ct_core::traits::Id;
use ct_models::{ContractRecord, ContractUpdate, NewContract};
use ct_queries::{ContractFilter, RecordScope};
use sqlx::{FromRow, PgPool, QueryBuilder};

use crate::repository::{ContractStore, RepositoryError, RepositoryResult};

/// Contract database row
#[derive(Debug, Clone, FromRow)]
struct ContractRow {
    id: i64,
    user_id: i64,
    client_name: String,
    date: chrono::NaiveDate,
    modified_at: DateTime<Utc>,
    contact_number: String,
    vendor_name: String,
    vendor_company: String,
    rate: f64,
    currency: String,
    contract_type: String,
    status: String,
    comments: Option<String>,
}

impl From<ContractRow> for ContractRecord {
    fn from(row: ContractRow) -> Self {
        ContractRecord {
            id: row.id,
            user_id: row.user_id,
            client_name: row.client_name,
            date: row.date,
            modified_at: row.modified_at,
            contact_number: row.contact_number,
            vendor_name: row.vendor_name,
            vendor_company: row.vendor_company,
            rate: row.rate,
            currency: row.currency,
            contract_type: row.contract_type,
            status: row.status,
            comments: row.comments,
        }
    }
}

const COLUMNS: &str = "id, user_id, client_name, date, modified_at, contact_number, \
                       vendor_name, vendor_company, rate, currency, contract_type, status, comments";

/// Postgres-backed contract store
pub struct PgContractStore {
    pool: PgPool,
}

impl PgContractStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractStore for PgContractStore {
    async fn list(
        &self,
        scope: RecordScope,
        filter: &ContractFilter,
    ) -> RepositoryResult<Vec<ContractRecord>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM contracts WHERE 1=1", COLUMNS));

        if let RecordScope::Owner(user_id) = scope {
            qb.push(" AND user_id = ").push_bind(user_id);
        }

        if let Some(client_name) = &filter.client_name {
            qb.push(" AND client_name ILIKE ")
                .push_bind(format!("%{}%", escape_like(client_name)));
        }
        if let Some(vendor_name) = &filter.vendor_name {
            qb.push(" AND vendor_name = ").push_bind(vendor_name);
        }
        if let Some(vendor_company) = &filter.vendor_company {
            qb.push(" AND vendor_company = ").push_bind(vendor_company);
        }
        if let Some(currency) = &filter.currency {
            qb.push(" AND currency = ").push_bind(currency);
        }
        if let Some(contract_type) = &filter.contract_type {
            qb.push(" AND contract_type = ").push_bind(contract_type);
        }
        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(from) = filter.date_from {
            qb.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filter.date_to {
            qb.push(" AND date <= ").push_bind(to);
        }

        qb.push(" ORDER BY date, id");

        let rows: Vec<ContractRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(ContractRecord::from).collect())
    }

    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ContractRecord>> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ContractRecord::from))
    }

    async fn create(&self, owner_id: Id, payload: NewContract) -> RepositoryResult<ContractRecord> {
        let row: ContractRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO contracts
                (user_id, client_name, date, modified_at, contact_number,
                 vendor_name, vendor_company, rate, currency, contract_type, status, comments)
            VALUES ($1, $2, $3, now(), $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(owner_id)
        .bind(&payload.client_name)
        .bind(payload.date)
        .bind(&payload.contact_number)
        .bind(&payload.vendor_name)
        .bind(&payload.vendor_company)
        .bind(payload.rate)
        .bind(&payload.currency)
        .bind(&payload.contract_type)
        .bind(&payload.status)
        .bind(&payload.comments)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: Id, update: ContractUpdate) -> RepositoryResult<ContractRecord> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Contract {}", id)))?;

        let updated = update.apply_to(&existing, Utc::now());

        // user_id is intentionally absent from the SET list
        let row: ContractRow = sqlx::query_as(&format!(
            r#"
            UPDATE contracts
            SET client_name = $2, date = $3, modified_at = $4, contact_number = $5,
                vendor_name = $6, vendor_company = $7, rate = $8, currency = $9,
                contract_type = $10, status = $11, comments = $12
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&updated.client_name)
        .bind(updated.date)
        .bind(updated.modified_at)
        .bind(&updated.contact_number)
        .bind(&updated.vendor_name)
        .bind(&updated.vendor_company)
        .bind(updated.rate)
        .bind(&updated.currency)
        .bind(&updated.contract_type)
        .bind(&updated.status)
        .bind(&updated.comments)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Contract {}", id)));
        }
        Ok(())
    }
}

/// Escape LIKE metacharacters in user input
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

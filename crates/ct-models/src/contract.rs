//! Contract record entity
//!
//! The single persisted business entity of the application. Every record is
//! owned by exactly one user; the owner is set at creation and never
//! reassigned.

use chrono::{DateTime, NaiveDate, Utc};
use ct_core::traits::{Id, Owned};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A persisted contract record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: Id,

    /// Owning user. Set from the authenticated requester at creation.
    pub user_id: Id,

    pub client_name: String,

    /// Entry date of the contract
    pub date: NaiveDate,

    /// Last modification timestamp, maintained by the store
    pub modified_at: DateTime<Utc>,

    pub contact_number: String,
    pub vendor_name: String,
    pub vendor_company: String,
    pub rate: f64,
    pub currency: String,
    pub contract_type: String,
    pub status: String,
    pub comments: Option<String>,
}

impl Owned for ContractRecord {
    fn owner_id(&self) -> Id {
        self.user_id
    }
}

/// Payload for creating a contract record.
///
/// There is deliberately no owner field: the owner is always the
/// authenticated requester.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContract {
    #[validate(length(min = 1, max = 255))]
    pub client_name: String,

    pub date: NaiveDate,

    #[validate(length(max = 50))]
    pub contact_number: String,

    #[validate(length(min = 1, max = 255))]
    pub vendor_name: String,

    #[validate(length(max = 255))]
    pub vendor_company: String,

    #[validate(range(min = 0.0))]
    pub rate: f64,

    #[validate(length(min = 1, max = 10))]
    pub currency: String,

    #[validate(length(min = 1, max = 100))]
    pub contract_type: String,

    #[validate(length(min = 1, max = 100))]
    pub status: String,

    pub comments: Option<String>,
}

/// Payload for editing a contract record. Unset fields are left unchanged;
/// the owner cannot be changed through an update.
///
/// `comments` is the one nullable field, so it distinguishes absent (keep the
/// current value) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContractUpdate {
    #[validate(length(min = 1, max = 255))]
    pub client_name: Option<String>,

    pub date: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub contact_number: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub vendor_name: Option<String>,

    #[validate(length(max = 255))]
    pub vendor_company: Option<String>,

    #[validate(range(min = 0.0))]
    pub rate: Option<f64>,

    #[validate(length(min = 1, max = 10))]
    pub currency: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub contract_type: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub comments: Option<Option<String>>,
}

/// Deserialize a present field (including `null`) as `Some`, so that serde's
/// usual null-and-absent collapse does not swallow an explicit clear.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ContractUpdate {
    /// Apply the update on top of an existing record, preserving the id and
    /// owner. `modified_at` is the caller's clock reading.
    pub fn apply_to(&self, record: &ContractRecord, modified_at: DateTime<Utc>) -> ContractRecord {
        ContractRecord {
            id: record.id,
            user_id: record.user_id,
            client_name: self
                .client_name
                .clone()
                .unwrap_or_else(|| record.client_name.clone()),
            date: self.date.unwrap_or(record.date),
            modified_at,
            contact_number: self
                .contact_number
                .clone()
                .unwrap_or_else(|| record.contact_number.clone()),
            vendor_name: self
                .vendor_name
                .clone()
                .unwrap_or_else(|| record.vendor_name.clone()),
            vendor_company: self
                .vendor_company
                .clone()
                .unwrap_or_else(|| record.vendor_company.clone()),
            rate: self.rate.unwrap_or(record.rate),
            currency: self.currency.clone().unwrap_or_else(|| record.currency.clone()),
            contract_type: self
                .contract_type
                .clone()
                .unwrap_or_else(|| record.contract_type.clone()),
            status: self.status.clone().unwrap_or_else(|| record.status.clone()),
            comments: match &self.comments {
                Some(value) => value.clone(),
                None => record.comments.clone(),
            },
        }
    }
}

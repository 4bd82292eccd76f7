//! Contract filters
//!
//! User-supplied filter parameters, deserialized straight from the query
//! string. Unset fields are passthrough: no predicate is applied for them.
//!
//! The same filter is evaluated two ways with identical semantics: the
//! Postgres store compiles it to SQL predicates, the in-memory store calls
//! [`ContractFilter::matches`].

use chrono::NaiveDate;
use ct_models::ContractRecord;
use serde::Deserialize;

/// Filter parameters for narrowing a scoped record set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractFilter {
    /// Case-insensitive substring match on the client name
    pub client_name: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_company: Option<String>,
    pub currency: Option<String>,
    pub contract_type: Option<String>,
    pub status: Option<String>,
    /// Inclusive lower bound on the entry date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date
    pub date_to: Option<NaiveDate>,
}

impl ContractFilter {
    /// Evaluate the filter against a single record
    pub fn matches(&self, record: &ContractRecord) -> bool {
        if let Some(needle) = &self.client_name {
            if !record
                .client_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(vendor_name) = &self.vendor_name {
            if &record.vendor_name != vendor_name {
                return false;
            }
        }
        if let Some(vendor_company) = &self.vendor_company {
            if &record.vendor_company != vendor_company {
                return false;
            }
        }
        if let Some(currency) = &self.currency {
            if &record.currency != currency {
                return false;
            }
        }
        if let Some(contract_type) = &self.contract_type {
            if &record.contract_type != contract_type {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &record.status != status {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        true
    }
}

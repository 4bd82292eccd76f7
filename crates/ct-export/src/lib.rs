//! # ct-export
//!
//! Spreadsheet export of a contract record set.
//!
//! Produces an xlsx workbook with a single "Data" sheet: one bold header row
//! naming the columns, then one row per record. Administrators get a trailing
//! "User" column with the owner's login; standard users do not. Row order is
//! whatever the caller passes in (the stores already order by entry date,
//! then id).

use chrono::{DateTime, Utc};
use ct_core::traits::Id;
use ct_models::ContractRecord;
use ct_queries::export_columns;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Spreadsheet serialization failed: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Owner logins keyed by user id, for the admin-only "User" column
pub type OwnerLogins = HashMap<Id, String>;

/// The cell values of one record, in export column order.
///
/// `owners` present means the admin schema (extra owner column).
fn record_cells(record: &ContractRecord, owners: Option<&OwnerLogins>) -> Vec<String> {
    let mut cells = vec![
        record.client_name.clone(),
        record.date.format("%Y-%m-%d").to_string(),
        record.modified_at.to_rfc3339(),
        record.contact_number.clone(),
        record.vendor_name.clone(),
        record.vendor_company.clone(),
        record.rate.to_string(),
        record.currency.clone(),
        record.contract_type.clone(),
        record.status.clone(),
        record.comments.clone().unwrap_or_default(),
    ];
    if let Some(owners) = owners {
        let login = owners
            .get(&record.user_id)
            .cloned()
            .unwrap_or_else(|| record.user_id.to_string());
        cells.push(login);
    }
    cells
}

/// Build all data rows (header excluded) for a record set
pub fn build_rows(records: &[ContractRecord], owners: Option<&OwnerLogins>) -> Vec<Vec<String>> {
    records.iter().map(|r| record_cells(r, owners)).collect()
}

/// Serialize a record set to xlsx bytes.
///
/// Passing `Some(owners)` selects the 12-column admin schema; `None` the
/// 11-column standard schema.
pub fn write_workbook(
    records: &[ContractRecord],
    owners: Option<&OwnerLogins>,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data")?;

    let bold = Format::new().set_bold();
    for (col, header) in export_columns(owners.is_some()).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (row, cells) in build_rows(records, owners).iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Download filename for an export taken at `now`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("Contracts_{}.xlsx", now.format("%Y-%m-%dT%H-%M-%S"))
}

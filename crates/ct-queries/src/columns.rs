//! Export columns
//!
//! The spreadsheet export uses a fixed column set; administrators get a
//! trailing "User" column naming the record owner.

/// Columns every role sees, in export order
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Client Name",
    "Entry Date",
    "Modified At",
    "Contact Number",
    "Vendor Name",
    "Vendor Company",
    "Rate",
    "Currency",
    "Contract Type",
    "Status",
    "Comments",
];

/// The extra owner column administrators see
pub const OWNER_COLUMN: &str = "User";

/// Column headers for a role
pub fn export_columns(include_owner: bool) -> Vec<&'static str> {
    let mut columns = EXPORT_COLUMNS.to_vec();
    if include_owner {
        columns.push(OWNER_COLUMN);
    }
    columns
}

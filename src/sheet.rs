//! Spreadsheet row filter
//!
//! Standalone utility for cleaning the restaurant nutrition spreadsheet
//! before import: drops every data row that is missing any of the macro
//! columns, keeping the header row.

/// Zero-based columns holding the macro values in the source spreadsheet
pub const MACRO_COLUMNS: [usize; 4] = [9, 10, 15, 18];

/// Keeps the header row plus every row with all required columns non-empty
///
/// A row shorter than a required column index counts as missing that
/// column. An empty input produces an empty output.
pub fn filter_rows_with_macros(rows: &[Vec<String>], required: &[usize]) -> Vec<Vec<String>> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };

    let mut filtered = Vec::with_capacity(rows.len());
    filtered.push(header.clone());
    for row in data {
        let complete = required
            .iter()
            .all(|&col| row.get(col).is_some_and(|cell| !cell.is_empty()));
        if complete {
            filtered.push(row.clone());
        }
    }
    filtered
}

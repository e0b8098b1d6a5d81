//! CSV export in the fixed five-column layout the original app produced:
//! a UTF-8 BOM, an unquoted header row, then one fully quoted row per
//! record in stored order.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::domain::{CategoryRegistry, Transaction};
use crate::errors::{StoreError, StoreResult};

/// Byte order mark so spreadsheet apps detect UTF-8.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Column header row.
pub const CSV_HEADER: &str = "日付,タイプ,カテゴリ,金額,説明";

/// Serializes `records` to CSV bytes.
pub fn csv_bytes(records: &[Transaction], registry: &CategoryRegistry) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(records.len() * 48 + 64);
    buffer.extend_from_slice(UTF8_BOM);
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(buffer);
    for t in records {
        writer.write_record([
            t.date.format("%Y-%m-%d").to_string(),
            t.kind.label().to_string(),
            registry.label_for(t.kind, &t.category).to_string(),
            t.amount.to_string(),
            t.description.clone(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| StoreError::Storage(err.to_string()))
}

/// `money_manager_YYYY-MM-DD.csv` for the given day.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("money_manager_{}.csv", today.format("%Y-%m-%d"))
}

/// Writes the export into `dir`, creating it when missing, and returns the
/// full path.
pub fn write_csv(
    records: &[Transaction],
    registry: &CategoryRegistry,
    dir: &Path,
    today: NaiveDate,
) -> StoreResult<PathBuf> {
    let bytes = csv_bytes(records, registry)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(today));
    fs::write(&path, bytes)?;
    Ok(path)
}

//! Record Assembly Module
//!
//! スプレッドシートの行1（郡名）と行2（割合）を列インデックスで組にします。

use crate::error::ConvertError;
use crate::types::{CellValue, Record, RecordSet, Spreadsheet};

/// 郡名の行インデックス
pub const COUNTY_ROW: usize = 1;

/// 割合の行インデックス
pub const PERCENTAGE_ROW: usize = 2;

/// レコードの組み立てに必要な先頭の行数
pub const REQUIRED_ROWS: usize = PERCENTAGE_ROW + 1;

/// 郡名の行と割合の行を取り出す
///
/// セルの型は検証しません。行が入れ替わっていても、そのまま出力されます。
///
/// # 戻り値
///
/// * `Ok((counties, percentages))` - 同じ長さの2つの行
/// * `Err(ConvertError::Structure)` - 行数が3未満の場合
pub fn extract_rows(sheet: &Spreadsheet) -> Result<(&[CellValue], &[CellValue]), ConvertError> {
    let structure_error = || ConvertError::Structure {
        rows: sheet.row_count(),
    };

    let counties = sheet.row(COUNTY_ROW).ok_or_else(structure_error)?;
    let percentages = sheet.row(PERCENTAGE_ROW).ok_or_else(structure_error)?;

    Ok((counties, percentages))
}

/// 2つの行を列ごとに組にしてレコードを生成
///
/// 列の順序を保持します。長さが異なる場合、短い方の行は長い方の長さまで
/// `CellValue::Empty`で埋められます。
pub fn assemble(counties: &[CellValue], percentages: &[CellValue]) -> RecordSet {
    let width = counties.len().max(percentages.len());
    let cell = |row: &[CellValue], col: usize| row.get(col).cloned().unwrap_or_default();

    let records = (0..width)
        .map(|col| Record {
            county: cell(counties, col),
            percentage: cell(percentages, col),
        })
        .collect();

    RecordSet::new(records)
}

/// スプレッドシートからレコードセットを生成
pub fn build_records(sheet: &Spreadsheet) -> Result<RecordSet, ConvertError> {
    let (counties, percentages) = extract_rows(sheet)?;
    let records = assemble(counties, percentages);
    log::debug!(
        "build_records: rows: {} columns: {} records: {}",
        sheet.row_count(),
        sheet.column_count(),
        records.len()
    );
    Ok(records)
}

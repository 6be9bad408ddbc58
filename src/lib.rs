//! mmr-map-json - Kindergarten MMR coverage workbook to JSON converter
//!
//! This crate reads the first worksheet of `src/data/raw/mmr_map_kinder.xlsx`
//! without treating any row as a header, pairs row 1 (county names) with row 2
//! (percentages) column by column, and writes the result to
//! `src/data/json/mmr_map_kinder_long.json`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mmr_map_json::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Resolve input and output paths from the crate location
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let report = converter.convert()?;
//!     println!("Successfully created: {}", report.output_path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Paths
//!
//! ```rust,no_run
//! use mmr_map_json::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_input_path("coverage.xlsx")
//!         .with_output_path("out/coverage.json")
//!         .build()?;
//!     converter.convert()?;
//!     Ok(())
//! }
//! ```
//!
//! # Output
//!
//! ```json
//! [
//!   {
//!     "county":"Alpha",
//!     "percentage":10
//!   },
//!   {
//!     "county":"Beta",
//!     "percentage":20
//!   }
//! ]
//! ```

mod builder;
mod error;
mod layout;
mod output;
mod parser;
mod records;
mod report;
mod types;

// 公開API
pub use builder::{ConversionReport, Converter, ConverterBuilder};
pub use error::ConvertError;
pub use layout::{DataLayout, INPUT_FILE_NAME, OUTPUT_FILE_NAME};
pub use output::{render_json, RecordsFormatter, INDENT_WIDTH};
pub use records::{
    assemble, build_records, extract_rows, COUNTY_ROW, PERCENTAGE_ROW, REQUIRED_ROWS,
};
pub use report::{report, EXIT_SUCCESS};
pub use types::{CellValue, Record, RecordSet, Spreadsheet};

/// XLSXデータの先頭ワークシートを`Spreadsheet`として読み込む
///
/// 保持するのは先頭の`max_rows`行までです。
///
/// ```rust,no_run
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes: Vec<u8> = std::fs::read("mmr_map_kinder.xlsx")?;
/// let sheet = mmr_map_json::read_spreadsheet(Cursor::new(bytes), mmr_map_json::REQUIRED_ROWS)?;
/// println!("{} rows", sheet.row_count());
/// # Ok(())
/// # }
/// ```
pub fn read_spreadsheet<R: std::io::Read + std::io::Seek>(
    reader: R,
    max_rows: usize,
) -> Result<Spreadsheet, calamine::Error> {
    parser::WorkbookParser::open(reader)?.first_sheet(max_rows)
}

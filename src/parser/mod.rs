//! Parser Module
//!
//! calamineを使用したワークブック解析。
//! 先頭のワークシートを、ヘッダー行を仮定しない`Spreadsheet`として読み込みます。

mod workbook;

pub(crate) use workbook::WorkbookParser;

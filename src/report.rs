//! Report Module
//!
//! 変換結果を呼び出し元プロセスに報告する。

use crate::builder::ConversionReport;
use crate::error::ConvertError;
use std::io::Write;

/// 成功時の終了ステータス
pub const EXIT_SUCCESS: i32 = 0;

/// 変換結果を出力し、終了ステータスを返す
///
/// * 成功: `out`に`Successfully created: <path>`を1行出力し、`0`を返す
/// * 失敗: `err`に`Error: <message>`を1行出力し、`1`を返す
pub fn report<O: Write, E: Write>(
    result: &Result<ConversionReport, ConvertError>,
    out: &mut O,
    err: &mut E,
) -> i32 {
    match result {
        Ok(report) => {
            // 標準出力への書き込み失敗は終了ステータスに影響させない
            let _ = writeln!(out, "Successfully created: {}", report.output_path.display());
            EXIT_SUCCESS
        }
        Err(error) => {
            log::debug!("report: {:?}", error);
            let _ = writeln!(err, "Error: {}", error);
            error.exit_code()
        }
    }
}

//! Error Types Module
//!
//! 変換パイプライン全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーメッセージのフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// 変換処理で発生するすべてのエラー
///
/// パイプラインの各ステップはこの型を返し、最上位（`report`）で
/// 1つのメッセージと終了ステータスに集約されます。
///
/// # エラーの種類
///
/// - `InputNotFound`: 入力ワークブックが存在しない
/// - `Parse`: 入力は存在するが、スプレッドシートとして読み込めない
/// - `Structure`: スプレッドシートは有効だが、行1/行2のレイアウトを持たない
/// - `Write`: 出力ディレクトリの作成、またはJSONファイルの書き込みに失敗
/// - `Config`: `ConverterBuilder::build()`時の設定検証に失敗
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 入力ワークブックが解決済みパスに存在しない
    ///
    /// 解析を試みる前に検出されるため、汎用的な解析エラーにはなりません。
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// 解決済みの入力パス
        path: PathBuf,
    },

    /// 入力ファイルを有効なスプレッドシートとして読み込めない
    ///
    /// 破損したファイル、XLSX以外の形式、ワークシートを持たないワークブック、
    /// 読み取り権限のないファイルなどが原因となります。
    #[error("Failed to parse spreadsheet {}: {source}", path.display())]
    Parse {
        /// 入力パス
        path: PathBuf,
        /// calamine由来のエラー
        #[source]
        source: calamine::Error,
    },

    /// スプレッドシートに郡名（行1）と割合（行2）が存在しない
    #[error(
        "Spreadsheet has {rows} row(s); expected county names at row 1 and percentages at row 2"
    )]
    Structure {
        /// 実際の行数
        rows: usize,
    },

    /// 出力ディレクトリの作成、またはファイルの書き込みに失敗
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// 作成・書き込み対象のパス
        path: PathBuf,
        /// 原因となったI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use mmr_map_json::{ConverterBuilder, ConvertError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_input_path("same.xlsx")
    ///     .with_output_path("same.xlsx")
    ///     .build();
    ///
    /// if let Err(ConvertError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    /// プロセスの終了ステータス
    ///
    /// 捕捉されたエラーはすべて`1`に対応します。
    pub fn exit_code(&self) -> i32 {
        1
    }
}

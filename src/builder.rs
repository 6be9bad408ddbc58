//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::error::ConvertError;
use crate::layout::DataLayout;
use crate::parser::WorkbookParser;
use crate::types::{RecordSet, Spreadsheet};
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConversionConfig {
    /// 入力ワークブックのパス
    pub input_path: PathBuf,

    /// 出力JSONのパス
    pub output_path: PathBuf,
}

impl ConversionConfig {
    fn from_layout(layout: &DataLayout) -> Self {
        Self {
            input_path: layout.input_path(),
            output_path: layout.output_path(),
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::from_layout(&DataLayout::default())
    }
}

/// Fluent Builder APIを提供する構造体
///
/// 既定ではクレートの設置場所から解決した`DataLayout`を使用します。
/// 必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mmr_map_json::ConverterBuilder;
///
/// # fn main() -> Result<(), mmr_map_json::ConvertError> {
/// let converter = ConverterBuilder::new()
///     .with_project_root("/srv/dashboard")
///     .build()?;
/// let report = converter.convert()?;
/// println!("{}", report.output_path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// 既定の配置（`DataLayout::discover()`）を持つビルダーを生成する
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 入出力パスを配置から設定する
    ///
    /// それまでに指定した入出力パスは置き換えられます。
    pub fn with_layout(mut self, layout: DataLayout) -> Self {
        self.config = ConversionConfig::from_layout(&layout);
        self
    }

    /// プロジェクトルートを指定する（`<root>/src/data/...`）
    pub fn with_project_root(self, root: impl AsRef<Path>) -> Self {
        self.with_layout(DataLayout::from_project_root(root))
    }

    /// データディレクトリを指定する（`<dir>/raw`、`<dir>/json`）
    pub fn with_data_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.with_layout(DataLayout::with_data_dir(dir))
    }

    /// 入力ワークブックのパスを指定する
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// 出力JSONのパスを指定する
    ///
    /// 出力ディレクトリは、このパスの親ディレクトリになります。
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ConvertError::Config(String)`: 設定の検証に失敗した場合
    ///   * 出力パスがファイル名を持たない
    ///   * 出力パスが入力パスと同じ
    pub fn build(self) -> Result<Converter, ConvertError> {
        // 1. 出力パスの検証
        if self.config.output_path.file_name().is_none() {
            return Err(ConvertError::Config(format!(
                "Output path has no file name: {}",
                self.config.output_path.display()
            )));
        }

        // 2. 入力の上書き防止
        if self.config.output_path == self.config.input_path {
            return Err(ConvertError::Config(format!(
                "Output path must differ from input path: {}",
                self.config.output_path.display()
            )));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換結果の概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// 書き込んだJSONファイルの絶対パス
    pub output_path: PathBuf,

    /// 書き込んだレコード数
    pub records: usize,
}

/// 変換処理のファサード
///
/// ワークブックの行1（郡名）と行2（割合）をJSON配列に変換します。
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn input_path(&self) -> &Path {
        &self.config.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// 出力ディレクトリ（出力パスの親）
    pub fn output_dir(&self) -> &Path {
        self.config
            .output_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
    }

    /// ワークブックを読み込み、JSONファイルを書き込む
    ///
    /// # 処理フロー
    ///
    /// 1. 出力ディレクトリの作成（既存の場合は何もしない）
    /// 2. 入力ファイルの存在確認
    /// 3. 先頭ワークシートの読み込み（ヘッダー行なし）
    /// 4. 行1・行2の取り出しとレコードの組み立て
    /// 5. 2スペースインデントのJSONへの変換
    /// 6. 出力ファイルへの書き込み（上書き）
    ///
    /// いずれかのステップが失敗した時点で処理を終了します。再試行は行いません。
    pub fn convert(&self) -> Result<ConversionReport, ConvertError> {
        let input_path = self.input_path();
        let output_path = self.output_path();
        log::info!(
            "convert: input: {} output: {}",
            input_path.display(),
            output_path.display()
        );

        // 1. 出力ディレクトリの作成
        let output_dir = self.output_dir();
        if !output_dir.as_os_str().is_empty() {
            crate::output::ensure_dir(output_dir)?;
        }

        // 2〜4. 読み込みとレコードの組み立て
        let records = self.load_records()?;

        // 5. JSONへの変換
        let json = crate::output::render_json(&records).map_err(|source| ConvertError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;

        // 6. 書き込み
        crate::output::write_json(output_path, &json)?;
        log::info!(
            "convert: wrote {} record(s) ({} bytes)",
            records.len(),
            json.len()
        );

        let output_path = fs::canonicalize(output_path).unwrap_or_else(|_| output_path.to_path_buf());

        Ok(ConversionReport {
            output_path,
            records: records.len(),
        })
    }

    /// ワークブックを読み込み、レコードセットを生成する（ファイルは書き込まない）
    pub fn load_records(&self) -> Result<RecordSet, ConvertError> {
        let sheet = self.load_spreadsheet()?;
        crate::records::build_records(&sheet)
    }

    /// 入力ワークブックの先頭ワークシートを読み込む
    ///
    /// 入力ファイルが存在しない場合は、解析を試みずに`InputNotFound`を返します。
    pub fn load_spreadsheet(&self) -> Result<Spreadsheet, ConvertError> {
        let input_path = self.input_path();
        if !input_path.exists() {
            return Err(ConvertError::InputNotFound {
                path: input_path.to_path_buf(),
            });
        }

        let parse_error = |source: calamine::Error| ConvertError::Parse {
            path: input_path.to_path_buf(),
            source,
        };

        // ファイル全体をメモリに読み込み、ハンドルは解析前に閉じる
        let buffer = read_file(input_path).map_err(|e| parse_error(calamine::Error::Io(e)))?;
        log::debug!("load_spreadsheet: read {} bytes", buffer.len());

        let mut parser = WorkbookParser::open(Cursor::new(buffer)).map_err(parse_error)?;
        let sheet = parser
            .first_sheet(crate::records::REQUIRED_ROWS)
            .map_err(parse_error)?;
        log::debug!(
            "load_spreadsheet: rows: {} columns: {}",
            sheet.row_count(),
            sheet.column_count()
        );

        Ok(sheet)
    }
}

fn read_file(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    File::open(path)?.read_to_end(&mut buffer)?;
    Ok(buffer)
}

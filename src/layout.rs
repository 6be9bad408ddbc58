//! Data Layout Module
//!
//! 入力ワークブックと出力JSONの配置を解決するモジュール。
//! プロジェクトルート配下の`src/data/raw`と`src/data/json`を使用します。

use std::path::{Path, PathBuf};

/// 入力ワークブックのファイル名
pub const INPUT_FILE_NAME: &str = "mmr_map_kinder.xlsx";

/// 出力JSONのファイル名
pub const OUTPUT_FILE_NAME: &str = "mmr_map_kinder_long.json";

/// データディレクトリの配置
///
/// ```text
/// <project_root>/src/data/raw/mmr_map_kinder.xlsx        (入力)
/// <project_root>/src/data/json/mmr_map_kinder_long.json  (出力)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    data_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::discover()
    }
}

impl DataLayout {
    /// クレートの設置場所から既定の配置を解決する
    ///
    /// クレートのマニフェストから2階層上（マニフェストのあるディレクトリの親）を
    /// プロジェクトルートとして扱います。設定入力を持たない純粋な関数です。
    pub fn discover() -> Self {
        Self::from_script_dir(Path::new(env!("CARGO_MANIFEST_DIR")))
    }

    /// 変換ツールが置かれたディレクトリから配置を解決する
    ///
    /// `script_dir`の親ディレクトリがプロジェクトルートになります。
    /// 親を持たない場合（ルートディレクトリなど）は`script_dir`自体を使用します。
    pub fn from_script_dir(script_dir: &Path) -> Self {
        let project_root = script_dir.parent().unwrap_or(script_dir);
        Self::from_project_root(project_root)
    }

    /// プロジェクトルートから配置を解決する
    pub fn from_project_root(project_root: impl AsRef<Path>) -> Self {
        Self {
            data_dir: project_root.as_ref().join("src").join("data"),
        }
    }

    /// データディレクトリを直接指定する
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 入力ディレクトリ（`data/raw`）
    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join("raw")
    }

    /// 出力ディレクトリ（`data/json`）
    pub fn json_dir(&self) -> PathBuf {
        self.data_dir.join("json")
    }

    pub fn input_path(&self) -> PathBuf {
        self.raw_dir().join(INPUT_FILE_NAME)
    }

    pub fn output_path(&self) -> PathBuf {
        self.json_dir().join(OUTPUT_FILE_NAME)
    }
}

//! Output Module
//!
//! レコードセットをJSONテキストに変換し、出力ファイルへ書き込むモジュール。

mod formatters;

use crate::error::ConvertError;
use crate::types::RecordSet;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub use formatters::RecordsFormatter;

/// 出力のインデント幅（スペース数）
pub const INDENT_WIDTH: usize = 2;

/// レコードセットを2スペースインデントのJSONテキストに変換する
///
/// # 出力例
///
/// ```json
/// [
///   {
///     "county":"Alpha",
///     "percentage":10
///   }
/// ]
/// ```
///
/// 末尾の改行は付けません。エンコードの失敗は`InvalidData`のI/Oエラーになります。
pub fn render_json(records: &RecordSet) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut buffer,
        RecordsFormatter::with_indent_width(INDENT_WIDTH),
    );
    records
        .serialize(&mut serializer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 出力ディレクトリを作成する（既に存在する場合は何もしない）
pub fn ensure_dir(dir: &Path) -> Result<(), ConvertError> {
    fs::create_dir_all(dir).map_err(|source| ConvertError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// JSONテキストを出力ファイルに書き込む
///
/// 既存のファイルは上書きされます。
pub fn write_json(path: &Path, json: &str) -> Result<(), ConvertError> {
    let write_error = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes()).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, Record};

    fn record(county: &str, percentage: f64) -> Record {
        Record {
            county: CellValue::from(county),
            percentage: CellValue::Number(percentage),
        }
    }

    #[test]
    fn test_render_json_layout() {
        let records = RecordSet::new(vec![record("Alpha", 10.0), record("Beta", 20.0)]);

        let json = render_json(&records).unwrap();

        let expected = "[\n  {\n    \"county\":\"Alpha\",\n    \"percentage\":10\n  },\n  {\n    \"county\":\"Beta\",\n    \"percentage\":20\n  }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_render_json_is_parseable_and_ordered() {
        let records = RecordSet::new(vec![record("Alpha", 10.0), record("Beta", 20.0)]);

        let json = render_json(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                {"county": "Alpha", "percentage": 10},
                {"county": "Beta", "percentage": 20}
            ])
        );
    }

    #[test]
    fn test_render_json_empty_record_set() {
        assert_eq!(render_json(&RecordSet::default()).unwrap(), "[]");
    }

    #[test]
    fn test_render_json_no_trailing_newline() {
        let json = render_json(&RecordSet::new(vec![record("Alpha", 1.0)])).unwrap();
        assert!(json.ends_with(']'));
    }

    #[test]
    fn test_render_json_keeps_non_ascii() {
        let records = RecordSet::new(vec![Record {
            county: CellValue::from("Doña Ana"),
            percentage: CellValue::Empty,
        }]);

        let json = render_json(&records).unwrap();
        assert!(json.contains("\"county\":\"Doña Ana\""));
        assert!(json.contains("\"percentage\":null"));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("json");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_fails_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, "x").unwrap();

        match ensure_dir(&file.join("json")) {
            Err(ConvertError::Write { path, .. }) => assert!(path.ends_with("json")),
            other => panic!("Expected Write error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_json_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "a much longer previous content").unwrap();

        write_json(&path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}

//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::ser::{Serialize, Serializer};

/// 倍精度浮動小数点数で正確に表現できる整数の上限（2^53）
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// セルの値を表す列挙型
///
/// スキーマを持たない位置ベースのアクセスで読み出される、型なしのセル値です。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// 数値（整数セル、浮動小数点セル、日付セルのエポックミリ秒）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 空セル（エラー値のセルも含む）
    #[default]
    Empty,
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // 整数値の数値は `10.0` ではなく `10` として出力する
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            CellValue::Number(_) => serializer.serialize_none(),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

/// ヘッダー行を持たない表形式データ
///
/// 行0を含むすべての行が通常のデータ行です。各行はワークシートの幅まで
/// `CellValue::Empty`で埋められるため、すべての行は同じ長さになります。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spreadsheet {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Spreadsheet {
    /// 行のリストからスプレッドシートを生成する
    ///
    /// 短い行は最長の行の長さまで`CellValue::Empty`で埋められます。
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数（ワークシートの幅）
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// 指定インデックスの行を取得（範囲外の場合は`None`）
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// 指定座標のセルを取得（範囲外の場合は`None`）
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// 郡名と割合の組
///
/// 同じ列インデックスにある郡名セルと割合セルを組にしたものです。
/// 列インデックスが唯一の結合キーであり、ID フィールドは持ちません。
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Record {
    pub county: CellValue,
    pub percentage: CellValue,
}

/// レコードの順序付きリスト（スプレッドシートの列順を保持）
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct RecordSet(Vec<Record>);

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.0.get(index)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json(value: &CellValue) -> String {
        serde_json::to_string(value).unwrap()
    }

    #[test]
    fn test_integral_number_serializes_as_integer() {
        assert_eq!(to_json(&CellValue::Number(10.0)), "10");
        assert_eq!(to_json(&CellValue::Number(-3.0)), "-3");
        assert_eq!(to_json(&CellValue::Number(0.0)), "0");
    }

    #[test]
    fn test_fractional_number_serializes_as_float() {
        assert_eq!(to_json(&CellValue::Number(92.5)), "92.5");
        assert_eq!(to_json(&CellValue::Number(0.125)), "0.125");
    }

    #[test]
    fn test_huge_and_non_finite_numbers() {
        // 2^53以上は整数に変換しない
        let huge = to_json(&CellValue::Number(1e20));
        assert_eq!(serde_json::from_str::<f64>(&huge).unwrap(), 1e20);
        assert_eq!(to_json(&CellValue::Number(f64::NAN)), "null");
        assert_eq!(to_json(&CellValue::Number(f64::INFINITY)), "null");
    }

    #[test]
    fn test_string_bool_empty() {
        assert_eq!(to_json(&CellValue::from("Alameda")), "\"Alameda\"");
        assert_eq!(to_json(&CellValue::Bool(true)), "true");
        assert_eq!(to_json(&CellValue::Empty), "null");
    }

    #[test]
    fn test_spreadsheet_pads_rows_to_width() {
        let sheet = Spreadsheet::from_rows(vec![
            vec![CellValue::from("a")],
            vec![CellValue::from("b"), CellValue::from(1.0), CellValue::from(2.0)],
            vec![],
        ]);

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 3);
        for i in 0..3 {
            assert_eq!(sheet.row(i).unwrap().len(), 3);
        }
        assert_eq!(sheet.cell(0, 2), Some(&CellValue::Empty));
        assert_eq!(sheet.cell(2, 0), Some(&CellValue::Empty));
    }

    #[test]
    fn test_spreadsheet_out_of_bounds_access() {
        let sheet = Spreadsheet::from_rows(vec![vec![CellValue::from("only")]]);
        assert!(sheet.row(1).is_none());
        assert!(sheet.cell(0, 1).is_none());
        assert!(sheet.cell(5, 5).is_none());
    }

    #[test]
    fn test_empty_spreadsheet() {
        let sheet = Spreadsheet::default();
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.column_count(), 0);
        assert!(sheet.row(0).is_none());
    }

    #[test]
    fn test_record_key_order() {
        let record = Record {
            county: CellValue::from("Alpha"),
            percentage: CellValue::from(10.0),
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"county":"Alpha","percentage":10}"#
        );
    }

    #[test]
    fn test_record_set_serializes_as_array() {
        let records = RecordSet::new(vec![
            Record {
                county: CellValue::from("Alpha"),
                percentage: CellValue::from(10.0),
            },
            Record {
                county: CellValue::from("Beta"),
                percentage: CellValue::Empty,
            },
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"county":"Alpha","percentage":10},{"county":"Beta","percentage":null}]"#
        );
    }
}

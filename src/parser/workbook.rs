//! Workbook Parser
//!
//! calamineのラッパーとして、先頭ワークシートの読み込みを提供します。

use calamine::{DataRef, Reader, Xlsx, XlsxError};
use chrono::{Duration, NaiveDateTime};
use std::io::{Read, Seek};

use crate::types::{CellValue, Spreadsheet};

/// ワークブックパーサー
///
/// XLSX形式のみサポートします。
pub(crate) struct WorkbookParser<R: Read + Seek> {
    workbook: Xlsx<R>,
}

impl<R: Read + Seek> WorkbookParser<R> {
    /// ワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(calamine::Error)` - XLSXとして読み込めない場合
    pub fn open(reader: R) -> Result<Self, calamine::Error> {
        let workbook = Xlsx::new(reader).map_err(calamine::Error::from)?;
        Ok(Self { workbook })
    }

    /// 先頭のワークシートを`Spreadsheet`として読み込む
    ///
    /// 位置は絶対座標で扱います。使用範囲がA1以外から始まる場合でも、
    /// 行0はワークシートの1行目、列0はA列になり、隙間は空セルになります。
    ///
    /// セルはストリームで読み出し、保持するのは先頭の`max_rows`行のみです。
    /// 幅は常にワークシート全体の最終列までになります。
    pub fn first_sheet(&mut self, max_rows: usize) -> Result<Spreadsheet, calamine::Error> {
        let sheet_names = self.workbook.sheet_names();
        log::debug!("first_sheet: sheets: {:?}", sheet_names);

        let name = sheet_names
            .first()
            .ok_or(calamine::Error::Msg("Workbook contains no worksheets"))?;

        let mut reader = match self.workbook.worksheet_cells_reader(name) {
            Ok(reader) => reader,
            // グラフシートなどはセルを持たない
            Err(XlsxError::NotAWorksheet(typ)) => {
                log::warn!("first_sheet: '{}' is not a worksheet", typ);
                return Ok(Spreadsheet::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut head = SheetHead::new(max_rows);
        while let Some(cell) = reader.next_cell()? {
            head.push(cell.get_position(), cell.get_value());
        }

        Ok(head.into_spreadsheet())
    }
}

/// 先頭行のセルと、ワークシート全体の使用範囲を集める
struct SheetHead {
    max_rows: usize,
    cells: Vec<((u32, u32), CellValue)>,
    end: Option<(u32, u32)>,
}

impl SheetHead {
    fn new(max_rows: usize) -> Self {
        Self {
            max_rows,
            cells: Vec::new(),
            end: None,
        }
    }

    fn push(&mut self, (row, col): (u32, u32), value: &DataRef<'_>) {
        // 値を持たないセル（書式のみ）は使用範囲に含めない
        if matches!(value, DataRef::Empty) {
            return;
        }
        self.end = Some(match self.end {
            Some((end_row, end_col)) => (end_row.max(row), end_col.max(col)),
            None => (row, col),
        });
        if (row as usize) < self.max_rows {
            self.cells.push(((row, col), cell_value(value)));
        }
    }

    /// 絶対座標のスプレッドシートに変換
    ///
    /// 生成するセル数は`min(行数, max_rows) * 幅`に制限されます。
    fn into_spreadsheet(self) -> Spreadsheet {
        let (end_row, end_col) = match self.end {
            Some(end) => end,
            // 空のワークシート
            None => return Spreadsheet::default(),
        };
        let height = (end_row as usize).saturating_add(1).min(self.max_rows);
        let width = end_col as usize + 1;
        log::debug!(
            "into_spreadsheet: end: {:?} rows: {} width: {} cells: {}",
            (end_row, end_col),
            height,
            width,
            self.cells.len()
        );

        let mut rows = vec![vec![CellValue::Empty; width]; height];
        for ((row, col), value) in self.cells {
            rows[row as usize][col as usize] = value;
        }

        Spreadsheet::from_rows(rows)
    }
}

/// calamineのセル値を`CellValue`に変換
///
/// 日付セルはUnixエポックからのミリ秒、期間セルはミリ秒の数値になります。
/// エラー値のセルは空セルとして扱います。
fn cell_value(cell: &DataRef<'_>) -> CellValue {
    match cell {
        DataRef::Int(i) => CellValue::Number(*i as f64),
        DataRef::Float(f) => CellValue::Number(*f),
        DataRef::String(s) => CellValue::String(s.clone()),
        DataRef::SharedString(s) => CellValue::from(*s),
        DataRef::Bool(b) => CellValue::Bool(*b),
        DataRef::DateTime(dt) if dt.is_duration() => dt
            .as_duration()
            .map(duration_millis)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        DataRef::DateTime(dt) => dt
            .as_datetime()
            .map(epoch_millis)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        DataRef::DateTimeIso(s) => CellValue::String(s.clone()),
        DataRef::DurationIso(s) => CellValue::String(s.clone()),
        DataRef::Error(_) => CellValue::Empty,
        DataRef::Empty => CellValue::Empty,
    }
}

/// 日時をUTCとみなしたUnixエポックからのミリ秒
fn epoch_millis(datetime: NaiveDateTime) -> CellValue {
    CellValue::Number(datetime.and_utc().timestamp_millis() as f64)
}

fn duration_millis(duration: Duration) -> CellValue {
    CellValue::Number(duration.num_milliseconds() as f64)
}

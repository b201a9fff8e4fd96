//! Workbook Parser
//!
//! calamineを使用したスプレッドシートの解析。
//! 選択したシートの先頭行をヘッダーとして扱い、以降の行をデータ行として抽出します。

use std::fmt::Write as _;
use std::io::{Cursor, Read, Seek};

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{NaiveDateTime, NaiveTime};
use log::debug;

use crate::api::{DateFormat, SheetSelector};
use crate::error::ProcessingError;
use crate::parser::normalize_headers;
use crate::types::{CellValue, Dataset};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// 形式（XLSX, XLS, XLSB, ODS）はcalamineが自動判別します。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(ProcessingError::Spreadsheet)` - 形式が不正、または破損している場合
    pub fn open(buffer: Vec<u8>) -> Result<Self, ProcessingError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(ProcessingError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ProcessingError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::Index(index) => {
                all_sheet_names.get(*index).cloned().ok_or_else(|| {
                    ProcessingError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(ProcessingError::Config(format!(
                        "Sheet '{}' not found",
                        name
                    )));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートをパースしてデータセットを生成する
    ///
    /// 使用範囲の先頭行がヘッダーになります。使用範囲がA列より右から始まる場合、
    /// 左側の空の列も `Unnamed: <index>` 列として含めます。
    /// すべてのセルが空の行はスキップします。
    ///
    /// # 引数
    ///
    /// * `sheet_name` - パースするシート名
    /// * `date_format` - 日付セルの出力形式
    pub fn parse_sheet(
        &mut self,
        sheet_name: &str,
        date_format: &DateFormat,
    ) -> Result<Dataset, ProcessingError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        // 使用範囲の開始列（A列からのオフセット）
        let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let mut rows = range.rows();

        let header = match rows.next() {
            Some(header) => header,
            None => {
                debug!("Sheet '{}' is empty", sheet_name);
                return Ok(Dataset::default());
            }
        };

        let mut header_values = vec![CellValue::Empty; col_offset];
        for cell in header {
            header_values.push(convert_cell(cell, date_format)?);
        }
        let columns = normalize_headers(header_values.into_iter().map(|value| match value {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }));

        let mut data_rows = Vec::new();
        for row in rows {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }

            let mut values = vec![CellValue::Empty; col_offset];
            for cell in row {
                values.push(convert_cell(cell, date_format)?);
            }
            data_rows.push(values);
        }

        let dataset = Dataset::new(columns, data_rows)?;
        debug!(
            "Parsed sheet '{}': {} columns, {} rows",
            sheet_name,
            dataset.column_count(),
            dataset.row_count()
        );
        Ok(dataset)
    }
}

/// calamineのセル値を`CellValue`に変換する
///
/// 日付セルは`date_format`に従って文字列化し、エラーセルは `#DIV/0!` などの
/// リテラルを文字列として保持します。
fn convert_cell(cell: &Data, date_format: &DateFormat) -> Result<CellValue, ProcessingError> {
    let value = match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Text(format_datetime(&datetime, date_format)?),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    };
    Ok(value)
}

/// 日時を指定形式で文字列化する
///
/// `Iso8601`の場合、時刻が0時ちょうどなら日付のみを出力します。
pub(crate) fn format_datetime(
    datetime: &NaiveDateTime,
    date_format: &DateFormat,
) -> Result<String, ProcessingError> {
    let pattern = match date_format {
        DateFormat::Iso8601 if datetime.time() == NaiveTime::MIN => "%Y-%m-%d",
        DateFormat::Iso8601 => "%Y-%m-%d %H:%M:%S",
        DateFormat::Custom(pattern) => pattern.as_str(),
    };

    let mut formatted = String::new();
    write!(formatted, "{}", datetime.format(pattern)).map_err(|_| {
        ProcessingError::Config(format!("Date format '{}' cannot format {}", pattern, datetime))
    })?;
    Ok(formatted)
}


// シート選択と実ファイルの解析は、rust_xlsxwriterでフィクスチャを生成する統合テスト（tests/）で検証します。

//! Delimited Text Parser
//!
//! csvクレートを使用したCSVファイルの解析。
//! 先頭行をヘッダーとして扱い、各フィールドの型を推定して`CellValue`に変換します。

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::error::ProcessingError;
use crate::parser::normalize_headers;
use crate::types::{CellValue, Dataset};

/// 欠損値として扱うマーカー
const MISSING_MARKERS: [&str; 11] = [
    "#N/A", "#NA", "<NA>", "N/A", "n/a", "NA", "NULL", "null", "NaN", "nan", "None",
];

/// 区切り文字
const DELIMITER: u8 = b',';

/// CSVパーサー
///
/// カンマ区切りで、各フィールドの前後の空白は除去されます。
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DelimitedParser;

impl DelimitedParser {
    pub fn new() -> Self {
        Self
    }

    /// CSVのバイト列を解析する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Dataset)` - 解析に成功した場合（空の入力は空のデータセット）
    /// * `Err(ProcessingError::Utf8)` - 入力がUTF-8でない場合
    /// * `Err(ProcessingError::Csv)` - CSVとして解析できない場合
    /// * `Err(ProcessingError::MalformedRow)` - ヘッダーより多いフィールドを持つ行がある場合
    pub fn parse(&self, bytes: &[u8]) -> Result<Dataset, ProcessingError> {
        let content = std::str::from_utf8(bytes)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .trim(Trim::All)
            .has_headers(false)
            .flexible(true) // 短い行は後で補完する
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => {
                debug!("CSV input has no header row");
                return Ok(Dataset::default());
            }
        };

        let columns = normalize_headers(header.iter().map(|field| {
            if field.is_empty() {
                None
            } else {
                Some(field.to_string())
            }
        }));

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            rows.push(record.iter().map(infer_value).collect());
        }

        let dataset = Dataset::new(columns, rows)?;
        debug!(
            "Parsed CSV: {} columns, {} rows",
            dataset.column_count(),
            dataset.row_count()
        );
        Ok(dataset)
    }
}

/// フィールド文字列から値の型を推定する
///
/// * 空文字列・欠損マーカー → `Empty`
/// * `true` / `false`（大文字・小文字を問わない） → `Bool`
/// * i64として解釈できる → `Integer`（桁を失わない）
/// * 数字を含み、f64として解釈できる → `Number`
/// * それ以外 → `Text`
fn infer_value(field: &str) -> CellValue {
    if field.is_empty() || MISSING_MARKERS.contains(&field) {
        return CellValue::Empty;
    }

    if field.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if field.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = field.parse::<i64>() {
        return CellValue::Integer(i);
    }

    // "inf" や "nan" のような単語は数値として扱わない
    if field.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(n) = field.parse::<f64>() {
            return CellValue::Number(n);
        }
    }

    CellValue::Text(field.to_string())
}

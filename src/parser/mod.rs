//! Parser Module
//!
//! 入力バイト列を`Dataset`にデコードするモジュール。
//! スプレッドシートはcalamine、区切りテキストはcsvクレートで解析します。

mod delimited;
mod workbook;

pub(crate) use delimited::DelimitedParser;
pub(crate) use workbook::WorkbookParser;

use std::collections::{HashMap, HashSet};

use crate::api::InputKind;
use crate::builder::ConversionConfig;
use crate::error::ProcessingError;
use crate::types::Dataset;

/// 入力種別に応じたパーサーでデータセットを生成する
pub(crate) fn parse_input(
    buffer: Vec<u8>,
    kind: InputKind,
    config: &ConversionConfig,
) -> Result<Dataset, ProcessingError> {
    match kind {
        InputKind::DelimitedText => DelimitedParser::new().parse(&buffer),
        InputKind::Spreadsheet => {
            let mut parser = WorkbookParser::open(buffer)?;
            let sheet_name = parser.select_sheet(&config.sheet_selector)?;
            parser.parse_sheet(&sheet_name, &config.date_format)
        }
    }
}

/// ヘッダー行の生の値から列名リストを生成する
///
/// * 空のヘッダー（`None`）は位置に応じて `Unnamed: <index>`（0始まり）になります
/// * 重複した列名は2つ目以降に `.1`, `.2`, ... の接尾辞を付けて一意にします
pub(crate) fn normalize_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let names: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, name)| name.unwrap_or_else(|| format!("Unnamed: {}", idx)))
        .collect();

    // 列名ごとの次の接尾辞番号
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(names.len());

    for base in names {
        let mut name = base.clone();

        if used.contains(&name) {
            let mut suffix = next_suffix.get(&base).copied().unwrap_or(1);
            // 生成した名前自体が既存の列名と衝突する場合は、さらに番号を進める
            loop {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
                if !used.contains(&name) {
                    break;
                }
            }
            next_suffix.insert(base, suffix);
        }

        used.insert(name.clone());
        result.push(name);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[Option<&str>]) -> Vec<String> {
        normalize_headers(raw.iter().map(|h| h.map(str::to_string)))
    }

    #[test]
    fn test_plain_headers_unchanged() {
        assert_eq!(headers(&[Some("Name"), Some("Photo")]), vec!["Name", "Photo"]);
    }

    #[test]
    fn test_empty_headers_become_placeholders() {
        assert_eq!(
            headers(&[None, Some("Name"), None]),
            vec!["Unnamed: 0", "Name", "Unnamed: 2"]
        );
    }

    #[test]
    fn test_duplicate_headers_are_numbered() {
        assert_eq!(
            headers(&[Some("A"), Some("A"), Some("B"), Some("A")]),
            vec!["A", "A.1", "B", "A.2"]
        );
    }

    #[test]
    fn test_duplicate_suffix_collision() {
        assert_eq!(
            headers(&[Some("A"), Some("A.1"), Some("A")]),
            vec!["A", "A.1", "A.2"]
        );
    }

    #[test]
    fn test_empty_header_row() {
        assert!(headers(&[]).is_empty());
    }
}

//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::fmt;

use crate::error::ProcessingError;

/// これ以上の絶対値を持つ浮動小数点数は指数表記で表示する
const EXPONENT_THRESHOLD: f64 = 1e16;

/// セルの値を表す列挙型
///
/// 解析直後のセル値は型を持ったまま保持され、描画時に初めて
/// 「画像参照」か「そのまま表示する値」かが判定されます。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 整数（入力に整数として書かれていた値。桁を失わずに保持する）
    Integer(i64),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 文字列値の場合のみ、その内容を返す
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    /// 表示用の文字列に変換する
    ///
    /// 整数値の数値は小数点なし（`42.0` → `42`）、絶対値が`1e16`以上の数値は
    /// 指数表記（`1e30`）、論理値は `True` / `False`、空セルは空文字列になります。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) if n.abs() >= EXPONENT_THRESHOLD => write!(f, "{:e}", n),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::Empty => Ok(()),
        }
    }
}

/// 解析済みの矩形データセット
///
/// 列名の順序付きリストと、行の順序付きリストで構成されます。
/// すべての行は列数と同じ数の値を持ちます（不足分は`CellValue::Empty`で補完）。
/// 行の順序は入力ファイルの順序を保持します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// 列名と行からデータセットを生成する
    ///
    /// 列数より短い行は`CellValue::Empty`で補完されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Dataset)` - 生成に成功した場合
    /// * `Err(ProcessingError::MalformedRow)` - 列数より多い値を持つ行がある場合
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, ProcessingError> {
        let width = columns.len();
        let mut normalized = Vec::with_capacity(rows.len());

        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(ProcessingError::MalformedRow {
                    row: idx + 1,
                    found: row.len(),
                    expected: width,
                });
            }
            row.resize(width, CellValue::Empty);
            normalized.push(row);
        }

        Ok(Self {
            columns,
            rows: normalized,
        })
    }

    /// 列名のリスト
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 行のリスト
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 指定位置のセル値を取得
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 条件を満たす列だけを残した新しいデータセットを生成する
    ///
    /// 元のデータセットは変更されません。残った列の順序は保持されます。
    pub fn retain_columns<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&str) -> bool,
    {
        let kept: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| keep(name))
            .map(|(idx, _)| idx)
            .collect();

        let columns = kept.iter().map(|&idx| self.columns[idx].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| kept.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Dataset { columns, rows }
    }
}

/// 画像参照セル
///
/// 画像URLとして分類された文字列セルです。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// 画像のURL（元の文字列そのまま）
    pub src: String,
}

/// 描画済みのセル
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedCell {
    /// 元の値をそのまま表示するセル
    Value(CellValue),

    /// `<img>`要素として表示するセル
    Image(ImageRef),
}

/// 描画済みのテーブル
///
/// 列名と、各行・各列の`RenderedCell`から構成されます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RenderedCell>>,
}

impl RenderedTable {
    /// 画像セルの総数
    pub fn image_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, RenderedCell::Image(_)))
            .count()
    }
}

/// 組み立て済みのHTMLドキュメント
///
/// 組み立て後は変更されない文字列です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// HTML文字列への参照
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// HTML文字列を取り出す
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_cell_value_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(!CellValue::Number(42.0).is_empty());
        assert!(!text("test").is_empty());
        assert!(!CellValue::Bool(true).is_empty());
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(42.5).to_string(), "42.5");
        assert_eq!(CellValue::Number(-3.0).to_string(), "-3");
        assert_eq!(CellValue::Integer(1234567890123456789).to_string(), "1234567890123456789");
        assert_eq!(CellValue::Integer(-7).to_string(), "-7");
        assert_eq!(CellValue::Number(1e30).to_string(), "1e30");
        assert_eq!(CellValue::Number(-2.5e20).to_string(), "-2.5e20");
        assert_eq!(CellValue::Number(123456789012345.0).to_string(), "123456789012345");
        assert_eq!(text("hello").to_string(), "hello");
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
    }

    #[test]
    fn test_cell_value_as_text() {
        assert_eq!(text("abc").as_text(), Some("abc"));
        assert_eq!(CellValue::Number(1.0).as_text(), None);
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_dataset_pads_short_rows() {
        let dataset = Dataset::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec![text("a1")], vec![text("a2"), text("b2"), text("c2")]],
        )
        .unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[0].len(), 3);
        assert_eq!(dataset.get(0, 1), Some(&CellValue::Empty));
        assert_eq!(dataset.get(0, 2), Some(&CellValue::Empty));
        assert_eq!(dataset.get(1, 2), Some(&text("c2")));
    }

    #[test]
    fn test_dataset_rejects_long_rows() {
        let result = Dataset::new(
            vec!["A".to_string()],
            vec![vec![text("ok")], vec![text("x"), text("y")]],
        );

        match result {
            Err(ProcessingError::MalformedRow {
                row,
                found,
                expected,
            }) => {
                assert_eq!(row, 2);
                assert_eq!(found, 2);
                assert_eq!(expected, 1);
            }
            other => panic!("Expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_dataset_retain_columns_keeps_order_and_source() {
        let dataset = Dataset::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec![text("a"), text("b"), text("c")]],
        )
        .unwrap();

        let derived = dataset.retain_columns(|name| name != "B");

        assert_eq!(derived.columns(), &["A".to_string(), "C".to_string()]);
        assert_eq!(derived.rows()[0], vec![text("a"), text("c")]);
        // 元のデータセットは変更されない
        assert_eq!(dataset.column_count(), 3);
    }

    #[test]
    fn test_rendered_table_image_count() {
        let table = RenderedTable {
            columns: vec!["Photo".to_string()],
            rows: vec![
                vec![RenderedCell::Image(ImageRef {
                    src: "http://x.com/a.png".to_string(),
                })],
                vec![RenderedCell::Value(CellValue::Empty)],
            ],
        };
        assert_eq!(table.image_count(), 1);
    }

    #[test]
    fn test_rendered_document_accessors() {
        let doc = RenderedDocument::new("<html></html>".to_string());
        assert_eq!(doc.as_str(), "<html></html>");
        assert_eq!(doc.to_string(), "<html></html>");
        assert_eq!(doc.into_string(), "<html></html>");
    }
}

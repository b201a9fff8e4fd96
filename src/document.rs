//! Document Assembler Module
//!
//! 描画済みテーブルを固定のHTML/CSSテンプレートに埋め込み、
//! 単体で表示可能なHTMLドキュメントを組み立てるモジュール。

use std::io::Write;

use crate::error::ProcessingError;
use crate::types::{RenderedCell, RenderedDocument, RenderedTable};

/// ページタイトル
pub const PAGE_TITLE: &str = "表格图片展示";

/// テーブル上部の見出し
pub const PAGE_HEADING: &str = "📊 表格数据展示";

const STYLE_SHEET: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Arial, sans-serif;
            padding: 20px;
            background: #f5f5f5;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background: white;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }
        th, td {
            border: 1px solid #ddd;
            padding: 12px;
            text-align: center;
            vertical-align: middle;
        }
        th {
            background: #4CAF50;
            color: white;
            font-weight: 600;
        }
        tr:hover {
            background: #f9f9f9;
        }
        img {
            border-radius: 8px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.15);
            transition: transform 0.2s;
        }
        img:hover {
            transform: scale(1.05);
        }
"#;

/// HTMLドキュメントの組み立て器
///
/// 状態を持たないため、複数の変換で共有できます。
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// テーブルからHTMLドキュメントを組み立てる
    ///
    /// # 戻り値
    ///
    /// * `Ok(RenderedDocument)` - 組み立てに成功した場合
    /// * `Err(ProcessingError)` - 出力バッファへの書き込みに失敗した場合
    pub fn assemble(&self, table: &RenderedTable) -> Result<RenderedDocument, ProcessingError> {
        let mut buffer = Vec::new();
        self.render(table, &mut buffer)?;

        let html = String::from_utf8(buffer).map_err(|e| {
            ProcessingError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(RenderedDocument::new(html))
    }

    /// テーブルを含むHTMLドキュメントをライターへ書き出す
    pub fn render<W: Write>(
        &self,
        table: &RenderedTable,
        writer: &mut W,
    ) -> Result<(), ProcessingError> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "    <meta charset=\"utf-8\">")?;
        writeln!(writer, "    <title>{}</title>", PAGE_TITLE)?;
        writeln!(writer, "    <style>")?;
        write!(writer, "{}", STYLE_SHEET)?;
        writeln!(writer, "    </style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "    <h1 style=\"color: #333;\">{}</h1>", PAGE_HEADING)?;
        self.render_table(table, writer)?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        writer.flush()?;
        Ok(())
    }

    /// `<table>`要素を出力（内部ヘルパー）
    fn render_table<W: Write>(
        &self,
        table: &RenderedTable,
        writer: &mut W,
    ) -> Result<(), ProcessingError> {
        writeln!(writer, "    <table>")?;

        writeln!(writer, "      <thead>")?;
        writeln!(writer, "        <tr>")?;
        for column in &table.columns {
            writeln!(writer, "          <th>{}</th>", escape_html(column))?;
        }
        writeln!(writer, "        </tr>")?;
        writeln!(writer, "      </thead>")?;

        writeln!(writer, "      <tbody>")?;
        for row in &table.rows {
            writeln!(writer, "        <tr>")?;
            for cell in row {
                writeln!(writer, "          <td>{}</td>", cell_html(cell))?;
            }
            writeln!(writer, "        </tr>")?;
        }
        writeln!(writer, "      </tbody>")?;

        writeln!(writer, "    </table>")?;
        Ok(())
    }
}

fn cell_html(cell: &RenderedCell) -> String {
    match cell {
        RenderedCell::Image(image) => image.markup(),
        RenderedCell::Value(value) => escape_html(&value.to_string()),
    }
}

/// HTMLの特殊文字をエスケープ
///
/// テキストノードと属性値の両方で安全な形に変換します。
pub(crate) fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, ImageRef};

    fn sample_table() -> RenderedTable {
        RenderedTable {
            columns: vec!["Name".to_string(), "Photo".to_string()],
            rows: vec![vec![
                RenderedCell::Value(CellValue::Text("Alice".to_string())),
                RenderedCell::Image(ImageRef {
                    src: "http://x.com/a.png".to_string(),
                }),
            ]],
        }
    }

    #[test]
    fn test_document_skeleton() {
        let doc = DocumentAssembler.assemble(&sample_table()).unwrap();
        let html = doc.as_str();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<title>表格图片展示</title>"));
        assert!(html.contains("<h1 style=\"color: #333;\">📊 表格数据展示</h1>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_style_sheet_rules() {
        let html = DocumentAssembler.assemble(&sample_table()).unwrap().into_string();

        assert!(html.contains("border-collapse: collapse;"));
        assert!(html.contains("width: 100%;"));
        assert!(html.contains("background: #4CAF50;"));
        assert!(html.contains("tr:hover"));
        assert!(html.contains("border-radius: 8px;"));
        assert!(html.contains("transform: scale(1.05);"));
    }

    #[test]
    fn test_table_content() {
        let html = DocumentAssembler.assemble(&sample_table()).unwrap().into_string();

        assert!(html.contains("<th>Name</th>"));
        assert!(html.contains("<th>Photo</th>"));
        assert!(html.contains("<td>Alice</td>"));
        assert!(html.contains(
            "<td><img src=\"http://x.com/a.png\" style=\"max-width:200px; max-height:200px;\"></td>"
        ));
        assert_eq!(html.matches("<tr>").count(), 2);
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let table = RenderedTable {
            columns: vec!["<b>".to_string()],
            rows: vec![vec![RenderedCell::Value(CellValue::Text(
                "Tom & \"Jerry\"".to_string(),
            ))]],
        };
        let html = DocumentAssembler.assemble(&table).unwrap().into_string();

        assert!(html.contains("<th>&lt;b&gt;</th>"));
        assert!(html.contains("<td>Tom &amp; &quot;Jerry&quot;</td>"));
    }

    #[test]
    fn test_non_text_values_display() {
        let table = RenderedTable {
            columns: vec!["N".to_string(), "B".to_string(), "E".to_string()],
            rows: vec![vec![
                RenderedCell::Value(CellValue::Number(7.0)),
                RenderedCell::Value(CellValue::Bool(false)),
                RenderedCell::Value(CellValue::Empty),
            ]],
        };
        let html = DocumentAssembler.assemble(&table).unwrap().into_string();

        assert!(html.contains("<td>7</td>"));
        assert!(html.contains("<td>False</td>"));
        assert!(html.contains("<td></td>"));
    }

    #[test]
    fn test_empty_table() {
        let html = DocumentAssembler
            .assemble(&RenderedTable::default())
            .unwrap()
            .into_string();

        assert!(html.contains("<table>"));
        assert!(html.contains("</table>"));
        assert!(!html.contains("<th>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("a<b>&'\""), "a&lt;b&gt;&amp;&#39;&quot;");
        assert_eq!(escape_html("日本語"), "日本語");
    }
}

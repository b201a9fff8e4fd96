//! Cell Renderer Module
//!
//! セル値の分類と描画を提供するモジュール。
//! 画像URLと判定された文字列セルを`<img>`要素に変換し、それ以外の値はそのまま通過させます。

use crate::types::{CellValue, Dataset, ImageRef, RenderedCell, RenderedTable};

/// 画像URLとして認識する拡張子（小文字で比較）
pub const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// サムネイルの最大表示サイズ（ピクセル、幅・高さ共通）
pub const THUMBNAIL_MAX_PX: u32 = 200;

/// 文字列が画像URLかどうかを判定する
///
/// 判定条件:
///
/// 1. リテラル接頭辞 `http` で始まる（大文字・小文字を区別する）
/// 2. 文字列全体を小文字化したものが、`IMAGE_EXTENSIONS`のいずれかで終わる
///
/// URLのパスではなく文字列全体の末尾で比較するため、
/// `https://x.com/a.png?size=large` のようにクエリ文字列が続くURLは画像と判定されません。
///
/// # 使用例
///
/// ```rust
/// use sheetgallery::is_image_reference;
///
/// assert!(is_image_reference("https://example.com/cat.JPG"));
/// assert!(!is_image_reference("HTTP://example.com/cat.jpg"));
/// assert!(!is_image_reference("https://example.com/cat.png?size=large"));
/// ```
pub fn is_image_reference(text: &str) -> bool {
    if !text.starts_with("http") {
        return false;
    }

    let lower = text.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// 単一のセル値を描画する
///
/// 文字列値かつ画像URLの場合は`RenderedCell::Image`を、
/// それ以外（数値、論理値、空セル、画像URLでない文字列）は元の値を
/// `RenderedCell::Value`として返します。副作用はなく、失敗もしません。
pub fn render_cell(value: &CellValue) -> RenderedCell {
    match value {
        CellValue::Text(s) if is_image_reference(s) => {
            RenderedCell::Image(ImageRef { src: s.clone() })
        }
        other => RenderedCell::Value(other.clone()),
    }
}

/// データセット全体を描画する
///
/// 行 × 列の順に各セルへ`render_cell`を適用し、新しい`RenderedTable`を生成します。
/// 元のデータセットは変更されません。
pub fn render_table(dataset: &Dataset) -> RenderedTable {
    let rows = dataset
        .rows()
        .iter()
        .map(|row| row.iter().map(render_cell).collect())
        .collect();

    RenderedTable {
        columns: dataset.columns().to_vec(),
        rows,
    }
}

impl ImageRef {
    /// `<img>`要素のHTML断片を生成する
    ///
    /// 最大表示サイズは`THUMBNAIL_MAX_PX` × `THUMBNAIL_MAX_PX`です。
    /// 縦横比はブラウザの縮小表示に任せます。
    pub fn markup(&self) -> String {
        format!(
            "<img src=\"{}\" style=\"max-width:{max}px; max-height:{max}px;\">",
            crate::document::escape_html(&self.src),
            max = THUMBNAIL_MAX_PX
        )
    }
}

//! WASM Bindings
//!
//! ブラウザ上でアップロードされたファイルを変換するためのWebAssemblyバインディング。
//! JavaScript側はファイル名とバイト列を渡し、HTMLまたはダウンロードリンクを受け取ります。

use wasm_bindgen::prelude::*;

use crate::{ConverterBuilder, InputKind, SheetSelector};

fn converter(sheet_index: Option<usize>) -> Result<crate::Converter, String> {
    let mut builder = ConverterBuilder::new();
    if let Some(idx) = sheet_index {
        builder = builder.with_sheet_selector(SheetSelector::Index(idx));
    }
    builder.build().map_err(|e| e.to_string())
}

/// ファイルをHTML文字列に変換する
///
/// # 引数
///
/// * `file_name` - 元のファイル名（拡張子でパーサーを選択）
/// * `bytes` - ファイル内容（JavaScriptの`Uint8Array`）
/// * `sheet_index` - スプレッドシートのシート番号（省略時は先頭シート）
#[wasm_bindgen]
pub fn convert_to_html(
    file_name: &str,
    bytes: &[u8],
    sheet_index: Option<usize>,
) -> Result<String, String> {
    let kind = InputKind::from_file_name(file_name).map_err(|e| e.to_string())?;
    converter(sheet_index)?
        .convert_to_string(bytes, kind)
        .map_err(|e| e.to_string())
}

/// ファイルを変換し、ダウンロードリンク（`<a download>`要素）を返す
#[wasm_bindgen]
pub fn convert_to_download_link(
    file_name: &str,
    bytes: &[u8],
    sheet_index: Option<usize>,
) -> Result<String, String> {
    let kind = InputKind::from_file_name(file_name).map_err(|e| e.to_string())?;
    let artifact = converter(sheet_index)?
        .export(bytes, kind)
        .map_err(|e| e.to_string())?;
    Ok(artifact.download_link())
}

/// バージョン情報を取得
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

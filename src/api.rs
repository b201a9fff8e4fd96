//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::path::Path;

use crate::error::ProcessingError;

/// 入力ファイルの種類
///
/// パーサーの選択はファイル拡張子のみで決定します（内容のスニッフィングは行いません）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputKind {
    /// スプレッドシート（`.xlsx` / `.xls`）
    ///
    /// calamineの自動判別リーダーで読み込みます。
    Spreadsheet,

    /// 区切りテキスト（`.csv`）
    DelimitedText,
}

impl InputKind {
    /// ファイル名の拡張子から入力種別を判定する
    ///
    /// 拡張子の比較は大文字・小文字を区別しません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(InputKind)` - 対応する拡張子の場合
    /// * `Err(ProcessingError::UnsupportedInput)` - 拡張子がない、または未対応の場合
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetgallery::InputKind;
    ///
    /// assert_eq!(InputKind::from_file_name("photos.CSV").unwrap(), InputKind::DelimitedText);
    /// assert_eq!(InputKind::from_file_name("photos.xlsx").unwrap(), InputKind::Spreadsheet);
    /// assert!(InputKind::from_file_name("photos.txt").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> Result<Self, ProcessingError> {
        Self::from_path(Path::new(name))
    }

    /// パスの拡張子から入力種別を判定する
    pub fn from_path(path: &Path) -> Result<Self, ProcessingError> {
        // `Path::extension`は`.csv`のようなファイル名を拡張子なしと見なすため、
        // ファイル名の最後の`.`以降で判定する
        let extension = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or_else(|| {
                ProcessingError::UnsupportedInput(format!(
                    "'{}' has no file extension (expected .xlsx, .xls or .csv)",
                    path.display()
                ))
            })?;

        match extension.as_str() {
            "xlsx" | "xls" => Ok(InputKind::Spreadsheet),
            "csv" => Ok(InputKind::DelimitedText),
            other => Err(ProcessingError::UnsupportedInput(format!(
                "'.{}' files are not supported (expected .xlsx, .xls or .csv)",
                other
            ))),
        }
    }
}

/// 日付の出力形式
///
/// スプレッドシートの日付セルを文字列化する際の形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式
    ///
    /// 時刻部分が0時ちょうどの場合は `2025-11-20`、
    /// それ以外は `2025-11-20 08:30:00` の形式で出力します。
    #[default]
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetgallery::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), sheetgallery::ProcessingError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// シート選択方式
///
/// スプレッドシート入力のうち、変換対象とするシートを指定します。
/// CSV入力では無視されます。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり、デフォルトは先頭シート）
    Index(usize),

    /// シート名指定
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

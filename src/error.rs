//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// sheetgalleryクレート全体で使用するエラー型
///
/// 入力の読み込み、解析、変換、HTML組み立て、エクスポートの各段階で発生する
/// すべての失敗は、この単一のエラー型（処理エラー）として呼び出し元に返されます。
/// 局所的なリカバリーは行わず、エラーが発生した時点で変換全体が中断されます。
/// `Display`の出力はそのままユーザーに表示されることを想定しています。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetgallery::{ConverterBuilder, ProcessingError};
///
/// fn convert(path: &str) -> Result<String, ProcessingError> {
///     let converter = ConverterBuilder::new().build()?;
///     let document = converter.convert_file(path)?;  // 失敗はすべてProcessingError
///     Ok(document.into_string())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// CSVの解析中に発生したエラー（csvクレート由来）
    #[error("Failed to parse CSV file: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8文字列の変換エラー
    ///
    /// CSV入力やエクスポートのデコード結果が有効なUTF-8でない場合に発生します。
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Base64のデコードエラー
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// 拡張子から入力種別を判定できなかったエラー
    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    /// ヘッダーより多くのフィールドを持つ行が検出されたエラー
    ///
    /// `row`はヘッダー行を除いた1始まりのデータ行番号です。
    #[error("Malformed row {row}: found {found} fields, expected {expected}")]
    MalformedRow {
        /// データ行番号（1始まり）
        row: usize,
        /// 実際のフィールド数
        found: usize,
        /// ヘッダーの列数
        expected: usize,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時、または存在しないシートを指定した場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力サイズが上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ProcessingError = io_err.into();

        match error {
            ProcessingError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_spreadsheet_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: ProcessingError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_malformed_row_display() {
        let error = ProcessingError::MalformedRow {
            row: 3,
            found: 4,
            expected: 2,
        };
        assert_eq!(
            error.to_string(),
            "Malformed row 3: found 4 fields, expected 2"
        );
    }

    #[test]
    fn test_base64_error_conversion() {
        use base64::Engine;

        let decode_err = base64::engine::general_purpose::STANDARD
            .decode("not base64!")
            .unwrap_err();
        let error: ProcessingError = decode_err.into();
        assert!(error.to_string().starts_with("Base64 decode error"));
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), ProcessingError> {
            let _file = std::fs::File::open("nonexistent_file.csv")?;
            Ok(())
        }

        match io_operation() {
            Err(ProcessingError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: ProcessingError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = ProcessingError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let unsupported = ProcessingError::UnsupportedInput("'.txt'".to_string());
        assert!(unsupported.to_string().starts_with("Unsupported input file"));

        let security = ProcessingError::SecurityViolation("too large".to_string());
        assert!(security.to_string().starts_with("Security violation"));
    }
}

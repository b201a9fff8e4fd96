//! Column Sanitizer Module
//!
//! ヘッダーが空だった位置に自動生成されたプレースホルダー列（`Unnamed: 0`など）を
//! データセットから取り除くモジュール。

use log::debug;
use regex::Regex;

use crate::error::ProcessingError;
use crate::types::Dataset;

/// デフォルトのプレースホルダー列名パターン
pub const DEFAULT_PLACEHOLDER_PATTERN: &str = "^Unnamed";

/// プレースホルダー列の除去器
#[derive(Debug, Clone)]
pub struct ColumnSanitizer {
    pattern: Regex,
}

impl ColumnSanitizer {
    /// 正規表現パターンから除去器を生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(ColumnSanitizer)` - パターンが有効な場合
    /// * `Err(ProcessingError::Config)` - パターンが不正な正規表現の場合
    pub fn new(pattern: &str) -> Result<Self, ProcessingError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ProcessingError::Config(format!("Invalid placeholder pattern '{}': {}", pattern, e))
        })?;
        Ok(Self { pattern })
    }

    /// 列名がプレースホルダーかどうかを判定
    pub fn is_placeholder(&self, column: &str) -> bool {
        self.pattern.is_match(column)
    }

    /// プレースホルダー列を除いた新しいデータセットを生成する
    ///
    /// 列はパターンに一致しない場合にのみ残り、残った列の順序は保持されます。
    pub fn sanitize(&self, dataset: &Dataset) -> Dataset {
        let sanitized = dataset.retain_columns(|name| !self.is_placeholder(name));

        let dropped = dataset.column_count() - sanitized.column_count();
        if dropped > 0 {
            debug!("Dropped {} placeholder column(s)", dropped);
        }

        sanitized
    }
}

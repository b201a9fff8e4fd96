//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use log::{debug, info};

use crate::api::{DateFormat, InputKind, SheetSelector};
use crate::document::DocumentAssembler;
use crate::error::ProcessingError;
use crate::export::ExportArtifact;
use crate::sanitizer::{ColumnSanitizer, DEFAULT_PLACEHOLDER_PATTERN};
use crate::security::SecurityConfig;
use crate::types::{Dataset, RenderedDocument};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式（スプレッドシート入力のみ）
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// プレースホルダー列名の正規表現
    pub placeholder_pattern: String,

    /// 入力サイズ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::default(),
            date_format: DateFormat::Iso8601,
            placeholder_pattern: DEFAULT_PLACEHOLDER_PATTERN.to_string(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetgallery::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), sheetgallery::ProcessingError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Products".to_string()))
///     .with_max_input_size(16 * 1024 * 1024)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭シート
    /// - 日付形式: ISO 8601
    /// - プレースホルダー列名: `^Unnamed`
    /// - 入力サイズ上限: 256MiB
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換対象のシートを選択する（CSV入力では無視される）
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付セルの出力形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetgallery::{ConverterBuilder, DateFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 除去するプレースホルダー列名の正規表現を指定する
    ///
    /// パターンに一致する列名の列は出力から取り除かれます。
    pub fn with_placeholder_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.placeholder_pattern = pattern.into();
        self
    }

    /// 入力サイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ProcessingError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式指定子を含む
    ///   * プレースホルダー列名のパターンが不正な正規表現
    ///   * 入力サイズの上限が0
    pub fn build(self) -> Result<Converter, ProcessingError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            let invalid = format_str.is_empty()
                || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error));
            if invalid {
                return Err(ProcessingError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        // 2. 入力サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(ProcessingError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        // 3. プレースホルダーパターンのコンパイル
        let sanitizer = ColumnSanitizer::new(&self.config.placeholder_pattern)?;

        Ok(Converter {
            config: self.config,
            sanitizer,
            assembler: DocumentAssembler,
        })
    }
}

/// 変換処理のファサード
///
/// 表形式ファイルを画像サムネイル付きのHTMLドキュメントに変換する
/// メインエントリーポイントです。構築後は不変で、各呼び出しはそれぞれ独立した
/// データセット・ドキュメント・成果物を生成します。
///
/// # 処理フロー
///
/// 1. 入力の読み込み（サイズ制限付き）
/// 2. 入力種別に応じたパース
/// 3. プレースホルダー列の除去
/// 4. セルの分類と描画
/// 5. HTMLドキュメントの組み立て
///
/// いずれかの段階で失敗した場合、部分的な出力は生成されず`ProcessingError`を返します。
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
    sanitizer: ColumnSanitizer,
    assembler: DocumentAssembler,
}

impl Converter {
    /// 入力を解析してデータセットを生成する（列の除去前）
    pub fn parse<R: Read>(&self, input: R, kind: InputKind) -> Result<Dataset, ProcessingError> {
        let buffer = self.config.security.read_limited(input)?;
        debug!("Read {} bytes of {:?} input", buffer.len(), kind);
        crate::parser::parse_input(buffer, kind, &self.config)
    }

    /// 解析済みのデータセットからHTMLドキュメントを生成する
    pub fn render_dataset(&self, dataset: &Dataset) -> Result<RenderedDocument, ProcessingError> {
        let sanitized = self.sanitizer.sanitize(dataset);
        let table = crate::renderer::render_table(&sanitized);
        debug!(
            "Rendered {} rows x {} columns ({} image cells)",
            table.rows.len(),
            table.columns.len(),
            table.image_count()
        );
        self.assembler.assemble(&table)
    }

    /// 入力をHTMLドキュメントに変換する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetgallery::{ConverterBuilder, InputKind};
    ///
    /// # fn main() -> Result<(), sheetgallery::ProcessingError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let csv = "Name,Photo\nAlice,http://x.com/a.png\n";
    /// let document = converter.convert_to_document(csv.as_bytes(), InputKind::DelimitedText)?;
    /// assert!(document.as_str().contains("<img src=\"http://x.com/a.png\""));
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_document<R: Read>(
        &self,
        input: R,
        kind: InputKind,
    ) -> Result<RenderedDocument, ProcessingError> {
        let dataset = self.parse(input, kind)?;
        let document = self.render_dataset(&dataset)?;
        info!("Converted {:?} input to {} bytes of HTML", kind, document.as_str().len());
        Ok(document)
    }

    /// 入力をHTMLに変換し、ライターへ書き出す
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        kind: InputKind,
        mut output: W,
    ) -> Result<(), ProcessingError> {
        let document = self.convert_to_document(input, kind)?;
        output.write_all(document.as_str().as_bytes())?;
        output.flush()?;
        Ok(())
    }

    /// 入力をHTML文字列に変換する
    pub fn convert_to_string<R: Read>(
        &self,
        input: R,
        kind: InputKind,
    ) -> Result<String, ProcessingError> {
        Ok(self.convert_to_document(input, kind)?.into_string())
    }

    /// ファイルを変換する（入力種別は拡張子から判定）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetgallery::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), sheetgallery::ProcessingError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let document = converter.convert_file("products.xlsx")?;
    /// std::fs::write("output.html", document.as_str())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<RenderedDocument, ProcessingError> {
        let path = path.as_ref();
        let kind = InputKind::from_path(path)?;
        debug!("Converting '{}' as {:?}", path.display(), kind);
        let input = File::open(path)?;
        self.convert_to_document(input, kind)
    }

    /// 入力を変換し、ダウンロード用の成果物として返す
    pub fn export<R: Read>(
        &self,
        input: R,
        kind: InputKind,
    ) -> Result<ExportArtifact, ProcessingError> {
        let document = self.convert_to_document(input, kind)?;
        Ok(ExportArtifact::encode(&document))
    }
}

//! Export Module
//!
//! 組み立て済みドキュメントをダウンロード用にエンコードするモジュール。
//! Base64でエンコードし、データURIやダウンロードリンクに埋め込める形にします。

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;
use crate::types::RenderedDocument;

/// ダウンロード時の推奨ファイル名
pub const EXPORT_FILE_NAME: &str = "output.html";

/// エクスポートのMIMEタイプ
pub const EXPORT_MIME_TYPE: &str = "text/html";

/// ダウンロード用のエクスポート成果物
///
/// ドキュメントのUTF-8バイト列を標準Base64（パディングあり）でエンコードしたものです。
/// 同じドキュメントからは常に同じ成果物が得られ、`decode()`で元の文字列に戻せます。
///
/// `serde`でシリアライズできるため、ホスト側にJSONとして受け渡すこともできます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    /// 推奨ファイル名
    pub file_name: String,

    /// MIMEタイプ
    pub mime_type: String,

    /// Base64エンコード済みのドキュメント
    pub data: String,
}

impl ExportArtifact {
    /// ドキュメントをエンコードする
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetgallery::ExportArtifact;
    ///
    /// let artifact = ExportArtifact::from_html("<p>hi</p>");
    /// assert_eq!(artifact.file_name, "output.html");
    /// assert_eq!(artifact.decode().unwrap(), "<p>hi</p>");
    /// ```
    pub fn encode(document: &RenderedDocument) -> Self {
        Self::from_html(document.as_str())
    }

    /// HTML文字列を直接エンコードする
    pub fn from_html(html: &str) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            data: STANDARD.encode(html.as_bytes()),
        }
    }

    /// 元のドキュメント文字列へデコードする
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - デコードに成功した場合
    /// * `Err(ProcessingError::Base64)` - `data`が有効なBase64でない場合
    /// * `Err(ProcessingError::Utf8)` - デコード結果が有効なUTF-8でない場合
    pub fn decode(&self) -> Result<String, ProcessingError> {
        let bytes = STANDARD.decode(&self.data)?;
        String::from_utf8(bytes).map_err(|e| ProcessingError::Utf8(e.utf8_error()))
    }

    /// データURI（`data:text/html;base64,...`）を生成する
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// ダウンロードリンク（`<a download>`要素）を生成する
    pub fn download_link(&self) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">📥 下载 HTML 文件</a>",
            self.data_uri(),
            crate::document::escape_html(&self.file_name)
        )
    }
}

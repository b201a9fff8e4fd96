//! Security Module
//!
//! 入力データの読み込み時に適用するセキュリティ制限を実装するモジュール。

use std::io::Read;

use crate::error::ProcessingError;

/// 入力ファイルの最大サイズのデフォルト値（256MiB）
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 268_435_456;

/// セキュリティ設定
#[derive(Debug, Clone, Copy)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 入力をサイズ制限付きでメモリに読み込む
    ///
    /// 上限を1バイトでも超えた時点で読み込みを打ち切るため、
    /// 巨大な入力を最後まで読み込むことはありません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 読み込んだバイト列
    /// * `Err(ProcessingError::SecurityViolation)` - 入力が上限を超えた場合
    pub fn read_limited<R: Read>(&self, input: R) -> Result<Vec<u8>, ProcessingError> {
        let mut buffer = Vec::new();
        let bytes_read = input
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(ProcessingError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_within_limit() {
        let config = SecurityConfig {
            max_input_file_size: 5,
        };
        let data = config.read_limited(Cursor::new(b"12345".to_vec())).unwrap();
        assert_eq!(data, b"12345");
    }

    #[test]
    fn test_read_over_limit() {
        let config = SecurityConfig {
            max_input_file_size: 4,
        };
        match config.read_limited(Cursor::new(b"12345".to_vec())) {
            Err(ProcessingError::SecurityViolation(msg)) => assert!(msg.contains("4 bytes")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(
            SecurityConfig::default().max_input_file_size,
            DEFAULT_MAX_INPUT_SIZE
        );
    }
}

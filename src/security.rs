//! Security Module
//!
//! 入力ファイルに対するサイズ制限を実装するモジュール。
//! 巨大なファイルやZIP bombによるメモリ枯渇を防ぎます。

use crate::error::PautaError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_file_count: 10_000,
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 入力サイズを検証
    pub fn check_input_size(&self, size: usize) -> Result<(), PautaError> {
        if size as u64 > self.max_input_file_size {
            return Err(PautaError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_file_size
            )));
        }
        Ok(())
    }

    /// ZIPアーカイブのエントリ数を検証
    pub fn check_file_count(&self, count: usize) -> Result<(), PautaError> {
        if count > self.max_file_count {
            return Err(PautaError::SecurityViolation(format!(
                "Archive contains too many files: {} (max: {})",
                count, self.max_file_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_size_within_limit() {
        let config = SecurityConfig::default();
        assert!(config.check_input_size(1024).is_ok());
    }

    #[test]
    fn test_input_size_over_limit() {
        let config = SecurityConfig {
            max_input_file_size: 10,
            ..Default::default()
        };
        match config.check_input_size(11) {
            Err(PautaError::SecurityViolation(msg)) => assert!(msg.contains("exceeds maximum")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_file_count_limit() {
        let config = SecurityConfig::default();
        assert!(config.check_file_count(10_000).is_ok());
        match config.check_file_count(10_001) {
            Err(PautaError::SecurityViolation(msg)) => assert!(msg.contains("too many files")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }
}

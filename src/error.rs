//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// pautazeroクレート全体で使用するエラー型
///
/// スプレッドシートの読み込みからDOCXの生成まで、パイプラインの
/// すべての段階で発生するエラーを統一的に扱います。
///
/// # エラーの種類
///
/// - `FileType`: 入力ファイルの拡張子が`.xlsx`ではない
/// - `Parse`: スプレッドシートの解析に失敗した（calamine由来）
/// - `Validation`: ヘッダー項目（会期番号・種別・日付）が不完全
/// - `Render`: DOCXの生成に失敗した
///
/// # 使用例
///
/// ```rust,no_run
/// use pautazero::PautaError;
/// use std::fs::File;
///
/// fn open_agenda(path: &str) -> Result<(), PautaError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum PautaError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力ファイルの種類が不正
    ///
    /// ファイル名が`.xlsx`で終わらない場合に発生します。
    #[error("Unsupported file type: {0}")]
    FileType(String),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、ワークシートが存在しない
    /// などが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// ヘッダー入力の検証に失敗したエラー
    #[error("Validation error: {0}")]
    Validation(String),

    /// DOCX生成中に発生したエラー
    ///
    /// サポートされていないスタイル（例: フォントサイズ0）や、
    /// XMLで表現できない文字を含むテキストが原因となります。
    #[error("Failed to render document: {0}")]
    Render(String),

    /// ZIPアーカイブの読み書きエラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// XML書き出しエラー
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSONシリアライズエラー（プレビュー・動的レポート）
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `GeneratorBuilder::build()`時に無効な設定が検出された場合に発生します。
    ///
    /// ```rust,no_run
    /// use pautazero::{GeneratorBuilder, PautaError, LayoutConfig};
    ///
    /// let layout = LayoutConfig { font: String::new(), ..Default::default() };
    /// match GeneratorBuilder::new().with_layout(layout).build() {
    ///     Err(PautaError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力サイズ上限やZIPエントリ数上限を超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl PautaError {
    /// UI境界で表示する短いステータス文字列を返す
    ///
    /// 詳細はログ（`log::error!`）に出力し、ユーザーにはこの文字列だけを見せます。
    pub fn status_message(&self) -> String {
        match self {
            PautaError::FileType(_) => "Select a .xlsx file.".to_string(),
            PautaError::Parse(_) | PautaError::Zip(_) | PautaError::SecurityViolation(_) => {
                "Error reading XLSX. Check the log for details.".to_string()
            }
            PautaError::Validation(_) => {
                "Fill in session number, session type and date.".to_string()
            }
            PautaError::Render(_) | PautaError::Xml(_) | PautaError::Json(_) => {
                "Error generating DOCX. Check the log for details.".to_string()
            }
            PautaError::Io(e) => format!("I/O error: {}", e),
            PautaError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: PautaError = io_err.into();

        match error {
            PautaError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let error: PautaError = calamine::Error::Msg("Corrupted file").into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_file_type_error_display() {
        let error = PautaError::FileType("pauta.csv".to_string());
        assert_eq!(error.to_string(), "Unsupported file type: pauta.csv");
    }

    #[test]
    fn test_validation_error_display() {
        let error = PautaError::Validation("session date is missing".to_string());
        assert!(error.to_string().starts_with("Validation error"));
        assert!(error.to_string().contains("session date is missing"));
    }

    #[test]
    fn test_render_error_display() {
        let error = PautaError::Render("font size 0 is not supported".to_string());
        assert!(error.to_string().starts_with("Failed to render document"));
    }

    // ステータス文字列のテスト
    #[test]
    fn test_status_message_hides_details() {
        let error: PautaError = calamine::Error::Msg("zip: invalid header").into();
        let status = error.status_message();
        assert!(!status.contains("invalid header"));
        assert!(status.contains("Error reading XLSX"));
    }

    #[test]
    fn test_status_message_for_each_kind() {
        assert_eq!(
            PautaError::FileType("a.txt".to_string()).status_message(),
            "Select a .xlsx file."
        );
        assert_eq!(
            PautaError::Validation("x".to_string()).status_message(),
            "Fill in session number, session type and date."
        );
        assert!(PautaError::Render("x".to_string())
            .status_message()
            .starts_with("Error generating DOCX"));
        assert!(PautaError::Config("bad font".to_string())
            .status_message()
            .contains("bad font"));
    }

    // ?演算子による自動変換の確認
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), PautaError> {
            let _file = std::fs::File::open("nonexistent_pauta.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(PautaError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: PautaError = json_err.into();
        assert!(matches!(error, PautaError::Json(_)));
    }
}

//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込み。
//! 先頭のワークシートのみを対象に、行ごとのレコードを返します。

mod workbook;

pub(crate) use workbook::WorkbookParser;

use crate::error::PautaError;
use crate::types::SheetRecord;

/// ファイル名の拡張子を検証する
///
/// `.xlsx`（大文字小文字を区別しない）で終わらない場合は`PautaError::FileType`を返します。
///
/// ```rust
/// assert!(pautazero::check_file_name("pauta.XLSX").is_ok());
/// assert!(pautazero::check_file_name("pauta.csv").is_err());
/// ```
pub fn check_file_name(name: &str) -> Result<(), PautaError> {
    if name.to_lowercase().ends_with(".xlsx") {
        Ok(())
    } else {
        Err(PautaError::FileType(name.to_string()))
    }
}

/// XLSXのバイト列から先頭ワークシートの行レコードを読み込む
pub fn read_records(bytes: Vec<u8>) -> Result<Vec<SheetRecord>, PautaError> {
    let mut parser = WorkbookParser::open(bytes)?;
    parser.first_sheet_records()
}

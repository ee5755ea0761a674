//! Parser Module
//!
//! calamineを使用したワークブック解析の実装。
//! 先頭のワークシートをヘッダー行付きの表として読み込み、
//! 行ごとの`SheetRecord`に変換します。

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets, Xlsx};
use zip::ZipArchive;

use crate::error::PautaError;
use crate::security::SecurityConfig;
use crate::types::{CellKind, SheetRecord};

/// 見出しが空のセルに割り当てる列名
const EMPTY_HEADER: &str = "__EMPTY";

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 引数
    ///
    /// * `bytes` - XLSXファイルの内容
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(PautaError::Parse)` - XLSXとして解釈できない場合
    /// * `Err(PautaError::SecurityViolation)` - サイズ制限を超えた場合
    pub fn open(bytes: Vec<u8>) -> Result<Self, PautaError> {
        let security_config = SecurityConfig::default();
        security_config.check_input_size(bytes.len())?;

        // セキュリティチェック: ZIPエントリ数の上限（calamineより先に確認）
        let entry_count = ZipArchive::new(Cursor::new(bytes.as_slice()))
            .map_err(|e| PautaError::Zip(e.to_string()))?
            .len();
        security_config.check_file_count(entry_count)?;

        // calamineでワークブックを開く
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let workbook = match sheets {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(PautaError::Parse(calamine::Error::Msg(
                    "Only XLSX format is supported",
                )))
            }
        };

        Ok(WorkbookParser { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 先頭のワークシートを行レコードのリストに変換
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<SheetRecord>)` - 先頭行をヘッダーとした各データ行
    /// * `Err(PautaError::Parse)` - ワークシートが存在しない、または読み込めない場合
    pub fn first_sheet_records(&mut self) -> Result<Vec<SheetRecord>, PautaError> {
        let range = self
            .workbook
            .worksheet_range_at(0)
            .ok_or(PautaError::Parse(calamine::Error::Msg(
                "Workbook has no worksheets",
            )))?
            .map_err(|e| PautaError::Parse(e.into()))?;

        let records = records_from_range(&range);
        log::debug!(
            "read {} records from first sheet ({} sheets in workbook)",
            records.len(),
            self.sheet_names().len()
        );
        Ok(records)
    }
}

/// セル範囲を行レコードに変換
///
/// 先頭行を列名とし、以降の行のうち全セルが空の行はスキップします。
pub(crate) fn records_from_range(range: &Range<Data>) -> Vec<SheetRecord> {
    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => return Vec::new(),
    };

    rows.filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    let (value, kind) = match row.get(idx) {
                        Some(cell) => (cell_text(cell), cell_kind(cell)),
                        None => (String::new(), CellKind::Text),
                    };
                    (name.clone(), value, kind)
                })
                .collect()
        })
        .collect()
}

/// ヘッダー行から列名を決定
///
/// 空の見出しは`__EMPTY`、重複した見出しには`_1`, `_2`...を付与します。
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header_row
        .iter()
        .map(|cell| {
            let text = cell_text(cell);
            let base = if text.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                text
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// セル値を文字列に変換
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        // 日付セルはシリアル値のまま出力する
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

/// セル種類を判定（日付セルはシリアル値なので数値）
pub(crate) fn cell_kind(cell: &Data) -> CellKind {
    match cell {
        Data::Int(_) | Data::Float(_) | Data::DateTime(_) => CellKind::Number,
        Data::Bool(_) => CellKind::Bool,
        _ => CellKind::Text,
    }
}

/// 整数値の浮動小数点数は小数点なしで出力
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

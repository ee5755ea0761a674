//! Session Module
//!
//! 画面側が保持する状態（読み込んだ行・ヘッダー項目・状態表示）をまとめた構造体。
//! ファイル選択ごとに世代番号を進め、古い読み込み結果は破棄します。

use crate::api::ReportKind;
use crate::builder::Generator;
use crate::error::PautaError;
use crate::parser::check_file_name;
use crate::types::{GeneratedDocument, HeaderInput, SheetRecord};

const STATUS_NO_FILE: &str = "No file selected.";
const STATUS_READING: &str = "Reading XLSX...";
const STATUS_HEADER_MISSING: &str =
    "Fill in session number, session type and date to enable generation.";
const STATUS_READY: &str = "Ready to generate.";

/// ファイル選択の受付票
///
/// [`Session::begin_selection`]が発行し、読み込み結果と一緒に
/// [`Session::complete_selection`]へ渡します。
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct SelectionTicket {
    generation: u64,
}

/// 1つの文書生成画面の状態
#[derive(Debug)]
pub struct Session {
    generator: Generator,
    records: Option<Vec<SheetRecord>>,
    header: HeaderInput,
    /// ファイル選択の世代番号
    generation: u64,
    status: String,
}

impl Session {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator,
            records: None,
            header: HeaderInput::default(),
            generation: 0,
            status: STATUS_NO_FILE.to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn header(&self) -> &HeaderInput {
        &self.header
    }

    /// 読み込み済みの行（未読み込みなら`None`）
    pub fn records(&self) -> Option<&[SheetRecord]> {
        self.records.as_deref()
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// ファイル選択を開始する
    ///
    /// 以前の行を破棄し、世代番号を進めます。拡張子が`.xlsx`でなければ
    /// `PautaError::FileType`を返します（発行済みの受付票はすべて無効になります）。
    pub fn begin_selection(&mut self, file_name: &str) -> Result<SelectionTicket, PautaError> {
        self.generation += 1;
        self.records = None;

        if let Err(e) = check_file_name(file_name) {
            log::error!("rejected file selection: {}", e);
            self.status = e.status_message();
            return Err(e);
        }

        self.status = STATUS_READING.to_string();
        Ok(SelectionTicket {
            generation: self.generation,
        })
    }

    /// ファイル選択を解除する
    pub fn clear_selection(&mut self) {
        self.generation += 1;
        self.records = None;
        self.refresh_status();
    }

    /// 読み込み結果を反映する
    ///
    /// # 戻り値
    ///
    /// * `true` - 受付票が最新で、結果を反映した場合
    /// * `false` - より新しい選択が開始済みのため、結果を破棄した場合
    pub fn complete_selection(
        &mut self,
        ticket: SelectionTicket,
        result: Result<Vec<SheetRecord>, PautaError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::warn!(
                "discarding stale spreadsheet read (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(records) => {
                self.status = format!("XLSX OK. Rows: {}.", records.len());
                self.records = Some(records);
            }
            Err(e) => {
                log::error!("failed to read spreadsheet: {}", e);
                self.records = None;
                self.status = e.status_message();
            }
        }
        true
    }

    /// XLSXのバイト列を読み込んで反映する
    pub fn load(&mut self, ticket: SelectionTicket, bytes: Vec<u8>) -> bool {
        let result = self.generator.read_records(bytes);
        self.complete_selection(ticket, result)
    }

    /// ヘッダー項目を更新する
    pub fn set_header(&mut self, header: HeaderInput) {
        self.header = header;
        if self.records.is_some() {
            self.refresh_status();
        }
    }

    /// プレビュー可能か（行が読み込まれていれば可）
    pub fn can_preview(&self) -> bool {
        self.records.is_some()
    }

    /// 生成可能か
    ///
    /// 行が読み込まれていること（0行でも可）に加え、議事日程では
    /// ヘッダー項目がすべて有効であることが必要です。
    pub fn can_generate(&self) -> bool {
        self.records.is_some() && self.header_ok()
    }

    /// 先頭の行を整形済みJSONとして返す（未読み込みなら`None`）
    pub fn preview(&self) -> Result<Option<String>, PautaError> {
        match &self.records {
            Some(records) => self.generator.preview(records).map(Some),
            None => Ok(None),
        }
    }

    /// 文書を生成する
    ///
    /// 失敗した場合も読み込み済みの行とヘッダー項目は変更されません。
    pub fn generate(&mut self) -> Result<GeneratedDocument, PautaError> {
        let Some(records) = &self.records else {
            self.status = STATUS_NO_FILE.to_string();
            return Err(PautaError::Validation("no spreadsheet loaded".to_string()));
        };

        match self.generator.generate(records, &self.header) {
            Ok(document) => {
                self.status = format!(
                    "{} generated: {}",
                    self.generator.output_format().extension().to_uppercase(),
                    document.filename
                );
                Ok(document)
            }
            Err(e) => {
                log::error!("document generation failed: {}", e);
                self.status = e.status_message();
                Err(e)
            }
        }
    }

    fn header_ok(&self) -> bool {
        match self.generator.report_kind() {
            ReportKind::Agenda => self.header.is_complete(),
            ReportKind::DynamicReport => true,
        }
    }

    fn refresh_status(&mut self) {
        self.status = if self.records.is_none() {
            STATUS_NO_FILE
        } else if !self.header_ok() {
            STATUS_HEADER_MISSING
        } else {
            STATUS_READY
        }
        .to_string();
    }
}

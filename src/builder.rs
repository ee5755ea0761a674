//! Builder Module
//!
//! Fluent Builder APIを提供し、`Generator`インスタンスを段階的に構築する。

use crate::api::{AgendaLabels, LayoutConfig, OutputFormat, ReportKind, DEFAULT_ROSTER};
use crate::error::PautaError;
use crate::formatter::{format_date_local, safe_filename};
use crate::output::{OutputFormatter, MAX_FONT_SIZE};
use crate::transform::{
    agenda_file_stem, dynamic_file_stem, AgendaTransformer, DynamicReportTransformer,
};
use crate::types::{FormattedBlock, GeneratedDocument, HeaderInput, Row, SheetRecord};

/// 生成処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct GeneratorConfig {
    /// 生成する文書の種類
    pub report_kind: ReportKind,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// 固定文言
    pub labels: AgendaLabels,

    /// レイアウト
    pub layout: LayoutConfig,

    /// 常任の審議官名簿
    pub roster: Vec<String>,

    /// プレビューに含める行数
    pub preview_limit: usize,

    /// 動的レポートに出力する行数
    pub dump_limit: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            report_kind: ReportKind::Agenda,
            output_format: OutputFormat::Docx,
            labels: AgendaLabels::default(),
            layout: LayoutConfig::default(),
            roster: DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
            preview_limit: 10,
            dump_limit: 50,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Generator`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use pautazero::{AgendaLabels, GeneratorBuilder, ReportKind};
///
/// # fn main() -> Result<(), pautazero::PautaError> {
/// let generator = GeneratorBuilder::new()
///     .with_report_kind(ReportKind::Agenda)
///     .with_labels(AgendaLabels::pt_br())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GeneratorBuilder {
    /// 内部設定（構築中）
    config: GeneratorConfig,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 文書の種類: 議事日程
    /// - 出力フォーマット: DOCX
    /// - 文言: 英語
    /// - 名簿: [`DEFAULT_ROSTER`]
    /// - プレビュー: 10行、動的レポート: 50行
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// 生成する文書の種類を指定する
    pub fn with_report_kind(mut self, kind: ReportKind) -> Self {
        self.config.report_kind = kind;
        self
    }

    /// 出力フォーマットを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use pautazero::{GeneratorBuilder, OutputFormat};
    ///
    /// // 段落列をJSONで出力
    /// let builder = GeneratorBuilder::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// 文書の固定文言を指定する
    pub fn with_labels(mut self, labels: AgendaLabels) -> Self {
        self.config.labels = labels;
        self
    }

    /// レイアウトを指定する
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    /// 常任の審議官名簿を指定する
    ///
    /// 名前は比較時に正規化されるため、アクセントや大文字小文字は問いません。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use pautazero::GeneratorBuilder;
    ///
    /// let builder = GeneratorBuilder::new()
    ///     .with_roster(["Ana Souza", "João Lima"]);
    /// ```
    pub fn with_roster<I, S>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.roster = roster.into_iter().map(Into::into).collect();
        self
    }

    /// プレビューに含める行数を指定する
    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.config.preview_limit = limit;
        self
    }

    /// 動的レポートに出力する行数を指定する
    pub fn with_dump_limit(mut self, limit: usize) -> Self {
        self.config.dump_limit = limit;
        self
    }

    /// 設定を検証し、`Generator`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Generator)`: 設定が有効な場合
    /// * `Err(PautaError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * フォント名が空
    /// * フォントサイズが0または上限超過
    /// * プレビュー行数が0
    /// * 名簿に空の名前が含まれる
    pub fn build(self) -> Result<Generator, PautaError> {
        let layout = &self.config.layout;

        // 1. レイアウトの検証
        if layout.font.trim().is_empty() {
            return Err(PautaError::Config("Font name must not be empty".to_string()));
        }
        for (name, size) in [
            ("header_size", layout.header_size),
            ("body_size", layout.body_size),
        ] {
            if size == 0 || size > MAX_FONT_SIZE {
                return Err(PautaError::Config(format!(
                    "Invalid {}: {} (expected 1..={})",
                    name, size, MAX_FONT_SIZE
                )));
            }
        }

        // 2. 行数の検証
        if self.config.preview_limit == 0 {
            return Err(PautaError::Config(
                "Preview limit must be greater than zero".to_string(),
            ));
        }

        // 3. 名簿の検証
        if let Some(idx) = self
            .config
            .roster
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(PautaError::Config(format!(
                "Roster entry {} is empty",
                idx
            )));
        }

        Ok(Generator::new(self.config))
    }
}

/// 文書生成のファサード
///
/// `GeneratorBuilder`で構築した設定に基づいて、行レコードから文書を生成します。
///
/// # 使用例
///
/// ```rust,no_run
/// use pautazero::{GeneratorBuilder, HeaderInput};
///
/// # fn main() -> Result<(), pautazero::PautaError> {
/// let generator = GeneratorBuilder::new().build()?;
/// let bytes = std::fs::read("pauta.xlsx")?;
/// let header = HeaderInput::new("1", "Pleno", "2024-01-10");
/// let document = generator.generate_from_bytes(bytes, &header)?;
/// std::fs::write(&document.filename, &document.bytes)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Generator {
    /// 生成設定
    config: GeneratorConfig,
}

impl Generator {
    pub(crate) fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn report_kind(&self) -> ReportKind {
        self.config.report_kind
    }

    pub fn output_format(&self) -> OutputFormat {
        self.config.output_format
    }

    /// XLSXのバイト列から先頭ワークシートの行レコードを読み込む
    pub fn read_records(&self, bytes: Vec<u8>) -> Result<Vec<SheetRecord>, PautaError> {
        let records = crate::parser::read_records(bytes)?;
        log::info!("read {} rows from workbook", records.len());
        Ok(records)
    }

    /// 先頭の行を整形済みJSONとして返す
    pub fn preview(&self, records: &[SheetRecord]) -> Result<String, PautaError> {
        let limit = self.config.preview_limit.min(records.len());
        Ok(serde_json::to_string_pretty(&records[..limit])?)
    }

    /// 行レコードを段落列に変換する
    ///
    /// # 引数
    ///
    /// * `records` - ワークシートの行レコード
    /// * `header` - ヘッダー項目（議事日程では3項目すべてが必要）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<FormattedBlock>)` - 段落列
    /// * `Err(PautaError::Validation)` - ヘッダー項目が不完全な場合
    pub fn transform(
        &self,
        records: &[SheetRecord],
        header: &HeaderInput,
    ) -> Result<Vec<FormattedBlock>, PautaError> {
        match self.config.report_kind {
            ReportKind::Agenda => {
                let validated = header.validate()?;
                let rows: Vec<Row> = records.iter().map(Row::from).collect();
                let transformer = AgendaTransformer::new(
                    &self.config.labels,
                    &self.config.layout,
                    &self.config.roster,
                );
                Ok(transformer.transform(&rows, &validated))
            }
            ReportKind::DynamicReport => {
                let date_local = format_date_local(header.session_date.trim());
                DynamicReportTransformer::new(&self.config.labels, self.config.dump_limit)
                    .transform(records, &date_local)
            }
        }
    }

    /// 行レコードから文書を生成する
    ///
    /// ファイル名の拡張子は出力フォーマットに従います。
    pub fn generate(
        &self,
        records: &[SheetRecord],
        header: &HeaderInput,
    ) -> Result<GeneratedDocument, PautaError> {
        let blocks = self.transform(records, header)?;

        let stem = match self.config.report_kind {
            ReportKind::Agenda => agenda_file_stem(&header.validate()?),
            ReportKind::DynamicReport => dynamic_file_stem(&header.session_date),
        };
        let filename = format!(
            "{}.{}",
            safe_filename(&stem),
            self.config.output_format.extension()
        );

        let bytes = OutputFormatter::from_format(self.config.output_format)
            .render(&blocks, &self.config.layout)?;

        log::info!(
            "generated {} ({} paragraphs, {} bytes)",
            filename,
            blocks.len(),
            bytes.len()
        );
        Ok(GeneratedDocument { filename, bytes })
    }

    /// XLSXのバイト列から直接文書を生成する
    pub fn generate_from_bytes(
        &self,
        bytes: Vec<u8>,
        header: &HeaderInput,
    ) -> Result<GeneratedDocument, PautaError> {
        let records = self.read_records(bytes)?;
        self.generate(&records, header)
    }
}

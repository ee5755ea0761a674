//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::PautaError;
use crate::formatter::{format_date_local, ordinal_suffix, upper};

/// 認識する列名
pub mod columns {
    pub const RELATOR: &str = "Relator";
    pub const PROCESSO: &str = "Processo";
    pub const ORGAO: &str = "Órgão";
    pub const TIPO_PROCESSO: &str = "Tipo Processo";
    pub const INTERESSADOS: &str = "Interessados";
    pub const ADVOGADOS: &str = "Advogados";
    pub const SISTEMA_TRAMITACAO: &str = "Sistema de Tramitação";
    pub const VOTO: &str = "Voto";
}

/// セル値の種類
///
/// JSON出力時に数値・真偽値をそのままの型で書き出すために保持します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Text,
    Number,
    Bool,
}

/// ワークシートの1データ行
///
/// ヘッダー行の列名とセル文字列の組を、ワークシートの列順に保持します。
/// 値が存在しないセルは空文字列です。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRecord {
    cells: Vec<(String, String)>,
    /// `cells`と同じ順序のセル種類
    kinds: Vec<CellKind>,
}

impl SheetRecord {
    /// 列名と値の組から生成（すべて文字列セル）
    pub fn new(cells: Vec<(String, String)>) -> Self {
        let kinds = vec![CellKind::Text; cells.len()];
        Self { cells, kinds }
    }

    /// 列名・値・セル種類の組から生成
    pub fn typed(cells: Vec<(String, String, CellKind)>) -> Self {
        let mut record = Self::default();
        for (name, value, kind) in cells {
            record.cells.push((name, value));
            record.kinds.push(kind);
        }
        record
    }

    /// 列名で値を取得（列が存在しない場合は`None`）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// 列名で値を取得（列が存在しない場合は空文字列）
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// 列名でセル種類を取得
    pub fn kind(&self, column: &str) -> Option<CellKind> {
        self.cells
            .iter()
            .position(|(name, _)| name == column)
            .map(|idx| self.kinds[idx])
    }

    /// 列名と値の組を列順に返す
    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, String)> for SheetRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<(String, String, CellKind)> for SheetRecord {
    fn from_iter<I: IntoIterator<Item = (String, String, CellKind)>>(iter: I) -> Self {
        Self::typed(iter.into_iter().collect())
    }
}

// 列順を保ったJSONオブジェクトとして出力する
impl Serialize for SheetRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for ((name, value), kind) in self.cells.iter().zip(&self.kinds) {
            match kind {
                CellKind::Number => {
                    if let Ok(int) = value.parse::<i64>() {
                        map.serialize_entry(name, &int)?;
                    } else if let Ok(float) = value.parse::<f64>() {
                        map.serialize_entry(name, &float)?;
                    } else {
                        map.serialize_entry(name, value)?;
                    }
                }
                CellKind::Bool => match value.parse::<bool>() {
                    Ok(flag) => map.serialize_entry(name, &flag)?,
                    Err(_) => map.serialize_entry(name, value)?,
                },
                CellKind::Text => map.serialize_entry(name, value)?,
            }
        }
        map.end()
    }
}

/// 議事日程の1案件
///
/// 認識するフィールドのみを明示的に持つレコード型です。
/// 列が存在しない場合、値は空文字列になります。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub relator: String,
    pub processo: String,
    pub orgao: String,
    pub tipo_processo: String,
    pub interessados: String,
    pub advogados: String,
    pub sistema_tramitacao: String,
    pub voto: String,
}

impl Row {
    /// ワークシートの行から生成
    pub fn from_record(record: &SheetRecord) -> Self {
        Self {
            relator: record.get_or_empty(columns::RELATOR).to_string(),
            processo: record.get_or_empty(columns::PROCESSO).to_string(),
            orgao: record.get_or_empty(columns::ORGAO).to_string(),
            tipo_processo: record.get_or_empty(columns::TIPO_PROCESSO).to_string(),
            interessados: record.get_or_empty(columns::INTERESSADOS).to_string(),
            advogados: record.get_or_empty(columns::ADVOGADOS).to_string(),
            sistema_tramitacao: record
                .get_or_empty(columns::SISTEMA_TRAMITACAO)
                .to_string(),
            voto: record.get_or_empty(columns::VOTO).to_string(),
        }
    }
}

impl From<&SheetRecord> for Row {
    fn from(record: &SheetRecord) -> Self {
        Row::from_record(record)
    }
}

/// ユーザーが入力するヘッダー項目
///
/// フォームから受け取ったままの文字列を保持します。
/// 生成前に[`HeaderInput::validate`]で検証します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderInput {
    /// 会期番号（1以上の整数）
    pub session_number: String,
    /// 会期種別（例: `PLENO`, `PRIMEIRA CÂMARA`）
    pub session_type: String,
    /// 会期日（`YYYY-MM-DD`）
    pub session_date: String,
}

impl HeaderInput {
    pub fn new(
        session_number: impl Into<String>,
        session_type: impl Into<String>,
        session_date: impl Into<String>,
    ) -> Self {
        Self {
            session_number: session_number.into(),
            session_type: session_type.into(),
            session_date: session_date.into(),
        }
    }

    /// 暦日から生成（日付はISO形式に変換）
    pub fn from_date(
        session_number: u32,
        session_type: impl Into<String>,
        date: chrono::NaiveDate,
    ) -> Self {
        Self::new(
            session_number.to_string(),
            session_type,
            date.format("%Y-%m-%d").to_string(),
        )
    }

    /// 3項目すべてが整形可能かを判定
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// ヘッダー項目を検証し、整形済みの値を返す
    ///
    /// # 戻り値
    ///
    /// * `Ok(ValidatedHeader)` - すべての項目が有効な場合
    /// * `Err(PautaError::Validation)` - いずれかの項目が不完全な場合
    pub fn validate(&self) -> Result<ValidatedHeader, PautaError> {
        let ordinal = ordinal_suffix(&self.session_number);
        if ordinal.is_empty() {
            return Err(PautaError::Validation(format!(
                "header incomplete: invalid session number '{}'",
                self.session_number
            )));
        }

        let session_type = upper(&self.session_type);
        if session_type.is_empty() {
            return Err(PautaError::Validation(
                "header incomplete: session type is empty".to_string(),
            ));
        }

        let date_local = format_date_local(self.session_date.trim());
        if date_local.is_empty() {
            return Err(PautaError::Validation(format!(
                "header incomplete: invalid session date '{}'",
                self.session_date
            )));
        }

        Ok(ValidatedHeader {
            ordinal,
            session_type,
            date_local,
        })
    }
}

/// 検証済みのヘッダー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHeader {
    /// 序数（例: `1ª`）
    pub ordinal: String,
    /// 大文字化した会期種別
    pub session_type: String,
    /// `DD/MM/YYYY`形式の日付
    pub date_local: String,
}

impl ValidatedHeader {
    /// ファイル名用の日付トークン（`/`を`-`に置換）
    pub fn date_token(&self) -> String {
        self.date_local.replace('/', "-")
    }
}

/// 報告者ごとの案件グループ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatorGroup<'a> {
    /// 空白除去済みの報告者名
    pub relator: String,
    /// 元の順序を保った案件
    pub rows: Vec<&'a Row>,
}

/// テキスト色（RGB）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const RED: Rgb = Rgb(0xFF, 0x00, 0x00);
    pub const BLUE: Rgb = Rgb(0x00, 0x70, 0xC0);

    /// 16進表記（例: `FF0000`）
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// 段落の配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// 段落前後の間隔（1/20ポイント単位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Spacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
}

impl Spacing {
    pub fn after(after: u32) -> Self {
        Self {
            before: None,
            after: Some(after),
        }
    }

    pub fn before(before: u32) -> Self {
        Self {
            before: Some(before),
            after: None,
        }
    }

    pub fn both(before: u32, after: u32) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
        }
    }
}

/// 書式付きテキストラン
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
    /// フォントサイズ（半ポイント単位、例: 20 = 10pt）
    pub size: Option<u32>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// 文書の1段落
///
/// トランスフォーマーの出力単位で、DOCXライターが段落として描画します。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormattedBlock {
    pub alignment: Alignment,
    pub runs: Vec<TextRun>,
    pub spacing: Spacing,
}

impl FormattedBlock {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// 全ランを連結したテキスト
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// すべてのランが太字か
    pub fn is_bold(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(|run| run.bold)
    }
}

/// 生成されたDOCXファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// 保存時のファイル名（例: `agenda_10-01-2024.docx`）
    pub filename: String,
    /// DOCXのバイト列
    pub bytes: Vec<u8>,
}

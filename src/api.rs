//! Public API Types
//!
//! 公開APIで使用する列挙型と設定構造体を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 生成する文書の種類
///
/// どのトランスフォーマーを使用するかを、初期化時に固定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ReportKind {
    /// 報告者ごとにグループ化した議事日程（デフォルト）
    ///
    /// ヘッダー項目（会期番号・種別・日付）がすべて必要です。
    #[default]
    Agenda,

    /// 行データをそのまま列挙する動的レポート
    ///
    /// 先頭の行をJSON形式で出力します。日付は任意です。
    DynamicReport,
}

impl ReportKind {
    /// 文字列タグから種類を解決する（`agenda` / `dynamic`）
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "agenda" | "pauta" => Some(ReportKind::Agenda),
            "dynamic" | "dynamic_report" => Some(ReportKind::DynamicReport),
            _ => None,
        }
    }
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Word文書（デフォルト）
    #[default]
    Docx,

    /// 段落列のJSON
    ///
    /// ホスト側で独自に描画する場合や、出力内容の確認に使用します。
    Json,
}

impl OutputFormat {
    /// ファイル拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Json => "json",
        }
    }
}

/// 文書に出力する固定文言
///
/// デフォルトは英語です。元の書式は[`AgendaLabels::pt_br`]で得られます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaLabels {
    /// 表題（`{ordinal}`と`{type}`を置換）
    pub title: String,
    pub date_prefix: String,
    pub time_line: String,
    pub reporter_prefix: String,
    pub councilor: String,
    pub substitute_councilor: String,
    /// `E-TCE`案件のラベル
    pub electronic_process: String,
    /// `AP`案件のラベル
    pub digital_process: String,
    pub process: String,
    pub number_prefix: String,
    pub list_vote_suffix: String,
    /// 弁護士行（`{name}`を置換）
    pub lawyer_line: String,
    pub dynamic_title: String,
    /// 総行数行（`{count}`を置換）
    pub dynamic_total: String,
    /// 省略行（`{limit}`と`{count}`を置換）
    pub dynamic_truncated: String,
}

impl Default for AgendaLabels {
    fn default() -> Self {
        Self {
            title: "AGENDA OF THE {ordinal} ORDINARY SESSION OF {type}".to_string(),
            date_prefix: "DATE: ".to_string(),
            time_line: "TIME: 10h".to_string(),
            reporter_prefix: "REPORTER: ".to_string(),
            councilor: "COUNCILOR".to_string(),
            substitute_councilor: "SUBSTITUTE COUNCILOR".to_string(),
            electronic_process: "ELECTRONIC PROCESS eTCE".to_string(),
            digital_process: "DIGITAL PROCESS TCE".to_string(),
            process: "PROCESS".to_string(),
            number_prefix: "No ".to_string(),
            list_vote_suffix: " (Voto em lista)".to_string(),
            lawyer_line: "(Adv. {name})".to_string(),
            dynamic_title: "DYNAMIC AGENDA REPORT".to_string(),
            dynamic_total: "Total rows in spreadsheet: {count}".to_string(),
            dynamic_truncated: "(...) Showing only {limit} of {count} rows.".to_string(),
        }
    }
}

impl AgendaLabels {
    /// ロケールタグから文言を選択（`pt-BR`/`pt_br`、それ以外は英語）
    pub fn from_locale(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Self::pt_br(),
            _ => Self::default(),
        }
    }

    /// ポルトガル語（ブラジル）の文言
    pub fn pt_br() -> Self {
        Self {
            title: "PAUTA DA {ordinal} SESSÃO ORDINÁRIA DO {type}".to_string(),
            date_prefix: "DATA: ".to_string(),
            time_line: "HORÁRIO: 10h".to_string(),
            reporter_prefix: "RELATOR: ".to_string(),
            councilor: "CONSELHEIRO".to_string(),
            substitute_councilor: "CONSELHEIRO SUBSTITUTO".to_string(),
            electronic_process: "PROCESSO ELETRÔNICO eTCE".to_string(),
            digital_process: "PROCESSO DIGITAL TCE".to_string(),
            process: "PROCESSO".to_string(),
            number_prefix: "Nº ".to_string(),
            list_vote_suffix: " (Voto em lista)".to_string(),
            lawyer_line: "(Adv. {name})".to_string(),
            dynamic_title: "RELATÓRIO PAUTA DINÂMICA".to_string(),
            dynamic_total: "Total de linhas no XLSX: {count}".to_string(),
            dynamic_truncated: "(...) Exibindo apenas {limit} de {count} linhas.".to_string(),
        }
    }
}

/// 文書のレイアウト設定
///
/// サイズは半ポイント単位、間隔は1/20ポイント単位です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// 既定フォント
    pub font: String,
    /// 見出しのフォントサイズ（22 = 11pt）
    pub header_size: u32,
    /// 本文のフォントサイズ（20 = 10pt）
    pub body_size: u32,
    pub title_after: u32,
    pub date_after: u32,
    pub time_after: u32,
    pub reporter_before: u32,
    pub spacer_after: u32,
    pub process_after: u32,
    pub orgao_after: u32,
    pub tipo_after: u32,
    pub interessado_after: u32,
    pub advogado_after: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font: "Roboto".to_string(),
            header_size: 22,
            body_size: 20,
            title_after: 120,
            date_after: 80,
            time_after: 140,
            reporter_before: 240,
            spacer_after: 120,
            process_after: 120,
            orgao_after: 80,
            tipo_after: 80,
            interessado_after: 60,
            advogado_after: 50,
        }
    }
}

/// 常任の審議官（Conselheiro）名簿の既定値
pub const DEFAULT_ROSTER: &[&str] = &[
    "VALDECIR PASCOAL",
    "RANILSON RAMOS",
    "DIRCEU RODOLFO DE MELO JUNIOR",
    "MARCOS LORETO",
    "CARLOS NEVES",
    "EDUARDO LYRA PORTO",
    "RODRIGO NOVAES",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_from_tag() {
        assert_eq!(ReportKind::from_tag("agenda"), Some(ReportKind::Agenda));
        assert_eq!(ReportKind::from_tag(" Dynamic "), Some(ReportKind::DynamicReport));
        assert_eq!(ReportKind::from_tag("relatorio"), None);
        assert_eq!(ReportKind::default(), ReportKind::Agenda);
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::default().extension(), "docx");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_labels_deserialize_partial_json() {
        let labels: AgendaLabels = serde_json::from_str(r#"{"time_line":"TIME: 14h"}"#).unwrap();
        assert_eq!(labels.time_line, "TIME: 14h");
        assert_eq!(labels.councilor, "COUNCILOR");
    }

    #[test]
    fn test_layout_deserialize_partial_json() {
        let layout: LayoutConfig = serde_json::from_str(r#"{"font":"Arial"}"#).unwrap();
        assert_eq!(layout.font, "Arial");
        assert_eq!(layout.body_size, 20);
    }

    #[test]
    fn test_labels_from_locale() {
        assert_eq!(AgendaLabels::from_locale("pt-BR"), AgendaLabels::pt_br());
        assert_eq!(AgendaLabels::from_locale(" pt_br "), AgendaLabels::pt_br());
        assert_eq!(AgendaLabels::from_locale("en"), AgendaLabels::default());
        assert_eq!(AgendaLabels::from_locale(""), AgendaLabels::default());
    }

    #[test]
    fn test_pt_br_labels() {
        let labels = AgendaLabels::pt_br();
        assert!(labels.title.starts_with("PAUTA DA"));
        assert_eq!(labels.number_prefix, "Nº ");
    }
}

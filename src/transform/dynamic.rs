//! Dynamic Report Transformer
//!
//! 読み込んだ行をそのまま列挙する簡易レポート。
//! 先頭の`limit`行を1行1段落のJSONとして出力します。

use crate::api::AgendaLabels;
use crate::error::PautaError;
use crate::formatter::format_date_local;
use crate::types::{FormattedBlock, SheetRecord, Spacing, TextRun};

const TITLE_SIZE: u32 = 24;
const DATE_SIZE: u32 = 22;
const TOTAL_SIZE: u32 = 20;
const ROW_SIZE: u32 = 18;

/// 動的レポートトランスフォーマー
#[derive(Debug)]
pub(crate) struct DynamicReportTransformer<'a> {
    labels: &'a AgendaLabels,
    /// 出力する最大行数
    limit: usize,
}

impl<'a> DynamicReportTransformer<'a> {
    pub fn new(labels: &'a AgendaLabels, limit: usize) -> Self {
        Self { labels, limit }
    }

    /// 段落列を生成
    ///
    /// # 引数
    ///
    /// * `records` - ワークシートの行レコード
    /// * `date_local` - `DD/MM/YYYY`形式の基準日（空文字列なら日付行を省略）
    pub fn transform(
        &self,
        records: &[SheetRecord],
        date_local: &str,
    ) -> Result<Vec<FormattedBlock>, PautaError> {
        let mut blocks = vec![FormattedBlock::new(vec![TextRun::new(
            self.labels.dynamic_title.clone(),
        )
        .bold()
        .size(TITLE_SIZE)])
        .centered()
        .with_spacing(Spacing::after(200))];

        if !date_local.is_empty() {
            blocks.push(
                FormattedBlock::new(vec![TextRun::new(format!(
                    "{}{}",
                    self.labels.date_prefix, date_local
                ))
                .bold()
                .size(DATE_SIZE)])
                .centered()
                .with_spacing(Spacing::after(200)),
            );
        }

        let total = records.len();
        blocks.push(
            FormattedBlock::new(vec![TextRun::new(
                self.labels
                    .dynamic_total
                    .replace("{count}", &total.to_string()),
            )
            .size(TOTAL_SIZE)])
            .with_spacing(Spacing::after(200)),
        );

        let limit = self.limit.min(total);
        for (i, record) in records.iter().take(limit).enumerate() {
            let json = serde_json::to_string(record)?;
            blocks.push(
                FormattedBlock::new(vec![
                    TextRun::new(format!("{}. ", i + 1)).bold().size(ROW_SIZE),
                    TextRun::new(json).size(ROW_SIZE),
                ])
                .with_spacing(Spacing::after(80)),
            );
        }

        if total > limit {
            let note = self
                .labels
                .dynamic_truncated
                .replace("{limit}", &limit.to_string())
                .replace("{count}", &total.to_string());
            blocks.push(
                FormattedBlock::new(vec![TextRun::new(note).italic().size(ROW_SIZE)])
                    .with_spacing(Spacing::before(120)),
            );
        }

        Ok(blocks)
    }
}

/// 動的レポートのファイル名（拡張子なし）
///
/// 基準日が空でなければ`_DD-MM-YYYY`を付与します。
pub(crate) fn dynamic_file_stem(iso_date: &str) -> String {
    let date_local = format_date_local(iso_date.trim());
    if date_local.is_empty() {
        "dynamic_agenda_report".to_string()
    } else {
        format!("dynamic_agenda_report_{}", date_local.replace('/', "-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellKind;

    fn records(n: usize) -> Vec<SheetRecord> {
        (0..n)
            .map(|i| {
                SheetRecord::new(vec![
                    ("Relator".to_string(), format!("R{}", i)),
                    ("Processo".to_string(), i.to_string()),
                ])
            })
            .collect()
    }

    #[test]
    fn test_dynamic_report_without_date() {
        let labels = AgendaLabels::default();
        let blocks = DynamicReportTransformer::new(&labels, 50)
            .transform(&records(2), "")
            .unwrap();

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].text(), "DYNAMIC AGENDA REPORT");
        assert_eq!(blocks[1].text(), "Total rows in spreadsheet: 2");
        assert_eq!(blocks[2].text(), r#"1. {"Relator":"R0","Processo":"0"}"#);
        assert!(blocks[2].runs[0].bold);
        assert!(!blocks[2].runs[1].bold);
    }

    #[test]
    fn test_dynamic_report_keeps_numeric_cells() {
        let labels = AgendaLabels::default();
        let record = SheetRecord::typed(vec![
            ("Relator".to_string(), "Smith".to_string(), CellKind::Text),
            ("Processo".to_string(), "123".to_string(), CellKind::Number),
        ]);
        let blocks = DynamicReportTransformer::new(&labels, 50)
            .transform(&[record], "")
            .unwrap();
        assert_eq!(blocks[2].text(), r#"1. {"Relator":"Smith","Processo":123}"#);
    }

    #[test]
    fn test_dynamic_report_with_date() {
        let labels = AgendaLabels::default();
        let blocks = DynamicReportTransformer::new(&labels, 50)
            .transform(&records(1), "05/03/2024")
            .unwrap();
        assert_eq!(blocks[1].text(), "DATE: 05/03/2024");
    }

    #[test]
    fn test_dynamic_report_truncates() {
        let labels = AgendaLabels::default();
        let blocks = DynamicReportTransformer::new(&labels, 3)
            .transform(&records(5), "")
            .unwrap();

        // タイトル + 総数 + 3行 + 省略行
        assert_eq!(blocks.len(), 6);
        let note = blocks.last().unwrap();
        assert_eq!(note.text(), "(...) Showing only 3 of 5 rows.");
        assert!(note.runs[0].italic);
        assert_eq!(note.spacing.before, Some(120));
    }

    #[test]
    fn test_dynamic_file_stem() {
        assert_eq!(dynamic_file_stem(""), "dynamic_agenda_report");
        assert_eq!(
            dynamic_file_stem("2024-03-05"),
            "dynamic_agenda_report_05-03-2024"
        );
    }
}

//! Agenda Transformer
//!
//! 案件行とヘッダー項目から、議事日程の段落列を組み立てる。
//! 出力は入力のみで決まる純粋関数です。

use std::collections::HashMap;

use crate::api::{AgendaLabels, LayoutConfig};
use crate::formatter::{normalize_name, split_lines, upper};
use crate::types::{FormattedBlock, RelatorGroup, Rgb, Row, Spacing, TextRun, ValidatedHeader};

/// 区切り線の文字列
pub(crate) const SEPARATOR: &str =
    "______________________________________________________________________________________";

/// 案件の審理システム
///
/// `Sistema de Tramitação`列の値（大文字化後）で判定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingSystem {
    /// `E-TCE`
    Electronic,
    /// `AP`
    Digital,
    /// それ以外（空を含む）
    Other,
}

impl RoutingSystem {
    pub fn from_cell(value: &str) -> Self {
        match upper(value).as_str() {
            "E-TCE" => RoutingSystem::Electronic,
            "AP" => RoutingSystem::Digital,
            _ => RoutingSystem::Other,
        }
    }

    /// ラベルと色
    pub fn label<'a>(&self, labels: &'a AgendaLabels) -> (&'a str, Rgb) {
        match self {
            RoutingSystem::Electronic => (labels.electronic_process.as_str(), Rgb::RED),
            RoutingSystem::Digital => (labels.digital_process.as_str(), Rgb::BLUE),
            RoutingSystem::Other => (labels.process.as_str(), Rgb::BLACK),
        }
    }
}

/// `Voto`列が`LISTADO`（大文字小文字を区別しない）なら一括採決の接尾辞を返す
pub fn list_vote_suffix<'a>(voto: &str, labels: &'a AgendaLabels) -> &'a str {
    if upper(voto) == "LISTADO" {
        labels.list_vote_suffix.as_str()
    } else {
        ""
    }
}

/// 報告者名で案件をグループ化する
///
/// 報告者名は前後の空白のみ除去して完全一致で比較します（アクセントや
/// 大文字小文字の違いは別グループ）。空の報告者名の行は除外され、
/// グループは報告者名の初出順に並びます。
pub fn group_by_relator(rows: &[Row]) -> Vec<RelatorGroup<'_>> {
    let mut groups: Vec<RelatorGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let relator = row.relator.trim();
        if relator.is_empty() {
            continue;
        }

        match index.get(relator) {
            Some(&i) => groups[i].rows.push(row),
            None => {
                index.insert(relator, groups.len());
                groups.push(RelatorGroup {
                    relator: relator.to_string(),
                    rows: vec![row],
                });
            }
        }
    }

    groups
}

/// 議事日程トランスフォーマー
#[derive(Debug)]
pub(crate) struct AgendaTransformer<'a> {
    labels: &'a AgendaLabels,
    layout: &'a LayoutConfig,
    /// 正規化済みの名簿
    roster: Vec<String>,
}

impl<'a> AgendaTransformer<'a> {
    pub fn new(labels: &'a AgendaLabels, layout: &'a LayoutConfig, roster: &[String]) -> Self {
        Self {
            labels,
            layout,
            roster: roster.iter().map(|name| normalize_name(name)).collect(),
        }
    }

    /// 報告者の肩書きを決定
    ///
    /// 正規化した報告者名が名簿のいずれかの名前を含めば常任、
    /// そうでなければ代理とします。
    pub fn relator_role(&self, relator: &str) -> &'a str {
        let normalized = normalize_name(relator);
        if self.roster.iter().any(|key| normalized.contains(key.as_str())) {
            self.labels.councilor.as_str()
        } else {
            self.labels.substitute_councilor.as_str()
        }
    }

    /// 段落列を生成
    pub fn transform(&self, rows: &[Row], header: &ValidatedHeader) -> Vec<FormattedBlock> {
        let mut blocks = self.header_blocks(header);

        let groups = group_by_relator(rows);
        log::debug!(
            "grouped {} rows into {} reporter sections",
            rows.len(),
            groups.len()
        );

        for group in &groups {
            self.push_group(&mut blocks, group);
        }

        blocks
    }

    fn header_blocks(&self, header: &ValidatedHeader) -> Vec<FormattedBlock> {
        let size = self.layout.header_size;
        let title = self
            .labels
            .title
            .replace("{ordinal}", &header.ordinal)
            .replace("{type}", &header.session_type);

        vec![
            FormattedBlock::new(vec![TextRun::new(title).bold().size(size)])
                .centered()
                .with_spacing(Spacing::after(self.layout.title_after)),
            FormattedBlock::new(vec![TextRun::new(format!(
                "{}{}",
                self.labels.date_prefix, header.date_local
            ))
            .bold()
            .size(size)])
            .centered()
            .with_spacing(Spacing::after(self.layout.date_after)),
            FormattedBlock::new(vec![TextRun::new(self.labels.time_line.clone())
                .bold()
                .size(size)])
            .centered()
            .with_spacing(Spacing::after(self.layout.time_after)),
            separator(),
        ]
    }

    fn push_group(&self, blocks: &mut Vec<FormattedBlock>, group: &RelatorGroup<'_>) {
        let reporter = format!(
            "{}{} {}",
            self.labels.reporter_prefix,
            self.relator_role(&group.relator),
            upper(&group.relator)
        );
        blocks.push(
            FormattedBlock::new(vec![TextRun::new(reporter)
                .bold()
                .size(self.layout.header_size)])
            .with_spacing(Spacing::both(self.layout.reporter_before, 0)),
        );
        blocks.push(self.spacer());

        for row in &group.rows {
            self.push_row(blocks, row);
        }

        blocks.push(separator());
    }

    fn push_row(&self, blocks: &mut Vec<FormattedBlock>, row: &Row) {
        let body = self.layout.body_size;
        let (label, color) = RoutingSystem::from_cell(&row.sistema_tramitacao).label(self.labels);
        let suffix = list_vote_suffix(&row.voto, self.labels);

        blocks.push(
            FormattedBlock::new(vec![
                TextRun::new(format!("{} ", label))
                    .bold()
                    .color(color)
                    .size(body),
                TextRun::new(format!(
                    "{}{}{}",
                    self.labels.number_prefix,
                    row.processo.trim(),
                    suffix
                ))
                .bold()
                .color(Rgb::BLACK)
                .size(body),
            ])
            .with_spacing(Spacing::after(self.layout.process_after)),
        );

        blocks.push(self.bold_line(upper(&row.orgao), self.layout.orgao_after));
        blocks.push(self.bold_line(upper(&row.tipo_processo), self.layout.tipo_after));

        for interessado in split_lines(&row.interessados) {
            blocks.push(self.plain_line(interessado, self.layout.interessado_after));
        }

        for advogado in split_lines(&row.advogados) {
            let line = self.labels.lawyer_line.replace("{name}", &advogado);
            blocks.push(self.plain_line(line, self.layout.advogado_after));
        }

        blocks.push(self.spacer());
    }

    fn bold_line(&self, text: String, after: u32) -> FormattedBlock {
        FormattedBlock::new(vec![TextRun::new(text).bold().size(self.layout.body_size)])
            .with_spacing(Spacing::after(after))
    }

    fn plain_line(&self, text: String, after: u32) -> FormattedBlock {
        FormattedBlock::new(vec![TextRun::new(text).size(self.layout.body_size)])
            .with_spacing(Spacing::after(after))
    }

    fn spacer(&self) -> FormattedBlock {
        FormattedBlock::new(vec![TextRun::new(" ")])
            .with_spacing(Spacing::after(self.layout.spacer_after))
    }
}

fn separator() -> FormattedBlock {
    FormattedBlock::new(vec![TextRun::new(SEPARATOR)]).with_spacing(Spacing::both(0, 0))
}

/// 議事日程のファイル名（拡張子なし、例: `agenda_10-01-2024`）
pub(crate) fn agenda_file_stem(header: &ValidatedHeader) -> String {
    format!("agenda_{}", header.date_token())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_ROSTER;
    use crate::types::HeaderInput;

    fn row(relator: &str) -> Row {
        Row {
            relator: relator.to_string(),
            ..Default::default()
        }
    }

    fn roster() -> Vec<String> {
        DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect()
    }

    fn header() -> ValidatedHeader {
        HeaderInput::new("1", "PLENO", "2024-01-10").validate().unwrap()
    }

    #[test]
    fn test_grouping_is_stable() {
        let rows = vec![
            Row { processo: "1".into(), ..row("B") },
            Row { processo: "2".into(), ..row("A") },
            Row { processo: "3".into(), ..row("B") },
        ];
        let groups = group_by_relator(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].relator, "B");
        assert_eq!(groups[1].relator, "A");
        let processos: Vec<&str> = groups[0].rows.iter().map(|r| r.processo.as_str()).collect();
        assert_eq!(processos, vec!["1", "3"]);
    }

    #[test]
    fn test_grouping_excludes_blank_relator() {
        assert!(group_by_relator(&[row("  ")]).is_empty());
        assert!(group_by_relator(&[row("")]).is_empty());
    }

    #[test]
    fn test_grouping_trims_relator() {
        let rows = vec![row("Smith"), row("Smith  "), row(" Smith")];
        let groups = group_by_relator(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows.len(), 3);
    }

    // 報告者名のアクセント・大文字小文字違いは別グループになるが、肩書きは同じになる
    #[test]
    fn test_accent_variants_split_groups_but_share_role() {
        let rows = vec![row("Marcos Loreto"), row("MARCOS LORÊTO")];
        let groups = group_by_relator(&rows);
        assert_eq!(groups.len(), 2);

        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let transformer = AgendaTransformer::new(&labels, &layout, &roster());
        assert_eq!(transformer.relator_role(&groups[0].relator), "COUNCILOR");
        assert_eq!(transformer.relator_role(&groups[1].relator), "COUNCILOR");
    }

    #[test]
    fn test_relator_role() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let transformer = AgendaTransformer::new(&labels, &layout, &roster());

        assert_eq!(transformer.relator_role("Conselheiro Valdecir Pascoal"), "COUNCILOR");
        assert_eq!(
            transformer.relator_role("dirceu rodolfo de melo júnior"),
            "COUNCILOR"
        );
        assert_eq!(transformer.relator_role("Smith"), "SUBSTITUTE COUNCILOR");
    }

    #[test]
    fn test_routing_system_labels() {
        let labels = AgendaLabels::default();
        assert_eq!(
            RoutingSystem::from_cell("E-TCE").label(&labels),
            ("ELECTRONIC PROCESS eTCE", Rgb::RED)
        );
        assert_eq!(
            RoutingSystem::from_cell("AP").label(&labels),
            ("DIGITAL PROCESS TCE", Rgb::BLUE)
        );
        assert_eq!(
            RoutingSystem::from_cell("").label(&labels),
            ("PROCESS", Rgb::BLACK)
        );
        assert_eq!(
            RoutingSystem::from_cell("Físico").label(&labels),
            ("PROCESS", Rgb::BLACK)
        );
    }

    #[test]
    fn test_list_vote_suffix() {
        let labels = AgendaLabels::default();
        assert_eq!(list_vote_suffix("Listado", &labels), " (Voto em lista)");
        assert_eq!(list_vote_suffix(" LISTADO ", &labels), " (Voto em lista)");
        assert_eq!(list_vote_suffix("Destacado", &labels), "");
        assert_eq!(list_vote_suffix("", &labels), "");
    }

    #[test]
    fn test_header_blocks() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let blocks = AgendaTransformer::new(&labels, &layout, &roster()).transform(&[], &header());

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].text(), "AGENDA OF THE 1ª ORDINARY SESSION OF PLENO");
        assert_eq!(blocks[1].text(), "DATE: 10/01/2024");
        assert_eq!(blocks[2].text(), "TIME: 10h");
        assert_eq!(blocks[3].text(), SEPARATOR);
        assert!(blocks[..3].iter().all(|b| b.is_bold()));
    }

    #[test]
    fn test_row_without_parties_keeps_process_lines() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let rows = vec![Row {
            processo: "77".into(),
            orgao: "órgão x".into(),
            tipo_processo: "auditoria".into(),
            ..row("Smith")
        }];
        let blocks = AgendaTransformer::new(&labels, &layout, &roster()).transform(&rows, &header());

        // ヘッダー4 + 報告者 + 空行 + 案件/órgão/tipo + 空行 + 区切り
        assert_eq!(blocks.len(), 4 + 2 + 3 + 1 + 1);
        assert_eq!(blocks[6].text(), "PROCESS No 77");
        assert_eq!(blocks[7].text(), "ÓRGÃO X");
        assert_eq!(blocks[8].text(), "AUDITORIA");
        assert_eq!(blocks[9].text(), " ");
        assert_eq!(blocks[10].text(), SEPARATOR);
    }

    #[test]
    fn test_parties_and_lawyers_are_plain() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let rows = vec![Row {
            interessados: "Ana\n\nBeto ".into(),
            advogados: "Carla\r\nDiego".into(),
            ..row("Smith")
        }];
        let blocks = AgendaTransformer::new(&labels, &layout, &roster()).transform(&rows, &header());
        let texts: Vec<String> = blocks.iter().map(|b| b.text()).collect();

        let start = texts.iter().position(|t| t == "Ana").unwrap();
        assert_eq!(
            &texts[start..start + 4],
            &["Ana", "Beto", "(Adv. Carla)", "(Adv. Diego)"]
        );
        assert!(blocks[start..start + 4].iter().all(|b| !b.runs[0].bold));
    }

    #[test]
    fn test_process_line_colors() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let rows = vec![Row {
            processo: " 24100001-0 ".into(),
            sistema_tramitacao: "e-tce".into(),
            ..row("Smith")
        }];
        let blocks = AgendaTransformer::new(&labels, &layout, &roster()).transform(&rows, &header());
        let process = &blocks[6];

        assert_eq!(process.runs.len(), 2);
        assert_eq!(process.runs[0].text, "ELECTRONIC PROCESS eTCE ");
        assert_eq!(process.runs[0].color, Some(Rgb::RED));
        assert_eq!(process.runs[1].text, "No 24100001-0");
        assert_eq!(process.runs[1].color, Some(Rgb::BLACK));
        assert!(process.is_bold());
    }

    fn full_row() -> Row {
        Row {
            processo: "10".into(),
            orgao: "prefeitura".into(),
            tipo_processo: "auditoria".into(),
            interessados: "Fulano".into(),
            advogados: "Beltrano".into(),
            ..row("Smith")
        }
    }

    fn sizes(block: &FormattedBlock) -> Vec<Option<u32>> {
        block.runs.iter().map(|run| run.size).collect()
    }

    #[test]
    fn test_default_layout_spacing_and_sizes() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig::default();
        let blocks =
            AgendaTransformer::new(&labels, &layout, &roster()).transform(&[full_row()], &header());

        // ヘッダー3段落 + 区切り + 報告者 + 空行 + 案件6段落 + 区切り
        assert_eq!(blocks.len(), 13);

        let expected = [
            (Spacing::after(120), vec![Some(22)]),
            (Spacing::after(80), vec![Some(22)]),
            (Spacing::after(140), vec![Some(22)]),
            (Spacing::both(0, 0), vec![None]),
            (Spacing::both(240, 0), vec![Some(22)]),
            (Spacing::after(120), vec![None]),
            (Spacing::after(120), vec![Some(20), Some(20)]),
            (Spacing::after(80), vec![Some(20)]),
            (Spacing::after(80), vec![Some(20)]),
            (Spacing::after(60), vec![Some(20)]),
            (Spacing::after(50), vec![Some(20)]),
            (Spacing::after(120), vec![None]),
            (Spacing::both(0, 0), vec![None]),
        ];
        for (idx, (block, (spacing, run_sizes))) in blocks.iter().zip(expected).enumerate() {
            assert_eq!(block.spacing, spacing, "spacing of block {}", idx);
            assert_eq!(sizes(block), run_sizes, "run sizes of block {}", idx);
        }
    }

    #[test]
    fn test_custom_layout_reaches_blocks() {
        let labels = AgendaLabels::default();
        let layout = LayoutConfig {
            header_size: 28,
            body_size: 24,
            title_after: 1,
            date_after: 2,
            time_after: 3,
            reporter_before: 4,
            spacer_after: 5,
            process_after: 6,
            orgao_after: 7,
            tipo_after: 8,
            interessado_after: 9,
            advogado_after: 10,
            ..LayoutConfig::default()
        };
        let blocks =
            AgendaTransformer::new(&labels, &layout, &roster()).transform(&[full_row()], &header());

        let afters: Vec<Option<u32>> = blocks.iter().map(|b| b.spacing.after).collect();
        assert_eq!(
            afters,
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(0),
                Some(0),
                Some(5),
                Some(6),
                Some(7),
                Some(8),
                Some(9),
                Some(10),
                Some(5),
                Some(0),
            ]
        );
        assert_eq!(blocks[4].spacing.before, Some(4));
        assert_eq!(sizes(&blocks[0]), vec![Some(28)]);
        assert_eq!(sizes(&blocks[4]), vec![Some(28)]);
        assert_eq!(sizes(&blocks[6]), vec![Some(24), Some(24)]);
        assert_eq!(sizes(&blocks[10]), vec![Some(24)]);
    }

    #[test]
    fn test_agenda_file_stem() {
        assert_eq!(agenda_file_stem(&header()), "agenda_10-01-2024");
    }
}

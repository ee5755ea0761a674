//! Transform Module
//!
//! 行データを文書の段落列に変換するトランスフォーマー群。
//! 使用するトランスフォーマーは`ReportKind`で選択します。

mod agenda;
mod dynamic;

pub use agenda::{group_by_relator, list_vote_suffix, RoutingSystem};

pub(crate) use agenda::{agenda_file_stem, AgendaTransformer};
pub(crate) use dynamic::{dynamic_file_stem, DynamicReportTransformer};

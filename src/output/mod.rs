//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod docx;

use crate::api::{LayoutConfig, OutputFormat};
use crate::error::PautaError;
use crate::types::FormattedBlock;

pub use docx::DocxFormatter;
pub(crate) use docx::MAX_FONT_SIZE;

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（DOCX, JSON）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Docx,
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Docx => OutputFormatter::Docx,
            OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// 段落列を指定されたフォーマットのバイト列に変換する
    ///
    /// # 引数
    ///
    /// * `blocks` - 出力する段落列
    /// * `layout` - フォントと既定サイズ（DOCXのみ使用）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 出力に成功した場合
    /// * `Err(PautaError)` - エラーが発生した場合
    pub fn render(
        &self,
        blocks: &[FormattedBlock],
        layout: &LayoutConfig,
    ) -> Result<Vec<u8>, PautaError> {
        match self {
            OutputFormatter::Docx => {
                DocxFormatter::new(layout.font.clone(), layout.body_size).render(blocks)
            }
            OutputFormatter::Json => Ok(serde_json::to_vec_pretty(blocks)?),
        }
    }
}

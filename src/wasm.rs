//! WASM Bindings
//!
//! ブラウザから呼び出すためのWebAssemblyバインディング。
//! エラーは文字列としてJavaScript側に返します。

use wasm_bindgen::prelude::*;

use crate::api::{AgendaLabels, ReportKind};
use crate::builder::GeneratorBuilder;
use crate::types::{GeneratedDocument, HeaderInput};

/// Generated document handed back to JavaScript
///
/// `filename` follows the document naming (`agenda_{DD-MM-YYYY}.docx` or
/// `dynamic_agenda_report[_{DD-MM-YYYY}].docx`).
#[wasm_bindgen]
pub struct GeneratedFile {
    filename: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl GeneratedFile {
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }
}

impl From<GeneratedDocument> for GeneratedFile {
    fn from(document: GeneratedDocument) -> Self {
        Self {
            filename: document.filename,
            bytes: document.bytes,
        }
    }
}

/// Initialize panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Generate an agenda document from XLSX bytes
///
/// # Arguments
/// * `xlsx_bytes` - XLSX file content as a Uint8Array from JavaScript
/// * `session_number` / `session_type` / `session_date` - header fields (`YYYY-MM-DD` date)
/// * `report` - optional report tag (`agenda` or `dynamic`)
/// * `locale` - optional label set (`pt-BR` for the Portuguese labels)
///
/// # Returns
/// * Success: `GeneratedFile` with the file name and DOCX bytes
/// * Error: short status message
#[wasm_bindgen]
pub fn generate_agenda(
    xlsx_bytes: &[u8],
    session_number: String,
    session_type: String,
    session_date: String,
    report: Option<String>,
    locale: Option<String>,
) -> Result<GeneratedFile, String> {
    let kind = match report.as_deref() {
        Some(tag) => {
            ReportKind::from_tag(tag).ok_or_else(|| format!("Invalid report kind: {}", tag))?
        }
        None => ReportKind::Agenda,
    };
    let labels = locale
        .as_deref()
        .map(AgendaLabels::from_locale)
        .unwrap_or_default();

    let generator = GeneratorBuilder::new()
        .with_report_kind(kind)
        .with_labels(labels)
        .build()
        .map_err(|e| e.status_message())?;

    let header = HeaderInput::new(session_number, session_type, session_date);
    let document = generator
        .generate_from_bytes(xlsx_bytes.to_vec(), &header)
        .map_err(|e| {
            log::error!("document generation failed: {}", e);
            e.status_message()
        })?;

    Ok(GeneratedFile::from(document))
}

/// Preview the first rows of an XLSX file as pretty-printed JSON
#[wasm_bindgen]
pub fn preview_rows(xlsx_bytes: &[u8]) -> Result<String, String> {
    let generator = GeneratorBuilder::new()
        .build()
        .map_err(|e| e.status_message())?;
    let records = generator
        .read_records(xlsx_bytes.to_vec())
        .map_err(|e| e.status_message())?;
    generator.preview(&records).map_err(|e| e.status_message())
}

/// Get version information
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

//! pautazero - Pure-Rust session agenda generator
//!
//! This crate reads the first worksheet of an XLSX file, groups the listed
//! cases by reporter, and renders a formatted session agenda as a DOCX document.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pautazero::{GeneratorBuilder, HeaderInput};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a generator with default settings
//!     let generator = GeneratorBuilder::new().build()?;
//!
//!     // Read the spreadsheet
//!     let bytes = std::fs::read("pauta.xlsx")?;
//!     let records = generator.read_records(bytes)?;
//!
//!     // Generate the agenda
//!     let header = HeaderInput::new("1", "Pleno", "2024-01-10");
//!     let document = generator.generate(&records, &header)?;
//!
//!     // agenda_10-01-2024.docx
//!     std::fs::write(&document.filename, &document.bytes)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use pautazero::{AgendaLabels, GeneratorBuilder, LayoutConfig, ReportKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = GeneratorBuilder::new()
//!         .with_report_kind(ReportKind::Agenda)
//!         .with_labels(AgendaLabels::pt_br())  // Portuguese labels
//!         .with_layout(LayoutConfig {
//!             font: "Arial".to_string(),
//!             ..LayoutConfig::default()
//!         })
//!         .with_roster(["Ana Souza", "João Lima"])
//!         .build()?;
//!
//!     let bytes = std::fs::read("pauta.xlsx")?;
//!     let records = generator.read_records(bytes)?;
//!     println!("{}", generator.preview(&records)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Interactive Hosts
//!
//! [`Session`] keeps the loaded rows, the header fields and the status text
//! for a UI, and discards spreadsheet reads that finish after a newer
//! selection was started.
//!
//! ```rust,no_run
//! use pautazero::{GeneratorBuilder, HeaderInput, Session};
//!
//! # fn main() -> Result<(), pautazero::PautaError> {
//! let mut session = Session::new(GeneratorBuilder::new().build()?);
//! let ticket = session.begin_selection("pauta.xlsx")?;
//! session.load(ticket, std::fs::read("pauta.xlsx")?);
//! session.set_header(HeaderInput::new("1", "Pleno", "2024-01-10"));
//! if session.can_generate() {
//!     let document = session.generate()?;
//!     println!("{}", session.status());
//! #   let _ = document;
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod session;
mod transform;
mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

// 公開API
pub use api::{AgendaLabels, LayoutConfig, OutputFormat, ReportKind, DEFAULT_ROSTER};
pub use builder::{Generator, GeneratorBuilder};
pub use error::PautaError;
pub use formatter::{
    format_date_local, normalize_name, ordinal_suffix, ordinal_suffix_f64, safe_filename,
    split_lines, upper,
};
pub use output::DocxFormatter;
pub use parser::{check_file_name, read_records};
pub use session::{SelectionTicket, Session};
pub use transform::{group_by_relator, list_vote_suffix, RoutingSystem};
pub use types::{
    columns, Alignment, CellKind, FormattedBlock, GeneratedDocument, HeaderInput, RelatorGroup,
    Rgb, Row, SheetRecord, Spacing, TextRun, ValidatedHeader,
};

//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using pautazero for turning an agenda spreadsheet into a DOCX document.
//!
//! ```text
//! cargo run --example cli_tool -- pauta.xlsx --number 1 --session-type PLENO --date 2024-01-10
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use pautazero::{
    check_file_name, AgendaLabels, GeneratorBuilder, HeaderInput, LayoutConfig, OutputFormat,
    PautaError, ReportKind,
};

#[derive(Parser)]
#[command(name = "cli_tool")]
#[command(version)]
#[command(about = "Generate a session agenda DOCX from an XLSX spreadsheet", long_about = None)]
struct Cli {
    /// Input XLSX file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Session number
    #[arg(short, long, default_value = "")]
    number: String,

    /// Session type (e.g. PLENO)
    #[arg(short = 't', long, default_value = "")]
    session_type: String,

    /// Session date (YYYY-MM-DD)
    #[arg(short, long, default_value = "")]
    date: String,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Report to generate
    #[arg(long, value_enum, default_value = "agenda")]
    report: Report,

    /// Use Portuguese labels
    #[arg(long)]
    pt_br: bool,

    /// Labels JSON file (overrides --pt-br)
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Layout JSON file
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Print the first rows as JSON instead of generating
    #[arg(long)]
    preview: bool,

    /// Write the paragraph list as JSON instead of DOCX
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Report {
    Agenda,
    Dynamic,
}

impl From<Report> for ReportKind {
    fn from(r: Report) -> Self {
        match r {
            Report::Agenda => ReportKind::Agenda,
            Report::Dynamic => ReportKind::DynamicReport,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(Some(path)) => println!("Generated: {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Option<PathBuf>, PautaError> {
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_file_name(&file_name)?;

    let labels = match &cli.labels {
        Some(path) => read_json::<AgendaLabels>(path)?,
        None if cli.pt_br => AgendaLabels::pt_br(),
        None => AgendaLabels::default(),
    };
    let layout = match &cli.layout {
        Some(path) => read_json::<LayoutConfig>(path)?,
        None => LayoutConfig::default(),
    };
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Docx
    };

    let generator = GeneratorBuilder::new()
        .with_report_kind(cli.report.into())
        .with_output_format(format)
        .with_labels(labels)
        .with_layout(layout)
        .build()?;

    let records = generator.read_records(fs::read(&cli.input)?)?;

    if cli.preview {
        println!("{}", generator.preview(&records)?);
        return Ok(None);
    }

    let header = HeaderInput::new(&cli.number, &cli.session_type, &cli.date);
    let document = generator.generate(&records, &header)?;

    fs::create_dir_all(&cli.output)?;
    let path = cli.output.join(&document.filename);
    fs::write(&path, &document.bytes)?;
    Ok(Some(path))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PautaError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn handle_error(error: PautaError) {
    eprintln!("Error: {}", error);
    match error {
        PautaError::FileType(_) => {
            eprintln!("The input must be an .xlsx file.");
        }
        PautaError::Parse(_) | PautaError::Zip(_) => {
            eprintln!("The file may not be a valid XLSX file or may be corrupted.");
        }
        PautaError::Validation(_) => {
            eprintln!("Pass --number, --session-type and --date (YYYY-MM-DD).");
        }
        PautaError::Config(_) => {
            eprintln!("Please check the labels and layout settings.");
        }
        PautaError::SecurityViolation(_) => {
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
        _ => {}
    }
}

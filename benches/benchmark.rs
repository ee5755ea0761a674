//! パフォーマンスベンチマーク
//!
//! フィクスチャはrust_xlsxwriterでメモリ上に生成します。
//!
//! - 読み込み: XLSX → 行レコード
//! - 変換: 行レコード → 段落列
//! - 生成: XLSX → DOCX（全工程）

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pautazero::{GeneratorBuilder, HeaderInput};
use rust_xlsxwriter::{Workbook, XlsxError};

const HEADERS: [&str; 8] = [
    "Relator",
    "Processo",
    "Órgão",
    "Tipo Processo",
    "Interessados",
    "Advogados",
    "Sistema de Tramitação",
    "Voto",
];

/// `rows`件の案件を含むXLSXを生成
fn generate_agenda(rows: u32) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for row in 1..=rows {
        let system = match row % 3 {
            0 => "E-TCE",
            1 => "AP",
            _ => "",
        };
        let values = [
            format!("Relator {}", row % 12),
            format!("{}/2024", row),
            format!("Prefeitura {}", row % 40),
            "Prestação de Contas".to_string(),
            format!("Interessado A{}\nInteressado B{}", row, row),
            format!("Advogado {}", row),
            system.to_string(),
            if row % 5 == 0 { "Listado" } else { "" }.to_string(),
        ];
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn header() -> HeaderInput {
    HeaderInput::new("12", "PLENO", "2024-01-10")
}

fn benchmark_read(c: &mut Criterion) {
    let generator = GeneratorBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("read_records");
    for rows in [100u32, 1_000, 10_000] {
        let data = generate_agenda(rows).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| generator.read_records(black_box(data.clone())).unwrap());
        });
    }
    group.finish();
}

fn benchmark_transform(c: &mut Criterion) {
    let generator = GeneratorBuilder::new().build().unwrap();
    let header = header();

    let mut group = c.benchmark_group("transform");
    for rows in [100u32, 1_000, 10_000] {
        let records = generator
            .read_records(generate_agenda(rows).unwrap())
            .unwrap();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &records, |b, records| {
            b.iter(|| generator.transform(black_box(records), &header).unwrap());
        });
    }
    group.finish();
}

fn benchmark_generate(c: &mut Criterion) {
    let generator = GeneratorBuilder::new().build().unwrap();
    let header = header();
    let data = generate_agenda(1_000).unwrap();

    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(20);
    group.bench_function("xlsx_to_docx_1000_rows", |b| {
        b.iter(|| {
            generator
                .generate_from_bytes(black_box(data.clone()), &header)
                .unwrap()
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(10))
        .warm_up_time(std::time::Duration::from_secs(3));
    targets = benchmark_read, benchmark_transform, benchmark_generate
}

criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use station_register::models::Dataset;
use station_register::processors::{CoordinateNormalizer, Source, StationPipeline};
use station_register::projection::GaussKruger;
use station_register::utils::coordinates::decmin_to_decdeg;

fn pipeline() -> StationPipeline {
    StationPipeline::with_normalizer(CoordinateNormalizer::with_converter(Box::new(
        GaussKruger::sweref99_tm(),
    )))
}

fn degree_minute_template(rows: usize) -> Dataset {
    let mut dataset = Dataset::new(
        ["Namn", "Position WGS84 DM N (DDMM.mm)", "Position WGS84 DM E (DDMM.mm)", "Radie (m)"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    );
    for i in 0..rows {
        let minutes = (i % 6000) as f64 / 100.0;
        dataset.push_row(vec![
            format!("Station {}", i),
            format!("59{:05.2}", minutes),
            format!("018{:05.2}", minutes),
            if i % 3 == 0 { String::new() } else { "500".to_string() },
        ]);
    }
    dataset
}

fn projected_template(rows: usize) -> Dataset {
    let mut dataset = Dataset::new(
        ["Namn", "Position SWEREF99 TM N (xxxxxx)", "Position SWEREF99 TM E (xxxxxx)"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    );
    for i in 0..rows {
        dataset.push_row(vec![
            format!("Station {}", i),
            format!("{}", 6_175_000 + i * 97),
            format!("{}", 375_000 + i * 41),
        ]);
    }
    dataset
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("station_pipeline");
    let pipeline = pipeline();

    for rows in [100, 1_000, 10_000] {
        let dm = degree_minute_template(rows);
        group.bench_with_input(BenchmarkId::new("degree_minute", rows), &dm, |b, ds| {
            b.iter(|| pipeline.run(black_box(ds.clone()), Source::Template).unwrap())
        });

        let projected = projected_template(rows);
        group.bench_with_input(BenchmarkId::new("projected", rows), &projected, |b, ds| {
            b.iter(|| pipeline.run(black_box(ds.clone()), Source::Template).unwrap())
        });
    }
    group.finish();
}

fn bench_degree_minute_parse(c: &mut Criterion) {
    c.bench_function("decmin_to_decdeg", |b| {
        b.iter(|| decmin_to_decdeg(black_box("01823.56")))
    });
}

criterion_group!(benches, bench_pipeline, bench_degree_minute_parse);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::pieces::{repo::MemoryPieceRepository, validation::validate_piece, PieceService};

fn payload() -> serde_json::Value {
    serde_json::json!({
        "pieceName": "Bench Piece",
        "compositorName": "Bench Composer",
        "durationMinutes": 12.5,
        "dateOfRelease": "2015-03-01",
        "compositorIsAlive": true,
        "instruments": ["Piano", "Violin", "Cello", "Flute"],
        "difficultyLevel": 4,
        "styles": ["Classical", "Romantic"],
        "compositorImageUrl": "https://example.com/bench.jpg"
    })
}

fn bench_validate(c: &mut Criterion) {
    let raw = payload();
    c.bench_function("piece_validate", |b| {
        b.iter(|| validate_piece(&raw).unwrap());
    });
}

fn bench_add_and_list(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = PieceService::new(Arc::new(MemoryPieceRepository::new()));
    let piece = validate_piece(&payload()).unwrap();

    // pre-populate outside of the measured loop
    for _ in 0..500 {
        rt.block_on(svc.add(piece.clone())).unwrap();
    }

    c.bench_function("piece_year_range_500", |b| {
        b.iter(|| rt.block_on(svc.get_by_year_range(2010, 2020)).unwrap());
    });
}

criterion_group!(benches, bench_validate, bench_add_and_list);
criterion_main!(benches);

//! Performance benchmarks for mashability scoring and segmentation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mashability::segmentation::similarity::self_distance_matrix;
use mashability::{
    detect_boundaries, score_mashability, BeatSyncChroma, BeatSyncSpectrum, FeatureMatrix,
    MashabilityConfig, SegmentationConfig, TrackFeatures,
};

/// Synthetic track: chroma and pitch spectrum driven by a slow sine per beat
fn synthetic_track(beats: usize, phase: f64) -> TrackFeatures {
    let chroma: Vec<Vec<f64>> = (0..beats)
        .map(|b| {
            (0..12)
                .map(|p| 0.5 + 0.5 * ((b as f64 * 0.7 + p as f64 * 0.52 + phase).sin()))
                .collect()
        })
        .collect();
    let spectrum: Vec<Vec<f64>> = (0..beats)
        .map(|b| {
            (0..96)
                .map(|p| 1.0 + ((b as f64 * 0.3 + p as f64 * 0.1 + phase).cos()).abs())
                .collect()
        })
        .collect();
    TrackFeatures::new(
        BeatSyncChroma::from_beats(&chroma).unwrap(),
        BeatSyncSpectrum::from_beats(&spectrum).unwrap(),
        (1..beats).map(|b| b as f64 * 2.0).collect(),
        124.0,
    )
    .unwrap()
}

fn bench_score_mashability(c: &mut Criterion) {
    // 64-bar base against a 128-bar candidate
    let base = synthetic_track(64, 0.0);
    let candidate = synthetic_track(128, 1.3);
    let config = MashabilityConfig::default();

    c.bench_function("score_mashability_64x128", |b| {
        b.iter(|| {
            let _ = score_mashability(black_box(&base), black_box(&candidate), black_box(&config));
        });
    });
}

fn bench_detect_boundaries(c: &mut Criterion) {
    let columns: Vec<Vec<f64>> = (0..512)
        .map(|f| (0..24).map(|d| ((f / 64) as f64 + d as f64 * 0.1).sin()).collect())
        .collect();
    let distances = self_distance_matrix(&FeatureMatrix::from_columns(&columns).unwrap());
    let config = SegmentationConfig::default();

    c.bench_function("detect_boundaries_512", |b| {
        b.iter(|| {
            let _ = detect_boundaries(black_box(&distances), black_box(&config));
        });
    });
}

criterion_group!(benches, bench_score_mashability, bench_detect_boundaries);
criterion_main!(benches);

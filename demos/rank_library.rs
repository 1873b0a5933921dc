//! Example: Rank a small synthetic library against a base track
//!
//! Run with `RUST_LOG=debug` to see each scoring stage.

use mashability::{rank_candidates, BeatSyncChroma, BeatSyncSpectrum, MashabilityConfig, TrackFeatures};

fn synthetic_track(pitches: &[usize]) -> Result<TrackFeatures, mashability::MashabilityError> {
    let chroma: Vec<Vec<f64>> = pitches
        .iter()
        .map(|&p| {
            let mut col = vec![0.05; 12];
            col[p % 12] = 1.0;
            col[(p + 7) % 12] = 0.5;
            col
        })
        .collect();
    let spectrum: Vec<Vec<f64>> = pitches.iter().map(|&p| vec![1.0 + (p % 3) as f64; 48]).collect();
    TrackFeatures::new(
        BeatSyncChroma::from_beats(&chroma)?,
        BeatSyncSpectrum::from_beats(&spectrum)?,
        (1..pitches.len()).map(|b| b as f64 * 1.9).collect(),
        126.0,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let base = synthetic_track(&[0, 5, 7, 0, 9, 5, 7, 0])?;
    let library = vec![
        ("audio_files/fifth_up.mp3".to_string(), synthetic_track(&[2, 7, 0, 2, 7, 9, 2, 4, 9, 2, 5])?),
        ("audio_files/same.mp3".to_string(), synthetic_track(&[0, 5, 7, 0, 9, 5, 7, 0, 0])?),
        ("audio_files/short.mp3".to_string(), synthetic_track(&[0, 5, 7])?),
    ];

    let config = MashabilityConfig::default();
    let ranking = rank_candidates(&base, &library, &config)?;

    println!("file,mashability,pitch_shift,beat_offset");
    for record in &ranking.records {
        println!(
            "{},{:.4},{},{}",
            record.file, record.mashability, record.pitch_shift, record.beat_offset
        );
    }
    for skipped in &ranking.skipped {
        eprintln!("Skipping {}: {}", skipped.file, skipped.reason);
    }

    Ok(())
}

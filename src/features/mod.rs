//! Feature containers
//!
//! Typed wrappers around the matrices a feature provider delivers:
//! - Dense matrix storage
//! - Beat-synchronous chroma (12 pitch classes)
//! - Beat-synchronous pitch spectrum
//! - Per-track bundle and the provider seam

pub mod chroma;
pub mod matrix;
pub mod spectrum;
pub mod track;

pub use chroma::BeatSyncChroma;
pub use matrix::FeatureMatrix;
pub use spectrum::BeatSyncSpectrum;
pub use track::{FeatureProvider, TrackFeatures};

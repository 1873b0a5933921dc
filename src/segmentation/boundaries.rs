//! Boundary picking on a novelty curve
//!
//! A boundary is a peak of the novelty curve at a frame whose diagonal window
//! lies entirely inside the matrix. Frames closer than half a kernel to either
//! end see a zero-padded window, so their response reflects the padding and
//! not the music; they are never reported.
//!
//! A checkerboard of half-width `h` spreads a single change over `±h` frames,
//! so peaks closer than `h` are merged into the stronger one.

use crate::config::{SegmentationConfig, FLOAT_EPSILON};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Fraction of the curve's largest magnitude below which differences are
/// rounding noise
const NOISE_FLOOR_RATIO: f64 = 1e-9;

/// One detected boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Frame (beat) index of the boundary
    pub frame: usize,

    /// Novelty value at the boundary
    pub strength: f64,
}

/// Frames whose `kernel_size` window on the diagonal needs no padding
///
/// Empty when the curve is shorter than the kernel.
pub fn interior_frames(len: usize, kernel_size: usize) -> Range<usize> {
    let half = kernel_size / 2;
    if kernel_size == 0 || len < kernel_size {
        return 0..0;
    }
    // Window of frame i ends at i - half + kernel_size
    half..len - kernel_size + half + 1
}

/// Find boundaries in a novelty curve
///
/// # Arguments
///
/// * `novelty` - Novelty curve from the diagonal convolver (positive peaks
///   mark changes)
/// * `config` - Kernel size (edge guard and spacing), peak threshold and
///   minimum boundary distance
///
/// # Returns
///
/// Boundaries in ascending frame order
///
/// # Algorithm
///
/// 1. Restrict to [`interior_frames`]
/// 2. Find peaks that rise above both sides by more than the noise floor;
///    a flat top reports its middle frame
/// 3. Keep peaks at or above the threshold, taken relative to the largest
///    interior value when it lies in (0, 1)
/// 4. Sweep in frame order, merging peaks closer than
///    `max(min_boundary_distance, kernel_size / 2)` into the stronger one
pub fn find_boundaries(novelty: &[f64], config: &SegmentationConfig) -> Vec<Boundary> {
    let frames = interior_frames(novelty.len(), config.kernel_size);
    let spacing = config.min_boundary_distance.max(config.kernel_size / 2).max(1);

    log::debug!(
        "Picking boundaries in {} novelty frames (interior {}..{}), spacing {}",
        novelty.len(),
        frames.start,
        frames.end,
        spacing
    );

    let scale = novelty.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if frames.is_empty() || scale < FLOAT_EPSILON {
        return vec![];
    }
    let floor = scale * NOISE_FLOOR_RATIO;

    let interior_max = novelty[frames.clone()]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if interior_max <= floor {
        log::debug!("No interior novelty above the noise floor");
        return vec![];
    }

    let cutoff = if config.peak_threshold > 0.0 && config.peak_threshold < 1.0 {
        interior_max * config.peak_threshold
    } else {
        config.peak_threshold
    };

    let mut boundaries: Vec<Boundary> = Vec::new();
    for peak in interior_peaks(novelty, frames, floor) {
        if peak.strength < cutoff || peak.strength <= floor {
            continue;
        }
        match boundaries.last_mut() {
            Some(prev) if peak.frame - prev.frame < spacing => {
                if peak.strength > prev.strength {
                    *prev = peak;
                }
            }
            _ => boundaries.push(peak),
        }
    }

    log::debug!("Found {} boundaries", boundaries.len());

    boundaries
}

/// Peaks whose (plateau) centre falls inside `frames`
fn interior_peaks(novelty: &[f64], frames: Range<usize>, floor: f64) -> Vec<Boundary> {
    let mut peaks = Vec::new();
    let len = novelty.len();

    let mut i = frames.start.max(1);
    while i < frames.end && i + 1 < len {
        if novelty[i] - novelty[i - 1] <= floor {
            i += 1;
            continue;
        }

        // Rising edge: walk across any flat top
        let top = novelty[i];
        let mut j = i;
        while j + 1 < len && (novelty[j + 1] - top).abs() <= floor {
            j += 1;
        }

        if j + 1 < len && top - novelty[j + 1] > floor {
            let frame = (i + j) / 2;
            if frames.contains(&frame) {
                peaks.push(Boundary {
                    frame,
                    strength: novelty[frame],
                });
            }
        }
        i = j + 1;
    }

    peaks
}

//! Sound level metering over 16-bit PCM samples.
//!
//! Both metrics are normalized to `0.0..=1.0` against full scale
//! (`i16::MAX`). Used to compute the sound level reported with each
//! recorded buffer.

/// RMS level of `samples`, normalized to `0.0..=1.0`.
///
/// Returns 0.0 for an empty slice.
pub fn rms_level(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples
        .iter()
        .map(|&s| {
            let normalized = s as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}

/// Peak absolute level of `samples`, normalized to `0.0..=1.0`.
pub fn peak_level(samples: &[i16]) -> f32 {
    samples
        .iter()
        .map(|&s| (s as f32 / i16::MAX as f32).abs())
        .fold(0.0, f32::max)
}

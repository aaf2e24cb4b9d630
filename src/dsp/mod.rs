pub mod energy;
pub mod filter;

use crate::error::AnalysisError;

/// User-facing filter configuration. Validated against a concrete sample
/// rate before any samples are processed.
#[derive(Clone, Copy, Debug)]
pub struct FilterParams {
    /// Band-pass center frequency in Hz.
    pub center_hz: f32,
    /// Resonance; higher values narrow the passband.
    pub q: f32,
}

impl FilterParams {
    /// Center frequency divided by the sample rate, checked against
    /// Nyquist. Must be recomputed whenever the sample rate changes.
    pub fn normalized(&self, sample_rate: u32) -> Result<f32, AnalysisError> {
        let nyquist = sample_rate as f32 / 2.0;
        if !(self.center_hz > 0.0 && self.center_hz < nyquist) {
            return Err(AnalysisError::Configuration(format!(
                "center frequency {} Hz outside (0, {}) Hz at {} Hz sample rate",
                self.center_hz, nyquist, sample_rate
            )));
        }
        if !(self.q > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "q must be positive, got {}",
                self.q
            )));
        }
        Ok(self.center_hz / sample_rate as f32)
    }
}

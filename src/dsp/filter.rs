use bytemuck::{Pod, Zeroable};

/// Four simultaneous band values: bypass, low-pass, band-pass, high-pass.
/// Depending on the stage this holds a per-sample filter output, a
/// per-window dB level, or a normalized meter scale. `repr(C)` with four
/// `f32` fields so a value is exactly its 16-byte native-order layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BandLevels {
    pub raw: f32,
    pub low: f32,
    pub band: f32,
    pub high: f32,
}

/// Chamberlin state-variable filter producing all four band outputs per
/// input sample. The two integrator registers are the filter's memory of
/// prior samples and persist across calls; `set_parameter` only touches
/// the coefficients, so parameters can change mid-stream without
/// resetting state.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultibandFilter {
    low: f32,
    band: f32,
    f: f32,
    q_inv: f32,
}

/// Normalized frequencies at or above 0.5 violate Nyquist and make the
/// recursion unstable; inputs are clamped into this open interval.
const MIN_NORMALIZED_FREQ: f32 = 1.0e-5;
const MAX_NORMALIZED_FREQ: f32 = 0.499;

impl MultibandFilter {
    /// Update coefficients from a frequency already normalized by the
    /// sample rate: `f = 2 sin(pi nf)`, `q_inv = 1/q`. Callers re-supply
    /// the parameter whenever the sample rate or target frequency
    /// changes; q must be positive (validated by `FilterParams`).
    ///
    /// The clamp enforces the Nyquist bound only. As with any Chamberlin
    /// topology the recursion can still ring near the top of the range
    /// at low Q, so callers keep centers well below Nyquist.
    pub fn set_parameter(&mut self, normalized_freq: f32, q: f32) {
        let nf = normalized_freq.clamp(MIN_NORMALIZED_FREQ, MAX_NORMALIZED_FREQ);
        self.f = 2.0 * (std::f32::consts::PI * nf).sin();
        self.q_inv = 1.0 / q;
    }

    /// Advance the filter by one sample and return the four concurrent
    /// band outputs. The update order is load-bearing: high is computed
    /// from the previous registers, then band, then low, each from the
    /// freshest value. Reordering changes the numerical result and
    /// breaks compatibility with stored record files.
    #[inline]
    pub fn feed_sample(&mut self, x: f32) -> BandLevels {
        let high = x - self.low - self.q_inv * self.band;
        self.band += self.f * high;
        self.low += self.f * self.band;
        BandLevels {
            raw: x,
            low: self.low,
            band: self.band,
            high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Pseudo-random samples in [-1, 1] without pulling in an RNG crate.
    fn noise(len: usize) -> Vec<f32> {
        let mut state: u32 = 0x1234_5678;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 8) as f32 / (1u32 << 23) as f32 - 1.0
            })
            .collect()
    }

    #[test]
    fn update_order_is_canonical() {
        let mut filter = MultibandFilter::default();
        filter.set_parameter(0.25, 1.0);
        // f = 2 sin(pi/4) = sqrt(2)
        let f = 2.0f32 * (std::f32::consts::PI * 0.25).sin();

        let out = filter.feed_sample(1.0);
        assert_relative_eq!(out.high, 1.0, epsilon = 1e-6);
        assert_relative_eq!(out.band, f, epsilon = 1e-6);
        assert_relative_eq!(out.low, f * f, epsilon = 1e-6);
        assert_eq!(out.raw, 1.0);

        // Second sample sees the registers left by the first.
        let out2 = filter.feed_sample(0.0);
        let high2 = 0.0 - f * f - 1.0 * f;
        assert_relative_eq!(out2.high, high2, epsilon = 1e-6);
        assert_relative_eq!(out2.band, f + f * high2, epsilon = 1e-6);
    }

    #[test]
    fn stays_finite_on_long_bounded_input() {
        for &(freq, q) in &[(0.001f32, 0.5f32), (0.02, 1.5), (0.1, 10.0)] {
            let mut filter = MultibandFilter::default();
            filter.set_parameter(freq, q);
            for x in noise(100_000) {
                let out = filter.feed_sample(x);
                assert!(out.low.is_finite(), "low diverged at freq {freq} q {q}");
                assert!(out.band.is_finite(), "band diverged at freq {freq} q {q}");
                assert!(out.high.is_finite(), "high diverged at freq {freq} q {q}");
            }
        }
    }

    #[test]
    fn out_of_range_frequencies_are_clamped() {
        let mut above = MultibandFilter::default();
        above.set_parameter(0.8, 1.0);
        let mut at_max = MultibandFilter::default();
        at_max.set_parameter(MAX_NORMALIZED_FREQ, 1.0);
        assert_eq!(above.f, at_max.f);

        let mut below = MultibandFilter::default();
        below.set_parameter(-1.0, 1.0);
        let mut at_min = MultibandFilter::default();
        at_min.set_parameter(MIN_NORMALIZED_FREQ, 1.0);
        assert_eq!(below.f, at_min.f);
    }

    #[test]
    fn state_persists_across_parameter_changes() {
        let mut filter = MultibandFilter::default();
        filter.set_parameter(0.02, 1.0);
        for x in noise(256) {
            filter.feed_sample(x);
        }
        let before = filter;
        filter.set_parameter(0.05, 2.0);
        assert_eq!(filter.low, before.low);
        assert_eq!(filter.band, before.band);
    }
}

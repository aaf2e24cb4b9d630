use super::filter::{BandLevels, MultibandFilter};

/// Samples per analysis window. One constant shared by the offline
/// producer and every consumer that maps a playback position to a record
/// index; the two sides must never disagree on it.
pub const WINDOW_SIZE: usize = 1024;

/// RMS of a full-scale sine; dividing by it puts such a sine at 0 dBFS.
const REF_LEVEL: f32 = 0.7071;
/// Additive floor (~-250 dB) keeping log10 finite when a band carries no
/// energy at all.
const ZERO_OFFSET: f32 = 1.5849e-13;

/// Drive the filter across one window sample-by-sample and reduce each
/// band to an RMS loudness in dBFS.
///
/// This is the single kernel behind both the batch pipeline and the live
/// monitor; the filter state passed in carries across calls, so window
/// boundaries do not reset the band responses. Given identical state and
/// identical samples the output is bit-reproducible.
pub fn analyze_window(window: &[f32], filter: &mut MultibandFilter) -> BandLevels {
    debug_assert!(!window.is_empty());

    let mut ss = BandLevels::default();
    for &x in window {
        let v = filter.feed_sample(x);
        ss.raw += v.raw * v.raw;
        ss.low += v.low * v.low;
        ss.band += v.band * v.band;
        ss.high += v.high * v.high;
    }

    let n = window.len() as f32;
    let level = |sum_sq: f32| 20.0 * ((sum_sq / n).sqrt() / REF_LEVEL + ZERO_OFFSET).log10();

    BandLevels {
        raw: level(ss.raw),
        low: level(ss.low),
        band: level(ss.band),
        high: level(ss.high),
    }
}

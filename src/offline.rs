use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::audio::decode::AudioData;
use crate::dsp::energy::{analyze_window, WINDOW_SIZE};
use crate::dsp::filter::MultibandFilter;
use crate::dsp::FilterParams;
use crate::sequence::BandSequence;

/// Batch analysis of a whole waveform: zero-pad up to whole windows,
/// then feed consecutive non-overlapping windows through one
/// continuously-carried filter. State must persist across window
/// boundaries; band responses depend on the filter's memory, so
/// restarting it per window would corrupt low-frequency content near the
/// edges.
pub fn analyze(audio: &AudioData, params: &FilterParams) -> Result<BandSequence> {
    let normalized = params.normalized(audio.sample_rate)?;

    let window_count = audio.samples.len().div_ceil(WINDOW_SIZE);
    log::info!(
        "Analyzing {} samples as {} windows of {}",
        audio.samples.len(),
        window_count,
        WINDOW_SIZE
    );

    let mut filter = MultibandFilter::default();
    filter.set_parameter(normalized, params.q);

    let pb = ProgressBar::new(window_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} windows")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(window_count);
    let mut tail = [0.0f32; WINDOW_SIZE];

    for chunk in audio.samples.chunks(WINDOW_SIZE) {
        let levels = if chunk.len() == WINDOW_SIZE {
            analyze_window(chunk, &mut filter)
        } else {
            // Partial final window: zero-pad so the record count stays
            // index-aligned at ceil(samples / WINDOW_SIZE).
            tail[..chunk.len()].copy_from_slice(chunk);
            tail[chunk.len()..].fill(0.0);
            analyze_window(&tail, &mut filter)
        };
        records.push(levels);
        pb.inc(1);
    }

    pb.finish_and_clear();

    Ok(BandSequence::new(records))
}

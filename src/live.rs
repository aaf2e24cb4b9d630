use anyhow::Result;
use crossbeam_channel as chan;
use std::io::Write;
use std::time::Duration;

use crate::audio::capture;
use crate::dsp::energy::{analyze_window, WINDOW_SIZE};
use crate::dsp::filter::MultibandFilter;
use crate::dsp::FilterParams;
use crate::meter;

const FRAME_INTERVAL: Duration = Duration::from_millis(16); // ~60 FPS

/// View of the most recently captured `WINDOW_SIZE` samples.
///
/// This is not a disjoint partition of the stream: depending on frame
/// timing versus capture timing, consecutive windows may overlap or skip
/// samples. That is an accepted property of the live display path.
struct RecentWindow {
    buf: Vec<f32>,
}

impl RecentWindow {
    fn new() -> Self {
        Self { buf: Vec::with_capacity(2 * WINDOW_SIZE) }
    }

    fn push(&mut self, chunk: &[f32]) {
        self.buf.extend_from_slice(chunk);
        let excess = self.buf.len().saturating_sub(WINDOW_SIZE);
        if excess > 0 {
            self.buf.drain(..excess);
        }
    }

    /// None until a full window has been captured.
    fn window(&self) -> Option<&[f32]> {
        (self.buf.len() == WINDOW_SIZE).then(|| self.buf.as_slice())
    }
}

/// Frame loop of the live monitor. Once per display frame: drain newly
/// captured samples, re-derive the filter coefficients, analyze the most
/// recent window with the persistent filter state, and draw the meter.
/// Frames without a full window yet are skipped, not errors.
pub fn run(params: FilterParams, range: f32) -> Result<()> {
    let (tx, rx) = chan::bounded::<Vec<f32>>(16);
    let capture = capture::start_capture(tx)?;

    // Fail on bad parameters before the loop starts.
    params.normalized(capture.sample_rate)?;

    let mut recent = RecentWindow::new();
    let mut filter = MultibandFilter::default();
    let mut stdout = std::io::stdout();

    loop {
        while let Ok(chunk) = rx.try_recv() {
            recent.push(&chunk);
        }

        if let Some(window) = recent.window() {
            // Parameters may change between frames; coefficients are
            // re-derived per frame while the state registers carry over.
            let normalized = params.normalized(capture.sample_rate)?;
            filter.set_parameter(normalized, params.q);

            let levels = analyze_window(window, &mut filter);
            let sc = meter::scale(&levels, range);
            write!(stdout, "\r{}", meter::bar_line(&sc))?;
            stdout.flush()?;
        }

        std::thread::sleep(FRAME_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_window_until_filled() {
        let mut recent = RecentWindow::new();
        recent.push(&vec![0.1; WINDOW_SIZE - 1]);
        assert!(recent.window().is_none());

        recent.push(&[0.2]);
        assert_eq!(recent.window().unwrap().len(), WINDOW_SIZE);
    }

    #[test]
    fn keeps_only_the_most_recent_samples() {
        let mut recent = RecentWindow::new();
        recent.push(&vec![1.0; WINDOW_SIZE]);
        recent.push(&[2.0, 3.0]);

        let window = recent.window().unwrap();
        assert_eq!(window.len(), WINDOW_SIZE);
        assert_eq!(window[0], 1.0);
        assert_eq!(window[WINDOW_SIZE - 2], 2.0);
        assert_eq!(window[WINDOW_SIZE - 1], 3.0);
    }

    #[test]
    fn oversized_chunk_is_trimmed_to_one_window() {
        let mut recent = RecentWindow::new();
        let big: Vec<f32> = (0..3 * WINDOW_SIZE).map(|i| i as f32).collect();
        recent.push(&big);

        let window = recent.window().unwrap();
        assert_eq!(window[0], (2 * WINDOW_SIZE) as f32);
    }
}

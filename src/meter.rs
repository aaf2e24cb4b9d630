use crate::dsp::filter::BandLevels;

const BAR_WIDTH: usize = 24;
const LABELS: [&str; 4] = ["raw", "low", "band", "high"];

/// Map dB levels onto a 0..1 meter scale over a display range:
/// `scale = max(0, range + level) / range`. A level at the bottom of the
/// range pins the meter to zero; a level above 0 dB may exceed 1 and is
/// clamped by the renderer.
pub fn scale(levels: &BandLevels, range: f32) -> [f32; 4] {
    let s = |level: f32| (range + level).max(0.0) / range;
    [s(levels.raw), s(levels.low), s(levels.band), s(levels.high)]
}

/// Render the four band meters as a single terminal line.
pub fn bar_line(scale: &[f32; 4]) -> String {
    let mut line = String::new();
    for (label, &value) in LABELS.iter().zip(scale) {
        let filled = (value.min(1.0) * BAR_WIDTH as f32).round() as usize;
        line.push_str(&format!(
            "{:>4} [{}{}]  ",
            label,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled)
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dbfs_fills_the_meter() {
        let levels = BandLevels { raw: 0.0, low: 0.0, band: 0.0, high: 0.0 };
        assert_eq!(scale(&levels, 60.0), [1.0; 4]);
    }

    #[test]
    fn bottom_of_range_pins_to_zero() {
        let levels = BandLevels { raw: -60.0, low: -120.0, band: -243.0, high: -60.0 };
        let sc = scale(&levels, 60.0);
        assert_eq!(sc, [0.0; 4]);
    }

    #[test]
    fn midrange_is_proportional() {
        let levels = BandLevels { raw: -30.0, low: -15.0, band: -45.0, high: -30.0 };
        let sc = scale(&levels, 60.0);
        assert!((sc[0] - 0.5).abs() < 1e-6);
        assert!((sc[1] - 0.75).abs() < 1e-6);
        assert!((sc[2] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn bar_line_clamps_hot_signals() {
        // +6 dB overshoots the range; the bar must not overflow.
        let levels = BandLevels { raw: 6.0, low: 6.0, band: 6.0, high: 6.0 };
        let line = bar_line(&scale(&levels, 60.0));
        for section in line.split(']').filter(|s| s.contains('[')) {
            let bar = section.rsplit('[').next().unwrap();
            assert_eq!(bar.len(), BAR_WIDTH);
        }
    }
}

//! Inline block-character sparkline for the grid's trend column.

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the newest `width` samples as block characters scaled between the
/// window's min and max. A flat window renders as a baseline.
pub fn sparkline(samples: &[f64], width: usize) -> String {
    if width == 0 || samples.is_empty() {
        return String::new();
    }
    let window = &samples[samples.len().saturating_sub(width)..];
    let (min, max) = window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;
    let top = (BARS.len() - 1) as f64;

    window
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                BARS[0]
            } else {
                let level = ((v - min) / span * top).round() as usize;
                BARS[level.min(BARS.len() - 1)]
            }
        })
        .collect()
}

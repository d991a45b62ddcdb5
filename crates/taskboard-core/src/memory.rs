//! Memory column with relative outlier highlighting.

use crate::format::format_bytes;
use crate::model::TaskSnapshot;
use crate::style::{Styled, Tone};

/// Ratio of a task's peak memory to the average peak. An average of zero yields 0.
pub fn memory_index(peak: u64, avg_peak: u64) -> f64 {
    if avg_peak == 0 {
        return 0.0;
    }
    peak as f64 / avg_peak as f64
}

pub fn memory_tone(index: f64) -> Tone {
    if index > 3.0 {
        Tone::Severe
    } else if index > 2.0 {
        Tone::Warning
    } else {
        Tone::Plain
    }
}

/// `usage/peak` in byte units, toned by how far the peak sits above `avg_peak`.
pub fn memory_cell(task: &TaskSnapshot, avg_peak: u64) -> Styled {
    let text = format!("{}/{}", format_bytes(task.memory_usage), format_bytes(task.memory_peak));
    Styled::new(text, memory_tone(memory_index(task.memory_peak, avg_peak)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;

    fn task(usage: u64, peak: u64) -> TaskSnapshot {
        TaskSnapshot {
            memory_usage: usage,
            memory_peak: peak,
            ..TaskSnapshot::new("resize", TaskStatus::Running)
        }
    }

    #[test]
    fn zero_average_is_never_an_outlier() {
        assert_eq!(memory_index(4096, 0), 0.0);
        assert_eq!(memory_cell(&task(1024, 4096), 0).tone, Tone::Plain);
    }

    #[test]
    fn tiers() {
        assert_eq!(memory_cell(&task(0, 200), 100).tone, Tone::Plain);
        assert_eq!(memory_cell(&task(0, 201), 100).tone, Tone::Warning);
        assert_eq!(memory_cell(&task(0, 300), 100).tone, Tone::Warning);
        assert_eq!(memory_cell(&task(0, 301), 100).tone, Tone::Severe);
    }

    #[test]
    fn text_is_usage_over_peak_at_every_tier() {
        let plain = memory_cell(&task(1024, 2048), 2048);
        assert_eq!(plain.text, format!("{}/{}", format_bytes(1024), format_bytes(2048)));
        let severe = memory_cell(&task(1024, 2048), 10);
        assert_eq!(severe.text, plain.text);
        assert_eq!(severe.tone, Tone::Severe);
    }
}

//! Hero headline fill progress.
//!
//! One total in `0..=100` drives every headline line. Each line owns a
//! sub-range of the total; its own progress is the linear position of the
//! total inside that sub-range.

use crate::config::{ConfigError, TextFillConfig};
use crate::model::Effect;

/// Upper bound of the fill scale.
pub const FILL_MAX: f64 = 100.0;

/// Contiguous, ascending partition of `0..=100` into per-line ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRanges(Vec<(f64, f64)>);

impl LineRanges {
    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Rejects empty lists, empty or inverted ranges, gaps, overlaps, and
    /// partitions that do not start at 0 and end at 100.
    pub fn new(ranges: &[[f64; 2]]) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            field: "text_fill.line_ranges",
            reason,
        };

        let (first, last) = match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(invalid("at least one line is required".to_string())),
        };
        if first[0] != 0.0 {
            return Err(invalid(format!("first range starts at {}, not 0", first[0])));
        }
        if last[1] != FILL_MAX {
            return Err(invalid(format!("last range ends at {}, not 100", last[1])));
        }
        for (i, [start, end]) in ranges.iter().copied().enumerate() {
            if !(start < end) {
                return Err(invalid(format!("line {} range [{start}, {end}] is empty", i + 1)));
            }
            if i > 0 && ranges[i - 1][1] != start {
                return Err(invalid(format!(
                    "line {} starts at {start} but line {} ends at {}",
                    i + 1,
                    i,
                    ranges[i - 1][1]
                )));
            }
        }

        Ok(Self(ranges.iter().map(|[s, e]| (*s, *e)).collect()))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false once built.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Progress of line `index` for a given total.
    pub fn line_progress(&self, index: usize, total: f64) -> Option<f64> {
        let (start, end) = *self.0.get(index)?;
        Some(if total <= start {
            0.0
        } else if total >= end {
            FILL_MAX
        } else {
            (total - start) / (end - start) * FILL_MAX
        })
    }
}

impl Default for LineRanges {
    fn default() -> Self {
        Self(vec![(0.0, 50.0), (50.0, FILL_MAX)])
    }
}

/// Owns the hero fill total.
#[derive(Debug, Clone)]
pub struct TextFillEngine {
    ranges: LineRanges,
    sensitivity: f64,
    total: f64,
}

impl TextFillEngine {
    /// Engine at 0 progress.
    ///
    /// # Errors
    ///
    /// Fails when the configured line ranges are not a valid partition.
    pub fn new(config: &TextFillConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            ranges: LineRanges::new(&config.line_ranges)?,
            sensitivity: config.sensitivity,
            total: 0.0,
        })
    }

    /// Current total, `0..=100`.
    pub fn progress(&self) -> f64 {
        self.total
    }

    /// True at 100.
    pub fn is_saturated(&self) -> bool {
        self.total >= FILL_MAX
    }

    /// Set the total, clamped. NaN is ignored. Returns whether it changed.
    pub fn set_progress(&mut self, progress: f64) -> bool {
        if progress.is_nan() {
            return false;
        }
        let clamped = progress.clamp(0.0, FILL_MAX);
        let changed = clamped != self.total;
        self.total = clamped;
        changed
    }

    /// Add `delta × sensitivity`. Returns whether the fill is saturated.
    pub fn handle_delta(&mut self, delta: f64) -> bool {
        self.set_progress(self.total + delta * self.sensitivity);
        self.is_saturated()
    }

    /// Force 0.
    pub fn reset(&mut self) {
        self.total = 0.0;
    }

    /// Force 100.
    pub fn set_complete(&mut self) {
        self.total = FILL_MAX;
    }

    /// Number of headline lines.
    pub fn line_count(&self) -> usize {
        self.ranges.len()
    }

    /// Progress of one line, `None` past the last line.
    pub fn line_progress(&self, index: usize) -> Option<f64> {
        self.ranges.line_progress(index, self.total)
    }

    /// One mask effect per line for the current total.
    pub fn mask_effects(&self) -> Vec<Effect> {
        (0..self.ranges.len())
            .filter_map(|line| {
                self.line_progress(line)
                    .map(|percent| Effect::HeadlineMask { line, percent })
            })
            .collect()
    }
}

//! Visible hour range of the timeline.

use serde::{Deserialize, Serialize};

use crate::storage::TimelineConfig;

/// Closed interval `[start, end]` of wall-clock hours shown on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    start: u32,
    end: u32,
}

impl HourRange {
    /// Build a range, swapping the bounds if given in reverse and capping at 23.
    pub fn new(start: u32, end: u32) -> Self {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: lo.min(23),
            end: hi.min(23),
        }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::new(config.start_hour, config.end_hour)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.start..=self.end).contains(&hour)
    }

    /// Every visible hour, ascending.
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self { start: 6, end: 23 }
    }
}

/// Grid label for the top of an hour row, e.g. `07:00`.
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Grid label for the half-hour mark, e.g. `07:30`.
pub fn half_hour_label(hour: u32) -> String {
    format!("{hour:02}:30")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_six_to_twenty_three() {
        let range = HourRange::default();
        let hours: Vec<u32> = range.hours().collect();
        assert_eq!(hours.first(), Some(&6));
        assert_eq!(hours.last(), Some(&23));
        assert_eq!(hours.len(), 18);
        assert_eq!(range.len(), 18);
    }

    #[test]
    fn boundary_hours_are_excluded() {
        let range = HourRange::default();
        assert!(!range.contains(5));
        assert!(range.contains(6));
        assert!(range.contains(23));
        assert!(!range.contains(24));
        assert!(range.hours().all(|h| (6..=23).contains(&h)));
    }

    #[test]
    fn reversed_and_oversized_bounds_are_normalized() {
        let range = HourRange::new(30, 8);
        assert_eq!(range.start(), 8);
        assert_eq!(range.end(), 23);
    }

    #[test]
    fn labels_are_zero_padded() {
        assert_eq!(hour_label(7), "07:00");
        assert_eq!(half_hour_label(13), "13:30");
    }
}

//! Current-time marker.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::hours::HourRange;

/// Where "now" sits on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeMarker {
    pub hour: u32,
    pub minute_offset: u32,
    /// Offset inside the current hour row: `minute * row_height / 60`
    pub pixel_offset: f64,
    /// Offset from the top of the grid; `None` when the hour is not shown
    pub timeline_offset: Option<f64>,
    pub visible: bool,
}

impl TimeMarker {
    pub fn at(now: NaiveTime, range: HourRange, row_height: f64) -> Self {
        let hour = now.hour();
        let minute = now.minute();
        let pixel_offset = minute as f64 * (row_height / 60.0);
        let visible = range.contains(hour);
        let timeline_offset =
            visible.then(|| (hour - range.start()) as f64 * row_height + pixel_offset);

        Self {
            hour,
            minute_offset: minute,
            pixel_offset,
            timeline_offset,
            visible,
        }
    }

    /// The marker is drawn only in the row of the current hour.
    pub fn shown_in(&self, hour: u32) -> bool {
        self.visible && self.hour == hour
    }

    /// `HH:MM` label for the marker.
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn marker_offset_scales_with_row_height() {
        let marker = TimeMarker::at(time(10, 30), HourRange::default(), 60.0);
        assert_eq!(marker.hour, 10);
        assert_eq!(marker.minute_offset, 30);
        assert_eq!(marker.pixel_offset, 30.0);
        assert_eq!(marker.timeline_offset, Some(4.0 * 60.0 + 30.0));
        assert_eq!(marker.label(), "10:30");

        let tall = TimeMarker::at(time(10, 30), HourRange::default(), 80.0);
        assert_eq!(tall.pixel_offset, 40.0);
    }

    #[test]
    fn marker_is_shown_only_in_current_hour() {
        let marker = TimeMarker::at(time(14, 5), HourRange::default(), 60.0);
        assert!(marker.shown_in(14));
        assert!(!marker.shown_in(13));
        assert!(!marker.shown_in(15));
    }

    #[test]
    fn marker_outside_range_is_hidden() {
        let marker = TimeMarker::at(time(3, 10), HourRange::default(), 60.0);
        assert!(!marker.visible);
        assert!(marker.timeline_offset.is_none());
        assert!(!marker.shown_in(3));
    }
}

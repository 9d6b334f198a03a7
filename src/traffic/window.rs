use std::ops::Range;

use crate::traffic::MINUTES_PER_DAY;

const HALF_WIDTH: u16 = 60;

/// Half-open range of minute-of-day indices, wrapping past midnight when
/// `start > end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinuteWindow {
    start: u16,
    end: u16,
}

impl MinuteWindow {
    /// The 120-minute window centred on a slider minute: start inclusive,
    /// end exclusive.
    pub fn around(center: u16) -> Self {
        let day = MINUTES_PER_DAY as u16;
        let start = (center + day - HALF_WIDTH) % day;
        let end = (center + HALF_WIDTH) % day;
        Self { start, end }
    }

    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Bucket index ranges covered by the window, in scan order.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        if self.wraps() {
            vec![self.start as usize..MINUTES_PER_DAY, 0..self.end as usize]
        } else {
            vec![self.start as usize..self.end as usize]
        }
    }

    pub fn contains(&self, minute: u16) -> bool {
        if self.wraps() {
            minute >= self.start || minute < self.end
        } else {
            minute >= self.start && minute < self.end
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(window: MinuteWindow) -> usize {
        window.ranges().into_iter().map(|r| r.len()).sum()
    }

    #[test]
    fn plain_window_in_the_middle_of_the_day() {
        let window = MinuteWindow::around(720);
        assert!(!window.wraps());
        assert_eq!(window.ranges(), vec![660..780]);
        assert!(window.contains(660));
        assert!(window.contains(779));
        assert!(!window.contains(780));
        assert!(!window.contains(659));
    }

    #[test]
    fn window_around_midnight_wraps() {
        let window = MinuteWindow::around(0);
        assert!(window.wraps());
        assert_eq!(window.ranges(), vec![1380..1440, 0..60]);
        assert!(window.contains(1439));
        assert!(window.contains(59));
        assert!(!window.contains(61));
        assert!(!window.contains(1379));
        assert_eq!(width(window), 120);
    }

    #[test]
    fn window_around_last_minute_wraps() {
        let window = MinuteWindow::around(1439);
        assert_eq!(window.ranges(), vec![1379..1440, 0..59]);
        assert!(window.contains(1439));
        assert!(window.contains(0));
        assert!(window.contains(58));
        assert!(!window.contains(59));
        assert!(!window.contains(1378));
        assert_eq!(width(window), 120);
    }

    #[test]
    fn window_ending_exactly_at_midnight() {
        let window = MinuteWindow::around(1380);
        assert_eq!(window.ranges(), vec![1320..1440, 0..0]);
        assert!(window.contains(1320));
        assert!(window.contains(1439));
        assert!(!window.contains(0));
        assert_eq!(width(window), 120);
    }

    #[test]
    fn every_selector_covers_exactly_two_hours() {
        for center in 0..MINUTES_PER_DAY as u16 {
            assert_eq!(width(MinuteWindow::around(center)), 120, "center {center}");
        }
    }
}

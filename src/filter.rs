//! Running average over the most recent calibrated points.

use heapless::Deque;

/// Ring capacity; effective depth is configured per instance and clamped to
/// this at construction.
pub(crate) const MAX_FILTER_DEPTH: usize = 8;

/// Fixed-depth moving average over calibrated `(x, y)` pairs. The ring fills
/// from empty, evicts the oldest entry once `depth` points are held, and is
/// emptied on contact release so a fresh contact never averages with stale
/// history.
pub(crate) struct PositionFilter {
    ring: Deque<(i16, i16), MAX_FILTER_DEPTH>,
    depth: usize,
}

impl PositionFilter {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            ring: Deque::new(),
            depth: depth.clamp(1, MAX_FILTER_DEPTH),
        }
    }

    /// Insert one point and return the running mean over the valid entries.
    pub(crate) fn push(&mut self, x: i16, y: i16) -> (i16, i16) {
        if self.ring.len() == self.depth {
            let _ = self.ring.pop_front();
        }
        // Cannot fail: len < depth <= capacity after the eviction above.
        let _ = self.ring.push_back((x, y));

        let mut x_sum: i32 = 0;
        let mut y_sum: i32 = 0;
        for (px, py) in self.ring.iter() {
            x_sum += *px as i32;
            y_sum += *py as i32;
        }
        let valid = self.ring.len() as i32;
        ((x_sum / valid) as i16, (y_sum / valid) as i16)
    }

    pub(crate) fn reset(&mut self) {
        self.ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_grows_with_valid_entries_then_evicts() {
        let mut filter = PositionFilter::new(4);

        assert_eq!(filter.push(10, 10), (10, 10));
        assert_eq!(filter.push(20, 20), (15, 15));
        assert_eq!(filter.push(30, 30), (20, 20));
        assert_eq!(filter.push(40, 40), (25, 25));
        // Fifth point evicts the first.
        assert_eq!(filter.push(50, 50), (35, 35));
    }

    #[test]
    fn axes_average_independently() {
        let mut filter = PositionFilter::new(2);

        filter.push(0, 100);
        assert_eq!(filter.push(10, 0), (5, 50));
    }

    #[test]
    fn mean_truncates_toward_zero() {
        let mut filter = PositionFilter::new(4);

        filter.push(0, 0);
        assert_eq!(filter.push(5, 5), (2, 2));
    }

    #[test]
    fn reset_forgets_history() {
        let mut filter = PositionFilter::new(4);

        filter.push(10, 10);
        filter.push(20, 20);
        filter.reset();

        // First post-reset mean equals the new point exactly.
        assert_eq!(filter.push(100, 100), (100, 100));
    }

    #[test]
    fn depth_one_tracks_the_latest_point() {
        let mut filter = PositionFilter::new(1);

        assert_eq!(filter.push(10, 10), (10, 10));
        assert_eq!(filter.push(90, 70), (90, 70));
    }

    #[test]
    fn depth_is_clamped_to_capacity() {
        let mut filter = PositionFilter::new(100);

        for i in 0..MAX_FILTER_DEPTH as i16 {
            filter.push(i * 10, 0);
        }
        // 0..=70 averaged over 8 entries = 35; a ninth point must evict.
        assert_eq!(filter.push(80, 0), (45, 0));
    }
}

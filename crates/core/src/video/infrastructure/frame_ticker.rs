use std::ops::Range;

const TICK_EPSILON: f64 = 1e-6;

/// Maps source frame timestamps onto a fixed output frame grid.
///
/// Output tick `n` sits at `n / fps` seconds. A source frame is shown for
/// every tick between its own timestamp and the next frame's, so the
/// caller holds one frame back and asks for the ticks it covers once the
/// following timestamp is known.
pub(crate) struct FrameTicker {
    fps: f64,
    end: f64,
    next: i64,
}

impl FrameTicker {
    /// `end` is the output duration in seconds; `f64::INFINITY` means
    /// unbounded.
    pub(crate) fn new(fps: f64, end: f64) -> Self {
        Self { fps, end, next: 0 }
    }

    /// Returns the not-yet-emitted ticks that fall before `time`, capped at
    /// the end of the output.
    pub(crate) fn ticks_before(&mut self, time: f64) -> Range<i64> {
        let limit = time.min(self.end);
        let upper = ((limit * self.fps) - TICK_EPSILON).ceil() as i64;
        let start = self.next;
        self.next = upper.max(start);
        start..self.next
    }

    pub(crate) fn is_done(&self) -> bool {
        self.next as f64 >= self.end * self.fps - TICK_EPSILON
    }

    #[cfg(test)]
    pub(crate) fn emitted(&self) -> i64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Feeds source frames at `src_fps` for `src_frames` frames and returns
    /// how many output ticks were emitted.
    fn simulate(src_fps: f64, src_frames: usize, out_fps: f64, end: f64) -> i64 {
        let mut ticker = FrameTicker::new(out_fps, end);
        let mut emitted = 0;
        for i in 1..src_frames {
            emitted += ticker.ticks_before(i as f64 / src_fps).count() as i64;
        }
        emitted += ticker.ticks_before(src_frames as f64 / src_fps).count() as i64;
        assert_eq!(emitted, ticker.emitted());
        emitted
    }

    #[rstest]
    #[case::downsample(30.0, 60, 15.0, 2.0, 30)]
    #[case::same_rate(15.0, 30, 15.0, 2.0, 30)]
    #[case::upsample(10.0, 10, 15.0, 1.0, 15)]
    #[case::unbounded(30.0, 30, 15.0, f64::INFINITY, 15)]
    #[case::trimmed(30.0, 90, 15.0, 1.0, 15)]
    fn test_tick_counts(
        #[case] src_fps: f64,
        #[case] src_frames: usize,
        #[case] out_fps: f64,
        #[case] end: f64,
        #[case] expected: i64,
    ) {
        assert_eq!(simulate(src_fps, src_frames, out_fps, end), expected);
    }

    #[test]
    fn test_ticks_are_contiguous() {
        let mut ticker = FrameTicker::new(15.0, 1.0);
        let a = ticker.ticks_before(0.5);
        let b = ticker.ticks_before(1.0);
        assert_eq!(a, 0..8);
        assert_eq!(b, 8..15);
    }

    #[test]
    fn test_earlier_time_yields_nothing() {
        let mut ticker = FrameTicker::new(15.0, 10.0);
        assert_eq!(ticker.ticks_before(1.0), 0..15);
        assert!(ticker.ticks_before(0.5).is_empty());
        assert_eq!(ticker.emitted(), 15);
    }

    #[test]
    fn test_is_done_at_end() {
        let mut ticker = FrameTicker::new(15.0, 1.0);
        assert!(!ticker.is_done());
        ticker.ticks_before(0.9);
        assert!(!ticker.is_done());
        ticker.ticks_before(5.0);
        assert!(ticker.is_done());
        assert_eq!(ticker.emitted(), 15);
    }

    #[test]
    fn test_unbounded_is_never_done() {
        let mut ticker = FrameTicker::new(15.0, f64::INFINITY);
        ticker.ticks_before(100.0);
        assert!(!ticker.is_done());
    }
}

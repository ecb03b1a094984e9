use gallery_config::DEFAULT_SWIPE_THRESHOLD_PX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left; shows the next image.
    Left,
    /// Finger moved left to right; shows the previous image.
    Right,
}

/// Horizontal single-touch gesture state.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
    end_x: Option<f64>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
            end_x: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    /// Finishes the gesture and classifies it. Travel at or below the
    /// threshold is a tap or scroll and yields `None`.
    pub fn end(&mut self, x: f64) -> Option<SwipeDirection> {
        self.end_x = Some(x);
        let start = self.start_x.take()?;
        let delta = start - x;

        if delta.abs() <= self.threshold {
            return None;
        }

        if delta > 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }

    pub fn last_end(&self) -> Option<f64> {
        self.end_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_swipe_past_threshold() {
        let mut swipe = SwipeTracker::default();
        swipe.start(300.0);
        assert_eq!(swipe.end(249.0), Some(SwipeDirection::Left));
    }

    #[test]
    fn test_right_swipe_past_threshold() {
        let mut swipe = SwipeTracker::default();
        swipe.start(100.0);
        assert_eq!(swipe.end(151.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_short_travel_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.start(300.0);
        assert_eq!(swipe.end(251.0), None);

        swipe.start(300.0);
        assert_eq!(swipe.end(250.0), None);
    }

    #[test]
    fn test_end_without_start_ignored() {
        let mut swipe = SwipeTracker::default();
        assert_eq!(swipe.end(10.0), None);
        assert_eq!(swipe.last_end(), Some(10.0));
    }

    #[test]
    fn test_gesture_resets_after_end() {
        let mut swipe = SwipeTracker::default();
        swipe.start(300.0);
        assert!(swipe.end(100.0).is_some());
        assert_eq!(swipe.end(0.0), None);
    }

    #[test]
    fn test_custom_threshold() {
        let mut swipe = SwipeTracker::new(10.0);
        swipe.start(50.0);
        assert_eq!(swipe.end(39.0), Some(SwipeDirection::Left));
        assert_eq!(swipe.threshold(), 10.0);
    }
}

use super::types::MouseMoveEvent;

/// Tracks the last pointer position for one window.
///
/// Windowing backends usually report absolute cursor positions only; the
/// tracker turns them into `MouseMoveEvent`s carrying relative motion.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known position, `None` until the first move or after `leave`.
    pub fn position(&self) -> Option<(f32, f32)> {
        self.last
    }

    /// Records a new absolute position and returns the move event.
    ///
    /// The first sample after creation or `leave` reports zero relative motion.
    pub fn moved_to(&mut self, x: f32, y: f32) -> MouseMoveEvent {
        let (xrel, yrel) = match self.last {
            Some((lx, ly)) => (x - lx, y - ly),
            None => (0.0, 0.0),
        };
        self.last = Some((x, y));

        MouseMoveEvent { x, y, xrel, yrel }
    }

    /// Pointer left the window surface.
    pub fn leave(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_relative_motion() {
        let mut t = PointerTracker::new();
        let ev = t.moved_to(10.0, 20.0);
        assert_eq!(ev, MouseMoveEvent { x: 10.0, y: 20.0, xrel: 0.0, yrel: 0.0 });
    }

    #[test]
    fn relative_motion_is_difference_to_previous() {
        let mut t = PointerTracker::new();
        t.moved_to(10.0, 20.0);
        let ev = t.moved_to(13.0, 15.0);
        assert_eq!(ev.xrel, 3.0);
        assert_eq!(ev.yrel, -5.0);
        assert_eq!(t.position(), Some((13.0, 15.0)));
    }

    #[test]
    fn leave_resets_baseline() {
        let mut t = PointerTracker::new();
        t.moved_to(10.0, 20.0);
        t.leave();
        assert_eq!(t.position(), None);
        let ev = t.moved_to(50.0, 50.0);
        assert_eq!((ev.xrel, ev.yrel), (0.0, 0.0));
    }
}

use crate::api::sink::PositionSink;

/// Moves a glow element so it sits exactly under the pointer.
///
/// Coordinates pass through untouched: no easing, no clamping to the
/// viewport. With no target element every move is a no-op.
#[derive(Debug)]
pub struct PointerTracker<S: PositionSink> {
    target: Option<S>,
    last: Option<(f32, f32)>,
}

impl<S: PositionSink> PointerTracker<S> {
    pub fn new(target: Option<S>) -> Self {
        if target.is_none() {
            log::warn!("pointer tracker: no glow element, pointer moves will be ignored");
        }
        Self { target, last: None }
    }

    /// Handle one pointer-move signal at viewport coordinates (x, y).
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.last = Some((x, y));
        if let Some(target) = &mut self.target {
            target.set_position(x, y);
        }
    }

    /// Last position delivered, whether or not a target exists.
    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.last
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&S> {
        self.target.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct Glow {
        pos: Option<(f32, f32)>,
        writes: usize,
    }

    impl PositionSink for Glow {
        fn set_position(&mut self, x: f32, y: f32) {
            self.pos = Some((x, y));
            self.writes += 1;
        }
    }

    #[test]
    fn follows_every_move() {
        let mut tracker = PointerTracker::new(Some(Glow::default()));
        tracker.on_pointer_move(10.0, 20.0);
        tracker.on_pointer_move(-5.0, 3000.0);
        let glow = tracker.target().unwrap();
        assert_eq!(glow.pos, Some((-5.0, 3000.0)));
        assert_eq!(glow.writes, 2);
    }

    #[test]
    fn missing_target_is_a_no_op() {
        let mut tracker: PointerTracker<Glow> = PointerTracker::new(None);
        tracker.on_pointer_move(1.0, 2.0);
        assert!(!tracker.has_target());
        assert_eq!(tracker.last_position(), Some((1.0, 2.0)));
    }

    proptest! {
        #[test]
        fn position_is_exact(x in -1.0e6f32..1.0e6, y in -1.0e6f32..1.0e6) {
            let mut tracker = PointerTracker::new(Some(Glow::default()));
            tracker.on_pointer_move(x, y);
            prop_assert_eq!(tracker.target().unwrap().pos, Some((x, y)));
        }
    }
}

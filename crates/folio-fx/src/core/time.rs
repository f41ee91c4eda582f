use crate::api::types::Millis;

/// Turns host frame timestamps into a virtual clock.
///
/// Frame deltas are capped so a tab that was hidden for minutes resumes
/// where it paused instead of fast-forwarding through every missed tick.
pub struct FrameClock {
    /// Virtual time handed to the effects.
    now: Millis,
    /// Host timestamp of the previous frame.
    last_frame: Option<f64>,
    /// Largest delta credited for a single frame.
    max_step: Millis,
}

impl FrameClock {
    pub fn new(max_step: Millis) -> Self {
        Self {
            now: Millis::ZERO,
            last_frame: None,
            max_step,
        }
    }

    /// Record a frame at host time `timestamp_ms` and return the new virtual time.
    /// The first frame only anchors the clock.
    pub fn frame(&mut self, timestamp_ms: f64) -> Millis {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(timestamp_ms);
            return self.now;
        };
        let elapsed = Millis::from_f64(timestamp_ms - last);
        if elapsed > self.max_step {
            self.now = self.now + self.max_step;
            self.last_frame = Some(timestamp_ms);
        } else {
            // Advance the anchor by whole milliseconds only, so fractions
            // carry over to the next frame instead of being dropped.
            self.now = self.now + elapsed;
            self.last_frame = Some(last + elapsed.as_u64() as f64);
        }
        self.now
    }

    /// Forget the previous frame, e.g. after the loop was paused.
    pub fn reanchor(&mut self) {
        self.last_frame = None;
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn max_step(&self) -> Millis {
        self.max_step
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Millis(250))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_anchors() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.frame(12_345.6), Millis::ZERO);
        assert_eq!(clock.frame(12_362.3), Millis(16));
    }

    #[test]
    fn caps_long_gaps() {
        let mut clock = FrameClock::new(Millis(250));
        clock.frame(0.0);
        assert_eq!(clock.frame(60_000.0), Millis(250));
    }

    #[test]
    fn sub_millisecond_frames_accumulate() {
        let mut clock = FrameClock::default();
        clock.frame(0.0);
        clock.frame(0.4);
        clock.frame(0.8);
        assert_eq!(clock.frame(1.2), Millis(1));
    }

    #[test]
    fn reanchor_skips_the_gap() {
        let mut clock = FrameClock::default();
        clock.frame(0.0);
        clock.frame(100.0);
        clock.reanchor();
        clock.frame(90_000.0);
        assert_eq!(clock.frame(90_016.0), Millis(116));
    }

    #[test]
    fn time_never_goes_backwards() {
        let mut clock = FrameClock::default();
        clock.frame(500.0);
        clock.frame(600.0);
        assert_eq!(clock.frame(100.0), Millis(100));
    }
}

//! Recurring timer task driving the typewriter.
//!
//! Two kinds of timers share one [`TimerQueue`]: the character tick, which
//! reschedules itself after every firing, and the one-shot dwell that flips a
//! fully typed phrase into deleting mode. The tick keeps running while the
//! dwell is pending.

use crate::api::sink::TextSink;
use crate::api::types::Millis;
use crate::components::typewriter::{Step, Typewriter};
use crate::core::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Tick,
    DwellEnd,
}

pub struct TypewriterTask<S: TextSink> {
    writer: Typewriter,
    sink: Option<S>,
    timers: TimerQueue<Timer>,
    tick_timer: Option<TimerId>,
    dwell_timer: Option<TimerId>,
}

impl<S: TextSink> TypewriterTask<S> {
    pub fn new(writer: Typewriter, sink: Option<S>) -> Self {
        if sink.is_none() {
            log::warn!("typewriter: no target element, animation disabled");
        }
        Self {
            writer,
            sink,
            timers: TimerQueue::new(),
            tick_timer: None,
            dwell_timer: None,
        }
    }

    /// Start (or resume) the loop at virtual time `now`. The first tick runs
    /// immediately. Does nothing without a target or when already running.
    pub fn start(&mut self, now: Millis) {
        if self.sink.is_none() || self.is_running() {
            return;
        }
        self.timers.advance_to(now);
        self.tick_timer = Some(self.timers.schedule_at(self.timers.now(), Timer::Tick));
        log::debug!("typewriter: started at {:?}", self.timers.now());
    }

    /// Cancel all pending timers. The animator keeps its state, so a later
    /// [`start`](Self::start) picks up where it stopped.
    pub fn stop(&mut self) {
        self.timers.clear();
        self.tick_timer = None;
        self.dwell_timer = None;
        log::debug!("typewriter: stopped at {:?}", self.timers.now());
    }

    pub fn is_running(&self) -> bool {
        self.tick_timer.is_some()
    }

    /// Fire every timer due at or before `now`, in order. Returns the number
    /// of character ticks that ran.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        let mut ticks = 0;
        while let Some((_, timer)) = self.timers.pop_due(now) {
            match timer {
                Timer::Tick => {
                    self.run_tick();
                    ticks += 1;
                }
                Timer::DwellEnd => {
                    self.dwell_timer = None;
                    self.writer.begin_deleting();
                }
            }
        }
        self.timers.advance_to(now);
        ticks
    }

    fn run_tick(&mut self) {
        let tick = self.writer.tick();
        if tick.step.changes_text() {
            if let Some(sink) = &mut self.sink {
                sink.set_text(self.writer.visible_text());
            }
        }
        // Held covers resuming after a stop that cancelled the dwell.
        if matches!(tick.step, Step::Completed | Step::Held) && self.dwell_timer.is_none() {
            let dwell = self.writer.cadence().dwell;
            self.dwell_timer = Some(self.timers.schedule_after(dwell, Timer::DwellEnd));
        }
        self.tick_timer = Some(self.timers.schedule_after(tick.next_in, Timer::Tick));
    }

    /// Virtual time of the last advance.
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// When the next timer fires, if running.
    pub fn next_due(&mut self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn dwell_pending(&self) -> bool {
        self.dwell_timer.is_some()
    }

    pub fn writer(&self) -> &Typewriter {
        &self.writer
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }
}

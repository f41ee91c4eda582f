//! Typewriter state machine.
//!
//! Types one phrase character by character, holds it, deletes it, then moves
//! on to the next phrase forever. Scheduling lives in
//! [`crate::systems::typewriter::TypewriterTask`]; this type only knows how
//! to advance by one tick and how to flip into deleting mode.

use crate::api::config::TypewriterConfig;
use crate::api::types::Millis;
use super::phrases::PhraseList;

/// Whether characters are being added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Typing,
    Deleting,
}

/// The animator's entire state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterState {
    pub phrase_index: usize,
    pub char_count: usize,
    pub mode: Mode,
}

impl TypewriterState {
    /// `Typing(0, 0)`: first phrase, nothing shown.
    pub const INITIAL: TypewriterState = TypewriterState {
        phrase_index: 0,
        char_count: 0,
        mode: Mode::Typing,
    };
}

/// Timing of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Delay after a typing tick.
    pub type_interval: Millis,
    /// Delay after a deleting tick.
    pub delete_interval: Millis,
    /// Hold before deleting a fully typed phrase.
    pub dwell: Millis,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            type_interval: Millis(150),
            delete_interval: Millis(75),
            dwell: Millis(2000),
        }
    }
}

impl From<&TypewriterConfig> for Cadence {
    fn from(config: &TypewriterConfig) -> Self {
        Self {
            type_interval: config.type_interval_ms,
            delete_interval: config.delete_interval_ms,
            dwell: config.dwell_ms,
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One more character shown.
    Typed,
    /// The last character of the phrase was shown; the dwell should start.
    Completed,
    /// Phrase fully shown and waiting for the dwell to end. Text unchanged.
    Held,
    /// One character removed.
    Deleted,
    /// The phrase was fully removed and the next phrase is up.
    Cleared,
}

impl Step {
    /// Whether the displayed text changed on this step.
    pub fn changes_text(self) -> bool {
        !matches!(self, Step::Held)
    }
}

/// Result of [`Typewriter::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub step: Step,
    /// Delay until the next tick should run.
    pub next_in: Millis,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: PhraseList,
    cadence: Cadence,
    state: TypewriterState,
}

impl Typewriter {
    pub fn new(phrases: PhraseList, cadence: Cadence) -> Self {
        Self {
            phrases,
            cadence,
            state: TypewriterState::INITIAL,
        }
    }

    /// Advance by one tick.
    ///
    /// The delay to the next tick follows the mode at the start of the tick,
    /// so the tick that clears a phrase is still followed by a deleting-speed
    /// delay before the next phrase starts.
    pub fn tick(&mut self) -> Tick {
        let next_in = self.interval();
        let len = self.phrases.get(self.state.phrase_index).len();
        let state = &mut self.state;

        let step = match state.mode {
            Mode::Typing if state.char_count < len => {
                state.char_count += 1;
                if state.char_count == len {
                    Step::Completed
                } else {
                    Step::Typed
                }
            }
            // An empty phrase is complete as soon as it is reached.
            Mode::Typing if len == 0 => Step::Completed,
            Mode::Typing => Step::Held,
            Mode::Deleting => {
                state.char_count = state.char_count.saturating_sub(1);
                if state.char_count == 0 {
                    state.phrase_index = self.phrases.next_index(state.phrase_index);
                    state.mode = Mode::Typing;
                    Step::Cleared
                } else {
                    Step::Deleted
                }
            }
        };

        log::trace!("typewriter: {:?} -> {:?}", step, self.state);
        Tick { step, next_in }
    }

    /// End the dwell and start deleting. Only takes effect while a fully
    /// typed phrase is being held; returns whether the mode changed.
    pub fn begin_deleting(&mut self) -> bool {
        let len = self.phrases.get(self.state.phrase_index).len();
        if self.state.mode == Mode::Typing && self.state.char_count == len {
            self.state.mode = Mode::Deleting;
            log::debug!("typewriter: deleting phrase {}", self.state.phrase_index);
            true
        } else {
            false
        }
    }

    /// Delay that follows a tick in the current mode.
    pub fn interval(&self) -> Millis {
        match self.state.mode {
            Mode::Typing => self.cadence.type_interval,
            Mode::Deleting => self.cadence.delete_interval,
        }
    }

    /// The text that should currently be on screen.
    pub fn visible_text(&self) -> &str {
        self.phrases
            .get(self.state.phrase_index)
            .prefix(self.state.char_count)
    }

    pub fn current_phrase(&self) -> &str {
        self.phrases.get(self.state.phrase_index).as_str()
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn phrases(&self) -> &PhraseList {
        &self.phrases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(PhraseList::new(phrases.iter().copied()).unwrap(), Cadence::default())
    }

    #[test]
    fn starts_empty_on_first_phrase() {
        let tw = writer(&["abc"]);
        assert_eq!(tw.state(), TypewriterState::INITIAL);
        assert_eq!(tw.visible_text(), "");
        assert_eq!(tw.interval(), Millis(150));
    }

    #[test]
    fn types_then_holds() {
        let mut tw = writer(&["abc", "de"]);
        assert_eq!(tw.tick().step, Step::Typed);
        assert_eq!(tw.visible_text(), "a");
        assert_eq!(tw.tick().step, Step::Typed);
        let done = tw.tick();
        assert_eq!(done.step, Step::Completed);
        assert_eq!(done.next_in, Millis(150));
        assert_eq!(tw.visible_text(), "abc");

        // Ticks during the dwell leave everything alone.
        assert_eq!(tw.tick().step, Step::Held);
        assert_eq!(tw.tick().step, Step::Held);
        assert_eq!(tw.state().char_count, 3);
        assert_eq!(tw.visible_text(), "abc");
    }

    #[test]
    fn begin_deleting_only_when_fully_typed() {
        let mut tw = writer(&["abc"]);
        tw.tick();
        assert!(!tw.begin_deleting());
        assert_eq!(tw.state().mode, Mode::Typing);
        tw.tick();
        tw.tick();
        assert!(tw.begin_deleting());
        assert_eq!(tw.state().mode, Mode::Deleting);
        assert_eq!(tw.interval(), Millis(75));
        assert!(!tw.begin_deleting());
    }

    #[test]
    fn deletes_then_moves_to_next_phrase() {
        let mut tw = writer(&["ab", "xyz"]);
        tw.tick();
        tw.tick();
        tw.begin_deleting();

        let t = tw.tick();
        assert_eq!(t.step, Step::Deleted);
        assert_eq!(t.next_in, Millis(75));
        assert_eq!(tw.visible_text(), "a");

        let t = tw.tick();
        assert_eq!(t.step, Step::Cleared);
        assert_eq!(t.next_in, Millis(75));
        assert_eq!(tw.visible_text(), "");
        assert_eq!(
            tw.state(),
            TypewriterState { phrase_index: 1, char_count: 0, mode: Mode::Typing }
        );
        assert_eq!(tw.interval(), Millis(150));
    }

    #[test]
    fn cycles_through_three_phrases() {
        let mut tw = writer(&["a", "bc", "def"]);
        let mut seen = vec![tw.state().phrase_index];
        for _ in 0..3 {
            while tw.tick().step != Step::Completed {}
            assert!(tw.begin_deleting());
            while tw.tick().step != Step::Cleared {}
            seen.push(tw.state().phrase_index);
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);
        assert_eq!(tw.state(), TypewriterState::INITIAL);
    }

    #[test]
    fn empty_phrase_completes_immediately() {
        let mut tw = writer(&["", "x"]);
        assert_eq!(tw.tick().step, Step::Completed);
        assert!(tw.begin_deleting());
        assert_eq!(tw.tick().step, Step::Cleared);
        assert_eq!(tw.state().phrase_index, 1);
    }

    proptest! {
        #[test]
        fn text_length_moves_by_one(phrase in "\\PC{1,40}") {
            let mut tw = writer(&[phrase.as_str()]);
            let len = phrase.chars().count();

            for expected in 1..=len {
                tw.tick();
                prop_assert_eq!(tw.visible_text().chars().count(), expected);
            }
            prop_assert!(tw.begin_deleting());
            for expected in (0..len).rev() {
                tw.tick();
                prop_assert_eq!(tw.visible_text().chars().count(), expected);
            }
            prop_assert_eq!(tw.state(), TypewriterState::INITIAL);
        }
    }
}

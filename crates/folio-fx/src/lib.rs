pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{FxConfig, PointerConfig, RevealConfig, TypewriterConfig};
pub use api::error::ConfigError;
pub use api::sink::{PositionSink, RevealSink, TextSink, VisibilitySource};
pub use api::types::{ElementId, Millis};
pub use core::time::FrameClock;
pub use core::timer::{TimerId, TimerQueue};
pub use input::event::{IntersectionEntry, PageEvent};
pub use components::phrases::{Phrase, PhraseList};
pub use components::pointer::PointerTracker;
pub use components::reveal::RevealTrigger;
pub use components::typewriter::{Cadence, Mode, Step, Tick, Typewriter, TypewriterState};
pub use systems::typewriter::TypewriterTask;

//! Output and input seams between effect logic and the page.
//!
//! The browser bridge implements these over `web-sys` elements; tests
//! implement them over plain recording structs.

use super::types::ElementId;

/// Receives the tracked element's new viewport position.
pub trait PositionSink {
    fn set_position(&mut self, x: f32, y: f32);
}

/// Receives the typewriter's displayed text.
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

/// Applies the persistent "shown" marker to a revealed element.
pub trait RevealSink {
    fn mark_shown(&mut self, id: ElementId);
}

/// The viewport-intersection engine that watches reveal candidates.
/// Entries come back through the event queue, not through this trait.
pub trait VisibilitySource {
    fn observe(&mut self, id: ElementId);
    fn unobserve(&mut self, id: ElementId);
}

impl TextSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl<S: PositionSink + ?Sized> PositionSink for &mut S {
    fn set_position(&mut self, x: f32, y: f32) {
        (**self).set_position(x, y);
    }
}

impl<S: TextSink + ?Sized> TextSink for &mut S {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }
}

impl<S: RevealSink + ?Sized> RevealSink for &mut S {
    fn mark_shown(&mut self, id: ElementId) {
        (**self).mark_shown(id);
    }
}

impl<S: VisibilitySource + ?Sized> VisibilitySource for &mut S {
    fn observe(&mut self, id: ElementId) {
        (**self).observe(id);
    }

    fn unobserve(&mut self, id: ElementId) {
        (**self).unobserve(id);
    }
}

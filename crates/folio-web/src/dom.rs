//! DOM-backed implementations of the effect sinks.

use folio_fx::{ElementId, IntersectionEntry, PositionSink, RevealSink, TextSink, VisibilitySource};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry};

/// Attribute carrying the [`ElementId`] of a reveal candidate.
pub const ID_ATTRIBUTE: &str = "data-folio-id";

/// First element matching `selector`, or `None` if absent or the selector is invalid.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("invalid selector {:?}: {:?}", selector, err);
            None
        }
    }
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("invalid selector {:?}: {:?}", selector, err);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The cursor glow. Positions are written as `left`/`top` in pixels.
pub struct GlowElement(HtmlElement);

impl GlowElement {
    pub fn new(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }
}

impl PositionSink for GlowElement {
    fn set_position(&mut self, x: f32, y: f32) {
        let style = self.0.style();
        let moved = style
            .set_property("left", &format!("{}px", x))
            .and_then(|_| style.set_property("top", &format!("{}px", y)));
        if let Err(err) = moved {
            log::trace!("glow: style update failed: {:?}", err);
        }
    }
}

/// The typewriter target; text goes into `textContent`.
pub struct TextElement(Element);

impl TextElement {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl TextSink for TextElement {
    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// Registry of reveal candidates plus the observer watching them.
/// An element's [`ElementId`] is its index in the registry.
pub struct RevealElements {
    elements: Vec<Element>,
    observer: Option<IntersectionObserver>,
    shown_class: String,
}

impl RevealElements {
    /// Tag each element with its id so observer entries can be mapped back.
    pub fn new(elements: Vec<Element>, observer: Option<IntersectionObserver>, shown_class: &str) -> Self {
        for (i, el) in elements.iter().enumerate() {
            if let Err(err) = el.set_attribute(ID_ATTRIBUTE, &i.to_string()) {
                log::warn!("reveal: cannot tag element {}: {:?}", i, err);
            }
        }
        Self {
            elements,
            observer,
            shown_class: shown_class.to_string(),
        }
    }

    pub fn ids(&self) -> Vec<ElementId> {
        (0..self.elements.len() as u32).map(ElementId).collect()
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }
}

impl RevealSink for RevealElements {
    fn mark_shown(&mut self, id: ElementId) {
        if let Some(el) = self.get(id) {
            if let Err(err) = el.class_list().add_1(&self.shown_class) {
                log::warn!("reveal: cannot add class to {:?}: {:?}", id, err);
            }
        }
    }
}

impl VisibilitySource for RevealElements {
    fn observe(&mut self, id: ElementId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.get(id)) {
            observer.observe(el);
        }
    }

    fn unobserve(&mut self, id: ElementId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.get(id)) {
            observer.unobserve(el);
        }
    }
}

/// Convert one raw observer entry. Entries for untagged elements are dropped.
pub fn intersection_entry(raw: JsValue) -> Option<IntersectionEntry> {
    let entry = raw.dyn_into::<IntersectionObserverEntry>().ok()?;
    let id: u32 = entry.target().get_attribute(ID_ATTRIBUTE)?.parse().ok()?;
    Some(IntersectionEntry {
        target: ElementId(id),
        ratio: entry.intersection_ratio() as f32,
    })
}

//! Browser bootstrap: waits for the document, binds elements and listeners,
//! and owns the page's single runner.

use std::cell::RefCell;

use folio_fx::{FxConfig, PageEvent};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, IntersectionObserver, IntersectionObserverInit, MouseEvent};

use crate::dom::{self, GlowElement, RevealElements, TextElement};
use crate::frame::{self, FrameLoop};
use crate::runner::PageRunner;

/// Id of an optional `<script type="application/json">` element whose text
/// overrides the compiled-in config.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

pub type BrowserRunner = PageRunner<GlowElement, TextElement, RevealElements>;

struct BrowserPage {
    runner: BrowserRunner,
    frames: FrameLoop,
}

thread_local! {
    static PAGE: RefCell<Option<BrowserPage>> = RefCell::new(None);
}

/// Run `f` against the mounted page. Returns `None` before mount, or if the
/// page is already borrowed further up the stack.
fn with_page<R>(f: impl FnOnce(&mut BrowserPage) -> R) -> Option<R> {
    PAGE.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

/// Entry point used by [`export_page!`](crate::export_page). Installs logging
/// and mounts the effects once the DOM is ready.
pub fn boot(config: FxConfig, name: &'static str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("{}: no document, page effects disabled", name);
        return;
    };

    if document.ready_state() == "loading" {
        let ready = Closure::once_into_js(move || mount_or_log(config, name));
        if let Err(err) =
            document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
        {
            log::error!("{}: cannot wait for DOMContentLoaded: {:?}", name, err);
        }
    } else {
        mount_or_log(config, name);
    }
}

fn mount_or_log(config: FxConfig, name: &'static str) {
    match mount(config) {
        Ok(()) => log::info!("{}: initialized", name),
        Err(err) => log::error!("{}: mount failed: {:?}", name, err),
    }
}

/// Pause the typewriter and the frame loop.
pub fn stop() {
    with_page(|page| {
        page.frames.stop();
        page.runner.stop();
    });
}

/// Undo [`stop`].
pub fn resume() {
    with_page(|page| {
        page.runner.resume(frame::now_ms());
        if let Err(err) = page.frames.start() {
            log::error!("cannot restart frame loop: {:?}", err);
        }
    });
}

fn mount(config: FxConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = page_config(&document, config).or_default();

    let glow = dom::query(&document, &config.pointer.selector).and_then(GlowElement::new);
    let text = dom::query(&document, &config.typewriter.selector).map(TextElement::new);
    let candidates = dom::query_all(&document, &config.reveal.selector);

    let observer = if candidates.is_empty() {
        None
    } else {
        match intersection_observer(config.reveal.threshold) {
            Ok(observer) => Some(observer),
            Err(err) => {
                log::warn!("reveal: cannot create observer, reveals disabled: {:?}", err);
                None
            }
        }
    };
    let reveal = RevealElements::new(candidates, observer, &config.reveal.shown_class);
    let ids = reveal.ids();

    let runner = PageRunner::new(&config, glow, text, reveal, ids)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let frames = FrameLoop::new(|timestamp| {
        with_page(|page| page.runner.frame(timestamp));
    });

    PAGE.with(|cell| {
        *cell.borrow_mut() = Some(BrowserPage { runner, frames });
    });
    with_page(|page| page.runner.init(frame::now_ms()));

    listen_or_log(&document, "mousemove", |event: MouseEvent| {
        let x = event.client_x() as f32;
        let y = event.client_y() as f32;
        with_page(|page| page.runner.push_event(PageEvent::PointerMove { x, y }));
    });
    listen_or_log(&window, "pagehide", |_: web_sys::Event| stop());
    listen_or_log(&window, "pageshow", |_: web_sys::Event| resume());

    with_page(|page| page.frames.start()).unwrap_or(Ok(()))
}

/// The compiled-in config, unless the page carries a valid override.
fn page_config(document: &Document, fallback: FxConfig) -> FxConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return fallback;
    };
    match FxConfig::from_json(&json) {
        Ok(config) => {
            log::info!("using config from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(err) => {
            log::warn!("ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
            fallback
        }
    }
}

fn intersection_observer(threshold: f32) -> Result<IntersectionObserver, JsValue> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, _observer: IntersectionObserver| {
            let entries: Vec<_> = entries.iter().filter_map(dom::intersection_entry).collect();
            with_page(|page| {
                for entry in entries {
                    page.runner.push_event(PageEvent::Intersection(entry));
                }
            });
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold as f64));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    // Lives as long as the page.
    callback.forget();
    Ok(observer)
}

/// Like [`listen`], but a failure only costs this one listener.
fn listen_or_log<E, F>(target: &web_sys::EventTarget, kind: &str, handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    if let Err(err) = listen(target, kind, handler) {
        log::warn!("cannot listen for {}: {:?}", kind, err);
    }
}

/// Attach a listener for the lifetime of the page.
fn listen<E, F>(target: &web_sys::EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

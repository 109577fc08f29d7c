//! Browser bindings
//!
//! Page-load discovery and event wiring with `web-sys`. Each discovered
//! group gets one document-level paste listener and one keydown listener per
//! digit slot. Listeners live as long as the page, so their closures are
//! leaked with [`Closure::forget`].
//!
//! Diagnostics are written to the developer console with `web_sys::console`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, ClipboardEvent, Document, Element, HtmlInputElement, KeyboardEvent, Node};

use crate::config::{WidgetConfig, BOUND_ATTRIBUTE};
use crate::core::{DigitGroup, HandlerOutcome, Key, KeyInput};
use crate::error::{WidgetError, WidgetResult};

/// Real elements of one digit group
#[derive(Debug)]
struct BrowserGroup {
    document: Document,
    aggregate: HtmlInputElement,
    scope: Element,
    slots: Vec<HtmlInputElement>,
}

impl BrowserGroup {
    /// Reads slot values and the focused slot from the page
    fn load(&self) -> Option<DigitGroup> {
        let focus = self.document.active_element().and_then(|active| {
            self.slots.iter().position(|slot| {
                let slot: &Element = slot.as_ref();
                *slot == active
            })
        });
        DigitGroup::from_values(self.slots.iter().map(HtmlInputElement::value), focus).ok()
    }

    /// Whether the focused element lies inside the group's container
    fn focus_within(&self) -> bool {
        self.document.active_element().is_some_and(|active| {
            let node: &Node = active.as_ref();
            self.scope.contains(Some(node))
        })
    }

    /// Writes a handler outcome back to the page
    fn apply(&self, group: &DigitGroup, outcome: HandlerOutcome) {
        if outcome.is_noop() {
            return;
        }
        if outcome.values_changed {
            for (slot, value) in self.slots.iter().zip(group.slot_values()) {
                slot.set_value(&value);
            }
            self.aggregate.set_value(&group.aggregate());
        }
        if let Some(slot) = outcome.focus.and_then(|i| self.slots.get(i)) {
            if let Err(err) = slot.focus() {
                console::warn_2(&"otp-digits: could not move focus".into(), &err);
            }
        }
    }
}

fn console_warn(message: &str) {
    console::warn_1(&format!("otp-digits: {message}").into());
}

fn js_error(err: JsValue) -> WidgetError {
    WidgetError::markup(format!("{err:?}"))
}

fn document() -> WidgetResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| WidgetError::markup("no window document"))
}

/// Discovers and wires every digit group on the page
///
/// Aggregates already marked with [`BOUND_ATTRIBUTE`] are skipped, so a
/// manual call after the automatic wiring only picks up new fields.
pub fn attach_with(config: &WidgetConfig) -> WidgetResult<usize> {
    config.validate()?;
    let document = document()?;
    let aggregates = document
        .query_selector_all(&config.aggregate_selector())
        .map_err(js_error)?;

    let mut attached = 0;
    for i in 0..aggregates.length() {
        let Some(aggregate) = aggregates
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        if aggregate.has_attribute(BOUND_ATTRIBUTE) {
            continue;
        }
        let Some(scope) = aggregate.parent_element() else {
            continue;
        };
        let Some(container) = scope
            .query_selector(&config.container_selector())
            .map_err(js_error)?
        else {
            console_warn(&format!("numeric field {i} has no digit container, skipping"));
            continue;
        };
        let list = container
            .query_selector_all(&config.digit_selector())
            .map_err(js_error)?;
        let slots: Vec<HtmlInputElement> = (0..list.length())
            .filter_map(|j| list.item(j))
            .filter_map(|n| n.dyn_into::<HtmlInputElement>().ok())
            .collect();
        if slots.is_empty() {
            console_warn(&format!("digit container of field {i} has no digit inputs, skipping"));
            continue;
        }

        let group = Rc::new(BrowserGroup {
            document: document.clone(),
            aggregate,
            scope,
            slots,
        });
        bind_paste(&group)?;
        for index in 0..group.slots.len() {
            bind_keydown(&group, index)?;
        }
        group
            .aggregate
            .set_attribute(BOUND_ATTRIBUTE, "")
            .map_err(js_error)?;
        attached += 1;
    }
    Ok(attached)
}

fn bind_paste(group: &Rc<BrowserGroup>) -> WidgetResult<()> {
    let listener = Rc::clone(group);
    let handler = Closure::<dyn FnMut(ClipboardEvent)>::new(move |event: ClipboardEvent| {
        let focus_within = listener.focus_within();
        if !focus_within {
            return;
        }
        let text = event
            .clipboard_data()
            .and_then(|data| data.get_data("text").ok())
            .unwrap_or_default();
        let Some(mut state) = listener.load() else {
            return;
        };
        let outcome = state.handle_paste(&text, focus_within);
        if outcome.prevent_default {
            event.prevent_default();
        }
        listener.apply(&state, outcome);
    });
    group
        .document
        .add_event_listener_with_callback("paste", handler.as_ref().unchecked_ref())
        .map_err(js_error)?;
    handler.forget();
    Ok(())
}

fn bind_keydown(group: &Rc<BrowserGroup>, index: usize) -> WidgetResult<()> {
    let listener = Rc::clone(group);
    let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let input = KeyInput {
            key: Key::from_dom_key(&event.key()),
            ctrl: event.ctrl_key(),
        };
        let Some(mut state) = listener.load() else {
            return;
        };
        let outcome = state.handle_key(index, &input);
        if outcome.prevent_default {
            event.prevent_default();
        }
        listener.apply(&state, outcome);
    });
    group.slots[index]
        .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
        .map_err(js_error)?;
    handler.forget();
    Ok(())
}

/// Attach every digit group on the page using the default markers
#[wasm_bindgen(js_name = attachDigitGroups)]
pub fn attach_digit_groups() -> Result<usize, JsValue> {
    attach_with(&WidgetConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Attach every digit group using markers from a JSON configuration
#[wasm_bindgen(js_name = attachDigitGroupsWithConfig)]
pub fn attach_digit_groups_with_config(json: &str) -> Result<usize, JsValue> {
    WidgetConfig::from_json(json)
        .and_then(|config| attach_with(&config))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether `document.readyState` means the `load` event is already past
fn load_has_fired(ready_state: &str) -> bool {
    ready_state == "complete"
}

fn report(result: Result<usize, JsValue>) {
    match result {
        Ok(count) => console::log_1(&format!("otp-digits: {count} digit group(s) attached").into()),
        Err(err) => console::error_1(&err),
    }
}

/// Initialize: wire digit groups once the page has loaded
///
/// The module is instantiated asynchronously, so `load` may already have
/// fired; in that case the page is wired immediately.
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let loaded = window
        .document()
        .is_some_and(|document| load_has_fired(&document.ready_state()));
    if loaded {
        report(attach_digit_groups());
        return Ok(());
    }

    let on_load = Closure::<dyn FnMut()>::new(|| report(attach_digit_groups()));
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();
    Ok(())
}

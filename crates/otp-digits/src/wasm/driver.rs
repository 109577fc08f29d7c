//! WASM Driver - Unified Testing Interface
//!
//! Implements [`DigitGroupDriver`] over the mock DOM so the shared
//! specifications run against the same controller wiring the browser uses.

use super::controller::{DigitGroupController, GroupBinding};
use super::dom::{DomElement, DomEvent, MockDom, NodeId};
use crate::driver::DigitGroupDriver;
use crate::field::NumericField;

/// Mock page with one numeric field and an unrelated text input
#[derive(Debug)]
pub struct WasmDriver {
    dom: MockDom,
    controller: DigitGroupController,
    outside: NodeId,
}

impl WasmDriver {
    /// Creates a page with a `digits_count`-slot field named `code`
    #[must_use]
    pub fn new(digits_count: usize) -> Self {
        Self::with_field(&NumericField::new("code", "Code", digits_count))
    }

    /// Creates a page holding the given field
    #[must_use]
    pub fn with_field(field: &NumericField) -> Self {
        let mut dom = MockDom::from_field(field);
        let root = dom.root();
        let outside = dom.append_child(root, DomElement::input("text").with_id("outside"));
        let controller = DigitGroupController::attach(&mut dom);
        Self {
            dom,
            controller,
            outside,
        }
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns a reference to the controller
    #[must_use]
    pub fn controller(&self) -> &DigitGroupController {
        &self.controller
    }

    /// The text input outside the group
    #[must_use]
    pub fn outside_input(&self) -> NodeId {
        self.outside
    }

    /// Focuses the text input outside the group
    pub fn focus_outside(&mut self) {
        self.dispatch(DomEvent::focus(self.outside));
    }

    /// Dispatches a raw event
    pub fn dispatch(&mut self, event: DomEvent) -> bool {
        self.controller.dispatch(&mut self.dom, event)
    }

    fn group(&self) -> Option<&GroupBinding> {
        self.controller.groups().first()
    }

    fn key_down(&mut self, key: &str, ctrl: bool) -> bool {
        let Some(target) = self.dom.active_element() else {
            return false;
        };
        let event = if ctrl {
            DomEvent::key_down_with_ctrl(target, key)
        } else {
            DomEvent::key_down(target, key)
        };
        self.dispatch(event)
    }
}

impl DigitGroupDriver for WasmDriver {
    fn slot_count(&self) -> usize {
        self.group().map_or(0, GroupBinding::slot_count)
    }

    fn focus_slot(&mut self, index: usize) {
        if let Some(&slot) = self.group().and_then(|g| g.slots.get(index)) {
            self.dispatch(DomEvent::focus(slot));
        }
    }

    fn blur(&mut self) {
        self.dispatch(DomEvent::Blur);
    }

    fn type_key(&mut self, key: &str) -> bool {
        self.key_down(key, false)
    }

    fn type_key_with_ctrl(&mut self, key: &str) -> bool {
        self.key_down(key, true)
    }

    fn paste(&mut self, text: &str) -> bool {
        self.dispatch(DomEvent::paste(text))
    }

    fn slot_values(&self) -> Vec<String> {
        self.group()
            .map(|g| {
                g.slots
                    .iter()
                    .map(|&s| self.dom.value(s).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn aggregate(&self) -> String {
        self.group()
            .map(|g| self.dom.value(g.aggregate).to_string())
            .unwrap_or_default()
    }

    fn focused_slot(&self) -> Option<usize> {
        let active = self.dom.active_element()?;
        self.group()?.slot_index(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{
        run_full_specification, verify_backspace, verify_digit_entry, verify_ignored_keys,
        verify_navigation, verify_paste, verify_six_digit_scenario,
    };

    // ===== Constructor tests =====

    #[test]
    fn test_wasm_driver_new() {
        let driver = WasmDriver::new(6);
        assert_eq!(driver.slot_count(), 6);
        assert_eq!(driver.aggregate(), "");
        assert_eq!(driver.focused_slot(), None);
    }

    #[test]
    fn test_wasm_driver_with_field() {
        let driver = WasmDriver::with_field(&NumericField::new("pin", "PIN", 4));
        assert_eq!(driver.slot_count(), 4);
        assert!(driver.dom().find_by_id("pin-3").is_some());
        assert_eq!(driver.controller().groups().len(), 1);
    }

    #[test]
    fn test_wasm_driver_zero_slots() {
        let mut driver = WasmDriver::new(0);
        assert_eq!(driver.slot_count(), 0);
        driver.focus_slot(0);
        assert!(!driver.type_key("1"));
        assert!(driver.slot_values().is_empty());
    }

    #[test]
    fn test_wasm_driver_debug() {
        let driver = WasmDriver::new(2);
        assert!(format!("{driver:?}").contains("WasmDriver"));
    }

    // ===== Focus tests =====

    #[test]
    fn test_type_without_focus_is_noop() {
        let mut driver = WasmDriver::new(4);
        assert!(!driver.type_key("1"));
        assert_eq!(driver.aggregate(), "");
    }

    #[test]
    fn test_type_into_outside_input_not_handled() {
        let mut driver = WasmDriver::new(4);
        driver.focus_outside();
        assert!(!driver.type_key("1"));
        assert_eq!(driver.focused_slot(), None);
    }

    #[test]
    fn test_paste_into_outside_input() {
        let mut driver = WasmDriver::new(4);
        driver.focus_outside();
        assert!(!driver.paste("1234"));
        assert_eq!(driver.aggregate(), "");
        let outside = driver.outside_input();
        assert_eq!(driver.dom().value(outside), "1234");
    }

    // ===== Unified Specification Tests =====

    #[test]
    fn test_unified_digit_entry() {
        verify_digit_entry(&mut WasmDriver::new(6));
    }

    #[test]
    fn test_unified_navigation() {
        verify_navigation(&mut WasmDriver::new(6));
    }

    #[test]
    fn test_unified_backspace() {
        verify_backspace(&mut WasmDriver::new(6));
    }

    #[test]
    fn test_unified_ignored_keys() {
        verify_ignored_keys(&mut WasmDriver::new(6));
    }

    #[test]
    fn test_unified_paste() {
        verify_paste(&mut WasmDriver::new(6));
    }

    #[test]
    fn test_six_digit_scenario() {
        verify_six_digit_scenario(&mut WasmDriver::new(6));
    }

    #[test]
    fn test_full_specification_various_sizes() {
        for n in [1, 2, 4, 6, 8] {
            run_full_specification(&mut WasmDriver::new(n));
        }
    }
}

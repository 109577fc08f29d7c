//! Digit group controller over the mock DOM
//!
//! Performs page-load discovery and routes dispatched events to the groups
//! the way the browser binding does: one document-level paste listener per
//! group and one keydown listener per digit slot. Slot values live in the
//! DOM; every event reads them into a [`DigitGroup`], runs the handler and
//! writes the outcome back.

use tracing::{debug, warn};

use super::dom::{DomEvent, MockDom, NodeId};
use crate::config::{WidgetConfig, BOUND_ATTRIBUTE};
use crate::core::{DigitGroup, HandlerOutcome, KeyInput};

/// Elements making up one discovered digit group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBinding {
    /// Hidden aggregate input
    pub aggregate: NodeId,
    /// Parent of the aggregate; the paste containment scope
    pub scope: NodeId,
    /// Digit slot inputs in order
    pub slots: Vec<NodeId>,
}

impl GroupBinding {
    /// Position of `node` among the slots
    #[must_use]
    pub fn slot_index(&self, node: NodeId) -> Option<usize> {
        self.slots.iter().position(|&s| s == node)
    }

    /// Number of digit slots
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Reads the group state from the document
    fn load(&self, dom: &MockDom) -> Option<DigitGroup> {
        let focus = dom.active_element().and_then(|n| self.slot_index(n));
        DigitGroup::from_values(self.slots.iter().map(|&s| dom.value(s)), focus).ok()
    }

    /// Writes a handler outcome back to the document
    fn apply(&self, dom: &mut MockDom, group: &DigitGroup, outcome: HandlerOutcome) {
        if outcome.is_noop() {
            return;
        }
        if outcome.values_changed {
            for (&slot, value) in self.slots.iter().zip(group.slot_values()) {
                dom.set_value(slot, &value);
            }
            dom.set_value(self.aggregate, &group.aggregate());
            if group.is_complete() {
                debug!(aggregate = self.aggregate.index(), "all digits entered");
            }
        }
        if let Some(index) = outcome.focus {
            if let Some(&slot) = self.slots.get(index) {
                dom.focus(slot);
            }
        }
    }
}

/// Discovers digit groups and dispatches events to them
#[derive(Debug, Clone)]
pub struct DigitGroupController {
    config: WidgetConfig,
    groups: Vec<GroupBinding>,
}

impl DigitGroupController {
    /// Discovers groups using the default markers
    #[must_use]
    pub fn attach(dom: &mut MockDom) -> Self {
        Self::attach_with(dom, WidgetConfig::default())
    }

    /// Discovers groups using the markers in `config`
    ///
    /// Aggregate fields without a digit container, or whose container holds
    /// no digit slots, are skipped. So are fields already carrying
    /// [`BOUND_ATTRIBUTE`]; every attached aggregate is marked with it.
    #[must_use]
    pub fn attach_with(dom: &mut MockDom, config: WidgetConfig) -> Self {
        let aggregates = dom.query_all(dom.root(), |e| {
            e.is_input_tagged(&config.type_attribute, &config.aggregate_type)
                && e.get_attr(BOUND_ATTRIBUTE).is_none()
        });

        let mut groups = Vec::with_capacity(aggregates.len());
        for aggregate in aggregates {
            let Some(scope) = dom.parent(aggregate) else {
                continue;
            };
            let Some(container) =
                dom.query(scope, |e| e.has_class(&config.digits_container_class))
            else {
                warn!(aggregate = aggregate.index(), "numeric field without digit container, skipping");
                continue;
            };
            let slots = dom.query_all(container, |e| {
                e.is_input_tagged(&config.type_attribute, &config.digit_type)
            });
            if slots.is_empty() {
                warn!(aggregate = aggregate.index(), "digit container has no digit inputs, skipping");
                continue;
            }
            if let Some(element) = dom.get_mut(aggregate) {
                element.set_attr(BOUND_ATTRIBUTE, "");
            }
            debug!(aggregate = aggregate.index(), slots = slots.len(), "digit group attached");
            groups.push(GroupBinding {
                aggregate,
                scope,
                slots,
            });
        }

        Self { config, groups }
    }

    /// The discovered groups in document order
    #[must_use]
    pub fn groups(&self) -> &[GroupBinding] {
        &self.groups
    }

    /// The configuration used for discovery
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The group owning a digit slot
    #[must_use]
    pub fn group_of_slot(&self, node: NodeId) -> Option<(&GroupBinding, usize)> {
        self.groups
            .iter()
            .find_map(|g| g.slot_index(node).map(|i| (g, i)))
    }

    /// Dispatches an event; returns whether its default action was prevented
    pub fn dispatch(&self, dom: &mut MockDom, event: DomEvent) -> bool {
        dom.record_event(&event);
        match event {
            DomEvent::KeyDown { target, key, ctrl } => {
                let input = KeyInput {
                    key: key.as_str().into(),
                    ctrl,
                };
                self.key_down(dom, target, &input)
            }
            DomEvent::Paste { text } => {
                let prevented = self.paste(dom, &text);
                if !prevented {
                    dom.apply_default_paste(&text);
                }
                prevented
            }
            DomEvent::Focus { .. } | DomEvent::Blur => false,
        }
    }

    /// Runs the keydown listener of the slot `target`, if it is one
    fn key_down(&self, dom: &mut MockDom, target: NodeId, input: &KeyInput) -> bool {
        let Some((binding, index)) = self.group_of_slot(target) else {
            return false;
        };
        let Some(mut group) = binding.load(dom) else {
            return false;
        };
        let outcome = group.handle_key(index, input);
        binding.apply(dom, &group, outcome);
        outcome.prevent_default
    }

    /// Runs every group's paste listener
    fn paste(&self, dom: &mut MockDom, text: &str) -> bool {
        let mut prevented = false;
        for binding in &self.groups {
            let focus_within = dom
                .active_element()
                .is_some_and(|n| dom.contains(binding.scope, n));
            let Some(mut group) = binding.load(dom) else {
                continue;
            };
            let outcome = group.handle_paste(text, focus_within);
            binding.apply(dom, &group, outcome);
            prevented |= outcome.prevent_default;
        }
        prevented
    }
}

//! Digit group state model
//!
//! [`DigitGroup`] owns the transition rules of the widget: which keys move
//! focus, which fill or clear a slot, and when a paste is distributed. It
//! never touches a DOM. Each handler returns a [`HandlerOutcome`] that the
//! host applies to its real elements.

use tracing::{debug, trace};

use super::key::{Key, KeyInput};
use super::paste::PastePayload;
use crate::error::{WidgetError, WidgetResult};

/// What the host must do after a handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandlerOutcome {
    /// Call `preventDefault` on the event
    pub prevent_default: bool,
    /// Slot values changed; rewrite the slots and the aggregate field
    pub values_changed: bool,
    /// Move focus to this slot
    pub focus: Option<usize>,
}

impl HandlerOutcome {
    /// Leave the event alone
    pub const PASS_THROUGH: Self = Self {
        prevent_default: false,
        values_changed: false,
        focus: None,
    };

    /// Swallow the event without any other effect
    pub const SUPPRESSED: Self = Self {
        prevent_default: true,
        values_changed: false,
        focus: None,
    };

    /// Swallow the event and move focus
    #[must_use]
    pub const fn moved(slot: usize) -> Self {
        Self {
            prevent_default: true,
            values_changed: false,
            focus: Some(slot),
        }
    }

    /// Swallow the event, rewrite values and move focus
    #[must_use]
    pub const fn edited(slot: usize) -> Self {
        Self {
            prevent_default: true,
            values_changed: true,
            focus: Some(slot),
        }
    }

    /// Whether the handler had any visible effect
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !self.values_changed && self.focus.is_none()
    }
}

/// An ordered run of single-digit slots plus the derived aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitGroup {
    slots: Vec<Option<char>>,
    focus: Option<usize>,
}

impl DigitGroup {
    /// Creates an empty group with no slot focused
    pub fn new(slot_count: usize) -> WidgetResult<Self> {
        if slot_count == 0 {
            return Err(WidgetError::EmptyGroup);
        }
        Ok(Self {
            slots: vec![None; slot_count],
            focus: None,
        })
    }

    /// Rebuilds a group from the values currently held by the host
    ///
    /// A value that is not a single ASCII digit reads as empty.
    pub fn from_values<I, S>(values: I, focus: Option<usize>) -> WidgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots: Vec<Option<char>> = values
            .into_iter()
            .map(|value| parse_slot(value.as_ref()))
            .collect();
        if slots.is_empty() {
            return Err(WidgetError::EmptyGroup);
        }
        let mut group = Self { slots, focus: None };
        group.set_focus(focus);
        Ok(group)
    }

    /// Number of digit slots
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The digit held by a slot, if any
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Slot values as the DOM holds them (empty string for an empty slot)
    #[must_use]
    pub fn slot_values(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.map(String::from).unwrap_or_default())
            .collect()
    }

    /// The focused slot, if focus is inside the group
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Sets the focused slot; an out-of-range index clears focus
    pub fn set_focus(&mut self, focus: Option<usize>) {
        self.focus = focus.filter(|&i| i < self.slots.len());
    }

    /// Concatenation of all filled slots in order
    #[must_use]
    pub fn aggregate(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Whether every slot holds a digit
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Handles a keydown delivered to `slot`
    pub fn handle_key(&mut self, slot: usize, input: &KeyInput) -> HandlerOutcome {
        if input.ctrl {
            trace!(slot, key = %input.key.dom_name(), "ctrl held, passing through");
            return HandlerOutcome::PASS_THROUGH;
        }
        if slot >= self.slots.len() {
            debug!(slot, count = self.slots.len(), "keydown for unknown slot");
            return HandlerOutcome::PASS_THROUGH;
        }

        let outcome = match &input.key {
            Key::ArrowLeft => HandlerOutcome::moved(self.step(slot, -1)),
            Key::ArrowRight => HandlerOutcome::moved(self.step(slot, 1)),
            Key::Backspace => self.backspace(),
            Key::Digit(_) => match input.key.digit_char() {
                Some(digit) => {
                    self.slots[slot] = Some(digit);
                    HandlerOutcome::edited(self.step(slot, 1))
                }
                None => HandlerOutcome::SUPPRESSED,
            },
            Key::Other(name) => {
                trace!(slot, key = %name, "ignoring non-digit key");
                HandlerOutcome::SUPPRESSED
            }
        };

        if let Some(next) = outcome.focus {
            self.focus = Some(next);
        }
        outcome
    }

    /// Handles a document-wide paste
    ///
    /// `focus_within` is the host's containment check: whether the focused
    /// element lies inside this group's container.
    pub fn handle_paste(&mut self, text: &str, focus_within: bool) -> HandlerOutcome {
        if !focus_within {
            return HandlerOutcome::PASS_THROUGH;
        }

        match PastePayload::accept(text, self.slots.len()) {
            Ok(payload) => {
                for (slot, digit) in self.slots.iter_mut().zip(payload.digits()) {
                    *slot = Some(*digit);
                }
                let last = self.slots.len() - 1;
                self.focus = Some(last);
                debug!(slots = self.slots.len(), "paste distributed");
                HandlerOutcome::edited(last)
            }
            Err(reason) => {
                debug!(%reason, "paste rejected");
                HandlerOutcome::SUPPRESSED
            }
        }
    }

    /// Clears the rightmost filled slot and focuses the one before it
    fn backspace(&mut self) -> HandlerOutcome {
        match self.slots.iter().rposition(Option::is_some) {
            Some(index) => {
                self.slots[index] = None;
                HandlerOutcome::edited(index.saturating_sub(1))
            }
            None => HandlerOutcome::SUPPRESSED,
        }
    }

    /// Index `delta` slots away from `from`, wrapping at both ends
    fn step(&self, from: usize, delta: isize) -> usize {
        let count = self.slots.len();
        if delta < 0 {
            (from + count - delta.unsigned_abs() % count) % count
        } else {
            (from + delta.unsigned_abs()) % count
        }
    }
}

fn parse_slot(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c),
        (None, _) => None,
        _ => {
            trace!(value, "slot holds a non-digit value, reading as empty");
            None
        }
    }
}

//! Segmented numeric one-time-password input
//!
//! A numeric field is rendered as a hidden aggregate input plus N single
//! digit inputs. This crate wires those inputs into one entry experience:
//!
//! - typing a digit fills the slot and advances focus (wrapping at the end)
//! - `Backspace` clears the rightmost filled slot and steps focus back
//! - `ArrowLeft`/`ArrowRight` move focus with wrap-around
//! - pasting exactly N digits fills every slot
//! - the aggregate input always mirrors the concatenated slot values
//!
//! Invalid input is ignored silently. The rules live in [`core`]; hosts in
//! [`wasm`] apply them to a mock DOM or, with the `wasm` feature, to the
//! real page.
//!
//! # Example
//!
//! ```rust
//! use otp_digits::prelude::*;
//!
//! let mut group = DigitGroup::new(6).unwrap();
//! group.set_focus(Some(0));
//!
//! group.handle_key(0, &KeyInput::new("4"));
//! group.handle_key(1, &KeyInput::new("2"));
//! assert_eq!(group.aggregate(), "42");
//! assert_eq!(group.focus(), Some(2));
//!
//! let outcome = group.handle_paste("123456", true);
//! assert!(outcome.prevent_default);
//! assert_eq!(group.aggregate(), "123456");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod field;

/// DOM hosts - mock DOM always available, browser binding behind `wasm`
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{WidgetConfig, BOUND_ATTRIBUTE};
    pub use crate::core::{
        DigitGroup, HandlerOutcome, Key, KeyInput, PastePayload, PasteRejection,
    };
    pub use crate::driver::DigitGroupDriver;
    pub use crate::error::{FieldError, WidgetError, WidgetResult};
    pub use crate::field::NumericField;
    pub use crate::wasm::{
        DigitGroupController, DomElement, DomEvent, GroupBinding, MockDom, NodeId, WasmDriver,
    };
}

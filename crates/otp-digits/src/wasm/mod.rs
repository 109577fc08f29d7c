//! DOM hosts for the digit group
//!
//! The mock DOM, its controller and driver are always available so the whole
//! event wiring is testable natively. The real browser binding needs the
//! `wasm` feature.

#[cfg(feature = "wasm")]
pub mod browser;
mod controller;
mod dom;
mod driver;

pub use controller::{DigitGroupController, GroupBinding};
pub use dom::{DomElement, DomEvent, MockDom, NodeId};
pub use driver::WasmDriver;

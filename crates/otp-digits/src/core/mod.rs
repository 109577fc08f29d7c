//! Platform-independent digit group logic
//!
//! Nothing in here knows about a DOM. Hosts (the mock DOM controller and the
//! browser binding) read slot values into a [`DigitGroup`], run a handler and
//! apply the returned [`HandlerOutcome`].

pub mod group;
pub mod key;
pub mod paste;

pub use group::{DigitGroup, HandlerOutcome};
pub use key::{Key, KeyInput};
pub use paste::{PastePayload, PasteRejection};

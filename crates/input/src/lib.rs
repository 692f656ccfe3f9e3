//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and mouse events
//! into [`PointerEvent`]s in terminal cell coordinates. Translating those into
//! layout points is the view's job, since only it knows where the board is drawn.

pub mod map;
pub mod pointer;

pub use mandarin_types as types;

pub use map::{handle_key_event, should_quit};
pub use pointer::{handle_mouse_event, PointerEvent, PointerKind};

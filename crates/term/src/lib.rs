//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: board, side panel and overlays for a `RoundSnapshot`, plus
//!   the terminal-to-layout pointer mapping
//! - [`renderer`]: crossterm session and diff encoder
//! - [`render_throttle`]: fingerprint-based frame skipping

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use mandarin_core as core;
pub use mandarin_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{time_bar_slots, AnchorY, GameView, HudView, Viewport, TIME_BAR_SLOTS};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

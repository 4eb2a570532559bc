//! `ratatui-pincode-core` provides a segmented pin code / one-time-code input for terminal UIs.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime and no timers: cursor animation is evaluated from the `Instant` passed to
//!   [`pin_input::PinInput::render_at`]; [`pin_input::PinInput::next_frame_in`] tells you when
//!   the next redraw is due.
//! - The entered value belongs to the app. The widget edits it through `&mut String` and reads it
//!   on every render, so resetting it from outside is just assigning to it.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-pincode`.
//!
//! Useful entry points:
//! - [`pin_input::PinInput`]: the widget.
//! - [`style::PinTheme`] / [`style::PinTextStyle`]: cell and glyph styling.
//! - [`cell::cell_visual`]: per-cell state as a pure function, for custom renderers.
//! - [`cursor::CursorAnimation`]: fade or slide cursor transitions.
//!
//! ## Logging
//!
//! Value changes, completion and focus changes are reported as `tracing` events under the
//! `ratatui_pincode` target. Install any subscriber to see them.
pub mod style;

pub mod input;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod keymap;
pub mod render;

pub mod cell;
pub mod cursor;
pub mod error;
pub mod pin_input;

//! Segmented pin code input for [ratatui](https://ratatui.rs).
//!
//! This is the facade crate; everything lives in `ratatui-pincode-core` and is re-exported here.
//! Enable the `crossterm` feature for [`crossterm_input`].
pub use ratatui_pincode_core::cell;
pub use ratatui_pincode_core::cursor;
pub use ratatui_pincode_core::error;
pub use ratatui_pincode_core::input;
pub use ratatui_pincode_core::keymap;
pub use ratatui_pincode_core::pin_input;
pub use ratatui_pincode_core::render;
pub use ratatui_pincode_core::style;

#[cfg(feature = "crossterm")]
pub use ratatui_pincode_core::crossterm_input;

pub use ratatui_pincode_core::error::PinInputError;
pub use ratatui_pincode_core::pin_input::PinInput;
pub use ratatui_pincode_core::pin_input::PinInputAction;
pub use ratatui_pincode_core::pin_input::PinInputOptions;
pub use ratatui_pincode_core::style::PinTextStyle;
pub use ratatui_pincode_core::style::PinTheme;

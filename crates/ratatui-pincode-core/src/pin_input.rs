use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::cell;
use crate::cell::CellContext;
use crate::cell::CellVisual;
use crate::cursor;
use crate::cursor::CursorAnimation;
use crate::cursor::CursorFrame;
use crate::cursor::CursorTracker;
use crate::error::PinInputError;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::PinBindings;
use crate::render;
use crate::style::PinTextStyle;
use crate::style::PinTheme;

const LOG_TARGET: &str = "ratatui_pincode";

/// Characters the input surface lets through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinKeyboard {
    /// Any printable character.
    #[default]
    Text,
    /// ASCII digits only.
    Numeric,
}

impl PinKeyboard {
    pub fn accepts(self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self {
            PinKeyboard::Text => true,
            PinKeyboard::Numeric => ch.is_ascii_digit(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinInputOptions {
    /// Number of cells, and the maximum number of characters.
    pub length: usize,
    pub obscure_text: bool,
    pub obscuring_character: String,
    pub animation_type: CursorAnimation,
    pub show_cursor: bool,
    pub cursor_color: Color,
    pub cursor_symbol: String,
    /// Half period of the cursor blink once its transition settled. `None` keeps it steady.
    pub cursor_blink: Option<Duration>,
    /// Columns between adjacent cells.
    pub spacing: u16,
    pub animation_duration: Duration,
    pub background_color: Color,
    pub enable_active_fill: bool,
    pub pin_theme: PinTheme,
    pub pin_text_style: PinTextStyle,
    pub keyboard: PinKeyboard,
    pub bindings: PinBindings,
}

impl PinInputOptions {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            obscure_text: false,
            obscuring_character: "*".to_string(),
            animation_type: CursorAnimation::Fade,
            show_cursor: true,
            cursor_color: Color::Reset,
            cursor_symbol: "│".to_string(),
            cursor_blink: Some(Duration::from_millis(500)),
            spacing: 1,
            animation_duration: Duration::from_millis(200),
            background_color: Color::Reset,
            enable_active_fill: true,
            pin_theme: PinTheme::default(),
            pin_text_style: PinTextStyle::default(),
            keyboard: PinKeyboard::Text,
            bindings: PinBindings::default(),
        }
    }

    pub fn validate(&self) -> Result<(), PinInputError> {
        if self.length == 0 {
            return Err(PinInputError::ZeroLength);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinInputAction {
    None,
    /// Focus changed; the value did not.
    Redraw,
    /// The value changed. Carries the clamped value.
    Changed(String),
    /// The value changed and just reached the configured length.
    Completed(String),
}

impl PinInputAction {
    /// The new value if this action reports a change.
    pub fn value(&self) -> Option<&str> {
        match self {
            PinInputAction::Changed(v) | PinInputAction::Completed(v) => Some(v),
            PinInputAction::None | PinInputAction::Redraw => None,
        }
    }

    pub fn needs_redraw(&self) -> bool {
        !matches!(self, PinInputAction::None)
    }
}

type Callback = Box<dyn FnMut(&str)>;

pub struct PinInput {
    options: PinInputOptions,
    focused: bool,
    // Raw keystrokes land here before they are clamped and copied into the bound value.
    buffer: String,
    bounds: Option<Rect>,
    cursor: CursorTracker,
    on_changed: Option<Callback>,
    on_completed: Option<Callback>,
}

impl fmt::Debug for PinInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinInput")
            .field("options", &self.options)
            .field("focused", &self.focused)
            .field("bounds", &self.bounds)
            .field("on_changed", &self.on_changed.is_some())
            .field("on_completed", &self.on_completed.is_some())
            .finish_non_exhaustive()
    }
}

impl PinInput {
    pub fn new(length: usize) -> Result<Self, PinInputError> {
        Self::with_options(PinInputOptions::new(length))
    }

    pub fn with_options(options: PinInputOptions) -> Result<Self, PinInputError> {
        options.validate()?;
        Ok(Self {
            options,
            focused: false,
            buffer: String::new(),
            bounds: None,
            cursor: CursorTracker::default(),
            on_changed: None,
            on_completed: None,
        })
    }

    /// Called with the clamped value after every change.
    pub fn on_changed(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_changed = Some(Box::new(f));
        self
    }

    /// Called when a change brings the value to exactly `length` characters.
    pub fn on_completed(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_completed = Some(Box::new(f));
        self
    }

    pub fn set_on_changed(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_changed = Some(Box::new(f));
    }

    pub fn set_on_completed(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_completed = Some(Box::new(f));
    }

    pub fn options(&self) -> &PinInputOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PinInputOptions) -> Result<(), PinInputError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn length(&self) -> usize {
        self.options.length
    }

    pub fn theme_mut(&mut self) -> &mut PinTheme {
        &mut self.options.pin_theme
    }

    pub fn text_style_mut(&mut self) -> &mut PinTextStyle {
        &mut self.options.pin_text_style
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns `true` if focus actually changed.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        if self.focused == focused {
            return false;
        }
        self.focused = focused;
        tracing::debug!(target: LOG_TARGET, focused, "pin input focus changed");
        true
    }

    pub fn focus(&mut self) -> bool {
        self.set_focused(true)
    }

    /// Drops focus. The entered value is left as is.
    pub fn blur(&mut self) -> bool {
        self.set_focused(false)
    }

    /// Control bounds from the last render, used for click-to-focus.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Feeds one input event to the control.
    ///
    /// Mouse and terminal focus events are always handled. Keys and pastes are only accepted
    /// while focused. Every edit that alters the raw input is a change event and goes through
    /// [`PinInput::apply_raw`].
    pub fn handle_event(&mut self, value: &mut String, event: InputEvent) -> PinInputAction {
        match event {
            InputEvent::Mouse(m) => self.handle_mouse(m),
            InputEvent::FocusLost => self.focus_action(false),
            InputEvent::FocusGained => PinInputAction::None,
            InputEvent::Key(_) | InputEvent::Paste(_) if !self.focused => PinInputAction::None,
            InputEvent::Paste(text) => {
                let keyboard = self.options.keyboard;
                self.edit(value, |raw| raw.extend(text.chars().filter(|c| keyboard.accepts(*c))))
            }
            InputEvent::Key(key) => self.handle_key(value, key),
        }
    }

    /// Applies a raw value from the input surface.
    ///
    /// The raw value is truncated to `length` characters and written to both the internal
    /// buffer and `value`. `on_changed` then fires with the clamped value, followed by
    /// `on_completed` if the value just reached `length`.
    #[tracing::instrument(skip_all, target = "ratatui_pincode", level = "trace")]
    pub fn apply_raw(&mut self, value: &mut String, raw: &str) -> PinInputAction {
        let length = self.options.length;
        let was_complete = value.chars().count() >= length;

        let clamped = truncate_chars(raw, length);
        if clamped.len() < raw.len() {
            tracing::trace!(
                target: LOG_TARGET,
                raw_len = raw.chars().count(),
                length,
                "truncated pin input"
            );
        }

        self.buffer.clear();
        self.buffer.push_str(clamped);
        value.clear();
        value.push_str(clamped);

        let len = value.chars().count();
        tracing::debug!(target: LOG_TARGET, len, length, "pin value changed");
        if let Some(cb) = self.on_changed.as_mut() {
            cb(value);
        }

        if was_complete || len != length {
            return PinInputAction::Changed(value.clone());
        }

        tracing::debug!(target: LOG_TARGET, length, "pin completed");
        if let Some(cb) = self.on_completed.as_mut() {
            cb(value);
        }
        PinInputAction::Completed(value.clone())
    }

    /// Size of the control in cells, before clipping.
    pub fn desired_size(&self) -> (u16, u16) {
        let theme = &self.options.pin_theme;
        let n = self.options.length as u64;
        let w = n * theme.field_width as u64 + n.saturating_sub(1) * self.options.spacing as u64;
        (w.min(u16::MAX as u64) as u16, theme.field_height)
    }

    /// Rects of every cell when rendered into `area`, clipped to `area` (possibly empty).
    pub fn cell_rects(&self, area: Rect) -> Vec<Rect> {
        let theme = &self.options.pin_theme;
        let step = theme.field_width as u64 + self.options.spacing as u64;
        (0..self.options.length as u64)
            .map(|i| {
                let x = (area.x as u64 + i * step).min(u16::MAX as u64) as u16;
                Rect::new(x, area.y, theme.field_width, theme.field_height).intersection(area)
            })
            .collect()
    }

    /// Visual description of cell `index` for `value` under the current configuration.
    pub fn cell_visual(&self, index: usize, value: &str) -> CellVisual {
        cell::cell_visual(index, value, &self.cell_context())
    }

    /// Cell index where the cursor is shown, if any.
    pub fn cursor_index(&self, value: &str) -> Option<usize> {
        let len = value.chars().count();
        (self.options.show_cursor && self.focused && len < self.options.length).then_some(len)
    }

    /// Whether the app should keep redrawing (cursor transition or blink in progress).
    pub fn is_animating(&self, now: Instant) -> bool {
        self.cursor.is_animating(
            now,
            self.options.animation_duration,
            self.options.cursor_blink,
        )
    }

    /// Time until the cursor looks different without further input, for sizing the app's event
    /// poll timeout. `None` while the cursor is hidden or settled without blinking.
    pub fn next_frame_in(&self, now: Instant) -> Option<Duration> {
        self.cursor.next_frame_in(
            now,
            self.options.animation_duration,
            self.options.cursor_blink,
        )
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, value: &str) {
        self.render_at(area, buf, value, Instant::now());
    }

    /// Renders the control with cursor animation evaluated at `now`.
    pub fn render_at(&mut self, area: Rect, buf: &mut Buffer, value: &str, now: Instant) {
        let (w, h) = self.desired_size();
        let bounds = Rect::new(area.x, area.y, w, h).intersection(area);
        if bounds.is_empty() {
            self.bounds = None;
            return;
        }
        self.bounds = Some(bounds);
        buf.set_style(bounds, Style::default().bg(self.options.background_color));

        let rects = self.cell_rects(area);
        {
            let ctx = self.cell_context();
            for (i, rect) in rects.iter().enumerate() {
                if rect.is_empty() {
                    continue;
                }
                cell::render_cell(*rect, buf, &cell::cell_visual(i, value, &ctx), &ctx);
            }
        }

        let target = self.cursor_index(value);
        self.cursor.update(target, now);
        let frame = self.cursor.frame(
            now,
            self.options.animation_type,
            self.options.animation_duration,
            self.options.cursor_blink,
        );
        if let Some(frame) = frame {
            self.render_cursor(&rects, bounds, buf, value, frame);
        }
    }

    fn render_cursor(
        &self,
        rects: &[Rect],
        bounds: Rect,
        buf: &mut Buffer,
        value: &str,
        frame: CursorFrame,
    ) {
        if !frame.blink_on {
            return;
        }
        let theme = &self.options.pin_theme;
        let Some(rect) = rects.get(frame.index).filter(|r| !r.is_empty()) else {
            return;
        };
        let target = cell::glyph_area(*rect, theme);
        let y = target.y + target.height / 2;
        let to_x = render::center_col(target);

        let mut color = self.options.cursor_color;
        let x = match self.options.animation_type {
            CursorAnimation::Slide => {
                let from = frame
                    .from
                    .and_then(|i| rects.get(i))
                    .filter(|r| !r.is_empty());
                match from {
                    Some(from) => {
                        let from_x = render::center_col(cell::glyph_area(*from, theme));
                        cursor::lerp_col(from_x, to_x, frame.progress)
                    }
                    None => to_x,
                }
            }
            CursorAnimation::Fade => {
                let fill = match self.cell_visual(frame.index, value).fill_color {
                    Color::Reset => self.options.background_color,
                    c => c,
                };
                match cursor::fade_color(color, fill, frame.progress) {
                    Some(c) => color = c,
                    None => return,
                }
                to_x
            }
        };

        if x < bounds.x || x >= bounds.right() {
            return;
        }
        // Mid-slide the cursor only shows in gaps and the target's glyph area.
        let in_target = x >= target.x && x < target.right();
        if !in_target && rects.iter().any(|r| x >= r.x && x < r.right()) {
            return;
        }
        render::render_str_clipped(
            x,
            y,
            bounds.right() - x,
            buf,
            &self.options.cursor_symbol,
            Style::default().fg(color),
        );
    }

    fn cell_context(&self) -> CellContext<'_> {
        CellContext {
            theme: &self.options.pin_theme,
            text_style: &self.options.pin_text_style,
            focused: self.focused,
            obscure_text: self.options.obscure_text,
            obscuring_character: &self.options.obscuring_character,
            show_cursor: self.options.show_cursor,
            enable_active_fill: self.options.enable_active_fill,
        }
    }

    fn handle_key(&mut self, value: &mut String, key: KeyEvent) -> PinInputAction {
        let bindings = &self.options.bindings;
        if bindings.is_blur(&key) {
            return self.focus_action(false);
        }
        if bindings.is_clear(&key) {
            return self.edit(value, String::clear);
        }
        if bindings.is_delete_last(&key) {
            return self.edit(value, |raw| {
                raw.pop();
            });
        }
        match key.code {
            KeyCode::Char(c) if !key.modifiers.is_command() && self.options.keyboard.accepts(c) => {
                self.edit(value, |raw| raw.push(c))
            }
            _ => PinInputAction::None,
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> PinInputAction {
        let MouseEventKind::Down(MouseButton::Left) = m.kind else {
            return PinInputAction::None;
        };
        let inside = self
            .bounds
            .is_some_and(|b| b.contains(Position::new(m.x, m.y)));
        self.focus_action(inside)
    }

    fn focus_action(&mut self, focused: bool) -> PinInputAction {
        if self.set_focused(focused) {
            PinInputAction::Redraw
        } else {
            PinInputAction::None
        }
    }

    // The buffer starts from the bound value so external resets are never lost.
    fn edit(&mut self, value: &mut String, f: impl FnOnce(&mut String)) -> PinInputAction {
        let mut raw = std::mem::take(&mut self.buffer);
        raw.clone_from(value);
        f(&mut raw);
        if raw == *value {
            self.buffer = raw;
            return PinInputAction::None;
        }
        self.apply_raw(value, &raw)
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

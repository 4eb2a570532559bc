use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;

use crate::render;
use crate::style::BorderWeight;
use crate::style::PinFieldShape;
use crate::style::PinTextStyle;
use crate::style::PinTheme;

/// Configuration shared by every cell in one render pass.
#[derive(Clone, Copy, Debug)]
pub struct CellContext<'a> {
    pub theme: &'a PinTheme,
    pub text_style: &'a PinTextStyle,
    pub focused: bool,
    pub obscure_text: bool,
    pub obscuring_character: &'a str,
    pub show_cursor: bool,
    pub enable_active_fill: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellVisual {
    pub filled: bool,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_weight: BorderWeight,
    /// What the cell displays. Empty for unfilled cells.
    pub glyph: String,
    pub cursor_visible: bool,
}

pub fn cell_visual(index: usize, value: &str, ctx: &CellContext<'_>) -> CellVisual {
    let theme = ctx.theme;
    let len = value.chars().count();
    let filled = len > index;

    let border_color = if filled {
        theme.active_color
    } else if ctx.focused {
        theme.selected_color
    } else {
        theme.inactive_color
    };
    let border_weight = if filled {
        theme.selected_border_width
    } else {
        theme.inactive_border_width
    };
    let fill_color = if filled && ctx.enable_active_fill {
        theme.active_fill_color
    } else if !filled && ctx.focused {
        theme.selected_fill_color
    } else {
        theme.inactive_fill_color
    };

    let glyph = if !filled {
        String::new()
    } else if ctx.obscure_text {
        ctx.obscuring_character.to_string()
    } else {
        value
            .chars()
            .nth(index)
            .map(String::from)
            .unwrap_or_default()
    };

    CellVisual {
        filled,
        fill_color,
        border_color,
        border_weight,
        glyph,
        cursor_visible: ctx.show_cursor && ctx.focused && len == index,
    }
}

/// The part of a cell's rect that holds the glyph (inside the border, above the underline).
pub fn glyph_area(rect: Rect, theme: &PinTheme) -> Rect {
    match theme.shape {
        PinFieldShape::Box if has_box_border(rect) => Rect::new(
            rect.x + 1,
            rect.y + 1,
            rect.width - 2,
            rect.height - 2,
        ),
        PinFieldShape::Underline if rect.height >= 2 => {
            Rect::new(rect.x, rect.y, rect.width, rect.height - 1)
        }
        _ => rect,
    }
}

pub fn render_cell(area: Rect, buf: &mut Buffer, visual: &CellVisual, ctx: &CellContext<'_>) {
    if area.is_empty() {
        return;
    }
    let theme = ctx.theme;
    let mut glyph_style = ctx.text_style.style();

    match theme.shape {
        PinFieldShape::Box => {
            // Reset is transparent: the control background shows through.
            if visual.fill_color != Color::Reset {
                buf.set_style(area, Style::default().bg(visual.fill_color));
                glyph_style = glyph_style.bg(visual.fill_color);
            }
            if has_box_border(area) {
                Block::bordered()
                    .border_type(visual.border_weight.border_type(theme.border_radius))
                    .border_style(Style::default().fg(visual.border_color))
                    .render(area, buf);
            }
        }
        PinFieldShape::Underline => {
            if area.height >= 2 {
                let y = area.bottom() - 1;
                let line = visual.border_weight.underline_symbol().repeat(area.width as usize);
                render::render_str_clipped(
                    area.x,
                    y,
                    area.width,
                    buf,
                    &line,
                    Style::default().fg(visual.border_color),
                );
            } else {
                glyph_style = glyph_style
                    .add_modifier(Modifier::UNDERLINED)
                    .underline_color(visual.border_color);
            }
        }
    }

    render::render_str_centered(glyph_area(area, theme), buf, &visual.glyph, glyph_style);
}

fn has_box_border(rect: Rect) -> bool {
    rect.width >= 3 && rect.height >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(theme: &'a PinTheme, text: &'a PinTextStyle, focused: bool) -> CellContext<'a> {
        CellContext {
            theme,
            text_style: text,
            focused,
            obscure_text: false,
            obscuring_character: "*",
            show_cursor: true,
            enable_active_fill: true,
        }
    }

    fn themed() -> PinTheme {
        PinTheme {
            active_fill_color: Color::Green,
            selected_fill_color: Color::Yellow,
            inactive_fill_color: Color::DarkGray,
            active_color: Color::Blue,
            selected_color: Color::Cyan,
            inactive_color: Color::Gray,
            ..PinTheme::default()
        }
    }

    #[test]
    fn filled_cells_use_active_colors() {
        let theme = themed();
        let text = PinTextStyle::default();
        let v = cell_visual(1, "12", &ctx(&theme, &text, false));
        assert!(v.filled);
        assert_eq!(v.border_color, Color::Blue);
        assert_eq!(v.border_weight, BorderWeight::Thick);
        assert_eq!(v.fill_color, Color::Green);
        assert_eq!(v.glyph, "2");
        assert!(!v.cursor_visible);
    }

    #[test]
    fn unfilled_cells_follow_focus() {
        let theme = themed();
        let text = PinTextStyle::default();

        let focused = cell_visual(2, "12", &ctx(&theme, &text, true));
        assert!(!focused.filled);
        assert_eq!(focused.border_color, Color::Cyan);
        assert_eq!(focused.fill_color, Color::Yellow);
        assert_eq!(focused.border_weight, BorderWeight::Thin);
        assert_eq!(focused.glyph, "");
        assert!(focused.cursor_visible);

        let later = cell_visual(3, "12", &ctx(&theme, &text, true));
        assert_eq!(later.border_color, Color::Cyan);
        assert!(!later.cursor_visible);

        let blurred = cell_visual(2, "12", &ctx(&theme, &text, false));
        assert_eq!(blurred.border_color, Color::Gray);
        assert_eq!(blurred.fill_color, Color::DarkGray);
        assert!(!blurred.cursor_visible);
    }

    #[test]
    fn active_fill_can_be_disabled() {
        let theme = themed();
        let text = PinTextStyle::default();
        let mut c = ctx(&theme, &text, true);
        c.enable_active_fill = false;
        assert_eq!(cell_visual(0, "1", &c).fill_color, Color::DarkGray);
    }

    #[test]
    fn obscured_glyph_replaces_only_filled_cells() {
        let theme = themed();
        let text = PinTextStyle::default();
        let mut c = ctx(&theme, &text, false);
        c.obscure_text = true;
        c.obscuring_character = "•";
        let glyphs: Vec<String> = (0..4).map(|i| cell_visual(i, "12", &c).glyph).collect();
        assert_eq!(glyphs, vec!["•", "•", "", ""]);
    }

    #[test]
    fn glyph_indexes_by_char_not_byte() {
        let theme = themed();
        let text = PinTextStyle::default();
        let v = cell_visual(1, "é7", &ctx(&theme, &text, false));
        assert_eq!(v.glyph, "7");
    }

    #[test]
    fn box_cell_draws_border_and_centered_glyph() {
        let theme = PinTheme {
            border_radius: 0,
            ..PinTheme::default()
        };
        let text = PinTextStyle::default();
        let c = ctx(&theme, &text, false);
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        render_cell(area, &mut buf, &cell_visual(0, "7", &c), &c);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "┏");
        assert_eq!(buf.cell((2, 1)).unwrap().symbol(), "7");
        assert_eq!(buf.cell((0, 1)).unwrap().fg, Color::Blue);
    }

    #[test]
    fn reset_fill_keeps_existing_background() {
        let theme = PinTheme::default();
        let text = PinTextStyle::default();
        let c = ctx(&theme, &text, false);
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(Color::Blue));
        render_cell(area, &mut buf, &cell_visual(0, "7", &c), &c);
        assert_eq!(buf.cell((1, 1)).unwrap().bg, Color::Blue);
        assert_eq!(buf.cell((2, 1)).unwrap().bg, Color::Blue);
        assert_eq!(buf.cell((0, 0)).unwrap().bg, Color::Blue);

        let theme = themed();
        let c = ctx(&theme, &text, false);
        render_cell(area, &mut buf, &cell_visual(0, "7", &c), &c);
        assert_eq!(buf.cell((2, 1)).unwrap().bg, Color::Green);
    }

    #[test]
    fn underline_cell_draws_only_bottom_line() {
        let theme = PinTheme::underline();
        let text = PinTextStyle::default();
        let c = ctx(&theme, &text, false);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        render_cell(area, &mut buf, &cell_visual(0, "", &c), &c);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), "─");
        assert_eq!(buf.cell((1, 1)).unwrap().fg, Color::Gray);
    }

    #[test]
    fn glyph_area_shrinks_per_shape() {
        let rect = Rect::new(2, 2, 5, 3);
        assert_eq!(glyph_area(rect, &PinTheme::default()), Rect::new(3, 3, 3, 1));
        assert_eq!(glyph_area(rect, &PinTheme::underline()), Rect::new(2, 2, 5, 2));
        let tiny = Rect::new(0, 0, 2, 1);
        assert_eq!(glyph_area(tiny, &PinTheme::default()), tiny);
    }
}

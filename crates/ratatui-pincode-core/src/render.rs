use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Writes `input` starting at `(x, y)`, never past `max_cols` columns.
///
/// Zero-width characters are skipped and a wide character that would straddle the limit is
/// dropped instead of being cut in half.
pub fn render_str_clipped(x: u16, y: u16, max_cols: u16, buf: &mut Buffer, input: &str, style: Style) {
    if max_cols == 0 {
        return;
    }

    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if out_cols + w > max_cols {
            return;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        dx += 1;
        out_cols += 1;

        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            dx += 1;
            out_cols += 1;
        }
    }
}

/// Renders `input` horizontally and vertically centered in `area`, clipped to its width.
pub fn render_str_centered(area: Rect, buf: &mut Buffer, input: &str, style: Style) {
    if area.width == 0 || area.height == 0 || input.is_empty() {
        return;
    }
    let w = (UnicodeWidthStr::width(input) as u16).min(area.width);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + area.height / 2;
    render_str_clipped(x, y, area.width - (x - area.x), buf, input, style);
}

/// Column of the horizontal center of `area`.
pub fn center_col(area: Rect) -> u16 {
    area.x + area.width.saturating_sub(1) / 2
}

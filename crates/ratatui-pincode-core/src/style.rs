use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::BorderType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinFieldShape {
    /// A bordered box around every cell.
    #[default]
    Box,
    /// A single line along the bottom row of every cell.
    Underline,
}

/// Border thickness. Terminals draw lines from box-drawing glyphs, so width is expressed as a
/// line weight instead of a length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum BorderWeight {
    #[default]
    Thin,
    Thick,
    Double,
}

impl BorderWeight {
    /// Border type for a boxed cell. Thin borders get rounded corners when `radius > 0`.
    pub fn border_type(self, radius: u16) -> BorderType {
        match self {
            BorderWeight::Thin if radius > 0 => BorderType::Rounded,
            BorderWeight::Thin => BorderType::Plain,
            BorderWeight::Thick => BorderType::Thick,
            BorderWeight::Double => BorderType::Double,
        }
    }

    /// Glyph used for the underline shape.
    pub fn underline_symbol(self) -> &'static str {
        match self {
            BorderWeight::Thin => "─",
            BorderWeight::Thick => "━",
            BorderWeight::Double => "═",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinTheme {
    pub shape: PinFieldShape,
    /// `0` draws square corners; anything larger rounds thin borders.
    pub border_radius: u16,
    pub field_height: u16,
    pub field_width: u16,
    pub active_fill_color: Color,
    pub selected_fill_color: Color,
    pub inactive_fill_color: Color,
    pub active_color: Color,
    pub selected_color: Color,
    pub inactive_color: Color,
    pub selected_border_width: BorderWeight,
    pub inactive_border_width: BorderWeight,
}

impl Default for PinTheme {
    fn default() -> Self {
        Self {
            shape: PinFieldShape::Box,
            border_radius: 1,
            field_height: 3,
            field_width: 5,
            active_fill_color: Color::Reset,
            selected_fill_color: Color::Reset,
            inactive_fill_color: Color::Reset,
            active_color: Color::Blue,
            selected_color: Color::Blue,
            inactive_color: Color::Gray,
            selected_border_width: BorderWeight::Thick,
            inactive_border_width: BorderWeight::Thin,
        }
    }
}

impl PinTheme {
    pub fn underline() -> Self {
        Self {
            shape: PinFieldShape::Underline,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FontWeight {
    UltraLight,
    Thin,
    Light,
    Regular,
    Medium,
    #[default]
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl FontWeight {
    pub fn modifier(self) -> Modifier {
        if self <= FontWeight::Light {
            Modifier::DIM
        } else if self >= FontWeight::Semibold {
            Modifier::BOLD
        } else {
            Modifier::empty()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinTextStyle {
    pub font_weight: FontWeight,
    pub text_color: Color,
}

impl Default for PinTextStyle {
    fn default() -> Self {
        Self {
            font_weight: FontWeight::Semibold,
            text_color: Color::Reset,
        }
    }
}

impl PinTextStyle {
    pub fn style(&self) -> Style {
        Style::default()
            .fg(self.text_color)
            .add_modifier(self.font_weight.modifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thin_border_rounds_with_radius() {
        assert_eq!(BorderWeight::Thin.border_type(0), BorderType::Plain);
        assert_eq!(BorderWeight::Thin.border_type(1), BorderType::Rounded);
        assert_eq!(BorderWeight::Thick.border_type(4), BorderType::Thick);
    }

    #[test]
    fn font_weight_maps_to_modifiers() {
        assert_eq!(FontWeight::Thin.modifier(), Modifier::DIM);
        assert_eq!(FontWeight::Regular.modifier(), Modifier::empty());
        assert_eq!(FontWeight::Semibold.modifier(), Modifier::BOLD);
        assert!(
            PinTextStyle::default()
                .style()
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }
}

//! Type scale, palette and page geometry used when rendering a menu.

use genpdf::style::{Color, Style};

pub const BRAND_GREEN: Color = Color::Rgb(0x1a, 0x5d, 0x3f);
pub const GOLD: Color = Color::Rgb(0xd4, 0xaf, 0x37);
pub const SLATE: Color = Color::Rgb(0x4b, 0x55, 0x63);
pub const INK: Color = Color::Rgb(0x1f, 0x29, 0x37);
pub const HAIRLINE: Color = Color::Rgb(0xe5, 0xe7, 0xeb);

const MM_PER_INCH: f64 = 25.4;
const MM_PER_POINT: f64 = MM_PER_INCH / 72.0;

/// Converts inches to millimetres.
pub fn inches(value: f64) -> f64 {
    value * MM_PER_INCH
}

/// Converts typographic points to millimetres.
pub fn points(value: f64) -> f64 {
    value * MM_PER_POINT
}

/// Font attributes for one kind of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Size in points.  The layout engine only supports whole points, so
    /// fractional sizes are rounded when converted.
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Converts into a `genpdf` style.
    pub fn to_style(self) -> Style {
        let mut style = Style::new()
            .with_color(self.color)
            .with_font_size(self.size.round().clamp(1.0, 255.0) as u8);
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }
}

/// Everything the renderer needs to know about the look of a menu.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Page margin on every side, in millimetres.
    pub page_margin_mm: f64,

    pub title: TextStyle,
    pub tagline: TextStyle,
    pub location: TextStyle,
    pub section_header: TextStyle,
    pub item_name: TextStyle,
    pub item_description: TextStyle,
    pub price: TextStyle,
    pub info: TextStyle,
    pub contact_heading: TextStyle,
    pub contact_name: TextStyle,
    pub contact_body: TextStyle,
    pub call_to_action: TextStyle,
    pub closing_message: TextStyle,

    /// Color of borders and decorative rules.
    pub frame_color: Color,
    /// Color of the rules framing section headers.
    pub accent_color: Color,
    /// Color of the rule between an item's first and second row.
    pub divider_color: Color,

    /// Relative widths of the name and price columns.
    pub item_columns: [usize; 2],

    pub cover_logo_mm: f64,
    pub footer_logo_mm: f64,
    pub icon_mm: f64,

    /// Move an item to the next page rather than splitting it.
    pub keep_items_together: bool,
    /// Move a whole section to the next page when it would fit there.
    pub keep_sections_together: bool,
}

impl Theme {
    /// Dense layout used by the structured pipeline.
    pub fn compact() -> Self {
        Self {
            page_margin_mm: inches(0.3),
            title: TextStyle::new(26.0, BRAND_GREEN).bold(),
            tagline: TextStyle::new(11.0, BRAND_GREEN).bold(),
            location: TextStyle::new(9.0, SLATE).italic(),
            section_header: TextStyle::new(12.0, BRAND_GREEN).bold(),
            item_name: TextStyle::new(8.5, BRAND_GREEN).bold(),
            item_description: TextStyle::new(7.0, SLATE),
            price: TextStyle::new(9.5, GOLD).bold(),
            info: TextStyle::new(7.0, BRAND_GREEN).italic(),
            contact_heading: TextStyle::new(22.0, BRAND_GREEN).bold(),
            contact_name: TextStyle::new(13.0, BRAND_GREEN).bold(),
            contact_body: TextStyle::new(9.0, INK),
            call_to_action: TextStyle::new(12.0, GOLD).bold(),
            closing_message: TextStyle::new(9.0, SLATE).italic(),
            frame_color: BRAND_GREEN,
            accent_color: GOLD,
            divider_color: HAIRLINE,
            item_columns: [59, 13],
            cover_logo_mm: inches(1.8),
            footer_logo_mm: inches(0.9),
            icon_mm: points(10.0),
            keep_items_together: true,
            keep_sections_together: false,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::compact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_sizes_round_to_whole_points() {
        let style = TextStyle::new(8.5, BRAND_GREEN).bold().to_style();
        assert_eq!(style.font_size(), 9);
        assert!(style.is_bold());
        assert_eq!(style.color(), Some(BRAND_GREEN));
    }

    #[test]
    fn unit_conversions() {
        assert!((inches(1.0) - 25.4).abs() < f64::EPSILON);
        assert!((points(72.0) - 25.4).abs() < 1e-9);
    }
}

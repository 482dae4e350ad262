//! Print overrides applied when converting the HTML menu editor to PDF.

use genpdf::style::Color;

use crate::theme::{self, TextStyle, Theme};

const PT_PER_PX: f64 = 0.75;

/// Font override for one kind of form field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRule {
    pub size_px: f64,
    pub bold: bool,
    pub color: Color,
}

impl FieldRule {
    fn to_text_style(&self) -> TextStyle {
        let style = TextStyle::new(self.size_px * PT_PER_PX, self.color);
        if self.bold {
            style.bold()
        } else {
            style
        }
    }
}

/// Print-specific overrides for the menu editor page.
///
/// Editing controls are hidden, form fields print as plain text with fixed
/// sizes and colors, and sections and items are kept off page boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct PrintStylesheet {
    pub page_margin_cm: f64,
    /// Elements matching these selectors, and everything inside them, are not printed.
    pub hidden_selectors: Vec<String>,
    pub item_name: FieldRule,
    pub item_description: FieldRule,
    pub item_price: FieldRule,
    pub keep_sections_together: bool,
    pub keep_items_together: bool,
}

impl Default for PrintStylesheet {
    fn default() -> Self {
        Self {
            page_margin_cm: 0.5,
            hidden_selectors: vec![".actions".to_owned()],
            item_name: FieldRule {
                size_px: 16.0,
                bold: true,
                color: theme::BRAND_GREEN,
            },
            item_description: FieldRule {
                size_px: 14.0,
                bold: false,
                color: theme::SLATE,
            },
            item_price: FieldRule {
                size_px: 18.0,
                bold: true,
                color: theme::GOLD,
            },
            keep_sections_together: true,
            keep_items_together: true,
        }
    }
}

impl From<&PrintStylesheet> for Theme {
    fn from(sheet: &PrintStylesheet) -> Self {
        let base = Theme::compact();
        Theme {
            page_margin_mm: sheet.page_margin_cm * 10.0,
            section_header: TextStyle::new(16.0, theme::BRAND_GREEN).bold(),
            item_name: sheet.item_name.to_text_style(),
            item_description: sheet.item_description.to_text_style(),
            price: sheet.item_price.to_text_style(),
            info: TextStyle::new(10.0, theme::BRAND_GREEN).italic(),
            keep_items_together: sheet.keep_items_together,
            keep_sections_together: sheet.keep_sections_together,
            ..base
        }
    }
}

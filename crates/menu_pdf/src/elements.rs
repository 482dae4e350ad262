//! Custom `genpdf` elements used to lay out menu blocks.
//!
//! `genpdf` ships paragraphs, tables and images but nothing for colored
//! frames, inline icons or keeping a block on one page.  The elements in this
//! module fill those gaps, drawing with the same area primitives the built-in
//! elements use.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use image::GenericImageView;

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Element, Margins, Mm, Position, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const RULE_STROKE_SPACING_MM: f64 = 0.1;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Composites any alpha channel onto a white background.
///
/// PDF images produced by `genpdf` cannot carry transparency, and logos are
/// usually PNGs with a transparent background.
pub fn flatten_onto_white(image: image::DynamicImage) -> image::DynamicImage {
    if !image.color().has_alpha() {
        return image;
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let rgb = image::RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = f64::from(a) / 255.0;
        let blend = |channel: u8| (f64::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    });
    image::DynamicImage::ImageRgb8(rgb)
}

/// Loads the image at `path` scaled to `width_mm`, keeping its aspect ratio.
pub fn image_with_width(
    path: impl AsRef<Path>,
    width_mm: f64,
    alignment: Alignment,
) -> Result<(Image, Size), Error> {
    let dynamic = flatten_onto_white(decode_image_from_path(path)?);
    let natural = estimated_image_size(&dynamic, DEFAULT_IMAGE_DPI);
    let natural_width = mm_to_f64(natural.width);
    let scale = if natural_width > f64::EPSILON {
        width_mm / natural_width
    } else {
        1.0
    };

    let image = Image::from_dynamic_image(dynamic)?
        .with_alignment(alignment)
        .with_scale(Scale::new(scale, scale));
    let size = Size::new(
        mm_from_f64(natural_width * scale),
        mm_from_f64(mm_to_f64(natural.height) * scale),
    );
    Ok((image, size))
}

fn stroke(color: Color) -> Style {
    Style::new().with_color(color)
}

/// A full-width horizontal rule, drawn as closely spaced parallel hairlines.
pub struct HorizontalRule {
    color: Color,
    strokes: usize,
}

impl HorizontalRule {
    /// Creates a rule approximately `thickness_mm` thick.
    pub fn new(color: Color, thickness_mm: f64) -> Self {
        let strokes = (thickness_mm / RULE_STROKE_SPACING_MM).round().max(1.0) as usize;
        Self { color, strokes }
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let height = mm_from_f64(RULE_STROKE_SPACING_MM * self.strokes as f64);
        let mut result = RenderResult::default();
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        for index in 0..self.strokes {
            let y = mm_from_f64(RULE_STROKE_SPACING_MM * index as f64);
            area.draw_line(
                vec![Position::new(0, y), Position::new(width, y)],
                stroke(self.color),
            );
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// Wraps an element in padding and a colored rectangular frame.
///
/// When `width_mm` is set the box is narrower than the available area and
/// centred in it.
pub struct Boxed<E: Element> {
    element: E,
    vertical_padding_mm: f64,
    horizontal_padding_mm: f64,
    color: Color,
    width_mm: Option<f64>,
}

impl<E: Element> Boxed<E> {
    pub fn new(element: E, color: Color, padding_mm: f64) -> Self {
        Self {
            element,
            vertical_padding_mm: padding_mm,
            horizontal_padding_mm: padding_mm,
            color,
            width_mm: None,
        }
    }

    /// Sets the vertical and horizontal padding separately.
    pub fn with_padding(mut self, vertical_mm: f64, horizontal_mm: f64) -> Self {
        self.vertical_padding_mm = vertical_mm;
        self.horizontal_padding_mm = horizontal_mm;
        self
    }

    /// Narrows the box to a fixed width, centred in the available area.
    pub fn with_width(mut self, width_mm: f64) -> Self {
        self.width_mm = Some(width_mm);
        self
    }

    fn padding(&self) -> Margins {
        let vertical = mm_from_f64(self.vertical_padding_mm);
        let horizontal = mm_from_f64(self.horizontal_padding_mm);
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Height of the frame around content `content_height` tall.
    fn frame_height(&self, content_height: Mm) -> Mm {
        mm_from_f64(mm_to_f64(content_height) + 2.0 * self.vertical_padding_mm)
    }
}

impl<E: Element> Element for Boxed<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if let Some(width_mm) = self.width_mm {
            let available = mm_to_f64(area.size().width);
            if width_mm < available {
                let inset = mm_from_f64((available - width_mm) / 2.0);
                area.add_margins(Margins::trbl(0, inset, 0, inset));
            }
        }

        let mut inner = area.clone();
        inner.add_margins(self.padding());
        let inner_result = self.element.render(context, inner, style)?;

        let width = area.size().width;
        let height = self.frame_height(inner_result.size.height);
        let line = stroke(self.color);
        area.draw_line(
            vec![
                Position::new(0, 0),
                Position::new(width, 0),
                Position::new(width, height),
                Position::new(0, height),
                Position::new(0, 0),
            ],
            line,
        );

        let mut result = RenderResult::default();
        result.size = Size::new(width, height);
        result.has_more = inner_result.has_more;
        Ok(result)
    }
}

/// An item name preceded by a small icon on the same line.
pub struct IconLabel {
    icon: Image,
    icon_size: Size,
    gap: Mm,
    label: Paragraph,
}

impl IconLabel {
    /// Loads the icon at `path`, scaled to a square of `icon_mm`.
    pub fn from_path(
        path: impl AsRef<Path>,
        icon_mm: f64,
        label: Paragraph,
    ) -> Result<Self, Error> {
        let (icon, icon_size) = image_with_width(path, icon_mm, Alignment::Left)?;
        Ok(Self {
            icon,
            icon_size,
            gap: mm_from_f64(icon_mm * 0.2),
            label,
        })
    }
}

impl Element for IconLabel {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let icon_result = self.icon.render(context, area.clone(), style)?;

        let mut label_area = area.clone();
        label_area.add_offset(Position::new(self.icon_size.width + self.gap, 0));
        let label_result = self.label.render(context, label_area, style)?;

        let mut result = RenderResult::default();
        result.size = Size::new(
            area.size().width,
            icon_result.size.height.max(label_result.size.height),
        );
        result.has_more = label_result.has_more;
        Ok(result)
    }
}

/// Text and fixed spacing used to estimate how tall a block will be.
///
/// `genpdf` cannot measure an element without drawing it, so blocks that must
/// not be split carry an estimate built from their wrapped text.
#[derive(Clone, Debug, Default)]
pub struct HeightEstimate {
    lines: Vec<(StyledString, f64)>,
    extra_mm: f64,
}

impl HeightEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paragraph wrapped to `width_fraction` of the available width.
    pub fn text(mut self, text: impl Into<String>, style: Style, width_fraction: f64) -> Self {
        self.lines
            .push((StyledString::new(text.into(), style), width_fraction));
        self
    }

    /// Adds fixed vertical space such as padding or rules.
    pub fn space(mut self, mm: f64) -> Self {
        self.extra_mm += mm;
        self
    }

    /// Merges another estimate stacked below this one.
    pub fn stack(mut self, other: HeightEstimate) -> Self {
        self.lines.extend(other.lines);
        self.extra_mm += other.extra_mm;
        self
    }

    fn height(&self, context: &genpdf::Context, width: Mm, base: Style) -> Mm {
        let width_mm = mm_to_f64(width);
        let total: f64 = self
            .lines
            .iter()
            .map(|(string, fraction)| {
                let style = base.and(string.style);
                let text_width = mm_to_f64(
                    StyledString::new(string.s.clone(), style).width(&context.font_cache),
                );
                let column = (width_mm * fraction).max(1.0);
                let wrapped = (text_width / column).ceil().max(1.0);
                wrapped * mm_to_f64(style.line_height(&context.font_cache))
            })
            .sum();
        mm_from_f64(total + self.extra_mm)
    }
}

/// Moves its element to the next page instead of splitting it.
///
/// The element is deferred at most once, and never when it would not fit on
/// an empty page anyway.
pub struct KeepTogether<E: Element> {
    element: E,
    estimate: HeightEstimate,
    page_height: Mm,
    deferred: bool,
}

impl<E: Element> KeepTogether<E> {
    pub fn new(element: E, estimate: HeightEstimate, page_height: Mm) -> Self {
        Self {
            element,
            estimate,
            page_height,
            deferred: false,
        }
    }
}

impl<E: Element> Element for KeepTogether<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if !self.deferred {
            let needed = self.estimate.height(context, area.size().width, style);
            if needed > area.size().height && needed <= self.page_height {
                self.deferred = true;
                let mut result = RenderResult::default();
                result.has_more = true;
                return Ok(result);
            }
        }
        self.deferred = true;
        self.element.render(context, area, style)
    }
}

/// Shared 1-based number of the page currently being laid out.
#[derive(Clone, Debug, Default)]
pub struct PageCounter(Rc<Cell<usize>>);

impl PageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.0.get()
    }

    pub(crate) fn advance(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// Zero-height element recording the page it lands on.
pub struct PageMarker {
    counter: PageCounter,
    slots: Rc<RefCell<Vec<Option<usize>>>>,
    index: usize,
}

impl PageMarker {
    pub fn new(counter: PageCounter, slots: Rc<RefCell<Vec<Option<usize>>>>, index: usize) -> Self {
        Self {
            counter,
            slots,
            index,
        }
    }
}

impl Element for PageMarker {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        _area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.get_mut(self.index) {
            if slot.is_none() {
                *slot = Some(self.counter.current());
            }
        }
        Ok(RenderResult::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetre_round_trip() {
        assert!((mm_to_f64(mm_from_f64(12.5)) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn flattening_transparent_pixels_yields_white() {
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 0]));
        let flat = flatten_onto_white(image::DynamicImage::ImageRgba8(rgba));
        assert!(!flat.color().has_alpha());
        assert_eq!(flat.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn opaque_pixels_keep_their_color() {
        let rgba = image::RgbaImage::from_pixel(1, 1, image::Rgba([26, 93, 63, 255]));
        let flat = flatten_onto_white(image::DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.to_rgb8().get_pixel(0, 0).0, [26, 93, 63]);
    }

    #[test]
    fn page_counter_is_shared() {
        let counter = PageCounter::new();
        let clone = counter.clone();
        counter.advance();
        counter.advance();
        assert_eq!(clone.current(), 2);
    }

    #[test]
    fn frame_adds_vertical_padding_on_both_sides() {
        let boxed = Boxed::new(Paragraph::new("Hummus"), Color::Rgb(0, 0, 0), 1.0)
            .with_padding(3.0, 5.0);
        let height = mm_to_f64(boxed.frame_height(mm_from_f64(10.0)));
        assert!((height - 16.0).abs() < 1e-9);

        let uniform = Boxed::new(Paragraph::new("Hummus"), Color::Rgb(0, 0, 0), 1.5);
        assert!((mm_to_f64(uniform.frame_height(mm_from_f64(4.0))) - 7.0).abs() < 1e-9);
    }
}

//! Rendering of a [`MenuDocument`] into PDF bytes.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use genpdf::elements::{Break, LinearLayout, PageBreak, Paragraph, TableLayout};
use genpdf::style::StyledString;
use genpdf::{Alignment, Margins, Mm, PaperSize};
use log::debug;

use crate::builder::DocumentBuilder;
use crate::document::{Block, ContactBlock, CoverBlock, ItemBlock, MenuDocument, SectionHeader};
use crate::elements::{
    image_with_width, mm_from_f64, Boxed, HeightEstimate, HorizontalRule, IconLabel, KeepTogether,
    PageCounter, PageMarker,
};
use crate::error::MenuError;
use crate::theme::{inches, points, TextStyle, Theme};

const A4_HEIGHT_MM: f64 = 297.0;
const DEFAULT_TITLE: &str = "Menu";

/// Result of a successful render.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// The encoded PDF.
    pub bytes: Vec<u8>,
    /// Number of pages laid out.
    pub page_count: usize,
    /// 1-based page of each section header, in document order.
    pub section_pages: Vec<Option<usize>>,
}

/// Turns a menu document into a PDF.
pub trait DocumentRenderer {
    /// Renders every block of `document` in order.
    fn render(&self, document: &MenuDocument) -> Result<RenderedPdf, MenuError>;
}

/// `genpdf`-backed renderer producing A4 pages.
#[derive(Clone, Debug, Default)]
pub struct PdfRenderer {
    theme: Theme,
    fonts_dir: Option<PathBuf>,
    bookmarks: bool,
}

impl PdfRenderer {
    /// Creates a renderer using `theme`.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Looks for fonts in `dir` before the default locations.
    pub fn with_fonts_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.fonts_dir = dir;
        self
    }

    /// Adds a PDF outline entry for every section.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn page_body_height(&self) -> Mm {
        mm_from_f64(A4_HEIGHT_MM - 2.0 * self.theme.page_margin_mm)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &MenuDocument) -> Result<RenderedPdf, MenuError> {
        let counter = PageCounter::new();
        let headers: Vec<&SectionHeader> = document.section_headers().collect();
        let slots = Rc::new(RefCell::new(vec![None; headers.len()]));

        let title = document
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::Cover(cover) => Some(cover.title.clone()),
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

        let margin = mm_from_f64(self.theme.page_margin_mm);
        let mut pdf = DocumentBuilder::new()
            .with_title(title)
            .with_paper_size(PaperSize::A4)
            .with_margins(Margins::trbl(margin, margin, margin, margin))
            .with_fonts_dir(self.fonts_dir.clone())
            .with_page_counter(counter.clone())
            .build()
            .map_err(MenuError::FontLoad)?;

        let mut layout = BlockLayout {
            theme: &self.theme,
            page_height: self.page_body_height(),
            counter: counter.clone(),
            slots: Rc::clone(&slots),
            next_section: 0,
        };

        let blocks = document.blocks();
        let mut index = 0;
        while index < blocks.len() {
            let element = match &blocks[index] {
                Block::PageBreak if page_is_blank(blocks, index) => {
                    index += 1;
                    continue;
                }
                Block::SectionHeader(header) if self.theme.keep_sections_together => {
                    let items: Vec<&ItemBlock> = blocks[index + 1..]
                        .iter()
                        .map_while(|block| match block {
                            Block::Item(item) => Some(item),
                            _ => None,
                        })
                        .collect();
                    index += items.len();
                    layout.section_group(header, &items)?
                }
                block => layout.block(block)?,
            };
            pdf.push(element);
            index += 1;
        }

        let mut bytes = Vec::new();
        pdf.render(&mut bytes).map_err(MenuError::Render)?;
        let section_pages = slots.borrow().clone();
        debug!(
            "rendered {} blocks onto {} pages ({} bytes)",
            blocks.len(),
            counter.current(),
            bytes.len()
        );

        #[cfg(feature = "bookmarks")]
        if self.bookmarks {
            bytes = crate::bookmarks::SectionOutline::new(&headers, &section_pages).embed(&bytes)?;
        }

        Ok(RenderedPdf {
            bytes,
            page_count: counter.current(),
            section_pages,
        })
    }
}

/// Whether nothing has been laid out since the start of the document or the
/// previous page break, so a break at `index` would only add a blank page.
fn page_is_blank(blocks: &[Block], index: usize) -> bool {
    matches!(
        index.checked_sub(1).map(|previous| &blocks[previous]),
        None | Some(Block::PageBreak)
    )
}

fn text(content: impl Into<String>, style: TextStyle, alignment: Alignment) -> Paragraph {
    let mut paragraph = Paragraph::new(StyledString::new(content.into(), style.to_style()));
    paragraph.set_alignment(alignment);
    paragraph
}

fn asset_error(path: &Path) -> impl FnOnce(genpdf::error::Error) -> MenuError + '_ {
    move |source| MenuError::Asset {
        path: path.to_path_buf(),
        source,
    }
}

/// Converts blocks into `genpdf` elements for one render.
struct BlockLayout<'t> {
    theme: &'t Theme,
    page_height: Mm,
    counter: PageCounter,
    slots: Rc<RefCell<Vec<Option<usize>>>>,
    next_section: usize,
}

impl BlockLayout<'_> {
    fn block(&mut self, block: &Block) -> Result<LinearLayout, MenuError> {
        match block {
            Block::Cover(cover) => self.cover(cover),
            Block::SectionHeader(header) => Ok(self.section_header(header)),
            Block::Item(item) => self.item(item),
            Block::InfoBox { text } => Ok(self.info_box(text)),
            Block::Contact(contact) => self.contact(contact),
            Block::PageBreak => Ok(LinearLayout::vertical().element(PageBreak::new())),
        }
    }

    fn cover(&self, cover: &CoverBlock) -> Result<LinearLayout, MenuError> {
        let theme = self.theme;
        let mut layout = LinearLayout::vertical();
        layout.push(Break::new(0.5));
        layout.push(HorizontalRule::new(theme.frame_color, points(2.0)));
        layout.push(Break::new(1.0));
        layout.push(text(cover.title.as_str(), theme.title, Alignment::Center));
        layout.push(Break::new(0.5));

        if let Some(logo) = &cover.logo {
            let (image, _) = image_with_width(logo, theme.cover_logo_mm, Alignment::Center)
                .map_err(asset_error(logo))?;
            layout.push(image);
            layout.push(Break::new(0.8));
        }

        layout.push(
            Boxed::new(
                text(cover.tagline.as_str(), theme.tagline, Alignment::Center),
                theme.accent_color,
                points(5.0),
            )
            .with_width(inches(4.8)),
        );
        layout.push(Break::new(0.5));
        layout.push(text(cover.location.as_str(), theme.location, Alignment::Center));
        layout.push(Break::new(1.0));
        layout.push(HorizontalRule::new(theme.frame_color, points(2.0)));
        Ok(layout)
    }

    fn section_header(&mut self, header: &SectionHeader) -> LinearLayout {
        let theme = self.theme;
        let marker = PageMarker::new(self.counter.clone(), Rc::clone(&self.slots), self.next_section);
        self.next_section += 1;

        LinearLayout::vertical()
            .element(marker)
            .element(HorizontalRule::new(theme.accent_color, points(1.0)))
            .element(
                Boxed::new(
                    text(header.display_title.as_str(), theme.section_header, Alignment::Center),
                    theme.accent_color,
                    0.0,
                )
                .with_padding(points(3.0), points(5.0)),
            )
            .element(HorizontalRule::new(theme.accent_color, points(1.0)))
            .element(Break::new(0.2))
    }

    fn section_header_estimate(&self, header: &SectionHeader) -> HeightEstimate {
        HeightEstimate::new()
            .text(header.display_title.as_str(), self.theme.section_header.to_style(), 1.0)
            .space(2.0 * points(3.0) + 2.0 * points(1.0))
    }

    fn item_estimate(&self, item: &ItemBlock) -> HeightEstimate {
        let theme = self.theme;
        let [name_weight, price_weight] = theme.item_columns;
        let name_fraction = name_weight as f64 / (name_weight + price_weight).max(1) as f64;
        HeightEstimate::new()
            .text(item.name.as_str(), theme.item_name.to_style(), name_fraction)
            .text(item.description.as_str(), theme.item_description.to_style(), 1.0)
            .space(2.0 * points(1.5) + points(0.3))
    }

    fn item(&self, item: &ItemBlock) -> Result<LinearLayout, MenuError> {
        let theme = self.theme;
        let name = text(item.name.as_str(), theme.item_name, Alignment::Left);
        let price = text(item.price.as_str(), theme.price, Alignment::Right);

        let mut first_row = TableLayout::new(theme.item_columns.to_vec());
        let icon = item.marker.as_ref().and_then(|marker| marker.icon.as_deref());
        let pushed = match icon {
            Some(path) => {
                let label =
                    IconLabel::from_path(path, theme.icon_mm, name).map_err(asset_error(path))?;
                first_row.row().element(label).element(price).push()
            }
            None => first_row.row().element(name).element(price).push(),
        };
        pushed.map_err(MenuError::Render)?;

        let body = LinearLayout::vertical()
            .element(first_row)
            .element(HorizontalRule::new(theme.divider_color, points(0.3)))
            .element(text(item.description.as_str(), theme.item_description, Alignment::Left));
        let boxed = Boxed::new(body, theme.accent_color, 0.0).with_padding(points(1.5), points(2.0));

        let mut layout = LinearLayout::vertical();
        if theme.keep_items_together {
            layout.push(KeepTogether::new(boxed, self.item_estimate(item), self.page_height));
        } else {
            layout.push(boxed);
        }
        layout.push(Break::new(0.1));
        Ok(layout)
    }

    fn section_group(
        &mut self,
        header: &SectionHeader,
        items: &[&ItemBlock],
    ) -> Result<LinearLayout, MenuError> {
        let mut estimate = self.section_header_estimate(header);
        let mut group = self.section_header(header);
        for item in items {
            estimate = estimate.stack(self.item_estimate(item));
            group.push(self.item(item)?);
        }
        Ok(LinearLayout::vertical().element(KeepTogether::new(group, estimate, self.page_height)))
    }

    fn info_box(&self, content: &str) -> LinearLayout {
        let theme = self.theme;
        LinearLayout::vertical()
            .element(
                Boxed::new(
                    text(format!("• {} •", content), theme.info, Alignment::Center),
                    theme.frame_color,
                    0.0,
                )
                .with_padding(points(3.0), points(6.0)),
            )
            .element(Break::new(0.3))
    }

    fn contact(&self, contact: &ContactBlock) -> Result<LinearLayout, MenuError> {
        let theme = self.theme;
        let details = LinearLayout::vertical()
            .element(text(contact.restaurant.as_str(), theme.contact_name, Alignment::Center))
            .element(Break::new(0.5))
            .element(text(contact.address.as_str(), theme.contact_body, Alignment::Center))
            .element(Break::new(0.5))
            .element(text(
                format!("Tel. {} • {}", contact.phone, contact.email),
                theme.contact_body,
                Alignment::Center,
            ));

        let mut layout = LinearLayout::vertical();
        layout.push(Break::new(2.0));
        layout.push(
            Boxed::new(
                text(contact.heading.as_str(), theme.contact_heading, Alignment::Center),
                theme.accent_color,
                0.0,
            )
            .with_padding(points(10.0), 0.0),
        );
        layout.push(Break::new(1.0));
        layout.push(
            Boxed::new(details, theme.frame_color, 0.0)
                .with_padding(points(12.0), points(10.0))
                .with_width(inches(6.2)),
        );
        layout.push(Break::new(1.0));
        layout.push(
            Boxed::new(
                text(contact.call_to_action.as_str(), theme.call_to_action, Alignment::Center),
                theme.frame_color,
                0.0,
            )
            .with_padding(points(6.0), 0.0)
            .with_width(inches(2.5)),
        );
        layout.push(Break::new(0.8));
        layout.push(text(
            contact.closing_message.as_str(),
            theme.closing_message,
            Alignment::Center,
        ));

        if let Some(logo) = &contact.logo {
            let (image, _) = image_with_width(logo, theme.footer_logo_mm, Alignment::Center)
                .map_err(asset_error(logo))?;
            layout.push(Break::new(1.2));
            layout.push(image);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MenuDocumentBuilder;
    use crate::model::MenuItem;
    use std::fs;

    #[test]
    fn corrupt_icon_is_an_asset_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let icon = dir.path().join("vegan.jpg");
        fs::write(&icon, b"definitely not a jpeg").expect("write icon");

        let document = MenuDocumentBuilder::new(
            crate::assets::AssetConfig::new().with_vegan_icon(&icon),
        )
        .add_menu_item(&MenuItem::new("Hummus", "Chickpea puree", "7,50€").vegan())
        .finish();

        let theme = Theme::compact();
        let mut layout = BlockLayout {
            theme: &theme,
            page_height: mm_from_f64(280.0),
            counter: PageCounter::new(),
            slots: Rc::new(RefCell::new(Vec::new())),
            next_section: 0,
        };

        match layout.block(&document.blocks()[0]) {
            Err(MenuError::Asset { path, .. }) => assert_eq!(path, icon),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("corrupt icon was accepted"),
        }
    }

    #[test]
    fn consecutive_page_breaks_collapse() {
        let document = MenuDocumentBuilder::from_menu(
            &crate::model::Menu::default(),
            crate::assets::AssetConfig::new(),
        )
        .finish();
        let blocks = document.blocks();
        assert!(matches!(
            blocks,
            [Block::Cover(_), Block::PageBreak, Block::PageBreak, Block::Contact(_)]
        ));

        assert!(!page_is_blank(blocks, 1));
        assert!(page_is_blank(blocks, 2));
    }

    #[test]
    fn leading_page_break_is_skipped() {
        let document = MenuDocumentBuilder::default().add_contact_page(None).finish();
        assert!(matches!(document.blocks()[0], Block::PageBreak));
        assert!(page_is_blank(document.blocks(), 0));
    }

    #[test]
    fn section_markers_are_numbered_in_order() {
        let theme = Theme::compact();
        let slots = Rc::new(RefCell::new(vec![None, None]));
        let mut layout = BlockLayout {
            theme: &theme,
            page_height: mm_from_f64(280.0),
            counter: PageCounter::new(),
            slots,
            next_section: 0,
        };
        let header = SectionHeader {
            title: "Salads".to_owned(),
            display_title: "SALADS".to_owned(),
        };

        layout.section_header(&header);
        layout.section_header(&header);
        assert_eq!(layout.next_section, 2);
    }
}

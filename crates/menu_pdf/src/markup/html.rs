//! Reading the menu editor page into a [`MenuDocument`].

use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::assets::existing_file;
use crate::document::{Block, CoverBlock, DietaryMarker, ItemBlock, MenuDocument, SectionHeader};
use crate::error::MenuError;
use crate::model::DietaryKind;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(HEADER_SELECTOR, ".menu-header, header");
selector!(H1_SELECTOR, "h1");
selector!(P_SELECTOR, "p");
selector!(IMG_SELECTOR, "img[src]");
selector!(CONTENT_SELECTOR, ".section, .info-box");
selector!(SECTION_TITLE_SELECTOR, ".section-title");
selector!(H2_SELECTOR, "h2");
selector!(MENU_ITEM_SELECTOR, ".menu-item");
selector!(ITEM_NAME_SELECTOR, ".item-name");
selector!(ITEM_DESCRIPTION_SELECTOR, ".item-description");
selector!(ITEM_PRICE_SELECTOR, ".item-price");
selector!(FIELD_SELECTOR, "input, textarea");

/// Reads menu editor HTML into blocks.
pub struct MarkupReader {
    hidden: Vec<Selector>,
}

impl MarkupReader {
    /// Creates a reader that skips everything matching `hidden_selectors`.
    pub fn new(hidden_selectors: &[String]) -> Result<Self, MenuError> {
        let hidden = hidden_selectors
            .iter()
            .map(|css| {
                Selector::parse(css)
                    .map_err(|err| MenuError::Markup(format!("invalid selector `{css}`: {err}")))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { hidden })
    }

    /// Converts the page into a document.
    ///
    /// `base_dir` resolves relative image sources.  A page without any
    /// `.section` is rejected.
    pub fn read(&self, html: &str, base_dir: &Path) -> Result<MenuDocument, MenuError> {
        let page = Html::parse_document(html);
        let mut blocks = Vec::new();

        if let Some(cover) = self.cover(&page, base_dir) {
            blocks.push(Block::Cover(cover));
        }

        let mut sections = 0;
        for element in page.select(&CONTENT_SELECTOR) {
            if self.is_hidden(element) {
                continue;
            }
            if has_class(element, "section") {
                sections += 1;
                let title = section_title(element);
                blocks.push(Block::SectionHeader(SectionHeader {
                    display_title: title.to_uppercase(),
                    title,
                }));
                blocks.extend(
                    element
                        .select(&MENU_ITEM_SELECTOR)
                        .filter(|item| !self.is_hidden(*item))
                        .map(|item| Block::Item(menu_item(item))),
                );
            } else {
                let text = collapse(element.text());
                if !text.is_empty() {
                    blocks.push(Block::InfoBox { text });
                }
            }
        }

        if sections == 0 {
            return Err(MenuError::Markup("no `.section` elements found".to_owned()));
        }

        debug!("read {} sections from menu markup", sections);
        Ok(MenuDocument::from_blocks(blocks))
    }

    fn is_hidden(&self, element: ElementRef<'_>) -> bool {
        let matches = |candidate: ElementRef<'_>| {
            self.hidden
                .iter()
                .any(|selector| selector.matches(&candidate))
        };
        matches(element) || element.ancestors().filter_map(ElementRef::wrap).any(matches)
    }

    fn cover(&self, page: &Html, base_dir: &Path) -> Option<CoverBlock> {
        let header = page
            .select(&HEADER_SELECTOR)
            .find(|header| !self.is_hidden(*header))?;
        let title = header
            .select(&H1_SELECTOR)
            .next()
            .map(|h1| collapse(h1.text()))?;

        let mut paragraphs = header
            .select(&P_SELECTOR)
            .filter(|p| !self.is_hidden(*p))
            .map(|p| collapse(p.text()))
            .filter(|text| !text.is_empty());
        let tagline = paragraphs.next().unwrap_or_default();
        let location = paragraphs.next().unwrap_or_default();

        let logo = header
            .select(&IMG_SELECTOR)
            .filter_map(|img| img.value().attr("src"))
            .find(|src| !src.contains(':'))
            .and_then(|src| existing_file(Some(base_dir.join(src).as_path()), "logo"));

        Some(CoverBlock {
            title,
            tagline,
            location,
            logo,
        })
    }
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|candidate| candidate == class)
}

fn collapse<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of a field: the nested control's value when there is one, otherwise
/// the element's own text.
fn field_text(element: ElementRef<'_>) -> String {
    let control = if FIELD_SELECTOR.matches(&element) {
        Some(element)
    } else {
        element.select(&FIELD_SELECTOR).next()
    };

    match control {
        Some(control) if control.value().name() == "input" => {
            collapse(control.value().attr("value").into_iter())
        }
        Some(control) => collapse(control.text()),
        None => collapse(element.text()),
    }
}

fn section_title(section: ElementRef<'_>) -> String {
    section
        .select(&SECTION_TITLE_SELECTOR)
        .next()
        .or_else(|| section.select(&H2_SELECTOR).next())
        .map(field_text)
        .unwrap_or_default()
}

fn flag(element: ElementRef<'_>, name: &str) -> bool {
    has_class(element, name)
        || element
            .value()
            .attr(&format!("data-{name}"))
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

fn menu_item(item: ElementRef<'_>) -> ItemBlock {
    let field = |selector: &Selector| item.select(selector).next().map(field_text).unwrap_or_default();
    let marker = DietaryKind::from_flags(flag(item, "vegan"), flag(item, "vegetarian"))
        .map(|kind| DietaryMarker { kind, icon: None });

    ItemBlock {
        name: field(&ITEM_NAME_SELECTOR),
        description: field(&ITEM_DESCRIPTION_SELECTOR),
        price: field(&ITEM_PRICE_SELECTOR),
        marker,
    }
}

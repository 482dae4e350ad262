//! The menu document tree and the builder that assembles it.
//!
//! A [`MenuDocument`] is a flat, ordered list of typed [`Block`]s.  Nothing
//! about the order is enforced: blocks come out exactly in the order the
//! builder methods were called, so a contact page added before the cover ends
//! up first.  The tree is plain data and can be inspected or serialized before
//! it is handed to a [`DocumentRenderer`].

use std::path::PathBuf;

use serde::Serialize;

use crate::assets::AssetConfig;
use crate::error::MenuError;
use crate::model::{DietaryKind, Menu, MenuEntry, MenuItem, Restaurant};
use crate::render::{DocumentRenderer, RenderedPdf};

/// Cover page content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoverBlock {
    pub title: String,
    pub tagline: String,
    pub location: String,
    /// Logo to place under the top border, if the file exists.
    pub logo: Option<PathBuf>,
}

/// Styled header opening a section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionHeader {
    /// Title as declared in the menu data.
    pub title: String,
    /// Title as printed (upper case).
    pub display_title: String,
}

/// Dietary marker prepended to an item name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DietaryMarker {
    pub kind: DietaryKind,
    /// Icon to draw; `None` prints the name alone.
    pub icon: Option<PathBuf>,
}

/// One menu item: name and price on the first row, description below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemBlock {
    pub name: String,
    pub description: String,
    pub price: String,
    pub marker: Option<DietaryMarker>,
}

/// Contact page content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactBlock {
    pub heading: String,
    pub restaurant: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub call_to_action: String,
    pub closing_message: String,
    pub logo: Option<PathBuf>,
}

/// A unit of document content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Cover(CoverBlock),
    SectionHeader(SectionHeader),
    Item(ItemBlock),
    InfoBox { text: String },
    Contact(ContactBlock),
    PageBreak,
}

/// An assembled menu document ready to be rendered once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MenuDocument {
    blocks: Vec<Block>,
}

impl MenuDocument {
    /// Creates a document from an explicit block list.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Returns the blocks in rendering order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Iterates over the item blocks in rendering order.
    pub fn items(&self) -> impl Iterator<Item = &ItemBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Item(item) => Some(item),
            _ => None,
        })
    }

    /// Iterates over the section headers in rendering order.
    pub fn section_headers(&self) -> impl Iterator<Item = &SectionHeader> {
        self.blocks.iter().filter_map(|block| match block {
            Block::SectionHeader(header) => Some(header),
            _ => None,
        })
    }

    /// Serializes the block tree as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MenuError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Accumulates blocks for a menu document.
///
/// Optional images are checked for presence as blocks are added; missing
/// files are left out of the tree rather than reported.
#[derive(Clone, Debug, Default)]
pub struct MenuDocumentBuilder {
    assets: AssetConfig,
    restaurant: Restaurant,
    blocks: Vec<Block>,
}

impl MenuDocumentBuilder {
    /// Creates a builder that resolves images through `assets`.
    pub fn new(assets: AssetConfig) -> Self {
        Self {
            assets,
            ..Self::default()
        }
    }

    /// Sets the restaurant details used by the cover and contact pages.
    pub fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        self.restaurant = restaurant;
        self
    }

    /// Assembles the conventional layout for a whole menu: cover, every entry
    /// in order, then the contact page.
    pub fn from_menu(menu: &Menu, assets: AssetConfig) -> Self {
        let logo = assets.logo.clone();
        let mut builder = Self::new(assets)
            .with_restaurant(menu.restaurant.clone())
            .add_cover_page(logo.clone());

        for entry in &menu.entries {
            builder = match entry {
                MenuEntry::Section(section) => builder.add_section(section.title(), section.items()),
                MenuEntry::Info { text } => builder.add_info_box(text),
            };
        }

        builder.add_contact_page(logo)
    }

    /// Appends the cover page followed by a forced page break.
    pub fn add_cover_page(mut self, logo: Option<PathBuf>) -> Self {
        let logo = crate::assets::existing_file(logo.as_deref(), "logo");
        self.blocks.push(Block::Cover(CoverBlock {
            title: self.restaurant.name.clone(),
            tagline: self.restaurant.tagline.clone(),
            location: self.restaurant.location.clone(),
            logo,
        }));
        self.blocks.push(Block::PageBreak);
        self
    }

    /// Appends a single item block.
    pub fn add_menu_item(mut self, item: &MenuItem) -> Self {
        let marker = item.dietary().map(|kind| DietaryMarker {
            kind,
            icon: self.assets.existing_icon(kind),
        });
        self.blocks.push(Block::Item(ItemBlock {
            name: item.name().to_owned(),
            description: item.description().to_owned(),
            price: item.price().to_owned(),
            marker,
        }));
        self
    }

    /// Appends a section header followed by every item in input order.
    pub fn add_section(mut self, title: &str, items: &[MenuItem]) -> Self {
        self.blocks.push(Block::SectionHeader(SectionHeader {
            title: title.to_owned(),
            display_title: title.to_uppercase(),
        }));
        items
            .iter()
            .fold(self, |builder, item| builder.add_menu_item(item))
    }

    /// Appends a bordered annotation.
    pub fn add_info_box(mut self, text: &str) -> Self {
        self.blocks.push(Block::InfoBox {
            text: text.to_owned(),
        });
        self
    }

    /// Appends a forced page break and the contact page.
    pub fn add_contact_page(mut self, logo: Option<PathBuf>) -> Self {
        let logo = crate::assets::existing_file(logo.as_deref(), "logo");
        let restaurant = &self.restaurant;
        let contact = ContactBlock {
            heading: "Visit Us".to_owned(),
            restaurant: restaurant.name.clone(),
            address: restaurant.address.clone(),
            phone: restaurant.phone.clone(),
            email: restaurant.email.clone(),
            call_to_action: restaurant.call_to_action.clone(),
            closing_message: restaurant.closing_message.clone(),
            logo,
        };
        self.blocks.push(Block::PageBreak);
        self.blocks.push(Block::Contact(contact));
        self
    }

    /// Finishes assembly and returns the document tree without rendering it.
    pub fn finish(self) -> MenuDocument {
        MenuDocument::from_blocks(self.blocks)
    }

    /// Renders the accumulated blocks once with `renderer`.
    pub fn build<R>(self, renderer: &R) -> Result<RenderedPdf, MenuError>
    where
        R: DocumentRenderer + ?Sized,
    {
        renderer.render(&self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use std::fs;

    fn hummus() -> MenuItem {
        MenuItem::new("Hummus", "Chickpea puree", "7,50€").vegan()
    }

    #[test]
    fn section_header_is_upper_cased() {
        let document = MenuDocumentBuilder::default()
            .add_section("Cold Mezzes", &[hummus()])
            .finish();

        let header = document.section_headers().next().expect("header");
        assert_eq!(header.title, "Cold Mezzes");
        assert_eq!(header.display_title, "COLD MEZZES");
    }

    #[test]
    fn items_follow_input_order() {
        let items = vec![
            MenuItem::new("Zahra", "Cauliflower", "7,50€"),
            MenuItem::new("Muhammara", "Red pepper dip", "8€"),
            MenuItem::new("Makdous", "Baby eggplants", "8€"),
        ];
        let document = MenuDocumentBuilder::default()
            .add_section("Cold Mezzes", &items)
            .finish();

        let names: Vec<_> = document.items().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Zahra", "Muhammara", "Makdous"]);
        assert_eq!(document.blocks().len(), 4);
    }

    #[test]
    fn empty_section_still_gets_a_header() {
        let document = MenuDocumentBuilder::default()
            .add_section("Desserts", &[])
            .finish();
        assert_eq!(document.section_headers().count(), 1);
        assert_eq!(document.items().count(), 0);
    }

    #[test]
    fn vegan_item_never_uses_vegetarian_icon() {
        let dir = tempfile::tempdir().expect("temp dir");
        let vegetarian_icon = dir.path().join("vegetarian.jpg");
        fs::write(&vegetarian_icon, b"icon").expect("write icon");

        let assets = AssetConfig::new()
            .with_vegan_icon(dir.path().join("missing-vegan.jpg"))
            .with_vegetarian_icon(&vegetarian_icon);
        let both = MenuItem::new("Fatteh", "Chickpeas", "7,50€")
            .vegan()
            .vegetarian();
        let document = MenuDocumentBuilder::new(assets).add_menu_item(&both).finish();

        let item = document.items().next().expect("item");
        let marker = item.marker.as_ref().expect("marker");
        assert_eq!(marker.kind, DietaryKind::Vegan);
        assert_eq!(marker.icon, None);
    }

    #[test]
    fn missing_logo_is_omitted() {
        let document = MenuDocumentBuilder::default()
            .add_cover_page(Some(PathBuf::from("/__menu_pdf_missing__/logo.png")))
            .finish();

        match document.blocks() {
            [Block::Cover(cover), Block::PageBreak] => assert_eq!(cover.logo, None),
            other => panic!("unexpected blocks: {other:?}"),
        }
    }

    #[test]
    fn blocks_follow_call_order() {
        let document = MenuDocumentBuilder::default()
            .add_contact_page(None)
            .add_info_box("All skewers served with garlic sauce and pickles")
            .add_cover_page(None)
            .finish();

        assert!(matches!(
            document.blocks(),
            [
                Block::PageBreak,
                Block::Contact(_),
                Block::InfoBox { .. },
                Block::Cover(_),
                Block::PageBreak
            ]
        ));
    }

    #[test]
    fn whole_menu_layout() {
        let menu = Menu::default()
            .with_section(Section::new("Skewers").with_item(MenuItem::new(
                "2× Kebab",
                "Beef skewers",
                "10€",
            )))
            .with_info("All dishes are served with Lebanese bread");
        let document = MenuDocumentBuilder::from_menu(&menu, AssetConfig::new()).finish();

        assert!(matches!(
            document.blocks(),
            [
                Block::Cover(_),
                Block::PageBreak,
                Block::SectionHeader(_),
                Block::Item(_),
                Block::InfoBox { .. },
                Block::PageBreak,
                Block::Contact(_)
            ]
        ));
    }

    #[test]
    fn tree_serializes_with_block_tags() {
        let json = MenuDocumentBuilder::default()
            .add_info_box("All tasting menus serve 2 people")
            .finish()
            .to_json()
            .expect("serialize");
        assert!(json.contains("\"block\": \"info_box\""));
        assert!(json.contains("All tasting menus serve 2 people"));
    }
}

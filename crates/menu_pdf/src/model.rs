//! Menu data: items, sections, informational callouts and restaurant details.
//!
//! These values describe *what* is on the menu and carry no layout
//! information.  They deserialize from the same JSON shape the menu data has
//! always been written in (`name`, `description`, `price`, `is_vegan`,
//! `is_vegetarian`), so a menu file can replace the built-in catalog without
//! touching code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// Dietary category shown next to an item name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryKind {
    /// Contains no animal products.
    Vegan,
    /// Contains no meat or fish.
    Vegetarian,
}

impl DietaryKind {
    /// Picks the marker for a pair of dietary flags.
    ///
    /// Vegan is checked first, so an item flagged both ways is shown as vegan.
    pub fn from_flags(is_vegan: bool, is_vegetarian: bool) -> Option<Self> {
        if is_vegan {
            Some(Self::Vegan)
        } else if is_vegetarian {
            Some(Self::Vegetarian)
        } else {
            None
        }
    }
}

/// A single dish or formula on the menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    name: String,
    description: String,
    price: String,
    #[serde(default)]
    is_vegan: bool,
    #[serde(default)]
    is_vegetarian: bool,
}

impl MenuItem {
    /// Creates an item without dietary flags.
    ///
    /// The price is kept as preformatted text (for example `7,50€`) so the
    /// locale-specific formatting survives untouched.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
            is_vegan: false,
            is_vegetarian: false,
        }
    }

    /// Marks the item as vegan and returns it.
    pub fn vegan(mut self) -> Self {
        self.is_vegan = true;
        self
    }

    /// Marks the item as vegetarian and returns it.
    pub fn vegetarian(mut self) -> Self {
        self.is_vegetarian = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn is_vegan(&self) -> bool {
        self.is_vegan
    }

    pub fn is_vegetarian(&self) -> bool {
        self.is_vegetarian
    }

    /// Dietary marker for this item, with vegan taking precedence.
    pub fn dietary(&self) -> Option<DietaryKind> {
        DietaryKind::from_flags(self.is_vegan, self.is_vegetarian)
    }
}

/// A titled group of items rendered in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    title: String,
    #[serde(default)]
    items: Vec<MenuItem>,
}

impl Section {
    /// Creates an empty section with the provided title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Appends an item and returns the updated section.
    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    /// Extends the section with several items and returns it.
    pub fn with_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = MenuItem>,
    {
        self.items.extend(items);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

/// One entry of a menu in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuEntry {
    /// A section of items.
    Section(Section),
    /// A standalone annotation placed between sections.
    Info {
        /// Annotation text.
        text: String,
    },
}

/// Text shown on the cover and contact pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    pub name: String,
    pub tagline: String,
    pub location: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub call_to_action: String,
    pub closing_message: String,
}

impl Default for Restaurant {
    fn default() -> Self {
        Self {
            name: "East @ West Restaurant".to_owned(),
            tagline: "Authentic Lebanese & Syrian Cuisine".to_owned(),
            location: "Brussels, Belgium • 2025".to_owned(),
            address: "Bld de l'Empereur 26 • 1000 Brussels • Belgium".to_owned(),
            phone: "+32 465 20 60 24".to_owned(),
            email: "contact@eastatwest.com".to_owned(),
            call_to_action: "BOOK A TABLE".to_owned(),
            closing_message: "We look forward to serving you!".to_owned(),
        }
    }
}

/// A complete menu: restaurant details plus sections and callouts in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub restaurant: Restaurant,
    #[serde(default)]
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    /// Creates an empty menu for the given restaurant.
    pub fn new(restaurant: Restaurant) -> Self {
        Self {
            restaurant,
            entries: Vec::new(),
        }
    }

    /// Appends a section and returns the updated menu.
    pub fn with_section(mut self, section: Section) -> Self {
        self.entries.push(MenuEntry::Section(section));
        self
    }

    /// Appends an informational callout and returns the updated menu.
    pub fn with_info(mut self, text: impl Into<String>) -> Self {
        self.entries.push(MenuEntry::Info { text: text.into() });
        self
    }

    /// Iterates over the sections, skipping callouts.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Section(section) => Some(section),
            MenuEntry::Info { .. } => None,
        })
    }

    /// Parses a menu from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, MenuError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a menu from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| MenuError::io(path, err))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vegan_wins_over_vegetarian() {
        assert_eq!(
            DietaryKind::from_flags(true, true),
            Some(DietaryKind::Vegan)
        );
        assert_eq!(
            DietaryKind::from_flags(false, true),
            Some(DietaryKind::Vegetarian)
        );
        assert_eq!(DietaryKind::from_flags(false, false), None);
    }

    #[test]
    fn parses_item_dictionaries() {
        let json = r#"{
            "entries": [
                {"kind": "section", "title": "Cold Mezzes", "items": [
                    {"name": "Hummus", "description": "Chickpea puree", "price": "7,50€", "is_vegan": true},
                    {"name": "Zahra", "description": "Cauliflower", "price": "7,50€", "is_vegetarian": true}
                ]},
                {"kind": "info", "text": "All tasting menus serve 2 people"}
            ]
        }"#;

        let menu = Menu::from_json_str(json).expect("menu parses");
        assert_eq!(menu.restaurant, Restaurant::default());
        assert_eq!(menu.entries.len(), 2);

        let section = menu.sections().next().expect("one section");
        assert_eq!(section.title(), "Cold Mezzes");
        assert_eq!(section.items()[0].dietary(), Some(DietaryKind::Vegan));
        assert_eq!(section.items()[1].dietary(), Some(DietaryKind::Vegetarian));
        assert_eq!(section.items()[1].price(), "7,50€");
    }

    #[test]
    fn rejects_items_without_price() {
        let json = r#"{"entries": [{"kind": "section", "title": "Salads", "items": [
            {"name": "Fattoush", "description": "Tomato, lettuce"}
        ]}]}"#;

        assert!(matches!(
            Menu::from_json_str(json),
            Err(MenuError::MenuData(_))
        ));
    }
}

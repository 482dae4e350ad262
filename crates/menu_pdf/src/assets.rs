//! Locations of the branding images used by the structured pipeline.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::DietaryKind;

/// Paths to the optional images placed on the menu.
///
/// Every path is optional.  A path that is unset or does not point at an
/// existing file is dropped when blocks are assembled, and the image is simply
/// left out of the document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Restaurant logo shown on the cover and at the foot of the contact page.
    pub logo: Option<PathBuf>,
    /// Icon prepended to vegan item names.
    pub vegan_icon: Option<PathBuf>,
    /// Icon prepended to vegetarian item names.
    pub vegetarian_icon: Option<PathBuf>,
}

impl AssetConfig {
    /// Creates an empty configuration with no images.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logo path and returns the updated configuration.
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo = Some(path.into());
        self
    }

    /// Sets the vegan icon path and returns the updated configuration.
    pub fn with_vegan_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.vegan_icon = Some(path.into());
        self
    }

    /// Sets the vegetarian icon path and returns the updated configuration.
    pub fn with_vegetarian_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.vegetarian_icon = Some(path.into());
        self
    }

    /// Returns the icon for a dietary marker if the file is present.
    pub fn existing_icon(&self, kind: DietaryKind) -> Option<PathBuf> {
        match kind {
            DietaryKind::Vegan => existing_file(self.vegan_icon.as_deref(), "vegan icon"),
            DietaryKind::Vegetarian => {
                existing_file(self.vegetarian_icon.as_deref(), "vegetarian icon")
            }
        }
    }
}

/// Returns the path when it names an existing regular file.
pub fn existing_file(path: Option<&Path>, label: &str) -> Option<PathBuf> {
    let path = path?;
    if path.is_file() {
        Some(path.to_path_buf())
    } else {
        debug!("{} not found at {}; omitting it", label, path.display());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unset_and_missing_paths_are_dropped() {
        let config = AssetConfig::new().with_vegan_icon("/__menu_pdf_missing__/vegan.png");
        assert_eq!(existing_file(config.logo.as_deref(), "logo"), None);
        assert_eq!(config.existing_icon(DietaryKind::Vegan), None);
        assert_eq!(config.existing_icon(DietaryKind::Vegetarian), None);
    }

    #[test]
    fn present_files_are_kept() {
        let dir = tempfile::tempdir().expect("temp dir");
        let logo = dir.path().join("logo.png");
        fs::write(&logo, b"not really a png").expect("write logo");

        let config = AssetConfig::new().with_logo(&logo);
        assert_eq!(existing_file(config.logo.as_deref(), "logo"), Some(logo));
    }

    #[test]
    fn directories_are_not_assets() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(existing_file(Some(dir.path()), "logo"), None);
    }
}

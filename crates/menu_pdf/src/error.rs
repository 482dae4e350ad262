//! Error type shared by both menu generation pipelines.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced while assembling, rendering or writing a menu document.
#[derive(Debug)]
pub enum MenuError {
    /// No usable font family could be located or loaded.
    FontLoad(genpdf::error::Error),
    /// A branding image exists on disk but could not be decoded or embedded.
    Asset {
        /// Location of the offending image.
        path: PathBuf,
        /// Underlying decoding error.
        source: genpdf::error::Error,
    },
    /// The layout engine failed while paginating the document.
    Render(genpdf::error::Error),
    /// Reading an input or writing the output file failed.
    Io {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A required input file does not exist.
    InputMissing(PathBuf),
    /// The HTML input did not contain a readable menu.
    Markup(String),
    /// Menu data could not be parsed.
    MenuData(serde_json::Error),
    /// Embedding the section outline into the rendered PDF failed.
    #[cfg(feature = "bookmarks")]
    Bookmarks(crate::bookmarks::BookmarkError),
}

impl MenuError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontLoad(_) => write!(f, "failed to load fonts"),
            Self::Asset { path, .. } => write!(f, "invalid image asset {}", path.display()),
            Self::Render(_) => write!(f, "failed to render menu document"),
            Self::Io { path, .. } => write!(f, "I/O error on {}", path.display()),
            Self::InputMissing(path) => write!(f, "HTML file not found at {}", path.display()),
            Self::Markup(message) => write!(f, "unreadable menu markup: {message}"),
            Self::MenuData(_) => write!(f, "invalid menu data"),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(_) => write!(f, "failed to embed section bookmarks"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontLoad(err) | Self::Render(err) => Some(err),
            Self::Asset { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::MenuData(err) => Some(err),
            Self::InputMissing(_) | Self::Markup(_) => None,
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        Self::MenuData(err)
    }
}

#[cfg(feature = "bookmarks")]
impl From<crate::bookmarks::BookmarkError> for MenuError {
    fn from(err: crate::bookmarks::BookmarkError) -> Self {
        Self::Bookmarks(err)
    }
}

//! Font discovery for the menu renderer.
//!
//! The preferred family is Roboto, looked up in this order:
//!
//! 1. an explicit directory passed by the caller (the `--fonts-dir` flag),
//! 2. the `MENU_PDF_FONTS_DIR` environment variable,
//! 3. `assets/fonts` next to the running executable,
//! 4. `assets/fonts` inside this crate.
//!
//! When none of them hold the four Roboto files, the system Liberation Sans
//! family (common on Linux) and then the Windows Arial family are tried.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable overriding the bundled font directory.
pub const FONTS_DIR_ENV: &str = "MENU_PDF_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

const LIBERATION_FAMILY_NAME: &str = "LiberationSans";

const LIBERATION_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
];

struct WindowsFontFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const WINDOWS_FONT_FILES: WindowsFontFiles = WindowsFontFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

/// Directory holding the fonts shipped with this crate.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = explicit {
        push(path.to_path_buf());
    }

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    push(bundled_fonts_source_dir());
    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate font directory. Checked: {}. See assets/fonts/README.md or set {}.",
            summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_family_from(directory: &Path, family: &str) -> Result<FontFamily<FontData>, Error> {
    fonts::from_files(directory, family, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn load_bundled_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(explicit)?;
    debug!("loading {} fonts from {}", DEFAULT_FONT_FAMILY_NAME, directory.display());
    load_family_from(&directory, DEFAULT_FONT_FAMILY_NAME)
}

fn liberation_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = LIBERATION_DIRECTORIES
        .iter()
        .map(PathBuf::from)
        .find(|dir| {
            dir.join(format!("{}-Regular.ttf", LIBERATION_FAMILY_NAME))
                .is_file()
        })
        .ok_or_else(|| {
            Error::new(
                "Liberation Sans not found in the system font directories",
                io::Error::new(io::ErrorKind::NotFound, "liberation fonts not found"),
            )
        })?;
    load_family_from(&directory, LIBERATION_FAMILY_NAME)
}

fn windows_font_directory() -> Option<PathBuf> {
    for var in ["WINDIR", "SystemRoot"] {
        if let Some(root) = env_path(var) {
            let candidate = root.join("Fonts");
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
    }
    None
}

fn load_windows_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load Windows fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn windows_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;

    Ok(FontFamily {
        regular: load_windows_font(&directory, WINDOWS_FONT_FILES.regular, "regular")?,
        bold: load_windows_font(&directory, WINDOWS_FONT_FILES.bold, "bold")?,
        italic: load_windows_font(&directory, WINDOWS_FONT_FILES.italic, "italic")?,
        bold_italic: load_windows_font(&directory, WINDOWS_FONT_FILES.bold_italic, "bold italic")?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the Roboto family, falling back to system fonts when it is missing.
pub fn default_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let err = match load_bundled_font_family(explicit) {
        Ok(family) => return Ok(family),
        Err(err) if fonts_missing(&err) => err,
        Err(err) => return Err(err),
    };

    let fallbacks: [(&str, fn() -> Result<FontFamily<FontData>, Error>); 2] = [
        ("Liberation Sans", liberation_font_family),
        ("Arial", windows_font_family),
    ];

    let mut failures = Vec::new();
    for (name, load) in fallbacks {
        match load() {
            Ok(family) => {
                warn!("Bundled fonts unavailable ({}); falling back to '{}'.", err, name);
                return Ok(family);
            }
            Err(fallback_err) => failures.push(format!("{}: {}", name, fallback_err)),
        }
    }

    warn!(
        "Bundled fonts unavailable ({}); fallbacks failed: {}",
        err,
        failures.join("; ")
    );
    Err(Error::new(
        format!(
            "Bundled fonts unavailable and system fallbacks failed: {}",
            failures.join("; ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
    ))
}

/// Indicates whether any usable font family can be found.
pub fn default_fonts_available(explicit: Option<&Path>) -> bool {
    default_font_family(explicit).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = PathBuf::from("/__menu_pdf_fonts__");
        let candidates = font_directory_candidates(Some(&explicit));
        assert_eq!(candidates.first(), Some(&explicit));
        assert!(candidates.contains(&bundled_fonts_source_dir()));
    }

    #[test]
    fn missing_directory_reports_every_file() {
        let missing = missing_font_files(Path::new("/__menu_pdf_fonts__"));
        assert_eq!(missing.len(), FONT_FILES.len());
    }
}

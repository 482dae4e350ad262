//! Conversion of the HTML menu editor page into a print-ready PDF.

mod html;
mod stylesheet;

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

pub use html::MarkupReader;
pub use stylesheet::{FieldRule, PrintStylesheet};

use crate::document::MenuDocument;
use crate::error::MenuError;
use crate::pipeline::GenerationReport;
use crate::render::{DocumentRenderer, PdfRenderer};
use crate::theme::Theme;

/// Typesets menu editor HTML with a print stylesheet.
#[derive(Clone, Debug, Default)]
pub struct MarkupConverter {
    stylesheet: PrintStylesheet,
    fonts_dir: Option<PathBuf>,
}

impl MarkupConverter {
    pub fn new(stylesheet: PrintStylesheet) -> Self {
        Self {
            stylesheet,
            fonts_dir: None,
        }
    }

    /// Looks for fonts in `dir` before the default locations.
    pub fn with_fonts_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.fonts_dir = dir;
        self
    }

    pub fn stylesheet(&self) -> &PrintStylesheet {
        &self.stylesheet
    }

    /// Reads `html` into a document without rendering it.
    ///
    /// Relative image sources are resolved against `base_dir`.
    pub fn read(&self, html: &str, base_dir: &Path) -> Result<MenuDocument, MenuError> {
        MarkupReader::new(&self.stylesheet.hidden_selectors)?.read(html, base_dir)
    }

    /// Converts the HTML file at `input` and writes the PDF to `output`.
    ///
    /// Nothing is written when `input` does not exist or cannot be rendered.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<GenerationReport, MenuError> {
        if !input.is_file() {
            return Err(MenuError::InputMissing(input.to_path_buf()));
        }

        let html = fs::read_to_string(input).map_err(|err| MenuError::io(input, err))?;
        let base_dir = input.parent().unwrap_or_else(|| Path::new("."));

        let renderer =
            PdfRenderer::new(Theme::from(&self.stylesheet)).with_fonts_dir(self.fonts_dir.clone());
        let rendered = self
            .read(&html, base_dir)
            .and_then(|document| renderer.render(&document))
            .map_err(|err| {
                error!("failed to convert {}: {}", input.display(), err);
                err
            })?;

        fs::write(output, &rendered.bytes).map_err(|err| MenuError::io(output, err))?;
        info!(
            "converted {} into {} ({} pages)",
            input.display(),
            output.display(),
            rendered.page_count
        );

        Ok(GenerationReport {
            output: output.to_path_buf(),
            bytes_written: rendered.bytes.len(),
            page_count: rendered.page_count,
        })
    }
}

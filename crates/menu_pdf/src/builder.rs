//! Construction of `genpdf::Document` instances configured for menu pages.

use std::path::PathBuf;

use genpdf::error::Error;
use genpdf::style;
use genpdf::{self, Margins, PageDecorator, PaperSize, Size};

use crate::elements::PageCounter;
use crate::fonts;

/// Builder for `genpdf::Document` instances pre-configured with the crate defaults.
#[derive(Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    fonts_dir: Option<PathBuf>,
    page_counter: Option<PageCounter>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Looks for fonts in `dir` before the default search locations.
    pub fn with_fonts_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.fonts_dir = dir;
        self
    }

    /// Shares a counter that is advanced every time a new page is started.
    pub fn with_page_counter(mut self, counter: PageCounter) -> Self {
        self.page_counter = Some(counter);
        self
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<genpdf::Document, Error> {
        let font_family = fonts::default_font_family(self.fonts_dir.as_deref())?;
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        document.set_paper_size(self.paper_size.unwrap_or_else(|| PaperSize::A4.into()));

        let decorator = CountingPageDecorator {
            counter: self.page_counter.unwrap_or_default(),
            margins: self.margins,
        };
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

struct CountingPageDecorator {
    counter: PageCounter,
    margins: Option<Margins>,
}

impl PageDecorator for CountingPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.counter.advance();

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}

//! Top-level entry points for the two ways of producing a menu PDF.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::assets::AssetConfig;
use crate::document::MenuDocumentBuilder;
use crate::error::MenuError;
use crate::markup::MarkupConverter;
use crate::model::Menu;
use crate::render::DocumentRenderer;

/// Output of the structured pipeline when no path is given.
pub const DEFAULT_STRUCTURED_OUTPUT: &str = "east_west_menu.pdf";
/// Output of the markup pipeline when no path is given.
pub const DEFAULT_MARKUP_OUTPUT: &str = "east_west_menu_final.pdf";
/// HTML page read by the markup pipeline when no path is given.
pub const DEFAULT_MARKUP_INPUT: &str = "menu_editor.html";

/// Summary of a written menu PDF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub bytes_written: usize,
    pub page_count: usize,
}

/// Builds the full menu document from `menu` and writes it to `output`.
pub fn generate_structured<R>(
    menu: &Menu,
    assets: AssetConfig,
    renderer: &R,
    output: &Path,
) -> Result<GenerationReport, MenuError>
where
    R: DocumentRenderer + ?Sized,
{
    info!(
        "building menu for {} with {} sections",
        menu.restaurant.name,
        menu.sections().count()
    );

    let rendered = MenuDocumentBuilder::from_menu(menu, assets)
        .build(renderer)
        .map_err(|err| {
            error!("failed to render menu: {}", err);
            err
        })?;

    fs::write(output, &rendered.bytes).map_err(|err| MenuError::io(output, err))?;
    info!(
        "wrote {} ({} pages, {} bytes)",
        output.display(),
        rendered.page_count,
        rendered.bytes.len()
    );

    Ok(GenerationReport {
        output: output.to_path_buf(),
        bytes_written: rendered.bytes.len(),
        page_count: rendered.page_count,
    })
}

/// Converts the HTML page at `input` with the default print stylesheet.
pub fn generate_from_markup(
    input: &Path,
    output: &Path,
    fonts_dir: Option<PathBuf>,
) -> Result<GenerationReport, MenuError> {
    MarkupConverter::default()
        .with_fonts_dir(fonts_dir)
        .convert_file(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MenuDocument;
    use crate::model::{MenuItem, Section};
    use crate::render::RenderedPdf;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRenderer {
        seen: RefCell<Vec<MenuDocument>>,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn render(&self, document: &MenuDocument) -> Result<RenderedPdf, MenuError> {
            self.seen.borrow_mut().push(document.clone());
            Ok(RenderedPdf {
                bytes: b"%PDF-1.3 stub".to_vec(),
                page_count: 3,
                section_pages: Vec::new(),
            })
        }
    }

    struct FailingRenderer;

    impl DocumentRenderer for FailingRenderer {
        fn render(&self, _document: &MenuDocument) -> Result<RenderedPdf, MenuError> {
            Err(MenuError::Markup("nothing to render".to_owned()))
        }
    }

    fn menu() -> Menu {
        Menu::default().with_section(
            Section::new("Cold Mezzes")
                .with_item(MenuItem::new("Hummus", "Chickpea puree", "7,50€").vegan()),
        )
    }

    #[test]
    fn structured_writes_rendered_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join(DEFAULT_STRUCTURED_OUTPUT);
        let renderer = RecordingRenderer::default();

        let report = generate_structured(&menu(), AssetConfig::default(), &renderer, &output)
            .expect("generation succeeds");

        assert_eq!(report.output, output);
        assert_eq!(report.page_count, 3);
        assert_eq!(report.bytes_written, b"%PDF-1.3 stub".len());
        assert_eq!(fs::read(&output).expect("output"), b"%PDF-1.3 stub");

        let seen = renderer.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].items().count(), 1);
    }

    #[test]
    fn structured_failure_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("menu.pdf");

        let result = generate_structured(&menu(), AssetConfig::default(), &FailingRenderer, &output);

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn missing_markup_input_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join(DEFAULT_MARKUP_INPUT);
        let output = dir.path().join(DEFAULT_MARKUP_OUTPUT);

        match generate_from_markup(&input, &output, None) {
            Err(MenuError::InputMissing(path)) => assert_eq!(path, input),
            other => panic!("expected missing input, got {other:?}"),
        }
        assert!(!output.exists());
    }
}

use std::fs;
use std::path::Path;

use menu_pdf::fonts;
use menu_pdf::markup::{MarkupConverter, PrintStylesheet};
use menu_pdf::MenuError;

const EDITOR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div class="menu-header">
    <h1>East @ West</h1>
    <p>Authentic Lebanese &amp; Syrian Cuisine</p>
    <p>Brussels, Belgium</p>
  </div>
  <div class="actions"><button>Add section</button></div>
  <div class="section">
    <h2 class="section-title"><input value="Cold Mezzes"></h2>
    <div class="menu-item" data-vegan="true">
      <div class="item-name"><input value="Hummus"></div>
      <div class="item-description"><textarea>Chickpea puree</textarea></div>
      <div class="item-price"><input value="7,50€"></div>
    </div>
  </div>
  <div class="info-box">All tasting menus serve 2 people</div>
</body>
</html>"#;

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("menu_editor.html");
    let output = dir.path().join("east_west_menu_final.pdf");

    let err = MarkupConverter::default()
        .convert_file(&input, &output)
        .expect_err("missing input must fail");

    assert!(matches!(&err, MenuError::InputMissing(path) if path == &input));
    assert!(err.to_string().contains("menu_editor.html"));
    assert!(!output.exists());
}

#[test]
fn page_without_menu_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("empty.html");
    let output = dir.path().join("empty.pdf");
    fs::write(&input, "<html><body><h1>Coming soon</h1></body></html>").expect("write input");

    let result = MarkupConverter::default().convert_file(&input, &output);

    assert!(matches!(result, Err(MenuError::Markup(_))));
    assert!(!output.exists());
}

#[test]
fn editor_page_reads_as_menu() {
    let document = MarkupConverter::new(PrintStylesheet::default())
        .read(EDITOR_PAGE, Path::new("."))
        .expect("editor page reads");

    let json = document.to_json().expect("serialize tree");
    assert!(json.contains("COLD MEZZES"));
    assert!(json.contains("Chickpea puree"));
    assert!(!json.contains("Add section"));

    let item = document.items().next().expect("one item");
    assert_eq!(item.name, "Hummus");
    assert!(item.marker.is_some());
}

#[test]
fn editor_page_converts_to_pdf() {
    if !fonts::default_fonts_available(None) {
        eprintln!(
            "Skipping editor_page_converts_to_pdf: fonts missing. Set MENU_PDF_FONTS_DIR or copy assets/fonts next to the binary."
        );
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("menu_editor.html");
    let output = dir.path().join("east_west_menu_final.pdf");
    fs::write(&input, EDITOR_PAGE).expect("write input");

    let report = MarkupConverter::default()
        .convert_file(&input, &output)
        .expect("conversion succeeds");

    assert_eq!(report.output, output);
    let written = fs::read(&output).expect("read output");
    assert_eq!(written.len(), report.bytes_written);
    assert!(written.starts_with(b"%PDF"));
    assert!(report.page_count >= 1);
}

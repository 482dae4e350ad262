use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use menu_pdf::assets::AssetConfig;
use menu_pdf::catalog;
use menu_pdf::document::MenuDocumentBuilder;
use menu_pdf::model::Menu;
use menu_pdf::pipeline::{
    self, DEFAULT_MARKUP_INPUT, DEFAULT_MARKUP_OUTPUT, DEFAULT_STRUCTURED_OUTPUT,
};
use menu_pdf::render::PdfRenderer;
use menu_pdf::MenuError;

/// Generates the restaurant menu PDF.
///
/// Without a subcommand the built-in menu is rendered to `east_west_menu.pdf`.
/// Fonts are looked up under `assets/fonts` next to the binary or the
/// directory named by `MENU_PDF_FONTS_DIR`, then in the usual system locations.
#[derive(Parser)]
#[command(author, version, about = "Restaurant menu PDF generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render menu data through the document builder.
    Structured {
        #[command(flatten)]
        source: MenuSource,

        /// Where to write the PDF.
        #[arg(long, default_value = DEFAULT_STRUCTURED_OUTPUT)]
        output: PathBuf,

        #[arg(long, env = "MENU_PDF_FONTS_DIR")]
        fonts_dir: Option<PathBuf>,

        /// Add a PDF outline entry for every section.
        #[arg(long)]
        bookmarks: bool,
    },

    /// Convert the HTML menu editor page with print styling.
    Markup {
        #[arg(long, default_value = DEFAULT_MARKUP_INPUT)]
        input: PathBuf,

        #[arg(long, default_value = DEFAULT_MARKUP_OUTPUT)]
        output: PathBuf,

        #[arg(long, env = "MENU_PDF_FONTS_DIR")]
        fonts_dir: Option<PathBuf>,
    },

    /// Print the document tree as JSON without rendering it.
    Tree {
        #[command(flatten)]
        source: MenuSource,
    },
}

#[derive(Args)]
struct MenuSource {
    /// JSON menu data; the built-in East @ West menu when omitted.
    #[arg(long)]
    menu: Option<PathBuf>,

    #[arg(long, env = "MENU_LOGO")]
    logo: Option<PathBuf>,

    #[arg(long, env = "MENU_VEGAN_ICON")]
    vegan_icon: Option<PathBuf>,

    #[arg(long, env = "MENU_VEGETARIAN_ICON")]
    vegetarian_icon: Option<PathBuf>,
}

impl MenuSource {
    fn load(&self) -> Result<(Menu, AssetConfig), MenuError> {
        let menu = match &self.menu {
            Some(path) => Menu::load(path)?,
            None => catalog::east_at_west(),
        };
        let assets = AssetConfig {
            logo: self.logo.clone(),
            vegan_icon: self.vegan_icon.clone(),
            vegetarian_icon: self.vegetarian_icon.clone(),
        };
        Ok((menu, assets))
    }

    /// Values for a bare invocation, where clap never sees the `env` fallbacks.
    fn from_env() -> Self {
        let var = |name: &str| std::env::var_os(name).map(PathBuf::from);
        Self {
            menu: None,
            logo: var("MENU_LOGO"),
            vegan_icon: var("MENU_VEGAN_ICON"),
            vegetarian_icon: var("MENU_VEGETARIAN_ICON"),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or_else(|| Commands::Structured {
        source: MenuSource::from_env(),
        output: PathBuf::from(DEFAULT_STRUCTURED_OUTPUT),
        fonts_dir: std::env::var_os(menu_pdf::fonts::FONTS_DIR_ENV).map(PathBuf::from),
        bookmarks: false,
    });

    if let Err(err) = run(command) {
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), MenuError> {
    match command {
        Commands::Structured {
            source,
            output,
            fonts_dir,
            bookmarks,
        } => {
            let (menu, assets) = source.load()?;
            let renderer = structured_renderer(fonts_dir, bookmarks);
            let report = pipeline::generate_structured(&menu, assets, &renderer, &output)?;
            info!("{} pages", report.page_count);
            println!("Menu PDF created: {}", report.output.display());
        }
        Commands::Markup {
            input,
            output,
            fonts_dir,
        } => {
            let report = pipeline::generate_from_markup(&input, &output, fonts_dir)?;
            println!("PDF created successfully: {}", report.output.display());
        }
        Commands::Tree { source } => {
            let (menu, assets) = source.load()?;
            let document = MenuDocumentBuilder::from_menu(&menu, assets).finish();
            println!("{}", document.to_json()?);
        }
    }
    Ok(())
}

#[cfg(feature = "bookmarks")]
fn structured_renderer(fonts_dir: Option<PathBuf>, bookmarks: bool) -> PdfRenderer {
    PdfRenderer::default()
        .with_fonts_dir(fonts_dir)
        .with_bookmarks(bookmarks)
}

#[cfg(not(feature = "bookmarks"))]
fn structured_renderer(fonts_dir: Option<PathBuf>, bookmarks: bool) -> PdfRenderer {
    if bookmarks {
        log::warn!("built without the `bookmarks` feature; no outline will be added");
    }
    PdfRenderer::default().with_fonts_dir(fonts_dir)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use txt2pdf::convert::{convert_with, FontChoice};
use txt2pdf::resolve::FontSearch;
use txt2pdf::{pagesize, BuiltinFont, Colour, Pt, Settings};

/// Convert a plain-text file into a paginated PDF.
///
/// A font able to render Japanese text is looked for in `./font`, `./fonts`,
/// `$TXT2PDF_FONT_DIR` and the usual user and system font directories. When
/// none can be used the text is drawn with a built-in PDF font instead.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Text file to convert
    #[arg(default_value = "cli.txt")]
    input: PathBuf,

    /// Directory the PDF is written to; created if missing
    #[arg(short, long, default_value = "PDF")]
    output_dir: PathBuf,

    /// File name of the PDF inside the output directory
    #[arg(short = 'n', long, default_value = "output.pdf")]
    output_name: String,

    /// Embed this font file instead of searching for one
    #[arg(long)]
    font: Option<PathBuf>,

    /// Search these directories for fonts instead of the default ones
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Font size in points
    #[arg(long, default_value_t = 12.0)]
    font_size: f32,

    /// Font used when no font file can be embedded
    #[arg(long, value_enum, default_value_t = FallbackFont::Helvetica)]
    fallback_font: FallbackFont,

    /// Paper size: a3, a4, a5, letter or legal
    #[arg(long, default_value = "a4", value_parser = parse_page_size)]
    page_size: pagesize::PageSize,

    /// Text colour as #rrggbb
    #[arg(long, value_parser = parse_colour)]
    colour: Option<Colour>,

    /// Document title; defaults to the input file name
    #[arg(long)]
    title: Option<String>,

    /// Document subject
    #[arg(long)]
    subject: Option<String>,
}

#[derive(Copy, Clone, ValueEnum)]
enum FallbackFont {
    Helvetica,
    Courier,
    Times,
}

impl From<FallbackFont> for BuiltinFont {
    fn from(fallback: FallbackFont) -> Self {
        match fallback {
            FallbackFont::Helvetica => BuiltinFont::Helvetica,
            FallbackFont::Courier => BuiltinFont::Courier,
            FallbackFont::Times => BuiltinFont::TimesRoman,
        }
    }
}

fn parse_page_size(name: &str) -> Result<pagesize::PageSize, String> {
    pagesize::by_name(name).ok_or_else(|| format!("unknown page size `{name}`"))
}

fn parse_colour(hex: &str) -> Result<Colour, String> {
    Colour::from_hex(hex).ok_or_else(|| format!("`{hex}` is not a #rrggbb colour"))
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            output_name: self.output_name.clone(),
            font: self.font.clone(),
            font_size: Pt(self.font_size),
            builtin_font: self.fallback_font.into(),
            title: self.title.clone(),
            subject: self.subject.clone(),
            ..Settings::default()
        };
        settings.layout.page_size = self.page_size;
        if let Some(colour) = self.colour {
            settings.colour = colour;
        }
        settings
    }

    fn font_search(&self) -> FontSearch {
        let search = FontSearch::platform();
        if self.font_dirs.is_empty() {
            search
        } else {
            search.with_directories(self.font_dirs.iter())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match convert_with(&cli.settings(), &cli.font_search()) {
        Ok(report) => {
            if let FontChoice::Builtin { .. } = report.font {
                println!("note: text was drawn with the {}", report.font);
            }
            println!(
                "wrote {} ({} page{}, {} line{})",
                report.output.display(),
                report.pages,
                if report.pages == 1 { "" } else { "s" },
                report.lines,
                if report.lines == 1 { "" } else { "s" },
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            print_error_sources(&err);
            ExitCode::FAILURE
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

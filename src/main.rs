//! qrforma CLI
//!
//! Usage:
//!   qrforma [OPTIONS] [CONTENT]
//!
//! Options:
//!   -t, --type <TYPE>        url, text, access-key, wifi, email or phone [default: url]
//!   -f, --format <FORMAT>    png or svg, repeatable [default: png]
//!       --svg-mode <MODE>    vector or embedded
//!   -o, --out <DIR>          Directory for exported files [default: .]
//!   -c, --config <FILE>      Settings file (TOML)
//!   -p, --print              Print the code to the terminal
//!       --list-types         Show the content types and their placeholders

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qrforma::{export, Config, ContentType, ExportFormat, Generator, GeneratorError, SvgMode};

#[derive(Parser)]
#[command(name = "qrforma")]
#[command(about = "Validate content and export it as a QR code")]
struct Cli {
    /// Content to encode (reads stdin if not provided)
    content: Option<String>,

    /// Content type
    #[arg(short = 't', long = "type", default_value = "url", value_parser = parse_type)]
    content_type: ContentType,

    /// Output format, may be given more than once
    #[arg(short, long = "format", value_parser = parse_format)]
    formats: Vec<ExportFormat>,

    /// How SVG files are produced (overrides the config file)
    #[arg(long, value_parser = parse_svg_mode)]
    svg_mode: Option<SvgMode>,

    /// Directory for exported files
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the code to the terminal
    #[arg(short, long)]
    print: bool,

    /// Show the content types and their placeholders
    #[arg(long)]
    list_types: bool,
}

fn parse_type(s: &str) -> Result<ContentType, String> {
    s.parse::<ContentType>().map_err(|e| e.to_string())
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse::<ExportFormat>().map_err(|e| e.to_string())
}

fn parse_svg_mode(s: &str) -> Result<SvgMode, String> {
    s.parse::<SvgMode>().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_types {
        print_types();
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(invalid) = e.downcast_ref::<GeneratorError>().and_then(GeneratorError::validation) {
                eprintln!("error: {invalid}");
                return ExitCode::from(2);
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(mode) = cli.svg_mode {
        config.export.svg_mode = mode;
    }

    let content = match cli.content {
        Some(content) => content,
        None if io::stdin().is_terminal() => {
            let t = cli.content_type;
            eprintln!("{}: e.g. {}", t.label(), t.placeholder());
            if let Some(hint) = t.descriptor().hint {
                eprintln!("{hint}");
            }
            anyhow::bail!("no content given");
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let mut form = Generator::new(config);
    form.select_type(cli.content_type);
    form.set_input(content);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("starting runtime")?;
    runtime.block_on(form.generate())?;

    if cli.print {
        if let Some(surface) = form.surface() {
            print!("{}", surface.to_terminal_string());
        }
    }

    let formats = if cli.formats.is_empty() {
        vec![ExportFormat::Png]
    } else {
        cli.formats
    };
    let date = export::today();
    for format in formats {
        if let Some(artifact) = form.export(format, date)? {
            let path = artifact.save_to(&cli.out)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_types() {
    for t in ContentType::ALL {
        let lines = if t.is_multiline() { "multi-line" } else { "single-line" };
        println!("{:<12} {:<12} {:<12} {}", t.as_str(), t.label(), lines, t.placeholder());
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use labgrid::{GlyphDocument, OrderMode, ParseOptions, ReportParser};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "labgrid",
    about = "Parse food sensitivity report glyphs into structured JSON",
    version,
    author
)]
struct Cli {
    /// Glyph dump of the report (JSON, one entry per page)
    input: PathBuf,

    /// Output JSON file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First page to parse (1-based)
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// Last page to parse (1-based, inclusive)
    #[arg(long, default_value_t = 999)]
    end: usize,

    /// Item ordering: auto, row or column4
    #[arg(long, default_value = "auto")]
    order: OrderMode,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "labgrid=debug"
    } else {
        "labgrid=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let document = GlyphDocument::open(&cli.input)
        .with_context(|| format!("Failed to read glyph dump {}", cli.input.display()))?;
    debug!(
        "Loaded {} pages from {}",
        document.page_count(),
        cli.input.display()
    );

    let options = ParseOptions {
        order_mode: cli.order,
        start_page: cli.start,
        end_page: cli.end,
        ..Default::default()
    };
    let result = ReportParser::with_options(options).parse_document(&document)?;
    let json = result.to_json_pretty()?;

    // Write to output file or stdout
    if let Some(output_path) = cli.output {
        std::fs::write(&output_path, format!("{json}\n"))
            .with_context(|| format!("Failed to write output file {}", output_path.display()))?;
        info!("Wrote {} pages", result.pages.len());
        println!("Wrote {}", output_path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

//! `omr-map`: map per-page detection dumps to a graded answer report.

use std::{fs, path::PathBuf};

use clap::Parser;
use log::{info, warn};
use omr_map_core::{
    aggregate_pages, format_report, AnswerMapper, ClassConfig, GlobalResult, MapParams,
    OmrIoError, PageDetections, PageResult,
};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: OmrIoError,
    },
    #[error("failed to read config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Fuse two detectors' per-page outputs into a per-question answer report.
///
/// Each PAGE file holds one page's detections: `{"glyphs": [...],
/// "structures": [...]}` where every record is `{"bbox": {"x1", "y1",
/// "x2", "y2"}, "class_id", "confidence"}`. Pages are numbered in the
/// order given.
#[derive(Parser, Debug)]
#[command(name = "omr-map", version, about)]
struct Args {
    /// Per-page detection JSON files, in page order.
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Class-id → category table override (JSON).
    #[arg(long)]
    classes: Option<PathBuf>,

    /// Engine parameter override (JSON).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Emit the global result as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Write the output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all log output, including zero-row page warnings.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "off"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let mapper = AnswerMapper::new(
        load_config::<ClassConfig>(args.classes.as_ref())?,
        load_config::<MapParams>(args.params.as_ref())?,
    );

    let mut pages: Vec<PageResult> = Vec::with_capacity(args.pages.len());
    for path in &args.pages {
        let detections = PageDetections::load_json(path).map_err(|source| CliError::Page {
            path: path.clone(),
            source,
        })?;
        let page = mapper.map_page(
            &detections.glyph_detections(),
            &detections.structure_detections(),
        );
        info!("{}: {} questions", path.display(), page.questions.len());
        pages.push(page);
    }

    let global = aggregate_pages(&pages);
    for &index in &global.empty_pages {
        warn!(
            "page {} ({}) produced no rows",
            index + 1,
            args.pages[index].display()
        );
    }

    let output = render(&global, args.json)?;
    match &args.output {
        Some(path) => fs::write(path, output)?,
        None => print!("{output}"),
    }
    Ok(())
}

fn load_config<T>(path: Option<&PathBuf>) -> Result<T, CliError>
where
    T: Default + serde::de::DeserializeOwned,
{
    let Some(path) = path else {
        return Ok(T::default());
    };
    let load = || -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    };
    load().map_err(|source| CliError::Config {
        path: path.clone(),
        source,
    })
}

fn render(global: &GlobalResult, json: bool) -> Result<String, CliError> {
    if json {
        // The consumer contract is the bare question mapping; empty-page
        // diagnostics go to stderr above.
        let mut out = serde_json::to_string_pretty(&global.questions)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(format_report(global))
    }
}

//! Map one or more page-detection JSON files and print the report.
//!
//! Usage: `cargo run --example map_pages -- page1.json [page2.json ...]`
//!
//! Each file holds the two detectors' outputs for one page, in the
//! [`PageDetections`] layout.

use std::{env, path::PathBuf};

use log::{info, warn};
use omr_map_core::{
    aggregate_pages, format_report, AnswerMapper, PageDetections, PageResult,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let paths: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: map_pages <page.json>...");
        std::process::exit(2);
    }

    let mapper = AnswerMapper::default();
    let mut pages: Vec<PageResult> = Vec::with_capacity(paths.len());
    for path in &paths {
        let detections = PageDetections::load_json(path)?;
        let page = mapper.map_page(
            &detections.glyph_detections(),
            &detections.structure_detections(),
        );
        info!("{}: {} questions", path.display(), page.questions.len());
        pages.push(page);
    }

    let global = aggregate_pages(&pages);
    for &index in &global.empty_pages {
        warn!("page {} ({}) produced no rows", index + 1, paths[index].display());
    }

    print!("{}", format_report(&global));
    Ok(())
}

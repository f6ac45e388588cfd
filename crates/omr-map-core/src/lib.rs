//! Answer-mapping engine for scanned multiple-choice answer sheets.
//!
//! Two independent object detectors run on each page: one locates the
//! answer-option glyphs (A/B/C/D, plus an optional whole-block marker),
//! the other locates filled/circled marks and question-number anchors.
//! This crate fuses the two box sets into an ordered mapping from question
//! number to selected answer(s) and a status code (`ok`, `blank`,
//! `multiple`), ready for a downstream grading step.
//!
//! The pipeline is strictly forward: raw boxes → classified entities →
//! matched pairs → rows → per-question verdicts → aggregated global
//! result → formatted report. Each stage consumes immutable inputs and
//! produces a new structure; per-page mapping is stateless, so pages may
//! be processed from parallel workers and aggregated afterwards.
//!
//! ## Quickstart
//!
//! ```
//! use omr_map_core::{aggregate_pages, format_report, AnswerMapper, Detection, BBox};
//!
//! let mapper = AnswerMapper::default();
//!
//! // Class 0..=3 are A..D for the glyph detector; class 0 is a mark
//! // circle for the structure detector (both configurable).
//! let glyphs: Vec<Detection> = (0..4)
//!     .map(|i| Detection {
//!         bbox: BBox::new(i as f32 * 100.0, 100.0, i as f32 * 100.0 + 20.0, 120.0),
//!         class_id: i,
//!         confidence: 0.9,
//!     })
//!     .collect();
//! let marks = vec![Detection {
//!     bbox: BBox::new(100.0, 100.0, 120.0, 120.0),
//!     class_id: 0,
//!     confidence: 0.9,
//! }];
//!
//! let page = mapper.map_page(&glyphs, &marks);
//! let global = aggregate_pages(&[page]);
//! assert_eq!(format_report(&global), "Q1: B [ok]\n");
//! ```

mod aggregate;
mod classify;
mod geom;
mod infer;
mod io;
mod mapper;
mod match_marks;
mod params;
mod report;
mod rows;
mod types;

#[cfg(feature = "image")]
mod detect;
#[cfg(feature = "tracing")]
mod logger;

pub use aggregate::{aggregate_pages, Aggregator, GlobalResult};
pub use classify::{classify, ClassConfig, ClassifiedPage};
pub use geom::BBox;
pub use infer::{infer_row, infer_rows};
pub use io::{OmrIoError, PageDetections};
pub use mapper::AnswerMapper;
pub use match_marks::match_marks;
pub use params::MapParams;
pub use report::format_report;
pub use rows::{mean_circle_height, segment_rows, Row};
pub use types::{
    Answer, Detection, MarkCircle, OptionGlyph, OptionLabel, PageResult, Provenance,
    QuestionAnchor, QuestionResult, RowStatus,
};

#[cfg(feature = "image")]
pub use detect::{map_page_with, BoxDetector, DetectorError};
#[cfg(feature = "tracing")]
pub use logger::init_tracing;

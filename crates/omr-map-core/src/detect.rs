//! Detector capability seam (feature `image`).
//!
//! The engine never loads models itself; it consumes the output of two
//! external detectors. This trait gives callers a typed handle for those
//! collaborators so the mapping stays agnostic to which backend (process,
//! ONNX session, remote service) produced the boxes.

use crate::mapper::AnswerMapper;
use crate::types::{Detection, PageResult};

#[derive(thiserror::Error, Debug)]
pub enum DetectorError {
    #[error("detector backend failed: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// An external object detector: image in, thresholded boxes out.
///
/// Implementations are expected to apply their own confidence cutoff
/// before returning. Construct detector values once per run and pass them
/// by reference; no process-wide singletons.
pub trait BoxDetector {
    fn detect(&self, image: &image::GrayImage) -> Result<Vec<Detection>, DetectorError>;
}

/// Run both detectors on one page image and map the result.
pub fn map_page_with<G, S>(
    glyph_detector: &G,
    structure_detector: &S,
    image: &image::GrayImage,
    mapper: &AnswerMapper,
) -> Result<PageResult, DetectorError>
where
    G: BoxDetector,
    S: BoxDetector,
{
    let glyph_dets = glyph_detector.detect(image)?;
    let structure_dets = structure_detector.detect(image)?;
    Ok(mapper.map_page(&glyph_dets, &structure_dets))
}

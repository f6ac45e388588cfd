//! One-page mapping pipeline.

use log::debug;

use crate::classify::{classify, ClassConfig};
use crate::infer::infer_rows;
use crate::match_marks::match_marks;
use crate::params::MapParams;
use crate::rows::segment_rows;
use crate::types::{Detection, PageResult};

/// Maps one page's raw detections to per-question verdicts.
///
/// Construct one per run and pass it by reference wherever pages are
/// processed; it holds configuration only and keeps no state between
/// calls, so pages may be mapped from parallel workers.
#[derive(Clone, Debug, Default)]
pub struct AnswerMapper {
    classes: ClassConfig,
    params: MapParams,
}

impl AnswerMapper {
    pub fn new(classes: ClassConfig, params: MapParams) -> Self {
        Self { classes, params }
    }

    pub fn classes(&self) -> &ClassConfig {
        &self.classes
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    /// Run classify → match → segment → infer for one page.
    ///
    /// `glyph_dets` comes from the option-glyph detector, `structure_dets`
    /// from the structure detector, both for the same image. A page with
    /// no usable detections yields an empty result, not an error.
    pub fn map_page(&self, glyph_dets: &[Detection], structure_dets: &[Detection]) -> PageResult {
        let page = classify(glyph_dets, structure_dets, &self.classes);
        let mut glyphs = page.glyphs.clone();
        let mut circles = page.retained_circles();
        debug!(
            "page: {} glyphs, {} circles retained of {}, {} anchors",
            glyphs.len(),
            circles.len(),
            page.circles.len(),
            page.anchors.len()
        );

        match_marks(&mut glyphs, &mut circles, &self.params);
        let rows = segment_rows(&circles, &self.params);
        PageResult::from_row_results(infer_rows(&rows, &glyphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::BBox;
    use crate::types::{Answer, OptionLabel, RowStatus};

    fn det(class_id: u32, x1: f32, y1: f32) -> Detection {
        Detection {
            bbox: BBox::new(x1, y1, x1 + 20.0, y1 + 20.0),
            class_id,
            confidence: 0.9,
        }
    }

    /// A full row of four option glyphs (classes 0..=3) at vertical y1.
    fn glyph_row(y1: f32) -> Vec<Detection> {
        (0..4).map(|i| det(i, i as f32 * 100.0, y1)).collect()
    }

    #[test]
    fn maps_two_rows_with_single_answers() {
        let mapper = AnswerMapper::default();
        let mut glyphs = glyph_row(100.0);
        glyphs.extend(glyph_row(200.0));
        // Circle on B in row 1, on D in row 2 (structure class 0).
        let structures = vec![det(0, 100.0, 100.0), det(0, 300.0, 200.0)];

        let result = mapper.map_page(&glyphs, &structures);
        assert_eq!(result.questions.len(), 2);
        assert_eq!(result.questions[&1].answer, Answer::Single(OptionLabel::B));
        assert_eq!(result.questions[&2].answer, Answer::Single(OptionLabel::D));
    }

    #[test]
    fn empty_detections_map_to_empty_page() {
        let mapper = AnswerMapper::default();
        let result = mapper.map_page(&[], &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn stray_marks_above_the_section_are_ignored() {
        let mapper = AnswerMapper::default();
        // Block marker (class 4) centered at y = 60, grid below it.
        let mut glyphs = vec![det(4, 0.0, 50.0)];
        glyphs.extend(glyph_row(100.0));
        // A signature circle near the top plus a real mark on A.
        let structures = vec![det(0, 50.0, 0.0), det(0, 0.0, 100.0)];

        let result = mapper.map_page(&glyphs, &structures);
        assert_eq!(result.questions.len(), 1);
        assert_eq!(result.questions[&1].answer, Answer::Single(OptionLabel::A));
    }

    #[test]
    fn multi_marked_row_is_surfaced_not_resolved() {
        let mapper = AnswerMapper::default();
        let glyphs = glyph_row(100.0);
        let structures = vec![det(0, 0.0, 100.0), det(0, 200.0, 100.0)];

        let result = mapper.map_page(&glyphs, &structures);
        assert_eq!(result.questions[&1].status, RowStatus::Multiple);
        assert_eq!(
            result.questions[&1].answer,
            Answer::Multiple(vec![OptionLabel::A, OptionLabel::C])
        );
    }
}

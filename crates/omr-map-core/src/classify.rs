//! Partitioning of raw detector records into typed entities.
//!
//! Two independent detectors run on the same page: the option-glyph
//! detector (answer letters A–D plus an optional whole-block marker) and
//! the structure detector (mark circles and question-number anchors). The
//! class-id meaning of each detector is configuration, not code, so the
//! engine stays agnostic to which model produced which category.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::{Detection, MarkCircle, OptionGlyph, OptionLabel, QuestionAnchor};

/// Class-id → category table for the two detectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassConfig {
    /// Option-glyph detector: class id → answer letter.
    #[serde(default = "default_option_classes")]
    pub option_classes: HashMap<u32, OptionLabel>,
    /// Option-glyph detector: class id of the whole multiple-choice block
    /// marker, when the model has one.
    #[serde(default = "default_section_class")]
    pub section_class: Option<u32>,
    /// Structure detector: class id of filled/circled marks.
    #[serde(default)]
    pub circle_class: u32,
    /// Structure detector: class id of question-number anchors.
    #[serde(default = "default_anchor_class")]
    pub anchor_class: u32,
}

fn default_option_classes() -> HashMap<u32, OptionLabel> {
    OptionLabel::SEQUENCE
        .iter()
        .enumerate()
        .map(|(id, &label)| (id as u32, label))
        .collect()
}

fn default_section_class() -> Option<u32> {
    Some(4)
}

fn default_anchor_class() -> u32 {
    1
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            option_classes: default_option_classes(),
            section_class: default_section_class(),
            circle_class: 0,
            anchor_class: default_anchor_class(),
        }
    }
}

/// One page's detections, partitioned by category.
#[derive(Clone, Debug, Default)]
pub struct ClassifiedPage {
    pub glyphs: Vec<OptionGlyph>,
    pub section_starts: Vec<Detection>,
    pub circles: Vec<MarkCircle>,
    pub anchors: Vec<QuestionAnchor>,
}

impl ClassifiedPage {
    /// Vertical start of the multiple-choice section.
    ///
    /// Fallback chain: the lowest section-start marker (the block box is
    /// expected to sit above the grid, so among candidates the one closest
    /// to the grid wins), else the topmost circle, else the topmost anchor,
    /// else 0 (no filtering).
    pub fn section_start_y(&self) -> f32 {
        if !self.section_starts.is_empty() {
            return self
                .section_starts
                .iter()
                .map(|d| d.bbox.center().y)
                .fold(f32::MIN, f32::max);
        }
        if !self.circles.is_empty() {
            return self
                .circles
                .iter()
                .map(|c| c.bbox.center().y)
                .fold(f32::MAX, f32::min);
        }
        if !self.anchors.is_empty() {
            return self
                .anchors
                .iter()
                .map(|a| a.bbox.center().y)
                .fold(f32::MAX, f32::min);
        }
        0.0
    }

    /// Circles at or below the section start, in input order.
    ///
    /// Marks above the answer grid (signatures, stray annotations the
    /// structure detector also picks up) are discarded here.
    pub fn retained_circles(&self) -> Vec<MarkCircle> {
        let start_y = self.section_start_y();
        self.circles
            .iter()
            .filter(|c| c.bbox.center().y >= start_y)
            .copied()
            .collect()
    }
}

/// Partition the two detectors' outputs according to `classes`.
///
/// Records with class ids the table does not mention are dropped;
/// classification is best-effort over whatever records are well-formed.
pub fn classify(
    glyph_dets: &[Detection],
    structure_dets: &[Detection],
    classes: &ClassConfig,
) -> ClassifiedPage {
    let mut page = ClassifiedPage::default();

    for det in glyph_dets {
        if let Some(&label) = classes.option_classes.get(&det.class_id) {
            page.glyphs.push(OptionGlyph::detected(det.bbox, label));
        } else if classes.section_class == Some(det.class_id) {
            page.section_starts.push(*det);
        } else {
            debug!("dropping glyph detection with unmapped class {}", det.class_id);
        }
    }

    for det in structure_dets {
        if det.class_id == classes.circle_class {
            page.circles.push(MarkCircle::new(det.bbox));
        } else if det.class_id == classes.anchor_class {
            page.anchors.push(QuestionAnchor { bbox: det.bbox });
        } else {
            debug!(
                "dropping structure detection with unmapped class {}",
                det.class_id
            );
        }
    }

    page
}

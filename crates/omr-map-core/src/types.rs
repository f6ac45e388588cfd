use serde::{Deserialize, Serialize};

use crate::geom::BBox;

/// One raw record from an external detector run: a box, the detector's
/// class id, and its confidence. Confidence thresholds are applied by the
/// detector collaborator before these records reach the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BBox,
    pub class_id: u32,
    pub confidence: f32,
}

/// Answer-option letter. The only labels this engine ever produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// Canonical left-to-right column order.
    pub const SEQUENCE: [OptionLabel; 4] =
        [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an option glyph came from the detector or was synthesized to
/// fill a column slot the glyph detector missed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Detected,
    Synthesized,
}

/// A detected rendering of one answer letter at a fixed sheet position.
///
/// `selected` starts false and is flipped exactly once, by the matching
/// stage, together with the matched circle's `mapped` flag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionGlyph {
    pub bbox: BBox,
    pub label: OptionLabel,
    pub selected: bool,
    pub provenance: Provenance,
}

impl OptionGlyph {
    pub fn detected(bbox: BBox, label: OptionLabel) -> Self {
        Self {
            bbox,
            label,
            selected: false,
            provenance: Provenance::Detected,
        }
    }
}

/// A candidate filled/circled mark. `mapped` records whether it was
/// associated with an option glyph; unmapped circles still anchor row
/// geometry but contribute no label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkCircle {
    pub bbox: BBox,
    pub mapped: bool,
}

impl MarkCircle {
    pub fn new(bbox: BBox) -> Self {
        Self {
            bbox,
            mapped: false,
        }
    }
}

/// Location of a question-number glyph. Used only as a fallback reference
/// when no section-start detection exists.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnchor {
    pub bbox: BBox,
}

/// Verdict classification for one question row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Ok,
    Blank,
    Multiple,
}

/// The selected answer(s) of one question.
///
/// Serializes as `null`, `"A"`, or `["A","C"]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    None,
    Single(OptionLabel),
    Multiple(Vec<OptionLabel>),
}

impl Answer {
    /// Build an answer (and its status) from the selected labels of a row.
    pub fn from_labels(mut labels: Vec<OptionLabel>) -> (Answer, RowStatus) {
        match labels.len() {
            0 => (Answer::None, RowStatus::Blank),
            1 => (Answer::Single(labels.remove(0)), RowStatus::Ok),
            _ => (Answer::Multiple(labels), RowStatus::Multiple),
        }
    }

    pub fn labels(&self) -> &[OptionLabel] {
        match self {
            Answer::None => &[],
            Answer::Single(label) => std::slice::from_ref(label),
            Answer::Multiple(labels) => labels,
        }
    }
}

/// Per-question verdict: the answer and its status. The status is always
/// consistent with the number of labels (0 blank, 1 ok, 2+ multiple).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub answer: Answer,
    pub status: RowStatus,
}

impl QuestionResult {
    pub fn from_labels(labels: Vec<OptionLabel>) -> Self {
        let (answer, status) = Answer::from_labels(labels);
        Self { answer, status }
    }
}

/// One page's verdicts: ordered mapping from local question index
/// (1-based, top-to-bottom) to result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageResult {
    pub questions: std::collections::BTreeMap<u32, QuestionResult>,
}

impl PageResult {
    pub fn from_row_results(results: Vec<QuestionResult>) -> Self {
        Self {
            questions: results
                .into_iter()
                .enumerate()
                .map(|(i, r)| (i as u32 + 1, r))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Maximum local question index, not the row count. The distinction
    /// matters to the cross-page offset when rows go undetected.
    pub fn max_index(&self) -> Option<u32> {
        self.questions.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_result_indexing_is_one_based() {
        let page = PageResult::from_row_results(vec![
            QuestionResult::from_labels(vec![OptionLabel::A]),
            QuestionResult::from_labels(vec![]),
        ]);
        assert_eq!(page.questions.len(), 2);
        assert_eq!(page.max_index(), Some(2));
        assert_eq!(page.questions[&1].status, RowStatus::Ok);
        assert_eq!(page.questions[&2].status, RowStatus::Blank);
        assert_eq!(PageResult::default().max_index(), None);
    }

    #[test]
    fn answer_status_tracks_label_count() {
        let (a, s) = Answer::from_labels(vec![]);
        assert_eq!(a, Answer::None);
        assert_eq!(s, RowStatus::Blank);

        let (a, s) = Answer::from_labels(vec![OptionLabel::B]);
        assert_eq!(a, Answer::Single(OptionLabel::B));
        assert_eq!(s, RowStatus::Ok);

        let (a, s) = Answer::from_labels(vec![OptionLabel::A, OptionLabel::C]);
        assert_eq!(a, Answer::Multiple(vec![OptionLabel::A, OptionLabel::C]));
        assert_eq!(s, RowStatus::Multiple);
    }

    #[test]
    fn labels_expose_the_selected_set() {
        assert!(Answer::None.labels().is_empty());
        assert_eq!(Answer::Single(OptionLabel::B).labels(), &[OptionLabel::B]);
        assert_eq!(
            Answer::Multiple(vec![OptionLabel::A, OptionLabel::D]).labels(),
            &[OptionLabel::A, OptionLabel::D]
        );
    }

    #[test]
    fn answer_serializes_as_null_string_or_list() {
        let blank = QuestionResult::from_labels(vec![]);
        assert_eq!(
            serde_json::to_string(&blank).unwrap(),
            r#"{"answer":null,"status":"blank"}"#
        );

        let single = QuestionResult::from_labels(vec![OptionLabel::D]);
        assert_eq!(
            serde_json::to_string(&single).unwrap(),
            r#"{"answer":"D","status":"ok"}"#
        );

        let multi = QuestionResult::from_labels(vec![OptionLabel::A, OptionLabel::C]);
        assert_eq!(
            serde_json::to_string(&multi).unwrap(),
            r#"{"answer":["A","C"],"status":"multiple"}"#
        );
    }
}

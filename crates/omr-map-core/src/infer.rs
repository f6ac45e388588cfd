//! Per-row answer inference.
//!
//! The structure detector is authoritative for "a mark exists here"; the
//! glyph detector is authoritative for which column the mark covers. When
//! the glyph detector under-detects, column order is used as a fallback
//! signal, trading some precision for completeness.

use crate::rows::Row;
use crate::types::{OptionGlyph, OptionLabel, Provenance, QuestionResult};

/// Infer the verdict for one row.
///
/// Real labels are the selected glyphs overlapping any of the row's
/// circles, ordered by horizontal center (left-to-right = A..D column
/// order). If at least one real label was recovered but fewer than four,
/// virtual options are synthesized for the unmapped circles past the
/// recovered count, taking the next unused letter each. A row with marks
/// but no recovered label stays blank: position alone is no evidence of a
/// column, and answers are never fabricated without geometric evidence.
pub fn infer_row(row: &Row, glyphs: &[OptionGlyph]) -> QuestionResult {
    let mut recovered: Vec<&OptionGlyph> = glyphs
        .iter()
        .filter(|g| g.selected && row.circles.iter().any(|c| c.bbox.overlaps(&g.bbox)))
        .collect();
    recovered.sort_by(|a, b| a.bbox.center().x.total_cmp(&b.bbox.center().x));

    let mut options: Vec<OptionGlyph> = recovered.into_iter().copied().collect();

    if !options.is_empty() && options.len() < OptionLabel::SEQUENCE.len() {
        let used: Vec<OptionLabel> = options.iter().map(|g| g.label).collect();
        let mut unused = OptionLabel::SEQUENCE
            .into_iter()
            .filter(|label| !used.contains(label));

        for circle in row.circles_by_x().iter().skip(options.len()) {
            if circle.mapped {
                continue;
            }
            let Some(label) = unused.next() else {
                break;
            };
            options.push(OptionGlyph {
                bbox: circle.bbox,
                label,
                selected: true,
                provenance: Provenance::Synthesized,
            });
        }
    }

    let mut labels: Vec<OptionLabel> = options
        .iter()
        .filter(|g| g.selected)
        .map(|g| g.label)
        .collect();
    labels.sort();
    labels.dedup();

    QuestionResult::from_labels(labels)
}

/// Infer verdicts for every row, in row order.
pub fn infer_rows(rows: &[Row], glyphs: &[OptionGlyph]) -> Vec<QuestionResult> {
    rows.iter().map(|row| infer_row(row, glyphs)).collect()
}

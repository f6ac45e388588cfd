//! Association of mark circles with the option glyphs they cover.

use crate::params::MapParams;
use crate::types::{MarkCircle, OptionGlyph};

/// Match every circle to the glyph it most overlaps.
///
/// A match is accepted only when the overlap area exceeds
/// `min_overlap_ratio` of the glyph's own area, which rejects spurious
/// grazing contact with neighbouring glyphs. On acceptance the glyph's
/// `selected` flag and the circle's `mapped` flag are set together, here
/// and nowhere else. Ties on overlap area keep the first maximum, so the
/// outcome is deterministic for a fixed glyph order.
pub fn match_marks(glyphs: &mut [OptionGlyph], circles: &mut [MarkCircle], params: &MapParams) {
    for circle in circles.iter_mut() {
        let mut best: Option<(usize, f32)> = None;
        for (idx, glyph) in glyphs.iter().enumerate() {
            let overlap = circle.bbox.overlap_area(&glyph.bbox);
            match best {
                Some((_, best_overlap)) if overlap <= best_overlap => {}
                _ => best = Some((idx, overlap)),
            }
        }

        let Some((idx, overlap)) = best else {
            continue;
        };
        // Strict inequality: a degenerate glyph (zero area) never matches.
        if overlap > params.min_overlap_ratio * glyphs[idx].bbox.area() {
            glyphs[idx].selected = true;
            circle.mapped = true;
        }
    }
}

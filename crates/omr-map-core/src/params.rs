use serde::{Deserialize, Serialize};

/// Tunable parameters of the mapping engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapParams {
    /// A mark is accepted for a glyph only when their overlap area exceeds
    /// this fraction of the glyph's own box area.
    #[serde(default = "default_min_overlap_ratio")]
    pub min_overlap_ratio: f32,
    /// Row threshold = mean circle height × this factor.
    #[serde(default = "default_row_gap_factor")]
    pub row_gap_factor: f32,
    /// Fallback circle height when a page has no circles at all.
    #[serde(default = "default_circle_height")]
    pub default_circle_height: f32,
}

fn default_min_overlap_ratio() -> f32 {
    0.10
}

fn default_row_gap_factor() -> f32 {
    1.4
}

fn default_circle_height() -> f32 {
    80.0
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            min_overlap_ratio: default_min_overlap_ratio(),
            row_gap_factor: default_row_gap_factor(),
            default_circle_height: default_circle_height(),
        }
    }
}

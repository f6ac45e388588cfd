//! Cross-page renumbering of per-page verdicts.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{PageResult, QuestionResult};

/// All pages' verdicts under a single global numbering, plus the indices
/// (0-based, input order) of pages that produced no rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalResult {
    /// Global question index → verdict. Serializes as a string-keyed
    /// object in ascending numeric order.
    pub questions: BTreeMap<u32, QuestionResult>,
    /// Pages that contributed nothing. Surfaced for diagnostics; an empty
    /// page is a valid outcome, not an error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub empty_pages: Vec<usize>,
}

impl GlobalResult {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Accumulates page results into a global numbering.
///
/// The offset added to a page's local indices is the maximum local index
/// observed on the pages before it, not their row count, so a page whose
/// last row went undetected does not renumber later questions backward.
#[derive(Debug, Default)]
pub struct Aggregator {
    offset: u32,
    pages_seen: usize,
    result: GlobalResult,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one page in. Pages must be pushed in submission order.
    pub fn push_page(&mut self, page: &PageResult) {
        let page_index = self.pages_seen;
        self.pages_seen += 1;

        let Some(page_max) = page.max_index() else {
            warn!("page {page_index} produced no rows; global offset stays at {}", self.offset);
            self.result.empty_pages.push(page_index);
            return;
        };

        for (local, question) in &page.questions {
            self.result
                .questions
                .insert(self.offset + local, question.clone());
        }
        self.offset += page_max;
    }

    pub fn finish(self) -> GlobalResult {
        self.result
    }
}

/// Aggregate already-mapped pages, in input order.
pub fn aggregate_pages(pages: &[PageResult]) -> GlobalResult {
    let mut agg = Aggregator::new();
    for page in pages {
        agg.push_page(page);
    }
    agg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionLabel, PageResult, QuestionResult};

    fn page_with(n: usize) -> PageResult {
        PageResult::from_row_results(
            (0..n)
                .map(|_| QuestionResult::from_labels(vec![OptionLabel::A]))
                .collect(),
        )
    }

    #[test]
    fn offsets_use_previous_page_max_index() {
        let global = aggregate_pages(&[page_with(3), page_with(2)]);
        let keys: Vec<u32> = global.questions.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        assert!(global.empty_pages.is_empty());
    }

    #[test]
    fn empty_first_page_leaves_offset_untouched() {
        let global = aggregate_pages(&[page_with(0), page_with(1)]);
        let keys: Vec<u32> = global.questions.keys().copied().collect();
        assert_eq!(keys, vec![1]);
        assert_eq!(global.empty_pages, vec![0]);
    }

    #[test]
    fn numbering_is_monotonic_across_many_pages() {
        let global = aggregate_pages(&[page_with(2), page_with(0), page_with(4), page_with(1)]);
        let keys: Vec<u32> = global.questions.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(global.empty_pages, vec![1]);
    }

    #[test]
    fn serializes_with_string_keys_in_numeric_order() {
        let global = aggregate_pages(&[page_with(2)]);
        let json = serde_json::to_string(&global).unwrap();
        assert_eq!(
            json,
            r#"{"questions":{"1":{"answer":"A","status":"ok"},"2":{"answer":"A","status":"ok"}}}"#
        );
    }
}

//! Plain-text rendering of the global result for the grading stage.

use std::fmt::Write;

use crate::aggregate::GlobalResult;
use crate::types::{Answer, RowStatus};

/// Render one line per global question, in ascending numeric order:
/// `Q{n}: {answer} [{status}]`. Multiple answers are comma-joined; a blank
/// question prints `?`. An empty result renders as an empty string — the
/// grading stage reads that as "no multiple-choice section detected".
pub fn format_report(global: &GlobalResult) -> String {
    let mut out = String::new();
    for (index, question) in &global.questions {
        let _ = writeln!(
            out,
            "Q{index}: {} [{}]",
            format_answer(&question.answer),
            status_tag(question.status)
        );
    }
    out
}

fn format_answer(answer: &Answer) -> String {
    let labels = answer.labels();
    if labels.is_empty() {
        return "?".to_string();
    }
    labels
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_tag(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Ok => "ok",
        RowStatus::Blank => "blank",
        RowStatus::Multiple => "multiple",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionLabel, QuestionResult};

    fn global_with(entries: Vec<(u32, Vec<OptionLabel>)>) -> GlobalResult {
        GlobalResult {
            questions: entries
                .into_iter()
                .map(|(k, labels)| (k, QuestionResult::from_labels(labels)))
                .collect(),
            empty_pages: Vec::new(),
        }
    }

    #[test]
    fn orders_keys_numerically_not_lexically() {
        let global = global_with(vec![
            (10, vec![OptionLabel::B]),
            (2, vec![OptionLabel::A]),
            (1, vec![OptionLabel::C]),
        ]);
        let report = format_report(&global);
        assert_eq!(report, "Q1: C [ok]\nQ2: A [ok]\nQ10: B [ok]\n");
    }

    #[test]
    fn renders_blank_and_multiple() {
        let global = global_with(vec![
            (1, vec![]),
            (2, vec![OptionLabel::A, OptionLabel::C]),
        ]);
        let report = format_report(&global);
        assert_eq!(report, "Q1: ? [blank]\nQ2: A, C [multiple]\n");
    }

    #[test]
    fn empty_result_renders_empty_report() {
        assert_eq!(format_report(&GlobalResult::default()), "");
    }
}

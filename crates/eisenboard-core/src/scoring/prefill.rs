//! Rebuild questionnaire answers from persisted flags.
//!
//! Only `is_important` / `is_urgent` survive persistence, so reopening a task
//! synthesizes answers for the first few questions of each category and lets
//! the scorer re-derive a consistent evaluation from them.

use super::aggregate::AnswerMap;
use super::evaluate::QuestionCounts;
use super::policy::PrefillMode;

/// Synthesized answer maps for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefilledAnswers {
    pub importance: AnswerMap,
    pub urgency: AnswerMap,
}

/// Fill questions `1..=min(per_category, len)` of each category.
///
/// Importance answers copy `is_important`. Urgency answers copy `is_urgent`
/// under [`PrefillMode::AsStored`], or its negation under
/// [`PrefillMode::InvertUrgency`].
pub fn prefill_answers(
    is_important: bool,
    is_urgent: bool,
    counts: QuestionCounts,
    per_category: usize,
    mode: PrefillMode,
) -> PrefilledAnswers {
    let urgency_answer = match mode {
        PrefillMode::AsStored => is_urgent,
        PrefillMode::InvertUrgency => !is_urgent,
    };

    PrefilledAnswers {
        importance: uniform(is_important, per_category.min(counts.importance)),
        urgency: uniform(urgency_answer, per_category.min(counts.urgency)),
    }
}

fn uniform(answer: bool, count: usize) -> AnswerMap {
    (1..=count as u32).map(|id| (id, answer)).collect()
}

//! Answer state of one task form.
//!
//! The create form and the edit form each own a [`Questionnaire`]; they never
//! share answers, so editing a task cannot disturb a creation in progress.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ValidationError;
use crate::questions::{QuestionCategory, QuestionSet};
use crate::scoring::{prefill_answers, AnswerMap, Scorer, Verdict};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Questionnaire {
    importance: AnswerMap,
    urgency: AnswerMap,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn importance(&self) -> &AnswerMap {
        &self.importance
    }

    pub fn urgency(&self) -> &AnswerMap {
        &self.urgency
    }

    pub fn answers(&self, category: QuestionCategory) -> &AnswerMap {
        match category {
            QuestionCategory::Importance => &self.importance,
            QuestionCategory::Urgency => &self.urgency,
        }
    }

    /// Record an answer to question `id` (1-based) of `category`.
    pub fn answer(
        &mut self,
        questions: &QuestionSet,
        category: QuestionCategory,
        id: u32,
        yes: bool,
    ) -> Result<(), ValidationError> {
        questions.check_id(category, id)?;
        match category {
            QuestionCategory::Importance => self.importance.set(id, yes),
            QuestionCategory::Urgency => self.urgency.set(id, yes),
        }
        Ok(())
    }

    /// Forget every answer. Called when the owning form closes or the
    /// question set changes.
    pub fn clear(&mut self) {
        self.importance.clear();
        self.urgency.clear();
    }

    pub fn evaluate(
        &self,
        scorer: &Scorer,
        questions: &QuestionSet,
        start_by: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Verdict {
        scorer.evaluate(
            &self.importance,
            &self.urgency,
            questions.counts(),
            start_by,
            now,
        )
    }

    /// Replace all answers with ones synthesized from stored flags, then
    /// score them.
    pub fn prefill_from_flags(
        &mut self,
        scorer: &Scorer,
        questions: &QuestionSet,
        is_important: bool,
        is_urgent: bool,
        start_by: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Verdict {
        let policy = scorer.policy();
        let filled = prefill_answers(
            is_important,
            is_urgent,
            questions.counts(),
            policy.min_answers,
            policy.prefill,
        );
        self.importance = filled.importance;
        self.urgency = filled.urgency;
        self.evaluate(scorer, questions, start_by, now)
    }

    /// Whether the form may be submitted: a non-blank title, at least
    /// `min(3, len)` answers per category and a decided evaluation.
    pub fn can_submit(
        &self,
        title: &str,
        scorer: &Scorer,
        questions: &QuestionSet,
        start_by: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> bool {
        let min = scorer.policy().min_answers;
        let enough = |category: QuestionCategory| {
            self.answers(category).len() >= min.min(questions.len(category))
        };

        !title.trim().is_empty()
            && enough(QuestionCategory::Importance)
            && enough(QuestionCategory::Urgency)
            && self.evaluate(scorer, questions, start_by, now).is_decided()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{PrefillMode, Quadrant, ScoringPolicy};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 15, 0, 0).unwrap()
    }

    fn answer_all(
        form: &mut Questionnaire,
        questions: &QuestionSet,
        category: QuestionCategory,
        yes: bool,
    ) {
        for id in 1..=3 {
            form.answer(questions, category, id, yes).unwrap();
        }
    }

    #[test]
    fn rejects_ids_outside_the_question_set() {
        let questions = QuestionSet::default();
        let mut form = Questionnaire::new();
        assert!(form.answer(&questions, QuestionCategory::Importance, 0, true).is_err());
        assert!(form.answer(&questions, QuestionCategory::Urgency, 6, true).is_err());
        assert!(form.importance().is_empty());
    }

    #[test]
    fn create_and_edit_forms_are_isolated() {
        let questions = QuestionSet::default();
        let scorer = Scorer::new();
        let mut create = Questionnaire::new();
        let mut edit = Questionnaire::new();

        answer_all(&mut create, &questions, QuestionCategory::Importance, true);
        answer_all(&mut create, &questions, QuestionCategory::Urgency, false);
        edit.prefill_from_flags(&scorer, &questions, false, true, None, now());
        edit.clear();

        assert_eq!(create.importance().yes_count(), 3);
        let verdict = create.evaluate(&scorer, &questions, None, now());
        assert_eq!(
            verdict.evaluation().unwrap().quadrant,
            Quadrant::ImportantNotUrgent
        );
        assert!(edit.importance().is_empty());
        assert!(!edit.evaluate(&scorer, &questions, None, now()).is_decided());
    }

    #[test]
    fn submit_needs_title_and_answers() {
        let questions = QuestionSet::default();
        let scorer = Scorer::new();
        let mut form = Questionnaire::new();
        answer_all(&mut form, &questions, QuestionCategory::Importance, true);
        assert!(!form.can_submit("Write report", &scorer, &questions, None, now()));

        answer_all(&mut form, &questions, QuestionCategory::Urgency, true);
        assert!(form.can_submit("Write report", &scorer, &questions, None, now()));
        assert!(!form.can_submit("   ", &scorer, &questions, None, now()));

        form.clear();
        assert!(!form.can_submit("Write report", &scorer, &questions, None, now()));
    }

    #[test]
    fn prefill_rescoring_follows_policy_mode() {
        let questions = QuestionSet::default();
        let start_by = Some(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());

        let mut form = Questionnaire::new();
        let as_stored =
            form.prefill_from_flags(&Scorer::new(), &questions, true, true, start_by, now());
        // 0.6 * 0.9 + 0.4 * 0.0
        let eval = as_stored.evaluation().unwrap();
        assert!((eval.urgency_score - 0.54).abs() < 1e-12);
        assert_eq!(eval.quadrant, Quadrant::ImportantNotUrgent);

        let inverting = Scorer::with_policy(ScoringPolicy {
            prefill: PrefillMode::InvertUrgency,
            ..ScoringPolicy::default()
        });
        let inverted = form.prefill_from_flags(&inverting, &questions, true, true, start_by, now());
        let eval = inverted.evaluation().unwrap();
        assert!((eval.urgency_score - 0.94).abs() < 1e-12);
        assert_eq!(eval.quadrant, Quadrant::UrgentImportant);
    }
}

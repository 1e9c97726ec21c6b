//! Evaluation pipeline: answers + start-by date -> quadrant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate, AnswerMap};
use super::decay::{time_urgency, UrgencyLabel};
use super::policy::ScoringPolicy;
use super::quadrant::{classify, Quadrant};

/// Sizes of the configured question categories.
///
/// The scorer only needs the lengths, never the question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounts {
    pub importance: usize,
    pub urgency: usize,
}

impl QuestionCounts {
    pub fn new(importance: usize, urgency: usize) -> Self {
        Self {
            importance,
            urgency,
        }
    }
}

/// Result of scoring one answered questionnaire.
///
/// Immutable: recomputation produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub importance_score: f64,
    pub question_urgency_score: f64,
    pub time_urgency_score: f64,
    /// Blended urgency.
    pub urgency_score: f64,
    pub is_important: bool,
    pub is_urgent: bool,
    pub quadrant: Quadrant,
}

impl Evaluation {
    /// Display label for the blended urgency.
    pub fn urgency_label(&self) -> UrgencyLabel {
        UrgencyLabel::from_score(self.urgency_score)
    }
}

/// Outcome of [`Scorer::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Decided(Evaluation),
    /// Not enough answers yet. Callers show nothing and keep submit disabled.
    Undecided,
}

impl Verdict {
    pub fn is_decided(&self) -> bool {
        matches!(self, Verdict::Decided(_))
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Verdict::Decided(evaluation) => Some(evaluation),
            Verdict::Undecided => None,
        }
    }

    pub fn into_evaluation(self) -> Option<Evaluation> {
        match self {
            Verdict::Decided(evaluation) => Some(evaluation),
            Verdict::Undecided => None,
        }
    }
}

/// Stateless scorer parameterized by a [`ScoringPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    policy: ScoringPolicy,
}

impl Scorer {
    /// Create a scorer with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom policy.
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score both answer maps against the start-by date.
    ///
    /// Returns [`Verdict::Undecided`] while either category has fewer answers
    /// than `min(min_answers, |importance|, |urgency|)`.
    pub fn evaluate(
        &self,
        importance: &AnswerMap,
        urgency: &AnswerMap,
        counts: QuestionCounts,
        start_by: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Verdict {
        let minimum = self
            .policy
            .required_answers(counts.importance, counts.urgency);

        let (Some(importance_score), Some(urgency_yes)) =
            (aggregate(importance, minimum), aggregate(urgency, minimum))
        else {
            return Verdict::Undecided;
        };

        // Urgency questions ask about flexibility: "yes" lowers urgency.
        let question_urgency_score = 1.0 - urgency_yes;
        let time_urgency_score = time_urgency(start_by, now);
        let urgency_score = self
            .policy
            .blend(time_urgency_score, question_urgency_score);

        let is_important = self.policy.is_important(importance_score);
        let is_urgent = self.policy.is_urgent(urgency_score);

        Verdict::Decided(Evaluation {
            importance_score,
            question_urgency_score,
            time_urgency_score,
            urgency_score,
            is_important,
            is_urgent,
            quadrant: classify(is_important, is_urgent),
        })
    }
}

/// Score with the default policy.
pub fn evaluate(
    importance: &AnswerMap,
    urgency: &AnswerMap,
    counts: QuestionCounts,
    start_by: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Verdict {
    Scorer::new().evaluate(importance, urgency, counts, start_by, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 14, 9, 30, 0).unwrap()
    }

    fn five() -> QuestionCounts {
        QuestionCounts::new(5, 5)
    }

    fn all(answer: bool) -> AnswerMap {
        AnswerMap::from([(1, answer), (2, answer), (3, answer)])
    }

    fn decided(verdict: Verdict) -> Evaluation {
        verdict.into_evaluation().expect("expected a decided verdict")
    }

    #[test]
    fn important_without_deadline_is_scheduled() {
        let eval = decided(evaluate(&all(true), &all(false), five(), None, now()));
        assert_eq!(eval.importance_score, 1.0);
        assert_eq!(eval.question_urgency_score, 1.0);
        assert_eq!(eval.time_urgency_score, 0.0);
        assert!((eval.urgency_score - 0.4).abs() < 1e-12);
        assert!(eval.is_important);
        assert!(!eval.is_urgent);
        assert_eq!(eval.quadrant, Quadrant::ImportantNotUrgent);
    }

    #[test]
    fn start_by_tomorrow_makes_it_urgent() {
        let start_by = (now() + Duration::days(1)).date_naive();
        let eval = decided(evaluate(&all(true), &all(false), five(), Some(start_by), now()));
        assert_eq!(eval.time_urgency_score, 0.9);
        assert!((eval.urgency_score - 0.94).abs() < 1e-12);
        assert!(eval.is_urgent);
        assert_eq!(eval.quadrant, Quadrant::UrgentImportant);
        assert_eq!(eval.urgency_label(), UrgencyLabel::Critical);
    }

    #[test]
    fn ten_days_out_scores_point_three() {
        let start_by = (now() + Duration::days(10)).date_naive();
        let eval = decided(evaluate(&all(false), &all(true), five(), Some(start_by), now()));
        assert_eq!(eval.time_urgency_score, 0.3);
        assert_eq!(eval.question_urgency_score, 0.0);
        assert_eq!(eval.quadrant, Quadrant::NotUrgentNotImportant);
    }

    #[test]
    fn too_few_answers_is_undecided_regardless_of_deadline() {
        let two = AnswerMap::from([(1, true), (2, true)]);
        let overdue = Some((now() - Duration::days(3)).date_naive());
        assert_eq!(
            evaluate(&two, &all(true), five(), overdue, now()),
            Verdict::Undecided
        );
        assert_eq!(
            evaluate(&all(true), &two, five(), None, now()),
            Verdict::Undecided
        );
        assert_eq!(
            evaluate(&AnswerMap::new(), &AnswerMap::new(), five(), None, now()),
            Verdict::Undecided
        );
    }

    #[test]
    fn minimum_shrinks_with_smaller_question_sets() {
        let two = AnswerMap::from([(1, true), (2, true)]);
        let verdict = evaluate(&two, &two, QuestionCounts::new(5, 2), None, now());
        assert!(verdict.is_decided());
    }

    #[test]
    fn importance_threshold_is_inclusive() {
        let importance =
            AnswerMap::from([(1, true), (2, true), (3, true), (4, false), (5, false)]);
        let eval = decided(evaluate(&importance, &all(false), five(), None, now()));
        assert_eq!(eval.importance_score, 0.6);
        assert!(eval.is_important);

        let importance = AnswerMap::from([(1, true), (2, false), (3, false)]);
        let eval = decided(evaluate(&importance, &all(false), five(), None, now()));
        assert!(!eval.is_important);
    }

    #[test]
    fn overdue_alone_reaches_urgency_threshold() {
        // 0.6 * 1.0 + 0.4 * 0.0 == 0.6 exactly.
        let overdue = Some((now() - Duration::days(2)).date_naive());
        let eval = decided(evaluate(&all(false), &all(true), five(), overdue, now()));
        assert_eq!(eval.urgency_score, 0.6);
        assert!(eval.is_urgent);
        assert_eq!(eval.quadrant, Quadrant::UrgentNotImportant);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let importance = AnswerMap::from([(1, true), (2, false), (3, true), (4, true)]);
        let urgency = AnswerMap::from([(1, false), (2, true), (3, false)]);
        let start_by = Some((now() + Duration::days(5)).date_naive());
        let a = decided(evaluate(&importance, &urgency, five(), start_by, now()));
        let b = decided(evaluate(&importance, &urgency, five(), start_by, now()));
        assert_eq!(a, b);
        assert_eq!(a.urgency_score.to_bits(), b.urgency_score.to_bits());
        assert_eq!(a.importance_score.to_bits(), b.importance_score.to_bits());
    }

    #[test]
    fn custom_policy_changes_blend() {
        let scorer = Scorer::with_policy(ScoringPolicy {
            time_weight: 0.0,
            question_weight: 1.0,
            ..ScoringPolicy::default()
        });
        let eval = decided(scorer.evaluate(&all(true), &all(false), five(), None, now()));
        assert_eq!(eval.urgency_score, 1.0);
        assert_eq!(eval.quadrant, Quadrant::UrgentImportant);
    }

    #[test]
    fn evaluation_serializes_camel_case() {
        let eval = decided(evaluate(&all(true), &all(false), five(), None, now()));
        let json = serde_json::to_value(eval).unwrap();
        assert_eq!(json["isImportant"], true);
        assert_eq!(json["quadrant"], "important-not-urgent");
        assert!(json.get("questionUrgencyScore").is_some());
    }
}

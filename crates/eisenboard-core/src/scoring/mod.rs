//! Prioritization scoring engine.
//!
//! Turns yes/no questionnaire answers and an optional start-by date into an
//! Eisenhower quadrant:
//!
//! ```text
//! importance = yes / answered                      (importance questions)
//! question_urgency = 1 - yes / answered            (urgency questions)
//! time_urgency = decay(days until start-by)
//! urgency = 0.6 * time_urgency + 0.4 * question_urgency
//! quadrant = classify(importance >= 0.6, urgency >= 0.6)
//! ```
//!
//! Everything here is a pure function of its arguments. Answer state belongs
//! to the caller (see [`crate::questionnaire::Questionnaire`]).

mod aggregate;
mod decay;
mod evaluate;
mod policy;
mod prefill;
mod quadrant;

pub use aggregate::{aggregate, AnswerMap};
pub use decay::{
    days_until, time_urgency, urgency_for_days, UrgencyLabel, DISTANT_URGENCY, OVERDUE_URGENCY,
};
pub use evaluate::{evaluate, Evaluation, QuestionCounts, Scorer, Verdict};
pub use policy::{PrefillMode, ScoringPolicy};
pub use prefill::{prefill_answers, PrefilledAnswers};
pub use quadrant::{classify, Quadrant};

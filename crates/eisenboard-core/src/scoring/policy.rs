//! Tunable weights and thresholds for the scorer.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How stored flags are turned back into urgency answers when a task is
/// reopened for editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefillMode {
    /// Copy the stored `is_urgent` flag into the urgency answers as-is.
    #[default]
    AsStored,
    /// Invert the flag, since a "yes" urgency answer means "flexible".
    InvertUrgency,
}

/// Weights and thresholds used by [`super::Scorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Share of the deadline-derived urgency in the blended urgency score.
    #[serde(default = "default_time_weight")]
    pub time_weight: f64,
    /// Share of the questionnaire urgency in the blended urgency score.
    #[serde(default = "default_question_weight")]
    pub question_weight: f64,
    /// Inclusive threshold on the importance score.
    #[serde(default = "default_threshold")]
    pub importance_threshold: f64,
    /// Inclusive threshold on the blended urgency score.
    #[serde(default = "default_threshold")]
    pub urgency_threshold: f64,
    /// Answers needed per category before a score exists
    /// (capped by the size of the smaller category).
    #[serde(default = "default_min_answers")]
    pub min_answers: usize,
    #[serde(default)]
    pub prefill: PrefillMode,
}

fn default_time_weight() -> f64 {
    0.6
}
fn default_question_weight() -> f64 {
    0.4
}
fn default_threshold() -> f64 {
    0.6
}
fn default_min_answers() -> usize {
    3
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            time_weight: default_time_weight(),
            question_weight: default_question_weight(),
            importance_threshold: default_threshold(),
            urgency_threshold: default_threshold(),
            min_answers: default_min_answers(),
            prefill: PrefillMode::default(),
        }
    }
}

impl ScoringPolicy {
    /// Blend time and question urgency. Time term first.
    pub fn blend(&self, time_urgency: f64, question_urgency: f64) -> f64 {
        time_urgency * self.time_weight + question_urgency * self.question_weight
    }

    pub fn is_important(&self, importance_score: f64) -> bool {
        importance_score >= self.importance_threshold
    }

    pub fn is_urgent(&self, urgency_score: f64) -> bool {
        urgency_score >= self.urgency_threshold
    }

    /// Minimum answers per category for a questionnaire of the given size.
    pub fn required_answers(&self, importance_questions: usize, urgency_questions: usize) -> usize {
        self.min_answers
            .min(importance_questions)
            .min(urgency_questions)
    }

    /// Check ranges: weights and thresholds in `[0, 1]`, weights summing
    /// to 1, at least one answer required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ranged = [
            ("time_weight", self.time_weight),
            ("question_weight", self.question_weight),
            ("importance_threshold", self.importance_threshold),
            ("urgency_threshold", self.urgency_threshold),
        ];
        for (field, value) in ranged {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: format!("must be in [0.0, 1.0], got {value}"),
                });
            }
        }

        let sum = self.time_weight + self.question_weight;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ValidationError::InvalidValue {
                field: "time_weight + question_weight".into(),
                message: format!("must sum to 1.0, got {sum}"),
            });
        }

        if self.min_answers == 0 {
            return Err(ValidationError::InvalidValue {
                field: "min_answers".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(())
    }
}

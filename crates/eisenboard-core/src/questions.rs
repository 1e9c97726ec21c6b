//! Configurable questionnaire content.
//!
//! Two ordered lists of yes/no questions. Importance questions are phrased so
//! that "yes" means important; urgency questions ask about schedule
//! flexibility, so "yes" means *less* urgent. Each category keeps at least
//! [`MIN_QUESTIONS`] entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::scoring::QuestionCounts;

/// Smallest allowed size of a question category.
pub const MIN_QUESTIONS: usize = 3;

/// Placeholder text for a freshly added question.
pub const NEW_QUESTION_TEXT: &str = "New question...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Importance,
    Urgency,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Importance => "importance",
            QuestionCategory::Urgency => "urgency",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "importance" => Ok(QuestionCategory::Importance),
            "urgency" => Ok(QuestionCategory::Urgency),
            other => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("expected 'importance' or 'urgency', got '{other}'"),
            }),
        }
    }
}

/// Importance and urgency questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(default = "default_importance")]
    pub importance: Vec<String>,
    #[serde(default = "default_urgency")]
    pub urgency: Vec<String>,
}

fn default_importance() -> Vec<String> {
    [
        "Does this task contribute directly to my main goals?",
        "Would skipping it entirely have significant negative consequences?",
        "Does it move me toward my long-term priorities?",
        "Does it have a significant positive impact on my work or life?",
        "Am I the best person to do it?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_urgency() -> Vec<String> {
    [
        "Can the start date easily be pushed back?",
        "Is the timing of this task flexible?",
        "Can it wait without consequences?",
        "Is the deadline negotiable with the people involved?",
        "Could I postpone starting it by a few days?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self {
            importance: default_importance(),
            urgency: default_urgency(),
        }
    }
}

impl QuestionSet {
    /// Build a set from raw lists. Entries are trimmed, blank ones dropped,
    /// and each category must keep at least [`MIN_QUESTIONS`] questions.
    pub fn new<I, U>(importance: I, urgency: U) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        U: IntoIterator,
        U::Item: AsRef<str>,
    {
        let set = Self {
            importance: clean(importance),
            urgency: clean(urgency),
        };
        set.validate()?;
        Ok(set)
    }

    pub fn questions(&self, category: QuestionCategory) -> &[String] {
        match category {
            QuestionCategory::Importance => &self.importance,
            QuestionCategory::Urgency => &self.urgency,
        }
    }

    fn questions_mut(&mut self, category: QuestionCategory) -> &mut Vec<String> {
        match category {
            QuestionCategory::Importance => &mut self.importance,
            QuestionCategory::Urgency => &mut self.urgency,
        }
    }

    pub fn len(&self, category: QuestionCategory) -> usize {
        self.questions(category).len()
    }

    /// Lengths handed to the scorer.
    pub fn counts(&self) -> QuestionCounts {
        QuestionCounts::new(self.importance.len(), self.urgency.len())
    }

    /// Question text by 1-based id.
    pub fn question(&self, category: QuestionCategory, id: u32) -> Option<&str> {
        let index = (id as usize).checked_sub(1)?;
        self.questions(category).get(index).map(String::as_str)
    }

    /// Append a question and return its id. Blank text gets the placeholder.
    pub fn add(&mut self, category: QuestionCategory, text: &str) -> u32 {
        let text = text.trim();
        let text = if text.is_empty() { NEW_QUESTION_TEXT } else { text };
        let questions = self.questions_mut(category);
        questions.push(text.to_string());
        questions.len() as u32
    }

    /// Remove the question with the given 1-based id.
    ///
    /// Refused when the category would drop below [`MIN_QUESTIONS`].
    pub fn remove(
        &mut self,
        category: QuestionCategory,
        id: u32,
    ) -> Result<String, ValidationError> {
        let len = self.len(category);
        let index = self.index_of(category, id)?;
        if len <= MIN_QUESTIONS {
            return Err(ValidationError::TooFewQuestions {
                category: category.to_string(),
                minimum: MIN_QUESTIONS,
                actual: len - 1,
            });
        }
        Ok(self.questions_mut(category).remove(index))
    }

    /// Replace the text of one question.
    pub fn rename(
        &mut self,
        category: QuestionCategory,
        id: u32,
        text: &str,
    ) -> Result<(), ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Blank("question".into()));
        }
        let index = self.index_of(category, id)?;
        self.questions_mut(category)[index] = text.to_string();
        Ok(())
    }

    /// Check that a 1-based id exists in the category.
    pub fn check_id(&self, category: QuestionCategory, id: u32) -> Result<(), ValidationError> {
        self.index_of(category, id).map(|_| ())
    }

    fn index_of(&self, category: QuestionCategory, id: u32) -> Result<usize, ValidationError> {
        let len = self.len(category);
        match (id as usize).checked_sub(1) {
            Some(index) if index < len => Ok(index),
            _ => Err(ValidationError::OutOfBounds {
                collection: format!("{category} questions"),
                index: id as usize,
                len,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for category in [QuestionCategory::Importance, QuestionCategory::Urgency] {
            let actual = self.len(category);
            if actual < MIN_QUESTIONS {
                return Err(ValidationError::TooFewQuestions {
                    category: category.to_string(),
                    minimum: MIN_QUESTIONS,
                    actual,
                });
            }
        }
        Ok(())
    }
}

fn clean<I>(raw: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    raw.into_iter()
        .map(|q| q.as_ref().trim().to_string())
        .filter(|q| !q.is_empty())
        .collect()
}

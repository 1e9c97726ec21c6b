//! Answer maps and their aggregation into fractions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Yes/no answers for one question category, keyed by 1-based question id.
///
/// Answering a question again replaces the earlier answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<u32, bool>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer (`true` = yes).
    pub fn set(&mut self, question_id: u32, yes: bool) {
        self.0.insert(question_id, yes);
    }

    pub fn get(&self, question_id: u32) -> Option<bool> {
        self.0.get(&question_id).copied()
    }

    /// Number of questions answered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of "yes" answers.
    pub fn yes_count(&self) -> usize {
        self.0.values().filter(|yes| **yes).count()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.0.iter().map(|(id, yes)| (*id, *yes))
    }
}

impl FromIterator<(u32, bool)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (u32, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(u32, bool); N]> for AnswerMap {
    fn from(entries: [(u32, bool); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Fraction of "yes" answers, or `None` while fewer than `minimum` answers
/// have been given.
///
/// An empty map is never computable, whatever the minimum.
pub fn aggregate(answers: &AnswerMap, minimum: usize) -> Option<f64> {
    let total = answers.len();
    if total == 0 || total < minimum {
        return None;
    }
    Some(answers.yes_count() as f64 / total as f64)
}

//! Eisenhower quadrant classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the four prioritization categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// Urgent and important: act on it now.
    UrgentImportant,
    /// Important, not urgent: schedule it.
    ImportantNotUrgent,
    /// Urgent, not important: delegate it.
    UrgentNotImportant,
    /// Neither: drop it.
    #[default]
    NotUrgentNotImportant,
}

/// Classify a pair of crisp flags. Total over all four inputs.
///
/// Also used on its own by the board to rank stored tasks.
pub fn classify(is_important: bool, is_urgent: bool) -> Quadrant {
    match (is_important, is_urgent) {
        (true, true) => Quadrant::UrgentImportant,
        (true, false) => Quadrant::ImportantNotUrgent,
        (false, true) => Quadrant::UrgentNotImportant,
        (false, false) => Quadrant::NotUrgentNotImportant,
    }
}

impl Quadrant {
    /// All quadrants, highest rank first.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::ImportantNotUrgent,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    /// Sort rank: 4 for urgent-important down to 1 for neither.
    pub fn rank(&self) -> u8 {
        match self {
            Quadrant::UrgentImportant => 4,
            Quadrant::ImportantNotUrgent => 3,
            Quadrant::UrgentNotImportant => 2,
            Quadrant::NotUrgentNotImportant => 1,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::ImportantNotUrgent => "important-not-urgent",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    /// Recommended action.
    pub fn action(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "do now",
            Quadrant::ImportantNotUrgent => "schedule",
            Quadrant::UrgentNotImportant => "delegate",
            Quadrant::NotUrgentNotImportant => "drop",
        }
    }

    /// Badge caption shown on task cards.
    pub fn badge_text(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "DO NOW",
            Quadrant::ImportantNotUrgent => "SCHEDULE",
            Quadrant::UrgentNotImportant => "DELEGATE",
            Quadrant::NotUrgentNotImportant => "DROP",
        }
    }

    pub fn badge_class(&self) -> String {
        format!("badge-{}", self.as_tag())
    }

    pub fn is_important(&self) -> bool {
        matches!(
            self,
            Quadrant::UrgentImportant | Quadrant::ImportantNotUrgent
        )
    }

    pub fn is_urgent(&self) -> bool {
        matches!(
            self,
            Quadrant::UrgentImportant | Quadrant::UrgentNotImportant
        )
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Quadrant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quadrant::ALL
            .into_iter()
            .find(|q| q.as_tag() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "quadrant".into(),
                message: format!("unknown quadrant '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_input() {
        assert_eq!(classify(true, true), Quadrant::UrgentImportant);
        assert_eq!(classify(true, false), Quadrant::ImportantNotUrgent);
        assert_eq!(classify(false, true), Quadrant::UrgentNotImportant);
        assert_eq!(classify(false, false), Quadrant::NotUrgentNotImportant);
    }

    #[test]
    fn flags_round_trip_through_quadrant() {
        for important in [true, false] {
            for urgent in [true, false] {
                let q = classify(important, urgent);
                assert_eq!(q.is_important(), important);
                assert_eq!(q.is_urgent(), urgent);
            }
        }
    }

    #[test]
    fn ranks_are_distinct_and_ordered() {
        let ranks: Vec<u8> = Quadrant::ALL.iter().map(Quadrant::rank).collect();
        assert_eq!(ranks, vec![4, 3, 2, 1]);
    }

    #[test]
    fn unevaluated_default_and_actions() {
        assert_eq!(Quadrant::default(), Quadrant::NotUrgentNotImportant);
        assert_eq!(Quadrant::UrgentImportant.action(), "do now");
        assert_eq!(Quadrant::NotUrgentNotImportant.action(), "drop");
    }

    #[test]
    fn tags_parse_back() {
        for q in Quadrant::ALL {
            assert_eq!(q.as_tag().parse::<Quadrant>().unwrap(), q);
        }
        assert!("urgent".parse::<Quadrant>().is_err());
    }

    #[test]
    fn serde_uses_kebab_tags() {
        let json = serde_json::to_string(&Quadrant::ImportantNotUrgent).unwrap();
        assert_eq!(json, "\"important-not-urgent\"");
        assert_eq!(
            Quadrant::UrgentImportant.badge_class(),
            "badge-urgent-important"
        );
    }
}

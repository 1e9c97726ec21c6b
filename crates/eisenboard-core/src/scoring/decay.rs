//! Deadline-based urgency decay.
//!
//! Time pressure is derived from the start-by date (the last day work can
//! begin and still meet the due date). The remaining time is measured in
//! whole days, rounded up, and mapped onto a fixed step function:
//!
//! | days until start-by | time urgency |
//! |---------------------|--------------|
//! | < 0 (passed)        | 1.0          |
//! | <= 1                | 0.9          |
//! | <= 3                | 0.7          |
//! | <= 7                | 0.5          |
//! | <= 14               | 0.3          |
//! | otherwise           | 0.1          |

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAY_MS: i64 = 86_400_000;

/// Score for a start-by date that already passed.
pub const OVERDUE_URGENCY: f64 = 1.0;

/// Score for a start-by date beyond the last band.
pub const DISTANT_URGENCY: f64 = 0.1;

/// Upper day bound (inclusive) and score of each band, nearest first.
const DECAY_BANDS: [(i64, f64); 4] = [(1, 0.9), (3, 0.7), (7, 0.5), (14, 0.3)];

/// Whole days from `now` until midnight (UTC) of `start_by`, rounded up.
///
/// A remainder of any size counts as a full day: 3.1 days is 4.
pub fn days_until(start_by: NaiveDate, now: DateTime<Utc>) -> i64 {
    let deadline = start_by.and_time(NaiveTime::MIN).and_utc();
    let diff_ms = (deadline - now).num_milliseconds();
    -((-diff_ms).div_euclid(DAY_MS))
}

/// Map a day count onto the decay bands.
pub fn urgency_for_days(diff_days: i64) -> f64 {
    if diff_days < 0 {
        return OVERDUE_URGENCY;
    }
    DECAY_BANDS
        .iter()
        .find(|(limit, _)| diff_days <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(DISTANT_URGENCY)
}

/// Time urgency in `[0, 1]` for an optional start-by date.
///
/// No date means no time pressure signal and scores 0.
pub fn time_urgency(start_by: Option<NaiveDate>, now: DateTime<Utc>) -> f64 {
    match start_by {
        Some(date) => urgency_for_days(days_until(date, now)),
        None => 0.0,
    }
}

/// Display label for a blended urgency score.
///
/// Used purely for presentation; classification uses the policy thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLabel {
    Critical,
    High,
    Medium,
    Low,
}

impl UrgencyLabel {
    /// `>= 0.8` critical, `>= 0.6` high, `>= 0.4` medium, else low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            UrgencyLabel::Critical
        } else if score >= 0.6 {
            UrgencyLabel::High
        } else if score >= 0.4 {
            UrgencyLabel::Medium
        } else {
            UrgencyLabel::Low
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            UrgencyLabel::Critical => "CRITICAL",
            UrgencyLabel::High => "HIGH",
            UrgencyLabel::Medium => "MEDIUM",
            UrgencyLabel::Low => "LOW",
        }
    }

    /// Style hook for renderers.
    pub fn style_tag(&self) -> &'static str {
        match self {
            UrgencyLabel::Critical => "urgency-critical",
            UrgencyLabel::High => "urgency-high",
            UrgencyLabel::Medium => "urgency-medium",
            UrgencyLabel::Low => "urgency-low",
        }
    }
}

impl fmt::Display for UrgencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    proptest! {
        /// Time urgency never increases as the start-by date moves away.
        #[test]
        fn time_urgency_is_non_increasing(
            offset in -60i64..60,
            step in 0i64..30,
            minute in 0i64..1440,
        ) {
            let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minute);
            let base = now.date_naive();
            let near = base + Duration::days(offset);
            let far = near + Duration::days(step);
            prop_assert!(
                time_urgency(Some(far), now) <= time_urgency(Some(near), now)
            );
        }

        /// Scores stay within the unit interval.
        #[test]
        fn time_urgency_in_unit_range(days in -1000i64..1000) {
            let score = urgency_for_days(days);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}

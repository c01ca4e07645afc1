use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse per-lesson mastery label derived from the most recent quiz score.
///
/// Used to tailor how the next lesson-content request is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    New,
    Struggling,
    Proficient,
    Mastered,
}

impl Proficiency {
    /// Map a quiz score to a proficiency label.
    ///
    /// Thresholds are strict: a fraction above 0.8 is `Mastered`, above 0.5
    /// is `Proficient`, everything else (including exactly 0.8 and 0.5) is
    /// `Struggling`/`Proficient` respectively. Integer arithmetic keeps the
    /// boundaries exact:
    /// `correct/total > 4/5  ⇔  5*correct > 4*total` and
    /// `correct/total > 1/2  ⇔  2*correct > total`.
    ///
    /// A zero-question quiz scores as `Struggling`.
    #[must_use]
    pub fn from_score(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self::Struggling;
        }
        if 5 * correct > 4 * total {
            Self::Mastered
        } else if 2 * correct > total {
            Self::Proficient
        } else {
            Self::Struggling
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Struggling => "struggling",
            Self::Proficient => "proficient",
            Self::Mastered => "mastered",
        };
        write!(f, "{s}")
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// How long a task has been open, as shown on its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    /// No creation time known
    New,
    Today,
    Days(i64),
}

/// Visual bucket for an [`Age`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeClass {
    Fresh,
    Aging,
    Stale,
}

impl Age {
    /// Whole days between `created_at` and `now`, in either direction.
    pub fn since(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(created) = created_at else {
            return Age::New;
        };
        let days = (now - created).num_days().abs();
        if days == 0 {
            Age::Today
        } else {
            Age::Days(days)
        }
    }

    pub fn class(&self) -> AgeClass {
        match self {
            Age::New | Age::Today => AgeClass::Fresh,
            Age::Days(d) if *d <= 3 => AgeClass::Fresh,
            Age::Days(d) if *d <= 7 => AgeClass::Aging,
            Age::Days(_) => AgeClass::Stale,
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::New => write!(f, "New"),
            Age::Today => write!(f, "Today"),
            Age::Days(1) => write!(f, "1 day"),
            Age::Days(n) => write!(f, "{} days", n),
        }
    }
}

impl AgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeClass::Fresh => "fresh",
            AgeClass::Aging => "aging",
            AgeClass::Stale => "stale",
        }
    }
}

impl fmt::Display for AgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

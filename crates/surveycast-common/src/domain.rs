//! Survey domains served by SurveyCast.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SurveyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Diabetes-risk health indicators survey.
    Health,
    /// Bank-marketing term deposit survey.
    Bank,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Health, Domain::Bank];

    /// URL path segment for this domain.
    pub fn slug(&self) -> &'static str {
        match self {
            Domain::Health => "health",
            Domain::Bank   => "bank",
        }
    }

    /// Page heading.
    pub fn title(&self) -> &'static str {
        match self {
            Domain::Health => "Health Survey to Check Your Sugar Level",
            Domain::Bank   => "Bank Term Deposit Survey",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Domain {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "health" => Ok(Domain::Health),
            "bank"   => Ok(Domain::Bank),
            other    => Err(SurveyError::UnknownDomain(other.to_string())),
        }
    }
}

use serde::Serialize;
use std::fmt;

/// Slack for float summation noise in a weighted composite.
const BOUNDARY_TOLERANCE: f64 = 1e-12;

/// Discrete risk tier derived from a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl AlertLevel {
    /// Map a composite score to its tier. Lower bounds are inclusive, within
    /// `BOUNDARY_TOLERANCE`; anything below 0.4 (including NaN) is `Low`.
    pub fn from_score(score: f64) -> Self {
        let reaches = |bound: f64| score >= bound - BOUNDARY_TOLERANCE;
        if reaches(0.8) {
            Self::Extreme
        } else if reaches(0.6) {
            Self::High
        } else if reaches(0.4) {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn risk_warning(&self) -> &'static str {
        match self {
            Self::Extreme => "EXTREME RISK - 90%+ failure rate, most likely pump & dump",
            Self::High => "HIGH RISK - Volatile, significant risk of loss",
            Self::Medium => "MEDIUM RISK - Elevated risk, do your research",
            Self::Low => "LOW RISK - Minor elevation above normal",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Extreme => write!(f, "EXTREME"),
        }
    }
}

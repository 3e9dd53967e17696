use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five ordered sentiment bins as emitted by the star-rating classifier
/// ("1 star" .. "5 stars").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
}

impl SentimentLabel {
    pub fn stars(&self) -> u8 {
        match self {
            Self::OneStar => 1,
            Self::TwoStars => 2,
            Self::ThreeStars => 3,
            Self::FourStars => 4,
            Self::FiveStars => 5,
        }
    }

    /// Top two bins count as bullish.
    pub fn is_bullish(&self) -> bool {
        self.stars() >= 4
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneStar => write!(f, "1 star"),
            other => write!(f, "{} stars", other.stars()),
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let digits = normalized
            .trim_end_matches("stars")
            .trim_end_matches("star")
            .trim();
        match digits {
            "1" => Ok(Self::OneStar),
            "2" => Ok(Self::TwoStars),
            "3" => Ok(Self::ThreeStars),
            "4" => Ok(Self::FourStars),
            "5" => Ok(Self::FiveStars),
            _ => Err(format!("Unknown sentiment label: {s}")),
        }
    }
}

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolClass {
    Crypto,
    Equity,
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crypto => write!(f, "crypto"),
            Self::Equity => write!(f, "equity"),
        }
    }
}

const MEME_STOCKS: &[&str] = &["GME", "AMC", "BBBY", "NOK", "BB", "PLTR", "WISH", "CLOV"];
const CRYPTO: &[&str] = &["BTC", "ETH", "DOGE", "SHIB", "ADA", "SOL", "MATIC", "AVAX"];
const POPULAR_STOCKS: &[&str] = &["TSLA", "AAPL", "NVDA", "MSFT", "GOOGL", "META", "AMZN", "NFLX"];
const RECENT_LISTINGS: &[&str] = &["RIVN", "LCID", "HOOD", "COIN", "RBLX", "SNOW", "ABNB", "BLSH"];

/// The fixed set of tracked ticker symbols.
///
/// Every symbol is uppercase ASCII, 2–5 letters. Iteration order is
/// alphabetical so detection runs are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    symbols: BTreeMap<String, SymbolClass>,
}

impl Watchlist {
    pub fn new<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, SymbolClass)>,
        S: Into<String>,
    {
        let mut symbols = BTreeMap::new();
        for (symbol, class) in entries {
            let symbol = symbol.into();
            validate_symbol(&symbol)?;
            symbols.insert(symbol, class);
        }
        Ok(Self { symbols })
    }

    /// Build from bare symbols; known crypto tickers keep their crypto class,
    /// everything else is treated as an equity.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(symbols.into_iter().map(|s| {
            let symbol = s.as_ref().trim().to_string();
            let class = if CRYPTO.contains(&symbol.as_str()) {
                SymbolClass::Crypto
            } else {
                SymbolClass::Equity
            };
            (symbol, class)
        }))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, SymbolClass)> {
        self.symbols.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        let symbols = MEME_STOCKS
            .iter()
            .chain(POPULAR_STOCKS)
            .chain(RECENT_LISTINGS)
            .map(|s| (s.to_string(), SymbolClass::Equity))
            .chain(CRYPTO.iter().map(|s| (s.to_string(), SymbolClass::Crypto)))
            .collect();
        Self { symbols }
    }
}

fn validate_symbol(symbol: &str) -> Result<(), DomainError> {
    let len_ok = (2..=5).contains(&symbol.len());
    if !len_ok || !symbol.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::InvalidInput(format!(
            "Watch-list symbols must be 2-5 uppercase letters, got '{symbol}'"
        )));
    }
    Ok(())
}

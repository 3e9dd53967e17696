//! Symbol extraction from free text.
//!
//! Candidate tokens are maximal runs of word characters (letters, digits,
//! `_`) in the uppercased text that consist of 2–5 ASCII letters. That covers
//! both `$GME` and bare `GME`. Ordinary words such as `THE` are candidates
//! too; the watch-list lookup is what filters them out.

use std::collections::{BTreeSet, HashSet};

use crate::domain::entities::mention_record::MentionRecord;
use crate::domain::values::watchlist::Watchlist;

pub struct SymbolExtractor {
    symbols: HashSet<String>,
}

impl SymbolExtractor {
    pub fn new(watchlist: &Watchlist) -> Self {
        Self {
            symbols: watchlist.symbols().map(String::from).collect(),
        }
    }

    /// Watch-list symbols appearing in `text`, in alphabetical order.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let upper = text.to_uppercase();
        let mut found = BTreeSet::new();
        for token in upper.split(|c: char| !is_word_char(c)) {
            if is_candidate(token) && self.symbols.contains(token) {
                found.insert(token.to_string());
            }
        }
        found
    }

    /// Scan every record once and attach its matched symbols.
    pub fn tag<'a>(&self, records: &'a [MentionRecord]) -> Vec<TaggedRecord<'a>> {
        records
            .iter()
            .map(|record| TaggedRecord {
                record,
                symbols: self.extract(&record.searchable_text()),
            })
            .collect()
    }
}

/// A record paired with the watch-list symbols it mentions.
#[derive(Debug, Clone)]
pub struct TaggedRecord<'a> {
    pub record: &'a MentionRecord,
    pub symbols: BTreeSet<String>,
}

impl TaggedRecord<'_> {
    pub fn mentions(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_candidate(token: &str) -> bool {
    (2..=5).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_uppercase())
}

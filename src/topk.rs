//! Top-k partners per term, flattened into one ranking
//!
//! Each term keeps its `k` strongest partners, so a pair usually shows up twice: once anchored
//! at each member. That is intended; the ranking is "best associations per term", not a
//! deduplicated global top-k.
//!
//! Ties are broken by term, never by hash order: partners ascending within a term, anchors
//! ascending across terms, then a stable sort on count. Reruns give identical output.
use std::cmp::Reverse;
use cooccur::CooccurrenceTable;
use errors::*;
use farm::{FarmMap, new_farm};
use tokenize::Term;

/// Partners kept per term unless told otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// One (anchor, partner, count) row of the ranking
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankedPair {
    pub term: Term,
    pub other: Term,
    pub count: u64,
}

impl RankedPair {
    pub fn new<A: Into<Term>, B: Into<Term>>(term: A, other: B, count: u64) -> Self {
        RankedPair { term: term.into(), other: other.into(), count }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.term == term || self.other == term
    }
}

/// Every term's partners, unsorted
fn partners(table: &CooccurrenceTable) -> FarmMap<&str, Vec<(&str, u64)>> {
    let mut by_term: FarmMap<&str, Vec<(&str, u64)>> = new_farm();
    for (key, count) in table.iter() {
        by_term.entry(key.low()).or_insert_with(Vec::new).push((key.high(), count));
        by_term.entry(key.high()).or_insert_with(Vec::new).push((key.low(), count));
    }
    by_term
}

/// One term's top-k list: strongest partners first, ties to the lower term
fn strongest(mut found: Vec<(&str, u64)>, k: usize) -> Vec<(&str, u64)> {
    found.sort_by_key(|&(other, count)| (Reverse(count), other));
    found.truncate(k);
    found
}

/// Rank the table: top `k` partners per term, then everything by count, highest first
pub fn extract(table: &CooccurrenceTable, k: usize) -> Result<Vec<RankedPair>> {
    if k == 0 {
        return Err(Error::InvalidArgument("top-k must be at least 1".into()));
    }
    let mut by_term = partners(table);
    let mut anchors: Vec<&str> = by_term.keys().cloned().collect();
    anchors.sort();

    let mut ranked = Vec::with_capacity(anchors.len() * k);
    for anchor in anchors {
        if let Some(found) = by_term.remove(&anchor) {
            ranked.extend(strongest(found, k).into_iter()
                .map(|(other, count)| RankedPair::new(anchor, other, count)));
        }
    }
    // stable, so equal counts keep anchor order
    ranked.sort_by_key(|pair| Reverse(pair.count));
    debug!("Ranked {} entries from {} pairs (k = {})", ranked.len(), table.len(), k);
    Ok(ranked)
}

/// Only the entries with `term` as either member, order kept
///
/// An empty term matches nothing. Use `Selection::All` to skip filtering.
pub fn filter_term(entries: &[RankedPair], term: &str) -> Vec<RankedPair> {
    if term.is_empty() {
        return vec![];
    }
    entries.iter().filter(|pair| pair.contains(term)).cloned().collect()
}

/// Which part of the ranking a run exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Term(Term),
}

impl Selection {
    /// No term (or an empty one) means everything
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(term) if !term.is_empty() => Selection::Term(term.to_owned()),
            _ => Selection::All,
        }
    }

    pub fn term(&self) -> Option<&str> {
        match *self {
            Selection::All => None,
            Selection::Term(ref term) => Some(term.as_str()),
        }
    }

    pub fn apply(&self, entries: Vec<RankedPair>) -> Vec<RankedPair> {
        match *self {
            Selection::All => entries,
            Selection::Term(ref term) => filter_term(&entries, term),
        }
    }
}

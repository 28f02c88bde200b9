//! Pairwise term co-occurrence counts
//!
//! Counts live in a single-level map keyed by the canonical (sorted) pair, so the table is the
//! upper triangle of a Term x Term matrix. Absent pairs read as zero; nothing is ever removed.
use rayon::prelude::*;
use std::cmp::Ordering;
use std::io::BufRead;
use documents::{DocumentStreamer, IngestStats};
use errors::*;
use farm::{FarmMap, new_farm};
use tokenize::{Term, Tokenizer};

/// Log a progress line this often while ingesting
const PROGRESS_EVERY: usize = 100000;

/// Two distinct terms, smaller first
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: Term,
    high: Term,
}

impl PairKey {
    /// Canonical key for two terms, or None for a self-pair
    pub fn new(a: &str, b: &str) -> Option<PairKey> {
        match a.cmp(b) {
            Ordering::Less => Some(PairKey { low: a.to_owned(), high: b.to_owned() }),
            Ordering::Greater => Some(PairKey { low: b.to_owned(), high: a.to_owned() }),
            Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> &str { &self.low }
    pub fn high(&self) -> &str { &self.high }

    pub fn contains(&self, term: &str) -> bool {
        self.low == term || self.high == term
    }

    /// The member that isn't `term`, if `term` is a member
    pub fn partner(&self, term: &str) -> Option<&str> {
        if self.low == term { Some(self.high.as_str()) }
        else if self.high == term { Some(self.low.as_str()) }
        else { None }
    }
}

/// Sparse symmetric counter of unordered term pairs
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceTable {
    counts: FarmMap<PairKey, u64>,
}

impl CooccurrenceTable {
    pub fn new() -> Self {
        CooccurrenceTable { counts: new_farm() }
    }

    /// Count every pair of positions holding distinct terms
    ///
    /// A term repeated in one document pairs once per position. O(n^2) in the document length.
    pub fn update<S: AsRef<str>>(&mut self, terms: &[S]) {
        for i in 0..terms.len() {
            for j in (i + 1)..terms.len() {
                if let Some(key) = PairKey::new(terms[i].as_ref(), terms[j].as_ref()) {
                    *self.counts.entry(key).or_insert(0) += 1;
                }
            }
        }
    }

    /// Count for two terms in either order; zero when they never met
    pub fn get(&self, a: &str, b: &str) -> u64 {
        PairKey::new(a, b)
            .and_then(|key| self.counts.get(&key).cloned())
            .unwrap_or(0)
    }

    /// Add another table into this one, pair by pair
    pub fn merge(&mut self, other: CooccurrenceTable) {
        if self.counts.len() < other.counts.len() {
            let mine = ::std::mem::replace(&mut self.counts, other.counts);
            return self.merge(CooccurrenceTable { counts: mine });
        }
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
    }

    /// Number of distinct pairs
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All (pair, count) cells, in no particular order
    pub fn iter(&self) -> impl Iterator<Item=(&PairKey, u64)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }
}

/// Read a whole tweet dump and count it, one document at a time
pub fn build_table<R, T>(reader: R, tokenizer: &T) -> Result<(CooccurrenceTable, IngestStats)>
    where R: BufRead, T: Tokenizer + ?Sized {
    let mut table = CooccurrenceTable::new();
    let mut docs = DocumentStreamer::new(reader);
    while let Some(doc) = docs.next() {
        let doc = doc?;
        let n = docs.stats().documents;
        if n % PROGRESS_EVERY == 0 {
            info!("Finished {} documents, this one is: {:?}",
                n, doc.text.chars().take(100).collect::<String>());
        }
        table.update(&tokenizer.terms(&doc.text));
    }
    let stats = docs.stats();
    info!("Read {} documents ({} lines skipped), {} distinct pairs",
        stats.documents, stats.skipped, table.len());
    Ok((table, stats))
}

/// Same as `build_table`, but with per-worker tables summed at the end
///
/// The lines are read up front; only tokenizing and counting run in parallel.
pub fn build_table_parallel<R, T>(reader: R, tokenizer: &T)
    -> Result<(CooccurrenceTable, IngestStats)>
    where R: BufRead, T: Tokenizer + ?Sized {
    let lines = reader.split(b'\n').collect::<::std::io::Result<Vec<Vec<u8>>>>()?;
    let texts: Vec<Option<String>> = lines.par_iter()
        .map(|line| ::documents::record_text(line))
        .collect();
    let stats = IngestStats {
        documents: texts.iter().filter(|t| t.is_some()).count(),
        skipped: texts.iter().filter(|t| t.is_none()).count(),
    };
    let table = texts.par_iter()
        .filter_map(|text| text.as_ref())
        .fold(CooccurrenceTable::new, |mut table, text| {
            table.update(&tokenizer.terms(text));
            table
        })
        .reduce(CooccurrenceTable::new, |mut left, right| {
            left.merge(right);
            left
        });
    info!("Read {} documents ({} lines skipped) on {} threads, {} distinct pairs",
        stats.documents, stats.skipped, ::rayon::current_num_threads(), table.len());
    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokenize::TweetTokenizer;

    fn table_of(docs: &[&[&str]]) -> CooccurrenceTable {
        let mut table = CooccurrenceTable::new();
        for doc in docs {
            table.update(*doc);
        }
        table
    }

    #[test]
    fn pair_key_is_canonical() {
        assert_eq!(PairKey::new("b", "a"), PairKey::new("a", "b"));
        assert_eq!(PairKey::new("a", "a"), None);
        let key = PairKey::new("zebra", "apple").unwrap();
        assert_eq!((key.low(), key.high()), ("apple", "zebra"));
        assert_eq!(key.partner("zebra"), Some("apple"));
        assert_eq!(key.partner("mango"), None);
    }

    #[test]
    fn counts_small_corpus() {
        let table = table_of(&[&["a", "b", "c"], &["a", "b"], &["b", "c"]]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("a", "b"), 2);
        assert_eq!(table.get("a", "c"), 1);
        assert_eq!(table.get("c", "b"), 2);
        assert_eq!(table.get("a", "zzz"), 0);
    }

    #[test]
    fn symmetric_in_encounter_order() {
        let forward = table_of(&[&["x", "y"]]);
        let backward = table_of(&[&["y", "x"]]);
        assert_eq!(forward.get("x", "y"), backward.get("x", "y"));
        assert_eq!(forward.get("y", "x"), 1);
    }

    #[test]
    fn repeated_terms_count_per_position_but_never_self() {
        let table = table_of(&[&["a", "a", "b"]]);
        assert_eq!(table.get("a", "b"), 2);
        assert_eq!(table.get("a", "a"), 0);
        assert!(table.iter().all(|(key, _)| key.low() != key.high()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_and_single_term_documents_are_no_ops() {
        let empty: &[&str] = &[];
        let table = table_of(&[empty, &["lonely"]]);
        assert!(table.is_empty());
    }

    #[test]
    fn merge_sums_counts() {
        let mut left = table_of(&[&["a", "b"]]);
        let right = table_of(&[&["a", "b", "c"], &["c", "d"]]);
        left.merge(right);
        assert_eq!(left.get("a", "b"), 2);
        assert_eq!(left.get("b", "c"), 1);
        assert_eq!(left.get("c", "d"), 1);
        assert_eq!(left.len(), 4);
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let mut input = String::new();
        for i in 0..500 {
            input.push_str(&format!(
                "{{\"text\": \"goal germany france match{} referee\"}}\nnot json\n", i % 7));
        }
        let tok = TweetTokenizer::new();
        let (seq, seq_stats) = build_table(Cursor::new(input.clone()), &tok).unwrap();
        let (par, par_stats) = build_table_parallel(Cursor::new(input), &tok).unwrap();
        assert_eq!(seq_stats, par_stats);
        assert_eq!(seq_stats.documents, 500);
        assert_eq!(seq.len(), par.len());
        for (key, count) in seq.iter() {
            assert_eq!(par.get(key.low(), key.high()), count);
        }
        assert_eq!(seq.get("germany", "france"), 500);
    }

    #[test]
    fn invalid_utf8_lines_are_skipped_on_both_paths() {
        let input: &[u8] = b"{\"text\": \"germany france\"}\n\
            {\"text\": \"germany \xff\xfe france\"}\n\
            {\"text\": \"france germany\"}\n";
        let tok = TweetTokenizer::new();
        let (seq, seq_stats) = build_table(input, &tok).unwrap();
        let (par, par_stats) = build_table_parallel(input, &tok).unwrap();
        assert_eq!(seq_stats, IngestStats { documents: 2, skipped: 1 });
        assert_eq!(par_stats, seq_stats);
        assert_eq!(seq.get("germany", "france"), 2);
        assert_eq!(par.get("germany", "france"), 2);
    }
}

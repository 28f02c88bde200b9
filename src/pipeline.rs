//! One batch run: read, count, rank, select, export
//!
//! The table is built, ranked and dropped before anything is written, so an input error never
//! leaves partial exports.
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};
use cooccur::{build_table, build_table_parallel};
use documents::{self, IngestStats};
use errors::*;
use export;
use tokenize::Tokenizer;
use topk::{self, RankedPair, Selection, DEFAULT_TOP_K};

pub const DEFAULT_INPUT: &str = "data/stream_.jsonl";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Where to read, where to write, and how hard to work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub data_dir: PathBuf,
    pub top_k: usize,
    pub threads: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from(DEFAULT_INPUT),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            top_k: DEFAULT_TOP_K,
            threads: 1,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidArgument("top-k must be at least 1".into()));
        }
        if self.threads == 0 {
            return Err(Error::InvalidArgument("threads must be at least 1".into()));
        }
        Ok(())
    }

    /// `all_co_occurrences.csv`, or `<term>_co_occurrences.csv` for one term
    ///
    /// The term becomes part of a file name, so it may not name another directory.
    pub fn csv_path(&self, selection: &Selection) -> Result<PathBuf> {
        match selection.term() {
            None => Ok(self.data_dir.join("all_co_occurrences.csv")),
            Some(term) if term == "." || term == ".." || term.contains(|c: char| c == '/' || c == '\\') =>
                Err(Error::InvalidArgument(format!("{:?} can't be used in a file name", term))),
            Some(term) => Ok(self.data_dir.join(format!("{}_co_occurrences.csv", term))),
        }
    }

    pub fn graph_path(&self) -> PathBuf {
        self.data_dir.join("co_occurrence.graphml")
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct Report {
    pub stats: IngestStats,
    pub entries: Vec<RankedPair>,
    pub csv_path: PathBuf,
    pub graph_path: PathBuf,
}

/// Count the whole input and rank it
pub fn analyze<T>(settings: &Settings, tokenizer: &T) -> Result<(Vec<RankedPair>, IngestStats)>
    where T: Tokenizer + ?Sized {
    settings.validate()?;
    let reader = documents::open(&settings.input)?;
    let (table, stats) = if settings.threads > 1 {
        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build()
            .map_err(|err| Error::Other(format!("Could not start worker threads: {}", err)))?;
        pool.install(|| build_table_parallel(reader, tokenizer))?
    } else {
        build_table(reader, tokenizer)?
    };
    let entries = topk::extract(&table, settings.top_k)?;
    Ok((entries, stats))
}

/// Analyze, narrow to the selection, then write the CSV and the graph
pub fn run<T>(settings: &Settings, selection: &Selection, tokenizer: &T) -> Result<Report>
    where T: Tokenizer + ?Sized {
    let csv_path = settings.csv_path(selection)?;
    let (entries, stats) = analyze(settings, tokenizer)?;
    let entries = selection.apply(entries);
    match selection.term() {
        Some(term) => info!("{} entries mention {:?}", entries.len(), term),
        None => info!("Exporting all {} entries", entries.len()),
    }

    let graph_path = settings.graph_path();
    let csv = export::render_csv(selection, &entries);
    let graphml = export::render_graphml(&export::cooccurrence_graph(&entries));
    export::write_atomic(&csv_path, &csv)?;
    export::write_atomic(&graph_path, &graphml)?;

    Ok(Report { stats, entries, csv_path, graph_path })
}

/// Total terms in the input, and how many documents they came from
pub fn count_terms<T>(input: &Path, tokenizer: &T) -> Result<(usize, IngestStats)>
    where T: Tokenizer + ?Sized {
    let mut docs = documents::DocumentStreamer::new(documents::open(input)?);
    let mut terms = 0;
    while let Some(doc) = docs.next() {
        terms += tokenizer.terms(&doc?.text).len();
    }
    Ok((terms, docs.stats()))
}

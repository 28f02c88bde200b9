//! Term co-occurrence statistics for line-delimited tweet dumps
//!
//! Documents are tokenized, every pair of distinct terms in a document is counted, and the
//! counts are ranked as each term's top-k partners. The ranking can be narrowed to one term and
//! exported as CSV or as a directed weighted GraphML graph.
//!
//! The binaries under `src/bin` are thin wrappers over `pipeline` and `cli`.


#[macro_use] extern crate clap;
#[macro_use] extern crate log;
extern crate farmhash;
extern crate petgraph;
extern crate rayon;
extern crate regex;
extern crate serde_json;
extern crate tempfile;
extern crate unicode_segmentation;
pub mod errors;
pub mod farm;
pub mod tokenize;
pub mod documents;
pub mod cooccur;
pub mod topk;
pub mod export;
pub mod pipeline;
pub mod cli;

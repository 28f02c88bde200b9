//! Rank term co-occurrences in a tweet dump
//!
//! With no term, every term's top partners are exported to `<data>/all_co_occurrences.csv`.
//! With a term, only the entries mentioning it go to `<data>/<term>_co_occurrences.csv`.
//! Either way the exported entries are also written as a directed graph to
//! `<data>/co_occurrence.graphml`.

// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate tweet_cooccur;

use std::env;
use tweet_cooccur::cli;
use tweet_cooccur::errors::*;
use tweet_cooccur::pipeline;
use tweet_cooccur::tokenize::TweetTokenizer;

pub fn main() {
    // Failures are reported, but the exit status stays 0
    if let Err(err) = inner_main() {
        error!("{}", err);
        eprintln!("Could not recover: {}", err);
    }
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let (settings, selection) = cli::parse(env::args_os())?;

    if selection.term().is_none() {
        println!("No term provided for analysis ...");
        println!("Going to analyze all the terms and their co-occurrences.");
        println!("Export file will contain all the tuples with their co-occurrence count.");
    }
    info!("Settings: {:?}, selection: {:?}", settings, selection);

    let report = pipeline::run(&settings, &selection, &TweetTokenizer::new())?;
    info!("Co-occurrences are exported at [{}]", report.csv_path.display());
    println!("Co-occurrence Graph is exported at [{}]", report.graph_path.display());
    Ok(())
}

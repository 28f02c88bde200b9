//! Count normalized terms in a tweet dump
//!
//! Prints the number of terms the tokenizer keeps across all well-formed records, followed by
//! the number of records. Handy for sizing a run before counting pairs.

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
    let input = cli::parse_token_count(env::args_os())?;

    let (term_count, stats) = pipeline::count_terms(&input, &TweetTokenizer::new())?;
    info!("{} lines were not usable records", stats.skipped);

    println!("{}", term_count);
    println!("{}", stats.documents);
    Ok(())
}

//! Command line for `tc-cooccur`
//!
//! Every parse failure comes back as `Error::InvalidArgument`, so the binary reports it the same
//! way as any other failure. Only `--help` and `--version` exit from in here.
use clap::{App, ArgMatches, ErrorKind};
use std::ffi::OsString;
use std::path::PathBuf;
use errors::*;
use pipeline::{Settings, DEFAULT_INPUT};
use topk::Selection;

fn app() -> App<'static, 'static> {
    app_from_crate!()
        .arg_from_usage("[term] 'only export pairs containing this term (no path separators)'")
        .arg_from_usage("-i, --input=[FILE] 'line-delimited JSON tweets (default data/stream_.jsonl)'")
        .arg_from_usage("-d, --data-dir=[DIR] 'where the CSV and graph go (default data)'")
        .arg_from_usage("-k, --top-k=[K] 'partners kept per term (default 5)'")
        .arg_from_usage("-j, --threads=[N] 'worker threads for counting (default 1)'")
}

fn invalid(err: ::clap::Error) -> Error {
    Error::InvalidArgument(err.message.trim().to_owned())
}

fn number(args: &ArgMatches, name: &str) -> Result<Option<usize>> {
    if !args.is_present(name) {
        return Ok(None);
    }
    value_t!(args, name, usize).map(Some).map_err(invalid)
}

fn matches<I, T>(app: App<'static, 'static>, argv: I) -> Result<ArgMatches<'static>>
    where I: IntoIterator<Item=T>, T: Into<OsString> + Clone {
    match app.get_matches_from_safe(argv) {
        Ok(args) => Ok(args),
        Err(err) => match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => err.exit(),
            _ => Err(invalid(err)),
        },
    }
}

/// Settings and selection for one run, checked before any work starts
pub fn parse<I, T>(argv: I) -> Result<(Settings, Selection)>
    where I: IntoIterator<Item=T>, T: Into<OsString> + Clone {
    let args = matches(app(), argv)?;

    let mut settings = Settings::default();
    if let Some(input) = args.value_of("input") {
        settings.input = PathBuf::from(input);
    }
    if let Some(dir) = args.value_of("data-dir") {
        settings.data_dir = PathBuf::from(dir);
    }
    if let Some(k) = number(&args, "top-k")? {
        settings.top_k = k;
    }
    if let Some(threads) = number(&args, "threads")? {
        settings.threads = threads;
    }
    settings.validate()?;

    let selection = Selection::from_arg(args.value_of("term"));
    settings.csv_path(&selection)?;
    Ok((settings, selection))
}

/// Input path for `tc-token-count`
pub fn parse_token_count<I, T>(argv: I) -> Result<PathBuf>
    where I: IntoIterator<Item=T>, T: Into<OsString> + Clone {
    let app = App::new("tc-token-count")
        .version(crate_version!())
        .about("Count the number of normalized terms in the input")
        .arg_from_usage("-i, --input=[FILE] 'line-delimited JSON tweets (default data/stream_.jsonl)'");
    let args = matches(app, argv)?;
    Ok(PathBuf::from(args.value_of("input").unwrap_or(DEFAULT_INPUT)))
}

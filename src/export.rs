//! CSV and GraphML output for a ranking
//!
//! Everything is rendered to memory first and each file is swapped in whole, so a failed run
//! leaves no half-written exports behind.
use petgraph::graphmap::DiGraphMap;
use std::cmp::Reverse;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use errors::*;
use topk::{RankedPair, Selection};

pub const CSV_HEADER: &str = "term,other-term,count";
pub const GRAPH_NAME: &str = "Co-occurrence Graph";

/// A directed graph over term labels, edge weight = count
pub type CooccurrenceGraph<'a> = DiGraphMap<&'a str, u64>;

/// CSV rows for a ranking
///
/// With a term selected, every row is turned to face it: `term` is the query and `other-term`
/// its partner. Otherwise the anchor order of each entry is kept. Rows are stably re-sorted by
/// count, highest first.
pub fn csv_rows<'a>(selection: &'a Selection, entries: &'a [RankedPair])
    -> Vec<(&'a str, &'a str, u64)> {
    let mut rows: Vec<(&str, &str, u64)> = entries.iter()
        .map(|pair| match selection.term() {
            Some(term) => {
                let other = if pair.term == term { &pair.other } else { &pair.term };
                (term, other.as_str(), pair.count)
            }
            None => (pair.term.as_str(), pair.other.as_str(), pair.count),
        })
        .collect();
    rows.sort_by_key(|&(_, _, count)| Reverse(count));
    rows
}

fn csv_field(field: &str) -> String {
    if field.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// The whole CSV document; just the header when there is nothing to export
pub fn render_csv(selection: &Selection, entries: &[RankedPair]) -> String {
    let mut out = String::with_capacity(32 * (entries.len() + 1));
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");
    for (term, other, count) in csv_rows(selection, entries) {
        // writing into a String can't fail
        let _ = write!(out, "{},{},{}\r\n", csv_field(term), csv_field(other), count);
    }
    out
}

/// One node per term, one edge per entry from `term` to `other`
///
/// The same ordered pair seen twice keeps the weight of the last one.
pub fn cooccurrence_graph<'a>(entries: &'a [RankedPair]) -> CooccurrenceGraph<'a> {
    let mut graph = DiGraphMap::with_capacity(entries.len(), entries.len());
    for pair in entries {
        if let Some(old) = graph.add_edge(pair.term.as_str(), pair.other.as_str(), pair.count) {
            if old != pair.count {
                debug!("Edge {} -> {} reweighted from {} to {}", pair.term, pair.other, old, pair.count);
            }
        }
    }
    graph
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// GraphML with a `label` on every node and a `weight` on every edge
pub fn render_graphml<'a>(graph: &CooccurrenceGraph<'a>) -> String {
    let mut out = String::new();
    let _ = write!(out,
        "<?xml version='1.0' encoding='utf-8'?>\n\
        <graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" \
        xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
        xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns \
        http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n\
        <key id=\"d2\" for=\"edge\" attr.name=\"weight\" attr.type=\"long\" />\n\
        <key id=\"d1\" for=\"node\" attr.name=\"label\" attr.type=\"string\" />\n\
        <key id=\"d0\" for=\"graph\" attr.name=\"name\" attr.type=\"string\" />\n\
        <graph edgedefault=\"directed\">\n\
        <data key=\"d0\">{}</data>\n", GRAPH_NAME);
    for node in graph.nodes() {
        let node = xml_escape(node);
        let _ = write!(out, "<node id=\"{0}\">\n<data key=\"d1\">{0}</data>\n</node>\n", node);
    }
    for (from, to, weight) in graph.all_edges() {
        let _ = write!(out,
            "<edge source=\"{}\" target=\"{}\">\n<data key=\"d2\">{}</data>\n</edge>\n",
            xml_escape(from), xml_escape(to), weight);
    }
    out.push_str("</graph></graphml>\n");
    out
}

/// Replace `path` with `contents` in one step, creating its directory if needed
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(&temp);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }
    temp.persist(path)?;
    info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

pub fn write_csv<P: AsRef<Path>>(path: P, selection: &Selection, entries: &[RankedPair])
    -> Result<()> {
    write_atomic(path, &render_csv(selection, entries))
}

pub fn write_graphml<P: AsRef<Path>>(path: P, entries: &[RankedPair]) -> Result<()> {
    write_atomic(path, &render_graphml(&cooccurrence_graph(entries)))
}

//! Line-delimited JSON tweet reader
//!
//! Every line that is a JSON object with a string `"text"` field is one document. Anything else
//! is counted and dropped; it never stops the run.
use serde_json::{self, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Split};
use std::str;
use std::path::Path;
use errors::*;

/// One well-formed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 1-based line number in the source
    pub line: usize,
    pub text: String,
}

/// What happened while reading a source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub documents: usize,
    pub skipped: usize,
}

/// Cheap shape check followed by a real parse
pub fn is_well_formed(line: &str) -> bool {
    document_text(line).is_some()
}

/// The `"text"` of a record, if the line is one
pub fn document_text(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || !line.starts_with('{') || !line.ends_with('}') {
        return None;
    }
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(mut record)) => match record.remove("text") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        },
        _ => None,
    }
}

/// Same as `document_text`, for a raw line; invalid UTF-8 is just another bad record
pub fn record_text(raw: &[u8]) -> Option<String> {
    str::from_utf8(raw).ok().and_then(document_text)
}

/// Open a tweet dump, naming the path if it isn't there
pub fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| Error::MissingFile("tweet dump", path.to_path_buf(), Some(err)))
}

/// Stream well-formed documents out of any reader
///
/// Read errors are passed through; malformed lines (bad UTF-8 included) are only counted.
pub struct DocumentStreamer<R> {
    lines: Split<R>,
    line_no: usize,
    stats: IngestStats,
}

impl<R: BufRead> DocumentStreamer<R> {
    pub fn new(reader: R) -> Self {
        DocumentStreamer {
            lines: reader.split(b'\n'),
            line_no: 0,
            stats: IngestStats::default(),
        }
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}

impl<R: BufRead> Iterator for DocumentStreamer<R> {
    type Item = io::Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            self.line_no += 1;
            match record_text(&line) {
                Some(text) => {
                    self.stats.documents += 1;
                    return Some(Ok(Document { line: self.line_no, text }));
                }
                None => {
                    if line.iter().any(|b| !b.is_ascii_whitespace()) {
                        debug!("Skipping malformed record on line {}", self.line_no);
                    }
                    self.stats.skipped += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn shape_check() {
        assert!(is_well_formed(r#"{"text": "hello world"}"#));
        assert!(is_well_formed(r#"  {"id": 1, "text": "padded"}  "#));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed(r#"["text"]"#));
        assert!(!is_well_formed(r#"{"id": 1}"#));
        assert!(!is_well_formed(r#"{"text": 42}"#));
        assert!(!is_well_formed(r#"{"text": "unterminated}"#));
        assert!(!is_well_formed("{not json}"));
    }

    #[test]
    fn extracts_text() {
        assert_eq!(document_text(r#"{"text": "a b", "lang": "en"}"#), Some("a b".to_string()));
    }

    #[test]
    fn streamer_skips_and_counts() {
        let input = "{\"text\": \"one\"}\n\ngarbage\n{\"limit\": 3}\n{\"text\": \"two\"}\n";
        let mut docs = DocumentStreamer::new(Cursor::new(input));
        let got: Vec<Document> = docs.by_ref().collect::<io::Result<_>>().unwrap();
        assert_eq!(got, vec![
            Document { line: 1, text: "one".into() },
            Document { line: 5, text: "two".into() },
        ]);
        assert_eq!(docs.stats(), IngestStats { documents: 2, skipped: 3 });
    }

    #[test]
    fn invalid_utf8_is_a_skipped_record() {
        assert_eq!(record_text(b"{\"text\": \"caf\xc3\"}"), None);
        assert_eq!(record_text(b"{\"text\": \"caf\xc3\xa9\"}\r"), Some("caf\u{e9}".to_string()));

        let input: &[u8] = b"{\"text\": \"one\"}\n{\"text\": \"bad \xff\xfe\"}\n{\"text\": \"two\"}";
        let mut docs = DocumentStreamer::new(input);
        let got: Vec<String> = docs.by_ref().map(|d| d.unwrap().text).collect();
        assert_eq!(got, vec!["one", "two"]);
        assert_eq!(docs.stats(), IngestStats { documents: 2, skipped: 1 });
    }

    #[test]
    fn open_reports_missing_file() {
        match open("definitely/not/here.jsonl") {
            Err(Error::MissingFile(_, path, Some(_))) =>
                assert_eq!(path, Path::new("definitely/not/here.jsonl")),
            other => panic!("expected MissingFile, got {:?}", other.map(|_| ())),
        }
    }
}

//! Streaming parser for the `/proc/<pid>/smaps` format.
//!
//! A smaps file is a sequence of mapping blocks. Each block starts with a
//! header line (`address perms offset dev inode [path]`), continues with
//! `Key: value unit` detail lines and ends with a `VmFlags:` line. The reader
//! walks the file once, line by line, and folds every block that passes the
//! optional name filter into an [`AggregateResult`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::{debug, trace};

use super::error::SmapsError;
use super::types::{AggregateResult, MappingRecord, ANONYMOUS};
use super::units::{parse_memory, PSS_PREFIX, RSS_PREFIX, SIZE_PREFIX, VM_FLAGS_PREFIX};

/// Token count of a header line without a path field.
const HEADER_TOKENS_ANONYMOUS: usize = 5;
/// Token count of a header line carrying a path field.
const HEADER_TOKENS_NAMED: usize = 6;

/// Parser position within the file.
enum State {
    /// Expecting the header line of the next mapping.
    Seeking,
    /// Inside a mapping block. `record` is `None` when the block is being
    /// skipped because the filter rejected it.
    InMapping {
        header: String,
        record: Option<MappingRecord>,
    },
}

/// Compiles a name filter. An empty or missing pattern means "no filter".
pub fn compile_filter(pattern: Option<&str>) -> Result<Option<Regex>, SmapsError> {
    match pattern {
        Some(p) if !p.is_empty() => Regex::new(p)
            .map(Some)
            .map_err(|source| SmapsError::InvalidFilter {
                pattern: p.to_string(),
                source,
            }),
        _ => Ok(None),
    }
}

/// Reads smaps content from `source`, keeping only mappings whose name
/// matches `filter`.
///
/// The filter is compiled before anything is read. Any format violation
/// aborts the whole read; partial results are never returned.
pub fn read_memory_map<R: BufRead>(
    source: R,
    filter: Option<&str>,
) -> Result<AggregateResult, SmapsError> {
    let filter = compile_filter(filter)?;
    read_with_filter(source, filter.as_ref())
}

/// Reads the smaps file at `path`. Failures to open or read the file are
/// reported as [`SmapsError::SourceUnavailable`].
pub fn read_memory_map_file(
    path: &Path,
    filter: Option<&str>,
) -> Result<AggregateResult, SmapsError> {
    let filter = compile_filter(filter)?;

    let file = File::open(path).map_err(|source| SmapsError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    read_with_filter(BufReader::new(file), filter.as_ref()).map_err(|e| match e {
        SmapsError::Io(source) => SmapsError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Runs the state machine with an already compiled filter.
pub fn read_with_filter<R: BufRead>(
    mut source: R,
    filter: Option<&Regex>,
) -> Result<AggregateResult, SmapsError> {
    let mut result = AggregateResult::default();
    let mut state = State::Seeking;
    let mut skipped = 0usize;
    let mut buf = Vec::new();

    while let Some(line) = next_line(&mut source, &mut buf)? {

        state = match state {
            State::Seeking => {
                let record = begin_mapping(&line, filter)?;
                State::InMapping {
                    header: line,
                    record,
                }
            }
            State::InMapping { header, mut record } => {
                if !scan_block_line(&line, record.as_mut())? {
                    State::InMapping { header, record }
                } else {
                    match record {
                        Some(record) => result
                            .push(record)
                            .ok_or(SmapsError::ValueOverflow { line: header })?,
                        None => {
                            trace!("Skipped mapping [{}]", header);
                            skipped += 1;
                        }
                    }
                    State::Seeking
                }
            }
        };
    }

    if let State::InMapping { header, .. } = state {
        return Err(SmapsError::IncompleteMapping { line: header });
    }

    debug!(
        "Parsed {} mappings ({} skipped): size={} rss={} pss={}",
        result.count(),
        skipped,
        result.total_size(),
        result.total_rss(),
        result.total_pss()
    );

    Ok(result)
}

/// Reads the next line without its line ending. Paths in smaps may hold
/// bytes that are not UTF-8, so lines are decoded lossily.
fn next_line<R: BufRead>(source: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>, SmapsError> {
    buf.clear();
    if source.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(buf.as_slice()).into_owned()))
}

/// Classifies a header line. Returns the record to fill, or `None` when the
/// block must be skipped.
fn begin_mapping(line: &str, filter: Option<&Regex>) -> Result<Option<MappingRecord>, SmapsError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let Some(re) = filter else {
        let name = tokens
            .get(HEADER_TOKENS_NAMED - 1)
            .copied()
            .unwrap_or(ANONYMOUS);
        return Ok(Some(MappingRecord::new(name)));
    };

    match tokens.len() {
        // A filter can only match a name, and there is none.
        HEADER_TOKENS_ANONYMOUS => Ok(None),
        HEADER_TOKENS_NAMED => {
            let name = tokens[HEADER_TOKENS_NAMED - 1];
            if re.is_match(name) {
                Ok(Some(MappingRecord::new(name)))
            } else {
                Ok(None)
            }
        }
        _ => Err(SmapsError::UnexpectedHeader { line: line.into() }),
    }
}

/// Feeds one line of a mapping block, accumulating into `record` when given.
/// Returns `true` once the terminating `VmFlags:` line is seen.
fn scan_block_line(line: &str, record: Option<&mut MappingRecord>) -> Result<bool, SmapsError> {
    if line.starts_with(VM_FLAGS_PREFIX) {
        return Ok(true);
    }

    let Some(record) = record else {
        return Ok(false);
    };

    let field = if line.starts_with(SIZE_PREFIX) {
        &mut record.size
    } else if line.starts_with(RSS_PREFIX) {
        &mut record.rss
    } else if line.starts_with(PSS_PREFIX) {
        &mut record.pss
    } else {
        return Ok(false);
    };

    let value = parse_memory(line)?;
    *field = field
        .checked_add(value)
        .ok_or_else(|| SmapsError::ValueOverflow { line: line.into() })?;

    Ok(false)
}

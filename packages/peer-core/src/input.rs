//! Peer input files.
//!
//! Every peer starts from the input file `in<peer>.txt` in the configured
//! input directory. It lists the files the peer owns, with all their segment
//! hashes, and the names of the files it wants:
//!
//! ```text
//! 2                                  <- owned file count
//! file1 2                            <- name and segment count
//! 8b4d3f0a2c6e9b1d5f7a3c8e0b2d4f6a   <- segment hashes, in order
//! 1c3e5a7b9d0f2e4c6a8b0d1f3e5c7a9b
//! file2 1
//! f0e1d2c3b4a5968778695a4b3c2d1e0f
//! 1                                  <- wanted file count
//! file3                              <- wanted names, in download order
//! ```
//!
//! Errors carry the 1-based number of the offending line.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swarm_sim_configuration::Limits;
use swarm_sim_primitives::segment::ParseSegmentHashError;
use swarm_sim_primitives::{FileDescriptor, PeerId};

/// The content of a peer input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerInput {
    /// The files the peer owns, complete.
    pub owned: Vec<FileDescriptor>,

    /// The names of the files the peer wants, in download order.
    pub wanted: Vec<String>,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Unable to read the input file {path:?}: {source}")]
    ReadFailed { path: PathBuf, source: Arc<std::io::Error> },

    #[error("line {line}: missing the {expected}")]
    MissingLine { line: usize, expected: &'static str },

    #[error("line {line}: invalid count {value:?}")]
    InvalidCount { line: usize, value: String },

    #[error("line {line}: expected \"<name> <segment count>\", got {value:?}")]
    MalformedFileHeader { line: usize, value: String },

    #[error("line {line}: empty file name")]
    EmptyFileName { line: usize },

    #[error("line {line}: invalid segment hash: {source}")]
    InvalidHash { line: usize, source: ParseSegmentHashError },

    #[error("line {line}: {found} {what} exceed the limit of {max}")]
    LimitExceeded {
        line: usize,
        what: &'static str,
        max: usize,
        found: usize,
    },

    #[error("line {line}: file {name:?} is owned twice")]
    DuplicateOwnedFile { line: usize, name: String },

    #[error("line {line}: file {name:?} is wanted twice")]
    DuplicateWantedFile { line: usize, name: String },

    #[error("line {line}: file {name:?} is both owned and wanted")]
    OwnedAndWanted { line: usize, name: String },
}

/// The name of the input file of a peer.
#[must_use]
pub fn input_file_name(peer: PeerId) -> String {
    format!("in{peer}.txt")
}

/// Reads and parses the input file of the peer.
///
/// # Errors
///
/// Will return an error if the file can't be read or its content is not
/// valid. See [`parse`].
pub fn load(input_dir: &Path, peer: PeerId, limits: &Limits) -> Result<PeerInput, Error> {
    let path = input_dir.join(input_file_name(peer));

    let content = fs::read_to_string(&path).map_err(|err| Error::ReadFailed {
        path: path.clone(),
        source: Arc::new(err),
    })?;

    parse(&content, limits)
}

/// Parses the content of a peer input file.
///
/// Lines after the last wanted file name are ignored.
///
/// # Errors
///
/// Will return an error if a line is missing or malformed, a limit is
/// exceeded, or a file name is repeated (owned twice, wanted twice, or both
/// owned and wanted).
pub fn parse(content: &str, limits: &Limits) -> Result<PeerInput, Error> {
    let mut lines = NumberedLines::new(content);
    let mut input = PeerInput::default();

    let (line, value) = lines.next("owned file count")?;
    let owned_count = parse_count(line, value)?;
    check_limit(line, "owned files", limits.max_owned_files, owned_count)?;

    for _ in 0..owned_count {
        let (line, value) = lines.next("owned file header")?;
        let (name, segment_count) = parse_file_header(line, value)?;
        check_limit(line, "segments", limits.max_segments, segment_count)?;

        if input.owned.iter().any(|file| file.name == name) {
            return Err(Error::DuplicateOwnedFile { line, name });
        }

        let mut segments = Vec::new();

        for _ in 0..segment_count {
            let (line, value) = lines.next("segment hash")?;
            let hash = value.trim().parse().map_err(|source| Error::InvalidHash { line, source })?;
            segments.push(hash);
        }

        input.owned.push(FileDescriptor::new(name, segments));
    }

    let (line, value) = lines.next("wanted file count")?;
    let wanted_count = parse_count(line, value)?;
    check_limit(line, "wanted files", limits.max_wanted_files, wanted_count)?;

    for _ in 0..wanted_count {
        let (line, value) = lines.next("wanted file name")?;
        let name = value.trim();

        if name.is_empty() {
            return Err(Error::EmptyFileName { line });
        }
        if input.wanted.iter().any(|wanted| wanted == name) {
            return Err(Error::DuplicateWantedFile {
                line,
                name: name.to_owned(),
            });
        }
        if input.owned.iter().any(|file| file.name == name) {
            return Err(Error::OwnedAndWanted {
                line,
                name: name.to_owned(),
            });
        }

        input.wanted.push(name.to_owned());
    }

    Ok(input)
}

struct NumberedLines<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> NumberedLines<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            number: 0,
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str), Error> {
        self.number += 1;

        match self.lines.next() {
            Some(value) => Ok((self.number, value.trim_end_matches('\r'))),
            None => Err(Error::MissingLine {
                line: self.number,
                expected,
            }),
        }
    }
}

fn parse_count(line: usize, value: &str) -> Result<usize, Error> {
    value.trim().parse().map_err(|_| Error::InvalidCount {
        line,
        value: value.to_owned(),
    })
}

fn parse_file_header(line: usize, value: &str) -> Result<(String, usize), Error> {
    let malformed = || Error::MalformedFileHeader {
        line,
        value: value.to_owned(),
    };

    let mut tokens = value.split_whitespace();

    let (Some(name), Some(count), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(malformed());
    };

    let segment_count = count.parse().map_err(|_| malformed())?;

    Ok((name.to_owned(), segment_count))
}

fn check_limit(line: usize, what: &'static str, max: Option<usize>, found: usize) -> Result<(), Error> {
    match max {
        Some(max) if found > max => Err(Error::LimitExceeded { line, what, max, found }),
        _ => Ok(()),
    }
}

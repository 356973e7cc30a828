//! Line matching for `ldd` output.
//!
//! Both the GNU and BSD flavours of `ldd` print one dependency per line in
//! the shape `<name> => <path> (<address>)`, or `<name> => not found` when
//! the dynamic linker could not locate it. Everything else (headers, the
//! vDSO, the interpreter line) is noise and gets skipped.

use regex::Regex;
use std::collections::BTreeSet;
use std::io::{self, BufRead};
use std::sync::LazyLock;

const NOT_FOUND: &str = "not found";

static LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*(\S+)[ \t]+=>[ \t]+(/\S+|not found)[ \t]*").unwrap());

/// A single dependency reported by the inspection tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Absolute path the library resolved to.
    Resolved(String),
    /// Name of a library the linker could not find.
    Missing(String),
}

/// Match one line of tool output.
///
/// Returns `None` for lines that don't describe a dependency.
pub fn parse_line(line: &str) -> Option<Entry> {
    let line = line.trim_end_matches(['\n', '\r']);
    let captures = LINE_REGEX.captures(line)?;
    let (name, target) = (captures.get(1)?.as_str(), captures.get(2)?.as_str());
    if target == NOT_FOUND {
        Some(Entry::Missing(name.to_string()))
    } else {
        Some(Entry::Resolved(target.to_string()))
    }
}

/// The shared libraries of one file, split by whether they resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Libraries {
    pub resolved: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

impl Libraries {
    /// Drain a reader of tool output, collecting every matching line.
    ///
    /// Output is decoded lossily; a stray non-UTF-8 byte in one line does not
    /// throw away the rest of the report.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut libraries = Self::default();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            if let Some(entry) = parse_line(&String::from_utf8_lossy(&buffer)) {
                libraries.insert(entry);
            }
        }
        Ok(libraries)
    }

    pub fn insert(&mut self, entry: Entry) {
        match entry {
            Entry::Resolved(path) => self.resolved.insert(path),
            Entry::Missing(name) => self.missing.insert(name),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.missing.is_empty()
    }
}

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::extensions::{DEFAULT_DENYLIST, Denylist};
use crate::types::Verdict;

/// Bytes read from the start of a file when looking for NUL.
pub const SNIFF_WINDOW: usize = 8192;

/// Heuristic binary detection with the default denylist.
pub fn looks_binary(path: &Path) -> bool {
    classify(path).is_binary()
}

pub fn classify(path: &Path) -> Verdict {
    classify_with(path, &DEFAULT_DENYLIST)
}

/// Extension first, then a NUL sniff of the first [`SNIFF_WINDOW`] bytes.
/// Never fails: an unreadable file is reported as [`Verdict::Unreadable`].
pub fn classify_with(path: &Path, denylist: &Denylist) -> Verdict {
    classify_verbose(path, denylist).0
}

/// Like [`classify_with`] but hands back the read error for logging.
pub fn classify_verbose(path: &Path, denylist: &Denylist) -> (Verdict, Option<io::Error>) {
    if denylist.matches_path(path) {
        return (Verdict::Extension, None);
    }
    match read_prefix(path) {
        Ok(buf) if contains_nul(&buf) => (Verdict::NulByte, None),
        Ok(_) => (Verdict::Text, None),
        Err(e) => (Verdict::Unreadable, Some(e)),
    }
}

/// Only the first [`SNIFF_WINDOW`] bytes of `buf` are inspected.
pub fn contains_nul(buf: &[u8]) -> bool {
    let window = &buf[..buf.len().min(SNIFF_WINDOW)];
    memchr::memchr(0, window).is_some()
}

fn read_prefix(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(SNIFF_WINDOW);
    // take() keeps reading across short reads until the window is full or EOF
    file.take(SNIFF_WINDOW as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

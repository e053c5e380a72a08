use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Extensions that are never allowed in version control, regardless of content.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    ".bin", ".elf", ".exe", ".a", ".o", ".dll", ".so", ".dylib", ".hex", ".out", // objects
    ".jpg", ".jpeg", ".png", ".bmp", ".ico", ".gif", // images
    ".ttf", ".otf", ".woff", ".woff2", // fonts
    ".mp3", ".mp4", ".wav", // media
    ".zip", ".gz", ".tar", // archives
];

pub static DEFAULT_DENYLIST: Lazy<Denylist> =
    Lazy::new(|| Denylist::from_entries(DEFAULT_BINARY_EXTENSIONS.iter().copied()));

/// Set of lower-cased extensions, each stored with its leading dot.
#[derive(Debug, Clone, Default)]
pub struct Denylist {
    exts: HashSet<String>,
}

impl Denylist {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut list = Self::default();
        list.extend(entries);
        list
    }

    /// Adds entries, accepting `png`, `.png` or `.PNG` alike. Blank entries are ignored.
    pub fn extend<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for raw in entries {
            if let Some(ext) = normalize(raw) {
                self.exts.insert(ext);
            }
        }
    }

    /// Default list plus a comma-separated user list, e.g. `psd,.blend`.
    pub fn with_extra(list: Option<&str>) -> Self {
        let mut out = DEFAULT_DENYLIST.clone();
        if let Some(s) = list {
            out.extend(s.split(','));
        }
        out
    }

    /// Tests the final suffix of `path`. Names like `.png` or `Makefile` have no suffix.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| self.exts.contains(&format!(".{}", ext.to_lowercase())))
    }

    pub fn count(&self) -> usize {
        self.exts.len()
    }
}

fn normalize(raw: &str) -> Option<String> {
    let t = raw.trim().trim_start_matches('.');
    if t.is_empty() {
        return None;
    }
    Some(format!(".{}", t.to_lowercase()))
}

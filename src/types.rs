use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Outcome of classifying one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Text,
    /// Extension is on the denylist; content was not read.
    Extension,
    /// A NUL byte appeared in the sniffed prefix.
    NulByte,
    /// Open or read failed. Counted as binary so someone looks at it.
    Unreadable,
}

impl Verdict {
    pub const fn is_binary(self) -> bool {
        !matches!(self, Verdict::Text)
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Verdict::Text => "text",
            Verdict::Extension => "denylisted extension",
            Verdict::NulByte => "NUL byte in first 8 KiB",
            Verdict::Unreadable => "unreadable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(serialize_with = "serialize_lossy")]
    pub path: PathBuf,
    pub reason: Verdict,
}

// Non UTF-8 paths come out with U+FFFD, matching the text report
fn serialize_lossy<S: Serializer>(path: &Path, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_string_lossy())
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub clean: bool,
    pub files_scanned: usize,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    pub fn from_violations(files_scanned: usize, violations: Vec<Violation>) -> Self {
        CheckReport {
            clean: violations.is_empty(),
            files_scanned,
            violations,
        }
    }

    pub fn exit_code(&self) -> u8 {
        u8::from(!self.clean)
    }
}

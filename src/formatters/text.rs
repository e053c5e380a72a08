use crate::types::CheckReport;

pub const SUCCESS_LINE: &str = "✅ No binary assets tracked by Git.";
pub const FAILURE_HEADER: &str = "❌ Binary files detected in Git (please remove/revert):";

/// Renders the report as printed to stdout, one trailing newline per line.
pub fn format(r: &CheckReport) -> String {
    use std::fmt::Write as _;
    if r.violations.is_empty() {
        return format!("{SUCCESS_LINE}\n");
    }
    let mut out = String::new();
    out.push_str(FAILURE_HEADER);
    out.push('\n');
    for v in &r.violations {
        let _ = writeln!(out, " - {}", v.path.display());
    }
    out
}

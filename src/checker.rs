use anyhow::Result;
use std::path::PathBuf;

use crate::classifier::classify_verbose;
use crate::extensions::Denylist;
use crate::types::{CheckReport, Violation};
use crate::vcs::TrackedFiles;

/// Hooks the driver uses for logging and progress; defaults do nothing.
pub trait CheckObserver {
    fn on_listed(&mut self, _count: usize) {}
    fn on_file(&mut self, _violation: Option<&Violation>, _read_error: Option<&std::io::Error>) {}
}

impl CheckObserver for () {}

/// Lists tracked files and classifies each one in lister order.
///
/// # Errors
/// Returns an error only if the file listing fails; per-file problems become violations.
pub fn check(files: &dyn TrackedFiles, denylist: &Denylist) -> Result<CheckReport> {
    check_observed(files, denylist, &mut ())
}

/// [`check`] with progress callbacks.
///
/// # Errors
/// Returns an error only if the file listing fails.
pub fn check_observed(
    files: &dyn TrackedFiles,
    denylist: &Denylist,
    observer: &mut dyn CheckObserver,
) -> Result<CheckReport> {
    let listed: Vec<PathBuf> = files.list_tracked_files()?;
    observer.on_listed(listed.len());
    let root = files.root();

    let mut violations = Vec::new();
    for rel in &listed {
        let (verdict, err) = classify_verbose(&root.join(rel), denylist);
        if verdict.is_binary() {
            let v = Violation {
                path: rel.clone(),
                reason: verdict,
            };
            observer.on_file(Some(&v), err.as_ref());
            violations.push(v);
        } else {
            observer.on_file(None, None);
        }
    }

    Ok(CheckReport::from_violations(listed.len(), violations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::DEFAULT_DENYLIST;
    use crate::types::Verdict;
    use anyhow::bail;
    use std::fs;
    use std::path::Path;

    struct FakeList {
        root: PathBuf,
        files: Vec<&'static str>,
    }

    impl TrackedFiles for FakeList {
        fn list_tracked_files(&self) -> Result<Vec<PathBuf>> {
            Ok(self.files.iter().map(PathBuf::from).collect())
        }

        fn root(&self) -> &Path {
            &self.root
        }
    }

    struct BrokenList(PathBuf);

    impl TrackedFiles for BrokenList {
        fn list_tracked_files(&self) -> Result<Vec<PathBuf>> {
            bail!("not a git repository")
        }

        fn root(&self) -> &Path {
            &self.0
        }
    }

    #[test]
    fn extension_match_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "hello").unwrap();
        fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G', 1, 2, 3]).unwrap();
        let list = FakeList {
            root: dir.path().to_path_buf(),
            files: vec!["readme.txt", "logo.png"],
        };
        let report = check(&list, &DEFAULT_DENYLIST).unwrap();
        assert_eq!(report.files_scanned, 2);
        assert_eq!(
            report.violations,
            vec![Violation {
                path: PathBuf::from("logo.png"),
                reason: Verdict::Extension,
            }]
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn text_only_tree_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();
        fs::write(dir.path().join("b.md"), "# beta\n").unwrap();
        let list = FakeList {
            root: dir.path().to_path_buf(),
            files: vec!["a.txt", "b.md"],
        };
        let report = check(&list, &DEFAULT_DENYLIST).unwrap();
        assert!(report.clean);
        assert!(report.violations.is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn order_follows_lister() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.bin", "m.txt", "a.o"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let list = FakeList {
            root: dir.path().to_path_buf(),
            files: vec!["z.bin", "m.txt", "a.o", "vanished.txt"],
        };
        let report = check(&list, &DEFAULT_DENYLIST).unwrap();
        let paths: Vec<_> = report.violations.iter().map(|v| v.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("z.bin"),
                PathBuf::from("a.o"),
                PathBuf::from("vanished.txt"),
            ]
        );
        assert_eq!(report.violations[2].reason, Verdict::Unreadable);
    }

    #[test]
    fn listing_failure_propagates() {
        let list = BrokenList(PathBuf::from("."));
        let err = check(&list, &DEFAULT_DENYLIST).unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }

    #[test]
    fn observer_sees_every_file() {
        #[derive(Default)]
        struct Counter {
            listed: usize,
            seen: usize,
            flagged: usize,
            errors: usize,
        }
        impl CheckObserver for Counter {
            fn on_listed(&mut self, count: usize) {
                self.listed = count;
            }
            fn on_file(&mut self, v: Option<&Violation>, e: Option<&std::io::Error>) {
                self.seen += 1;
                self.flagged += usize::from(v.is_some());
                self.errors += usize::from(e.is_some());
            }
        }

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.txt"), "ok").unwrap();
        let list = FakeList {
            root: dir.path().to_path_buf(),
            files: vec!["ok.txt", "missing.txt"],
        };
        let mut c = Counter::default();
        check_observed(&list, &DEFAULT_DENYLIST, &mut c).unwrap();
        assert_eq!((c.listed, c.seen, c.flagged, c.errors), (2, 2, 1, 1));
    }
}

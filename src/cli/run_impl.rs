use anyhow::Result;
use std::io::Error as IoError;

use crate::checker::{CheckObserver, check_observed};
use crate::extensions::Denylist;
use crate::formatters;
use crate::types::Violation;
use crate::vcs::{GitIndex, TrackedFiles};

use super::Args;

struct RunObserver {
    verbose: u8,
    pb: Option<indicatif::ProgressBar>,
}

impl CheckObserver for RunObserver {
    fn on_listed(&mut self, count: usize) {
        if self.verbose > 0 {
            eprintln!("Found {count} tracked files to check");
        }
        if let Some(ref pb) = self.pb {
            pb.set_length(count as u64);
        }
    }

    fn on_file(&mut self, violation: Option<&Violation>, read_error: Option<&IoError>) {
        if self.verbose > 1
            && let Some(v) = violation
        {
            match read_error {
                Some(e) => eprintln!("{}: {} ({e})", v.path.display(), v.reason.describe()),
                None => eprintln!("{}: {}", v.path.display(), v.reason.describe()),
            }
        }
        if let Some(ref pb) = self.pb {
            pb.inc(1);
        }
    }
}

pub fn run_with_args(args: &Args) -> Result<u8> {
    let denylist = Denylist::with_extra(args.extensions.as_deref());

    // Open the repository before printing anything
    let repo = GitIndex::open(&args.path)?;
    if args.verbose > 0 {
        eprintln!("Checking repository: {}", repo.root().display());
        if let Some(ref list) = args.extensions {
            eprintln!("Extra extensions: {list} ({} total)", denylist.count());
        }
    }

    let pb = if args.progress {
        let pb = indicatif::ProgressBar::new(0);
        if let Ok(style) =
            indicatif::ProgressStyle::with_template("{spinner} {pos}/{len} files {wide_bar} {eta}")
        {
            pb.set_style(style.tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"));
        }
        Some(pb)
    } else {
        None
    };

    let mut observer = RunObserver {
        verbose: args.verbose,
        pb,
    };
    let report = check_observed(&repo, &denylist, &mut observer)?;
    if let Some(pb) = observer.pb.take() {
        pb.finish_and_clear();
    }

    if args.verbose > 0 {
        eprintln!(
            "Checked {} files, {} violation(s)",
            report.files_scanned,
            report.violations.len()
        );
    }

    if args.json {
        let s = serde_json::to_string_pretty(&report)?;
        println!("{s}");
    } else {
        print!("{}", formatters::text::format(&report));
    }
    Ok(report.exit_code())
}

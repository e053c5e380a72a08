use anyhow::{Context, Result, anyhow, bail};
use git2::{ErrorClass, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of the files to check, in a stable order.
pub trait TrackedFiles {
    /// Paths are relative to [`TrackedFiles::root`].
    fn list_tracked_files(&self) -> Result<Vec<PathBuf>>;

    fn root(&self) -> &Path;
}

// git's mode for submodule entries
const GITLINK_MODE: u32 = 0o160_000;

pub struct GitIndex {
    repo: Repository,
    workdir: PathBuf,
}

impl GitIndex {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("open git repo from {}", path.display()))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| anyhow!("bare repository has no working tree"))?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }
}

impl GitIndex {
    /// `(mode, path)` for every index entry, in index order.
    fn index_entries(&self) -> Result<Vec<(u32, Vec<u8>)>> {
        match self.repo.index() {
            Ok(index) => Ok(index.iter().map(|e| (e.mode, e.path)).collect()),
            // libgit2 rejects split and sparse indexes; git itself reads them
            Err(e) if e.class() == ErrorClass::Index => self
                .ls_files_staged()
                .with_context(|| format!("read git index ({})", e.message())),
            Err(e) => Err(e).context("read git index"),
        }
    }

    fn ls_files_staged(&self) -> Result<Vec<(u32, Vec<u8>)>> {
        let out = Command::new("git")
            .args(["ls-files", "--stage", "-z"])
            .current_dir(&self.workdir)
            .output()
            .context("run git ls-files")?;
        if !out.status.success() {
            bail!(
                "git ls-files failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        parse_ls_files_stage(&out.stdout)
    }
}

/// Parses `git ls-files --stage -z` records: `<mode> <oid> <stage>\t<path>\0`.
fn parse_ls_files_stage(raw: &[u8]) -> Result<Vec<(u32, Vec<u8>)>> {
    let mut out = Vec::new();
    for rec in raw.split(|&b| b == 0).filter(|r| !r.is_empty()) {
        let tab = memchr::memchr(b'\t', rec)
            .ok_or_else(|| anyhow!("malformed ls-files record: {}", String::from_utf8_lossy(rec)))?;
        let meta = std::str::from_utf8(&rec[..tab]).context("ls-files mode")?;
        let mode = meta
            .split(' ')
            .next()
            .and_then(|m| u32::from_str_radix(m, 8).ok())
            .ok_or_else(|| anyhow!("malformed ls-files mode: {meta}"))?;
        out.push((mode, rec[tab + 1..].to_vec()));
    }
    Ok(out)
}

impl TrackedFiles for GitIndex {
    fn list_tracked_files(&self) -> Result<Vec<PathBuf>> {
        let entries = self.index_entries()?;
        let mut out: Vec<PathBuf> = Vec::with_capacity(entries.len());
        let mut last: Option<Vec<u8>> = None;
        for (mode, path) in entries {
            if mode == GITLINK_MODE {
                continue;
            }
            // unmerged paths appear once per conflict stage; report them once
            if last.as_deref() == Some(path.as_slice()) {
                continue;
            }
            let rel = bytes_to_path(&path);
            last = Some(path);
            if self.workdir.join(&rel).is_file() {
                out.push(rel);
            }
        }
        Ok(out)
    }

    fn root(&self) -> &Path {
        &self.workdir
    }
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

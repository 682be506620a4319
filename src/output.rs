use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile, TempPath};
use tracing::{debug, info, warn};

struct Staged {
    tmp: NamedTempFile,
    target: PathBuf,
}

/// A group of output files that land together or not at all.
///
/// Each artifact is rendered into a hidden temp file in its target directory.
/// [`OutputSet::commit`] renames them all into place; dropping the set without
/// committing deletes every temp file. If one rename fails, the targets
/// already replaced get their previous contents back.
#[derive(Default)]
pub struct OutputSet {
    staged: Vec<Staged>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Render one artifact: `render` receives the temp path to write to.
    /// The temp file keeps the target's extension so writers that pick a
    /// format by extension still work.
    pub fn stage<P, F>(&mut self, target: P, render: F) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnOnce(&Path) -> Result<()>,
    {
        let target = target.as_ref().to_path_buf();
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating output directory {:?}", dir))?;

        let stem = target
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let suffix = target
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let tmp = Builder::new()
            .prefix(&format!(".{}.", stem))
            .suffix(&suffix)
            .tempfile_in(&dir)
            .with_context(|| format!("creating temp file for {:?}", target))?;

        render(tmp.path()).with_context(|| format!("rendering {:?}", target))?;
        debug!(tmp = %tmp.path().display(), target = %target.display(), "staged");
        self.staged.push(Staged { tmp, target });
        Ok(())
    }

    /// Move every staged file onto its target, replacing existing files.
    ///
    /// An existing target is first moved aside to a hidden backup; backups are
    /// deleted once every file is in place and restored if any move fails.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut placed: Vec<(PathBuf, Option<TempPath>)> = Vec::with_capacity(self.staged.len());
        for Staged { tmp, target } in self.staged {
            match replace(tmp, &target) {
                Ok(backup) => placed.push((target, backup)),
                Err(e) => {
                    roll_back(placed);
                    return Err(e);
                }
            }
        }

        let mut written = Vec::with_capacity(placed.len());
        for (target, backup) in placed {
            if let Some(backup) = backup {
                if let Err(e) = backup.close() {
                    warn!(target = %target.display(), "leftover backup: {}", e);
                }
            }
            info!("saved {}", target.display());
            written.push(target);
        }
        Ok(written)
    }
}

/// Move `target` aside (if present), then rename `tmp` onto it. On failure
/// the old file is put back before returning.
fn replace(tmp: NamedTempFile, target: &Path) -> Result<Option<TempPath>> {
    let backup = if fs::symlink_metadata(target).is_ok() {
        let dir = tmp.path().parent().unwrap_or(Path::new("."));
        let backup = Builder::new()
            .prefix(".backup.")
            .tempfile_in(dir)
            .with_context(|| format!("creating backup slot for {:?}", target))?
            .into_temp_path();
        fs::rename(target, &backup)
            .with_context(|| format!("moving {:?} aside", target))?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = tmp.persist(target) {
        if let Some(backup) = &backup {
            if let Err(re) = fs::rename(backup, target) {
                warn!(target = %target.display(), "could not restore previous file: {}", re);
            }
        }
        return Err(e).with_context(|| format!("moving output into place at {:?}", target));
    }
    Ok(backup)
}

/// Undo already placed targets, newest first.
fn roll_back(placed: Vec<(PathBuf, Option<TempPath>)>) {
    for (target, backup) in placed.into_iter().rev() {
        let restored = match &backup {
            Some(backup) => fs::rename(backup, &target),
            None => fs::remove_file(&target),
        };
        match restored {
            Ok(()) => debug!(target = %target.display(), "rolled back"),
            Err(e) => warn!(target = %target.display(), "rollback failed: {}", e),
        }
    }
}

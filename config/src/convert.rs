//! Conversion between file and directory layouts
//!
//! The new layout is written next to the package file first, at
//! `<path>.tmp.<n>`. Only once it holds every rule is the original moved
//! aside to `<path>.bkp.<n>` and the new layout renamed into place, so a crash
//! never leaves the package file half written.

use crate::store::{create_dir, create_file};
use crate::{ConfigError, Layout, Result, RuleStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for a layout conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Keep the `.bkp.<n>` copy of the old layout
    pub keep_backup: bool,
}

/// Result of a layout conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The package file in its new layout
    pub layout: Layout,
    /// Where the old layout was kept, if it was
    pub backup: Option<PathBuf>,
}

/// Find the first unused `<path>.<suffix>.<n>`.
///
/// Runs until the filesystem reports a name as absent.
pub fn probe_path(path: &Path, suffix: &str) -> PathBuf {
    let mut num: u64 = 0;
    loop {
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".{}.{}", suffix, num));
        let candidate = PathBuf::from(name);
        if !candidate.exists() {
            return candidate;
        }
        num += 1;
    }
}

/// Convert a package file from file to directory layout or vice versa.
pub fn convert(layout: &Layout, options: ConvertOptions) -> Result<Conversion> {
    let path = layout.path();
    let backup_path = probe_path(path, "bkp");
    let tmp_path = probe_path(path, "tmp");
    let target = layout.flipped(&tmp_path);

    info!(
        "Converting {} from {} to {} layout",
        path.display(),
        layout.style(),
        target.style()
    );

    match &target {
        Layout::File(tmp) => create_file(tmp)?,
        Layout::Directory(tmp) => create_dir(tmp)?,
    }

    let rules = match layout.load() {
        Ok(rules) => rules,
        Err(e) => {
            discard(&target);
            return Err(e);
        }
    };
    if let Err(e) = target.save(&rules) {
        discard(&target);
        return Err(e);
    }
    debug!("Wrote {} rules to {}", rules.len(), tmp_path.display());

    install(path, &backup_path, &target)?;

    let backup = if options.keep_backup {
        info!("Backed up {} to {}", path.display(), backup_path.display());
        Some(backup_path)
    } else {
        discard(&layout.relocated(&backup_path));
        None
    };

    Ok(Conversion {
        layout: target.relocated(path),
        backup,
    })
}

/// Swap the filled `target` in for `path`. The temporary layout is removed
/// when the swap fails.
fn install(path: &Path, backup_path: &Path, target: &Layout) -> Result<()> {
    swap(path, backup_path, target.path()).inspect_err(|_| discard(target))
}

/// Move `path` to `backup_path` and `tmp_path` to `path`, restoring the
/// original if the second step fails.
fn swap(path: &Path, backup_path: &Path, tmp_path: &Path) -> Result<()> {
    fs::rename(path, backup_path).map_err(|source| ConfigError::Swap {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(source) = fs::rename(tmp_path, path) {
        if let Err(e) = fs::rename(backup_path, path) {
            warn!(
                "Could not restore {} from {}: {}",
                path.display(),
                backup_path.display(),
                e
            );
        }
        return Err(ConfigError::Swap {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Best-effort removal of a leftover layout
fn discard(layout: &Layout) {
    let result = match layout {
        Layout::File(path) => fs::remove_file(path),
        Layout::Directory(path) => fs::remove_dir_all(path),
    };

    if let Err(e) = result {
        warn!("Could not remove {}: {}", layout.path().display(), e);
    }
}

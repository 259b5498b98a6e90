//! Run settings
//!
//! Built once at startup and handed to [`PackageFile::open`](crate::PackageFile::open).

use crate::{ConvertOptions, PackageKind, Style};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default package file prefix; the kind is appended as an extension
pub const DEFAULT_PKG_FILE: &str = "/etc/portage/package";

/// Settings for one edit of a package file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Package file, either a prefix (`/etc/portage/package`) or a full path
    /// (`/etc/portage/package.use`)
    pub pkg_file: PathBuf,
    /// Requested kind, `use` when unset and not given by the path
    pub kind: Option<PackageKind>,
    /// Requested layout
    pub style: Style,
    /// Flip the layout whatever it currently is
    pub convert: bool,
    /// Keep the old layout around after a conversion
    pub keep_backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_PKG_FILE)
    }
}

impl Settings {
    pub fn new(pkg_file: impl Into<PathBuf>) -> Self {
        Self {
            pkg_file: pkg_file.into(),
            kind: None,
            style: Style::Default,
            convert: false,
            keep_backup: false,
        }
    }

    pub fn kind(mut self, kind: Option<PackageKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    pub fn keep_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            keep_backup: self.keep_backup,
        }
    }

    /// Resolve the package file path and its kind.
    ///
    /// A path whose extension names a kind is used as is, e.g.
    /// `/etc/portage/package.license`. Otherwise the kind is appended:
    /// `/etc/portage/package` becomes `/etc/portage/package.use`.
    pub fn target(&self) -> (PathBuf, PackageKind) {
        if let Some(kind) = kind_from_extension(&self.pkg_file) {
            if let Some(requested) = self.kind.filter(|requested| *requested != kind) {
                warn!(
                    "{} is a package.{} file, ignoring type {}",
                    self.pkg_file.display(),
                    kind,
                    requested
                );
            }
            return (self.pkg_file.clone(), kind);
        }

        let kind = self.kind.unwrap_or_default();
        let mut path = self.pkg_file.as_os_str().to_owned();
        path.push(format!(".{}", kind));
        (PathBuf::from(path), kind)
    }
}

fn kind_from_extension(path: &Path) -> Option<PackageKind> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

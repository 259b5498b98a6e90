//! Package file kinds and layout styles

use crate::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

/// The type of rule held by a `package.*` file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    AcceptKeywords,
    Env,
    Keywords,
    License,
    Mask,
    Properties,
    Unmask,
    Use,
}

impl PackageKind {
    pub const ALL: [PackageKind; 8] = [
        Self::AcceptKeywords,
        Self::Env,
        Self::Keywords,
        Self::License,
        Self::Mask,
        Self::Properties,
        Self::Unmask,
        Self::Use,
    ];

    /// File suffix of the kind (`package.<suffix>`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptKeywords => "accept_keywords",
            Self::Env => "env",
            Self::Keywords => "keywords",
            Self::License => "license",
            Self::Mask => "mask",
            Self::Properties => "properties",
            Self::Unmask => "unmask",
            Self::Use => "use",
        }
    }

    /// package.mask and package.unmask rules are bare atoms
    pub fn is_flagless(&self) -> bool {
        matches!(self, Self::Mask | Self::Unmask)
    }
}

impl Default for PackageKind {
    fn default() -> Self {
        Self::Use
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidKind(s.to_string()))
    }
}

/// Requested storage layout of a package file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Keep the existing layout; new package files become directories
    #[default]
    Default,
    /// A single file holding every rule
    File,
    /// A directory with one file per category
    Directory,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Default, Self::File, Self::Directory]
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidStyle(s.to_string()))
    }
}

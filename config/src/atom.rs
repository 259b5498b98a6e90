//! Package atom helpers
//!
//! Atoms are only inspected as far as rule storage needs them:
//! - `category/package`
//! - `>=category/package-1.0`
//! - `!!<category/package-1.0`
//! - `*/*::repo`
//!
//! No version or slot parsing happens here.

use crate::{ConfigError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Characters that may prefix an atom (blockers and version operators)
pub const OPERATOR_CHARS: &[char] = &['!', '~', '<', '>', '='];

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[!~<>=]*([^/]*)/").expect("valid category regex"));

/// Extract the category of an atom (the part before the first `/`, without
/// leading operators).
///
/// This is the file name used for the atom in a directory-style package file.
pub fn category(atom: &str) -> Result<&str> {
    let caps = CATEGORY_RE
        .captures(atom)
        .ok_or_else(|| ConfigError::InvalidAtom(format!("missing category: {}", atom)))?;
    let category = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

    if category.is_empty() {
        return Err(ConfigError::InvalidAtom(format!("empty category: {}", atom)));
    }
    // would escape the package directory
    if category == "." || category == ".." {
        return Err(ConfigError::InvalidAtom(format!("invalid category: {}", atom)));
    }

    Ok(category)
}

//! Rule storage
//!
//! A package file is either a single file holding every rule or a directory
//! holding one file per category:
//!
//! ```text
//! /etc/portage/package.use          /etc/portage/package.use/
//!   dev-libs/glib:2/2.30              ├── dev-libs   (dev-libs/glib:2/2.30)
//!   >=sys-apps/sed-4 nls              └── sys-apps   (>=sys-apps/sed-4 nls)
//! ```
//!
//! Both layouts always write their rules sorted. Comments and blank lines are
//! dropped when loading and are never written back.

use crate::{atom, ConfigError, Result, Rule, RuleSet, Style};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load and save the full rule set of a package file
pub trait RuleStore {
    fn load(&self) -> Result<RuleSet>;
    fn save(&self, rules: &RuleSet) -> Result<()>;
}

/// Physical layout of a package file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// A single file with all rules
    File(PathBuf),
    /// A directory with one file per category
    Directory(PathBuf),
}

impl Layout {
    /// Detect the layout of an existing package file
    pub fn detect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        if path.is_dir() {
            Ok(Self::Directory(path.to_path_buf()))
        } else if path.is_file() {
            Ok(Self::File(path.to_path_buf()))
        } else {
            Err(ConfigError::InvalidLayout(path.to_path_buf()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Directory(path) => path,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::File(_) => Style::File,
            Self::Directory(_) => Style::Directory,
        }
    }

    /// The same layout, located at `path`
    pub fn relocated(&self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::File(_) => Self::File(path.into()),
            Self::Directory(_) => Self::Directory(path.into()),
        }
    }

    /// The other layout, located at `path`
    pub fn flipped(&self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::File(_) => Self::Directory(path.into()),
            Self::Directory(_) => Self::File(path.into()),
        }
    }
}

impl RuleStore for Layout {
    fn load(&self) -> Result<RuleSet> {
        let path = self.path();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let rules = match self {
            Self::File(path) => {
                if !path.is_file() {
                    return Err(ConfigError::InvalidLayout(path.clone()));
                }
                RuleSet::parse(&fs::read_to_string(path)?)
            }
            Self::Directory(path) => load_directory(path)?,
        };

        debug!("Loaded {} rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    fn save(&self, rules: &RuleSet) -> Result<()> {
        match self {
            Self::File(path) => save_file(path, rules)?,
            Self::Directory(path) => save_directory(path, rules)?,
        }

        debug!("Saved {} rules to {}", rules.len(), self.path().display());
        Ok(())
    }
}

/// Read every category file of a directory-style package file
fn load_directory(path: &Path) -> Result<RuleSet> {
    if !path.is_dir() {
        return Err(ConfigError::InvalidLayout(path.to_path_buf()));
    }

    let mut rules = RuleSet::new();
    for entry in fs::read_dir(path)? {
        let category_path = entry?.path();
        if !category_path.is_file() {
            return Err(ConfigError::InvalidLayout(category_path));
        }

        rules.extend(RuleSet::parse(&fs::read_to_string(&category_path)?));
    }

    rules.sort();
    Ok(rules)
}

fn save_file(path: &Path, rules: &RuleSet) -> Result<()> {
    let content: String = rules
        .sorted()
        .into_iter()
        .map(|rule| format!("{}\n", rule))
        .collect();

    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn save_directory(path: &Path, rules: &RuleSet) -> Result<()> {
    if !path.exists() {
        create_dir(path)?;
    }

    // {category: "category/atom flags\ncategory/atom2\n"}
    let mut categories: IndexMap<&str, String> = IndexMap::new();
    for rule in rules.sorted() {
        let text = categories.entry(rule_category(rule)?).or_default();
        text.push_str(rule.as_str());
        text.push('\n');
    }

    for (category, text) in &categories {
        let category_file = path.join(category);
        fs::write(&category_file, text).map_err(|source| ConfigError::Write {
            path: category_file.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Create a directory with mode 0755
pub(crate) fn create_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(path)
        .map_err(|source| ConfigError::DirectoryCreate {
            path: path.to_path_buf(),
            source,
        })
}

/// Create an empty file, keeping any existing content
pub(crate) fn create_file(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map(drop)
        .map_err(|source| ConfigError::FileCreate {
            path: path.to_path_buf(),
            source,
        })
}

/// Category of a rule, used as its file name in a directory layout
pub fn rule_category(rule: &Rule) -> Result<&str> {
    atom::category(rule.atom())
}

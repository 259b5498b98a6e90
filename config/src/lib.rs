//! emod package file handling
//!
//! This crate edits the rules of Gentoo-style `package.*` files such as
//! `/etc/portage/package.use` or `/etc/portage/package.mask`.
//!
//! # Overview
//!
//! - [`rules`]: rule lines and rule sets
//! - [`store`]: file and directory layouts, load/save
//! - [`convert`]: safe conversion between layouts
//! - [`editor`]: flag editing of a single rule
//! - [`package`]: a resolved package file with lazily read rules
//! - [`settings`]: run settings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emod_config::{FlagRequest, PackageFile, Settings};
//!
//! let settings = Settings::new("/etc/portage/package");
//! let mut package = PackageFile::open(&settings).unwrap();
//!
//! let request = FlagRequest::new().enable("gtk").disable("qt");
//! let outcome = package.edit(">=x11-misc/slim-1.3", &request).unwrap();
//! println!("New rule: {:?}", outcome.new_rule);
//!
//! package.save().unwrap();
//! ```
//!
//! # Layouts
//!
//! ```text
//! /etc/portage/
//! ├── package.use            # file: every rule
//! └── package.mask/          # directory: one file per category
//!     ├── dev-libs
//!     └── sys-apps
//! ```

pub mod atom;
pub mod cilist;
pub mod convert;
pub mod editor;
pub mod error;
pub mod kind;
pub mod package;
pub mod rules;
pub mod settings;
pub mod store;

pub use cilist::CiList;
pub use convert::{convert, probe_path, Conversion, ConvertOptions};
pub use editor::{EditOutcome, FlagRequest, FlagWarning, RuleEditor};
pub use error::{ConfigError, Result};
pub use kind::{PackageKind, Style};
pub use package::PackageFile;
pub use rules::{Rule, RuleSet};
pub use settings::{Settings, DEFAULT_PKG_FILE};
pub use store::{Layout, RuleStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConfigError, ConvertOptions, EditOutcome, FlagRequest, FlagWarning, Layout, PackageFile,
        PackageKind, Result, Rule, RuleEditor, RuleSet, RuleStore, Settings, Style,
    };
}

//! Package files
//!
//! A [`PackageFile`] binds a resolved path, its kind and its current layout.
//! Rules are read on first use, edited in memory and written back once.

use crate::convert::{self, Conversion};
use crate::store::{create_dir, create_file};
use crate::{
    ConvertOptions, EditOutcome, FlagRequest, Layout, PackageKind, Result, RuleEditor, RuleSet,
    RuleStore, Settings, Style,
};
use std::path::Path;
use tracing::{debug, info};

/// A `package.*` file or directory
#[derive(Debug)]
pub struct PackageFile {
    kind: PackageKind,
    layout: Layout,
    /// `None` until the rules are read
    rules: Option<RuleSet>,
}

impl PackageFile {
    /// Bind an existing layout
    pub fn new(layout: Layout, kind: PackageKind) -> Self {
        Self {
            kind,
            layout,
            rules: None,
        }
    }

    /// Resolve the package file described by `settings`.
    ///
    /// A missing package file is created empty: as a file for
    /// [`Style::File`], as a directory otherwise.
    pub fn open(settings: &Settings) -> Result<Self> {
        let (path, kind) = settings.target();

        if !path.exists() {
            match settings.style {
                Style::File => create_file(&path)?,
                Style::Default | Style::Directory => create_dir(&path)?,
            }
            info!("Created {}", path.display());
        }

        let layout = Layout::detect(&path)?;
        debug!("Using {} as a {} package.{}", path.display(), layout.style(), kind);

        Ok(Self::new(layout, kind))
    }

    pub fn path(&self) -> &Path {
        self.layout.path()
    }

    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The rules, read from disk on first access
    pub fn rules(&mut self) -> Result<&mut RuleSet> {
        let rules = match self.rules.take() {
            Some(rules) => rules,
            None => self.layout.load()?,
        };
        Ok(self.rules.insert(rules))
    }

    /// Switch to the other layout.
    ///
    /// The rules are read before the old layout is replaced.
    pub fn convert(&mut self, options: ConvertOptions) -> Result<Conversion> {
        self.rules()?;
        let conversion = convert::convert(&self.layout, options)?;
        self.layout = conversion.layout.clone();
        Ok(conversion)
    }

    /// Convert if `style` asks for another layout than the current one
    pub fn apply_style(&mut self, style: Style, options: ConvertOptions) -> Result<Option<Conversion>> {
        if style == Style::Default || style == self.layout.style() {
            return Ok(None);
        }

        self.convert(options).map(Some)
    }

    /// Edit the rule of `atom`
    pub fn edit(&mut self, atom: &str, request: &FlagRequest) -> Result<EditOutcome> {
        let editor = RuleEditor::new(self.kind);
        editor.edit(self.rules()?, atom, request)
    }

    /// Write the rules back. Nothing happens if they were never read.
    pub fn save(&self) -> Result<()> {
        match &self.rules {
            Some(rules) => self.layout.save(rules),
            None => {
                debug!("{} not read, nothing to save", self.path().display());
                Ok(())
            }
        }
    }
}

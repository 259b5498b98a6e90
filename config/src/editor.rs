//! Rule editing
//!
//! Computes the new rule of an atom from the requested flag changes. Flags
//! are applied in a fixed order: prune, then disable, then enable. The
//! resulting flags are sorted, and an atom left without flags loses its rule.

use crate::{CiList, ConfigError, PackageKind, Result, Rule, RuleSet};
use std::fmt;
use tracing::{debug, warn};

/// Prefixes that may precede a stored flag (`-gtk`, `+qt`)
const FLAG_MODIFIERS: &[char] = &['-', '+'];

/// Requested flag changes for one atom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagRequest {
    /// Flags to append
    pub enable: Vec<String>,
    /// Flags to remove
    pub disable: Vec<String>,
    /// Drop every current flag first
    pub prune: bool,
}

impl FlagRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from command-line style flags: `%flag` disables
    /// `flag`, anything else enables it.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::new();
        for arg in args {
            let arg = arg.as_ref();
            match arg.strip_prefix('%') {
                Some(flag) => request.disable.push(flag.to_string()),
                None => request.enable.push(arg.to_string()),
            }
        }
        request
    }

    pub fn enable(mut self, flag: impl Into<String>) -> Self {
        self.enable.push(flag.into());
        self
    }

    pub fn disable(mut self, flag: impl Into<String>) -> Self {
        self.disable.push(flag.into());
        self
    }

    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Merge another request into this one
    pub fn merge(&mut self, other: FlagRequest) {
        self.enable.extend(other.enable);
        self.disable.extend(other.disable);
        self.prune |= other.prune;
    }
}

/// A non-fatal problem with one requested flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagWarning {
    /// The flag to enable is already set
    AlreadyEnabled(String),
    /// No stored flag matched the flag to disable
    NotFound(String),
    /// The flag only matches a stored flag when ignoring case
    CaseMismatch { requested: String, stored: String },
    /// The package file kind does not take flags
    Ignored(String),
}

impl fmt::Display for FlagWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyEnabled(flag) => write!(f, "{} is already enabled!", flag),
            Self::NotFound(flag) => write!(f, "cannot find a match for {}", flag),
            Self::CaseMismatch { requested, stored } => {
                write!(f, "{} differs from {} only by case", requested, stored)
            }
            Self::Ignored(flag) => write!(f, "{} ignored, this package file takes no flags", flag),
        }
    }
}

/// What an edit did to the rule of an atom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// The rule before the edit
    pub old_rule: Option<Rule>,
    /// The rule after the edit
    pub new_rule: Option<Rule>,
    /// Flag problems met along the way
    pub warnings: Vec<FlagWarning>,
}

/// Edits rules of a given package file kind
#[derive(Debug, Clone, Copy)]
pub struct RuleEditor {
    kind: PackageKind,
}

impl RuleEditor {
    pub fn new(kind: PackageKind) -> Self {
        Self { kind }
    }

    /// Apply `request` to the rule of `atom` in `rules`.
    ///
    /// The old rule is removed and the updated one, if any, appended. Errors
    /// leave `rules` untouched.
    pub fn edit(&self, rules: &mut RuleSet, atom: &str, request: &FlagRequest) -> Result<EditOutcome> {
        if self.kind.is_flagless() {
            self.edit_bare(rules, atom, request)
        } else {
            Ok(self.edit_flags(rules, atom, request))
        }
    }

    /// package.mask and package.unmask hold bare atoms
    fn edit_bare(&self, rules: &mut RuleSet, atom: &str, request: &FlagRequest) -> Result<EditOutcome> {
        let mut outcome = EditOutcome::default();
        for flag in request.enable.iter().chain(&request.disable) {
            warn!("{}", FlagWarning::Ignored(flag.clone()));
            outcome.warnings.push(FlagWarning::Ignored(flag.clone()));
        }

        if request.prune {
            if !rules.remove_line(atom) {
                return Err(ConfigError::NotMasked {
                    atom: atom.to_string(),
                    kind: self.kind.to_string(),
                });
            }
            outcome.old_rule = Rule::parse(atom);
        } else {
            if rules.contains_line(atom) {
                return Err(ConfigError::AlreadyMasked {
                    atom: atom.to_string(),
                    kind: self.kind.to_string(),
                });
            }
            let rule = Rule::new::<&str>(atom, &[]);
            rules.push(rule.clone());
            outcome.new_rule = Some(rule);
        }

        Ok(outcome)
    }

    fn edit_flags(&self, rules: &mut RuleSet, atom: &str, request: &FlagRequest) -> EditOutcome {
        let mut outcome = EditOutcome {
            old_rule: rules.take(atom),
            ..Default::default()
        };

        let mut flags: Vec<String> = outcome
            .old_rule
            .as_ref()
            .map(|rule| rule.flags().map(String::from).collect())
            .unwrap_or_default();
        debug!("Current flags of {}: {:?}", atom, flags);

        if request.prune {
            flags.clear();
        }

        for flag in &request.disable {
            let before = flags.len();
            flags.retain(|stored| !disables(flag, stored));
            if flags.len() == before {
                outcome.warnings.push(FlagWarning::NotFound(flag.clone()));
                if let Some(stored) = case_match(&flags, flag) {
                    outcome.warnings.push(stored);
                }
            }
        }

        for flag in &request.enable {
            if flags.contains(flag) {
                outcome.warnings.push(FlagWarning::AlreadyEnabled(flag.clone()));
                continue;
            }
            if let Some(stored) = case_match(&flags, flag) {
                outcome.warnings.push(stored);
            }
            flags.push(flag.clone());
        }

        for warning in &outcome.warnings {
            warn!("{}", warning);
        }

        if !flags.is_empty() {
            flags.sort();
            let rule = Rule::new(atom, &flags);
            rules.push(rule.clone());
            outcome.new_rule = Some(rule);
        }

        outcome
    }
}

/// Whether disabling `requested` removes `stored`; `gtk` also removes `-gtk`.
fn disables(requested: &str, stored: &str) -> bool {
    stored == requested || stored.strip_prefix(FLAG_MODIFIERS) == Some(requested)
}

/// A case-only mismatch between `flag` and the stored flags
fn case_match(flags: &[String], flag: &str) -> Option<FlagWarning> {
    let known: CiList = flags.iter().map(String::as_str).collect();
    known.find(flag).map(|stored| FlagWarning::CaseMismatch {
        requested: flag.to_string(),
        stored: stored.to_string(),
    })
}

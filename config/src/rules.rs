//! Rules and rule sets
//!
//! A rule is one line of a package file: an atom followed by its flags,
//! e.g. `>=media-libs/libgd-1.6 png -jpeg`. Comments and blank lines are
//! not rules and never survive a load.

use std::fmt;

/// A single rule line, stored without its trailing newline
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rule {
    line: String,
}

impl Rule {
    /// Build a rule from a raw line. Returns `None` for blank lines and comments.
    ///
    /// Surrounding whitespace is dropped, so an indented line matches its atom.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        Some(Self {
            line: line.to_string(),
        })
    }

    /// Build a rule from an atom and its flags
    pub fn new<S: AsRef<str>>(atom: &str, flags: &[S]) -> Self {
        let mut line = atom.to_string();
        for flag in flags {
            line.push(' ');
            line.push_str(flag.as_ref());
        }
        Self { line }
    }

    /// The atom, i.e. the first token of the line
    pub fn atom(&self) -> &str {
        self.line.split_whitespace().next().unwrap_or_default()
    }

    /// Flags following the atom
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.line.split_whitespace().skip(1)
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Whether this rule belongs to `atom`
    pub fn matches(&self, atom: &str) -> bool {
        self.atom() == atom
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// The rules of a package file, in load order until sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file content, dropping blank lines and comments
    pub fn parse(content: &str) -> Self {
        content.lines().filter_map(Rule::parse).collect()
    }

    /// Append a rule
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Append every rule of `other`
    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    /// Remove and return the rule for `atom`, if any
    pub fn take(&mut self, atom: &str) -> Option<Rule> {
        let idx = self.rules.iter().position(|rule| rule.matches(atom))?;
        Some(self.rules.remove(idx))
    }

    /// Check whether a bare line equal to `line` exists
    pub fn contains_line(&self, line: &str) -> bool {
        self.rules.iter().any(|rule| rule.as_str() == line)
    }

    /// Remove the rule whose line is exactly `line`
    pub fn remove_line(&mut self, line: &str) -> bool {
        match self.rules.iter().position(|rule| rule.as_str() == line) {
            Some(idx) => {
                self.rules.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn sort(&mut self) {
        self.rules.sort();
    }

    /// A sorted copy of the rules
    pub fn sorted(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self.rules.iter().collect();
        rules.sort();
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule lines, without newlines
    pub fn lines(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::as_str).collect()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

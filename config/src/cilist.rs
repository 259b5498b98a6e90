//! Case-insensitive string list

/// A list of strings whose membership test ignores case.
///
/// Entries keep their original spelling; only `contains`/`find` compare
/// upper-cased forms of both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiList {
    items: Vec<String>,
}

impl CiList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Check membership, ignoring case
    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// Find the stored spelling of `value`, ignoring case
    pub fn find(&self, value: &str) -> Option<&str> {
        let wanted = value.to_uppercase();
        self.items
            .iter()
            .find(|item| item.to_uppercase() == wanted)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CiList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

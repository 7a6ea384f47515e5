use crate::types::Value;

/// An ordered column → value mapping.
///
/// Used for equality filters, `LIKE` filters and `SET` assignments alike.
/// Entries keep insertion order, and that order decides the order of the
/// generated fragments and of their parameters.
///
/// # Example
/// ```
/// use sqlgate::prelude::*;
///
/// let mut clause = Clause::new();
/// clause.insert("status", "active");
/// clause.insert("owner_id", 7);
/// assert_eq!(clause.keys().collect::<Vec<_>>(), ["status", "owner_id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clause {
    entries: Vec<(String, Value)>,
}

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`. Re-inserting an existing column replaces its
    /// value in place and returns the previous one.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((column, value));
                None
            }
        }
    }

    /// Builder-style [`Clause::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Clause {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut clause = Clause::new();
        for (column, value) in iter {
            clause.insert(column, value);
        }
        clause
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
        })
    }
}

/// A single join against the base table of a `SELECT`.
///
/// `on` is written into the statement verbatim and is never parameterized,
/// so it must not carry untrusted input.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub join_type: JoinType,
    pub on: String,
    /// Columns of the joined table added to the projection.
    pub columns: Vec<String>,
}

impl Join {
    pub fn new(join_type: JoinType, table: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            join_type,
            on: on.into(),
            columns: Vec::new(),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

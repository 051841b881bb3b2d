//! Human-readable record of structural changes made by one reconciliation.

use std::fmt;

/// One structural change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// A resource was created.
    Added { name: String },
    /// A top-level resource (and its whole subtree) was removed.
    Deleted { name: String },
    /// A direct child of a retained top-level resource was removed.
    DeletedChild { parent: String, child: String },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { name } => write!(f, " - add - {name}"),
            Change::Deleted { name } => write!(f, " - delete - {name} - *"),
            Change::DeletedChild { parent, child } => write!(f, " - delete - {parent} - {child}"),
        }
    }
}

/// Ordered list of changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeLog {
    changes: Vec<Change>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(&mut self, name: impl Into<String>) {
        self.push(Change::Added { name: name.into() });
    }

    pub fn deleted(&mut self, name: impl Into<String>) {
        self.push(Change::Deleted { name: name.into() });
    }

    pub fn deleted_child(&mut self, parent: impl Into<String>, child: impl Into<String>) {
        self.push(Change::DeletedChild {
            parent: parent.into(),
            child: child.into(),
        });
    }

    fn push(&mut self, change: Change) {
        tracing::debug!("{change}");
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Added { .. }))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.len() - self.additions()
    }

    /// Report lines, one per change.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.changes.iter().map(Change::to_string)
    }
}

/// Newline-terminated report, one line per change.
impl fmt::Display for ChangeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            writeln!(f, "{change}")?;
        }
        Ok(())
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::action::Precedences;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

/// One ambiguous decision taken by the resolver.
///
/// Two conflicts are equal when their text is equal; the kind is only kept
/// for the summary line of [`report`].
#[derive(Debug, Clone)]
pub struct Conflict {
    kind: ConflictKind,
    description: String,
}

impl Conflict {
    pub fn shift_reduce(lookahead: &str, shift: &Precedences, reduce_symbol: &str, reduce: i32) -> Conflict {
        Conflict {
            kind: ConflictKind::ShiftReduce,
            description: format!("{}: shift (precedence {}) / reduce {} (precedence {})", lookahead, shift, reduce_symbol, reduce),
        }
    }
    /// `candidate` is always named first.
    pub fn reduce_reduce(lookahead: &str, candidate: &str, existing: &str, precedence: i32) -> Conflict {
        Conflict {
            kind: ConflictKind::ReduceReduce,
            description: format!("{}: reduce {} (precedence {}) / reduce {} (precedence {})", lookahead, candidate, precedence, existing, precedence),
        }
    }
    pub fn kind(&self) -> ConflictKind {
        self.kind
    }
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Conflict {
    fn eq(&self, other: &Conflict) -> bool {
        self.description == other.description
    }
}

impl Eq for Conflict {}

impl Hash for Conflict {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
    }
}

impl PartialEq<str> for Conflict {
    fn eq(&self, other: &str) -> bool {
        self.description == other
    }
}

impl PartialEq<&str> for Conflict {
    fn eq(&self, other: &&str) -> bool {
        self.description == *other
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Renders the warning shown to the grammar author after the tables are built.
pub fn report(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return String::new();
    }
    let sr = conflicts.iter().filter(|c| c.kind == ConflictKind::ShiftReduce).count();
    let rr = conflicts.len() - sr;
    let plural = if conflicts.len() == 1 { "" } else { "s" };
    let mut out = format!("{} parsing conflict{} ({} shift/reduce, {} reduce/reduce):\n", conflicts.len(), plural, sr, rr);
    for c in conflicts {
        out.push_str("    ");
        out.push_str(&c.description);
        out.push('\n');
    }
    out
}

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::grammar::Symbol;

pub type StateId = usize;

//What the lexer does in one cell of the lex table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LexAction {
    Error,              //No token can be recognized from here
    Advance(StateId),   //Keep consuming input
    Accept(Symbol),     //The input consumed so far is this token
}

impl fmt::Display for LexAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexAction::Error => f.write_str("error"),
            LexAction::Advance(state) => write!(f, "advance {}", state),
            LexAction::Accept(sym) => write!(f, "accept {}", sym),
        }
    }
}

/// The precedence values of every item that justifies a shift.
///
/// Never empty. Iteration and display are in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Precedences(BTreeSet<i32>);

impl Precedences {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Option<Precedences> {
        let set: BTreeSet<i32> = values.into_iter().collect();
        if set.is_empty() {
            None
        } else {
            Some(Precedences(set))
        }
    }
    pub fn single(value: i32) -> Precedences {
        Precedences(BTreeSet::from([value]))
    }
    pub fn min(&self) -> i32 {
        self.0.first().copied().unwrap_or_default()
    }
    pub fn max(&self) -> i32 {
        self.0.last().copied().unwrap_or_default()
    }
    pub fn contains(&self, value: i32) -> bool {
        self.0.contains(&value)
    }
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Precedences {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

//What the parser does in one cell of the parse table, for one lookahead
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseAction {
    Error,
    Shift {
        state: StateId,
        precedences: Precedences,   //One value per item asking for this shift
    },
    Reduce {
        symbol: Symbol,     //The symbol produced
        count: usize,       //Number of stack symbols popped
        precedence: i32,    //Precedence declared on the production
    },
}

impl ParseAction {
    pub fn shift(state: StateId, precedences: impl IntoIterator<Item = i32>) -> Result<ParseAction> {
        let precedences = Precedences::new(precedences).ok_or(Error::EmptyPrecedence { state })?;
        Ok(ParseAction::Shift { state, precedences })
    }
    pub fn reduce(symbol: Symbol, count: isize, precedence: i32) -> Result<ParseAction> {
        let count = usize::try_from(count).map_err(|_| Error::NegativeSymbolCount {
            symbol: symbol.name().to_string(),
            count,
        })?;
        Ok(ParseAction::Reduce { symbol, count, precedence })
    }
}

impl fmt::Display for ParseAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseAction::Error => f.write_str("error"),
            ParseAction::Shift { state, precedences } => {
                write!(f, "shift {} (precedence {})", state, precedences)
            }
            ParseAction::Reduce { symbol, count, precedence } => {
                write!(f, "reduce {} x{} (precedence {})", symbol, count, precedence)
            }
        }
    }
}

use thiserror::Error;

use crate::grammar::Symbol;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("shift to state {state} must carry at least one precedence value")]
    EmptyPrecedence { state: usize },
    #[error("reduce to `{symbol}` cannot pop a negative number of symbols ({count})")]
    NegativeSymbolCount { symbol: String, count: isize },
    #[error("unknown {} `{}`: no display name and no declaration", .0.kind(), .0.name())]
    UnknownSymbol(Symbol),
}

pub type Result<T> = std::result::Result<T, Error>;

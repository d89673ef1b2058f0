//! Conflict resolution for generated parse and lex tables.
//!
//! The table builder calls a [`ConflictManager`] every time a cell receives a second
//! candidate action; the manager says whether the candidate replaces the action already
//! there, and keeps a list of the decisions that precedence and declaration order could
//! not settle, to be reported to the grammar author with [`report`].
//!
//! Grammars are usually written with the [`grammar!`] macro:
//!
//! ```
//! use tiebreak::*;
//!
//! let g = grammar! {
//!     rule1 ::= rule2 token2;
//!     rule2 ::= token1;
//!     token1 = "[a-c]";
//!     token2 = "[b-d]";
//! };
//! let mut manager = g.conflict_manager();
//! let shift = ParseAction::shift(2, vec![0])?;
//! let reduce = ParseAction::reduce(Symbol::rule("rule2"), 1, 0)?;
//! assert!(manager.resolve_parse_action(&Symbol::rule("rule1"), &reduce, &shift)?);
//! assert_eq!(manager.conflicts(), ["rule1: shift (precedence 0) / reduce rule2 (precedence 0)"]);
//! # Ok::<(), tiebreak::Error>(())
//! ```
extern crate self as tiebreak;

mod action;
mod conflict;
mod error;
mod grammar;
mod manager;

pub use action::{LexAction, ParseAction, Precedences, StateId};
pub use conflict::{report, Conflict, ConflictKind};
pub use error::{Error, Result};
pub use grammar::{Grammar, GrammarSet, Rule, Symbol, SymbolKind, SymbolNames};
pub use manager::{merge_conflicts, ConflictManager, Options};

/// Builds a [`GrammarSet`] from grammar source.
///
/// ```text
/// %alias sym "display name";
/// rule ::= sym1 sym2 | sym3 | ;
/// token = "regex";
/// ```
///
/// Rules and tokens keep their declaration order, which decides every tie.
pub use tiebreak_impl::grammar;

#[cfg(test)]
mod tests;

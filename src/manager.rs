use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::action::{LexAction, ParseAction, Precedences};
use crate::conflict::{self, Conflict};
use crate::error::{Error, Result};
use crate::grammar::{Grammar, Symbol, SymbolKind, SymbolNames};

#[derive(Debug, Copy, Clone, Default)]
pub struct Options {
    dedup_reduce_reduce: bool,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }
    /// Suppress repeated reduce/reduce texts the same way repeated shift/reduce texts
    /// always are. Off by default: every reduce/reduce call is recorded.
    pub fn dedup_reduce_reduce(mut self, dedup: bool) -> Options {
        self.dedup_reduce_reduce = dedup;
        self
    }
}

enum Winner {
    Shift,
    Reduce,
    Ambiguous,
}

fn shift_reduce_winner(shift: &Precedences, reduce: i32) -> Winner {
    if shift.min() > reduce {
        Winner::Shift
    } else if shift.max() < reduce {
        Winner::Reduce
    } else {
        Winner::Ambiguous
    }
}

/// Decides which of two competing actions keeps a table cell, and logs the
/// decisions precedence could not settle.
///
/// Create one per table generation run. It is not shared between threads: parallel
/// builders use one each and combine the results with [`merge_conflicts`].
#[derive(Debug)]
pub struct ConflictManager<'g> {
    syntax: &'g Grammar,
    lexical: &'g Grammar,
    names: SymbolNames,
    options: Options,
    conflicts: Vec<Conflict>,
    recorded: HashSet<Conflict>,    //Same texts as `conflicts`, for duplicate checks
}

impl<'g> ConflictManager<'g> {
    pub fn new(syntax: &'g Grammar, lexical: &'g Grammar, names: SymbolNames) -> ConflictManager<'g> {
        ConflictManager::with_options(syntax, lexical, names, Options::default())
    }

    pub fn with_options(syntax: &'g Grammar, lexical: &'g Grammar, names: SymbolNames, options: Options) -> ConflictManager<'g> {
        ConflictManager {
            syntax,
            lexical,
            names,
            options,
            conflicts: Vec::new(),
            recorded: HashSet::new(),
        }
    }

    /// Returns true if `candidate` should replace `existing` in the lex table.
    ///
    /// Lexical ambiguities are settled by declaration order and longest match and are
    /// never recorded as conflicts.
    pub fn resolve_lex_action(&self, existing: &LexAction, candidate: &LexAction) -> bool {
        use LexAction::*;
        let update = match (existing, candidate) {
            (Error, Error) => false,
            (Error, _) => true,
            (_, Error) => false,
            (Accept(old), Accept(new)) => self.order_key(new) < self.order_key(old),
            //Longest match: a state that can still consume input beats accepting now
            (Advance(_), Accept(_)) => false,
            (Accept(_), Advance(_)) => true,
            (Advance(old), Advance(new)) => {
                if old != new {
                    warn!("lex cell advances to both state {} and state {}, keeping {}", old, new, old);
                }
                false
            }
        };
        trace!("lex: {} vs {} -> {}", existing, candidate, if update { "replace" } else { "keep" });
        update
    }

    /// Returns true if `candidate` should replace `existing` in the parse table for
    /// `lookahead`. Ambiguous decisions are appended to [`conflicts`](Self::conflicts).
    ///
    /// Fails only when a conflict has to name a symbol that has neither a display
    /// name nor a declaration.
    pub fn resolve_parse_action(&mut self, lookahead: &Symbol, existing: &ParseAction, candidate: &ParseAction) -> Result<bool> {
        use ParseAction::*;
        if existing == candidate {
            return Ok(false);
        }
        let update = match (existing, candidate) {
            (Error, _) => true,
            (_, Error) => false,
            (Shift { precedences, .. }, Reduce { symbol, precedence, .. }) => {
                match shift_reduce_winner(precedences, *precedence) {
                    Winner::Shift => false,
                    Winner::Reduce => true,
                    Winner::Ambiguous => {
                        self.record_shift_reduce(lookahead, precedences, symbol, *precedence)?;
                        false
                    }
                }
            }
            (Reduce { symbol, precedence, .. }, Shift { precedences, .. }) => {
                match shift_reduce_winner(precedences, *precedence) {
                    Winner::Shift => true,
                    Winner::Reduce => false,
                    Winner::Ambiguous => {
                        self.record_shift_reduce(lookahead, precedences, symbol, *precedence)?;
                        true
                    }
                }
            }
            (Reduce { symbol: old_sym, precedence: old_prec, .. }, Reduce { symbol: new_sym, precedence: new_prec, .. }) => {
                if old_prec != new_prec {
                    new_prec > old_prec
                } else {
                    self.record_reduce_reduce(lookahead, new_sym, old_sym, *new_prec)?;
                    self.order_key(new_sym) < self.order_key(old_sym)
                }
            }
            (Shift { state: old, .. }, Shift { state: new, .. }) => {
                if old != new {
                    warn!("{}: shift to both state {} and state {}, keeping {}", lookahead, old, new, old);
                }
                false
            }
        };
        trace!("{}: {} vs {} -> {}", lookahead, existing, candidate, if update { "replace" } else { "keep" });
        Ok(update)
    }

    /// The name used for `symbol` in diagnostics: its alias if one was given,
    /// otherwise the declared name.
    pub fn display_name(&self, symbol: &Symbol) -> Result<&str> {
        if let Some(name) = self.names.get(symbol) {
            return Ok(name.as_str());
        }
        let grammar = self.grammar_of(symbol);
        match grammar.order_index(symbol) {
            Some(i) => Ok(grammar.definitions()[i].0.name()),
            None => Err(Error::UnknownSymbol(symbol.clone())),
        }
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
    pub fn into_conflicts(self) -> Vec<Conflict> {
        self.conflicts
    }
    pub fn report(&self) -> String {
        conflict::report(&self.conflicts)
    }

    fn grammar_of(&self, symbol: &Symbol) -> &'g Grammar {
        match symbol.kind() {
            SymbolKind::Rule => self.syntax,
            SymbolKind::Token => self.lexical,
        }
    }

    //Undeclared symbols sort after every declared one, and tie with each other
    fn order_key(&self, symbol: &Symbol) -> usize {
        self.grammar_of(symbol).order_index(symbol).unwrap_or(usize::MAX)
    }

    fn record_shift_reduce(&mut self, lookahead: &Symbol, shift: &Precedences, reduce_sym: &Symbol, reduce: i32) -> Result<()> {
        let c = Conflict::shift_reduce(self.display_name(lookahead)?, shift, self.display_name(reduce_sym)?, reduce);
        self.push_conflict(c, true);
        Ok(())
    }

    fn record_reduce_reduce(&mut self, lookahead: &Symbol, candidate: &Symbol, existing: &Symbol, precedence: i32) -> Result<()> {
        let c = Conflict::reduce_reduce(self.display_name(lookahead)?, self.display_name(candidate)?, self.display_name(existing)?, precedence);
        self.push_conflict(c, self.options.dedup_reduce_reduce);
        Ok(())
    }

    fn push_conflict(&mut self, c: Conflict, dedup: bool) {
        let new = self.recorded.insert(c.clone());
        if dedup && !new {
            debug!("conflict already recorded: {}", c);
            return;
        }
        debug!("conflict: {}", c);
        self.conflicts.push(c);
    }
}

/// Joins the conflict lists of several managers, ordering the parts by `key`
/// (e.g. the index of the first state each worker built). Each list keeps its own order.
pub fn merge_conflicts<K: Ord>(parts: impl IntoIterator<Item = (K, Vec<Conflict>)>) -> Vec<Conflict> {
    let mut parts: Vec<_> = parts.into_iter().collect();
    parts.sort_by(|a, b| a.0.cmp(&b.0));
    parts.into_iter().flat_map(|(_, cs)| cs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rule;

    fn grammars() -> (Grammar, Grammar) {
        let syntax = Grammar::syntax(vec![
            ("expr", Rule::sym(Symbol::token("num"))),
            ("term", Rule::sym(Symbol::token("num"))),
        ]);
        let lexical = Grammar::lexical(vec![
            ("num", Rule::pattern("[0-9]+")),
        ]);
        (syntax, lexical)
    }

    #[test]
    fn aliases_and_declared_names() {
        let (syntax, lexical) = grammars();
        let mut names = SymbolNames::new();
        names.insert(Symbol::rule("term"), "_term".to_string());
        let manager = ConflictManager::new(&syntax, &lexical, names);
        assert_eq!(manager.display_name(&Symbol::rule("term")), Ok("_term"));
        assert_eq!(manager.display_name(&Symbol::rule("expr")), Ok("expr"));
        assert_eq!(manager.display_name(&Symbol::token("num")), Ok("num"));
        assert_eq!(manager.display_name(&Symbol::token("expr")), Err(Error::UnknownSymbol(Symbol::token("expr"))));
    }

    #[test]
    fn unknown_symbol_fails_when_rendered() {
        let (syntax, lexical) = grammars();
        let mut manager = ConflictManager::new(&syntax, &lexical, SymbolNames::new());
        let shift = ParseAction::shift(1, vec![0]).unwrap();
        let reduce = ParseAction::reduce(Symbol::rule("expr"), 1, 0).unwrap();
        let res = manager.resolve_parse_action(&Symbol::token("plus"), &shift, &reduce);
        assert_eq!(res, Err(Error::UnknownSymbol(Symbol::token("plus"))));
        assert!(!manager.has_conflicts());
        //No conflict to render, no lookup
        let reduce = ParseAction::reduce(Symbol::rule("expr"), 1, 5).unwrap();
        assert_eq!(manager.resolve_parse_action(&Symbol::token("plus"), &shift, &reduce), Ok(true));
    }

    #[test]
    fn shift_shift_keeps_existing() {
        let (syntax, lexical) = grammars();
        let mut manager = ConflictManager::new(&syntax, &lexical, SymbolNames::new());
        let a = ParseAction::shift(1, vec![0]).unwrap();
        let b = ParseAction::shift(2, vec![9]).unwrap();
        assert_eq!(manager.resolve_parse_action(&Symbol::token("num"), &a, &b), Ok(false));
        assert_eq!(manager.resolve_parse_action(&Symbol::token("num"), &b, &a), Ok(false));
        assert!(!manager.has_conflicts());
    }

    #[test]
    fn advance_advance_keeps_existing() {
        let (syntax, lexical) = grammars();
        let manager = ConflictManager::new(&syntax, &lexical, SymbolNames::new());
        assert!(!manager.resolve_lex_action(&LexAction::Advance(1), &LexAction::Advance(2)));
        assert!(!manager.resolve_lex_action(&LexAction::Advance(2), &LexAction::Advance(1)));
        assert!(!manager.resolve_lex_action(&LexAction::Error, &LexAction::Error));
    }

    #[test]
    fn optional_reduce_reduce_dedup() {
        let (syntax, lexical) = grammars();
        let expr = ParseAction::reduce(Symbol::rule("expr"), 1, 0).unwrap();
        let term = ParseAction::reduce(Symbol::rule("term"), 1, 0).unwrap();
        let num = Symbol::token("num");

        let mut manager = ConflictManager::new(&syntax, &lexical, SymbolNames::new());
        for _ in 0..2 {
            assert_eq!(manager.resolve_parse_action(&num, &expr, &term), Ok(false));
        }
        assert_eq!(manager.conflicts().len(), 2);

        let options = Options::new().dedup_reduce_reduce(true);
        let mut manager = ConflictManager::with_options(&syntax, &lexical, SymbolNames::new(), options);
        for _ in 0..2 {
            assert_eq!(manager.resolve_parse_action(&num, &expr, &term), Ok(false));
        }
        assert_eq!(manager.conflicts(), ["num: reduce term (precedence 0) / reduce expr (precedence 0)"]);
    }

    #[test]
    fn duplicates_found_anywhere_in_the_list() {
        let (syntax, lexical) = grammars();
        let mut manager = ConflictManager::new(&syntax, &lexical, SymbolNames::new());
        let num = Symbol::token("num");
        let shift = ParseAction::shift(1, vec![0, 2]).unwrap();
        let expr = ParseAction::reduce(Symbol::rule("expr"), 1, 0).unwrap();
        let term = ParseAction::reduce(Symbol::rule("term"), 1, 0).unwrap();
        let term_high = ParseAction::reduce(Symbol::rule("term"), 1, 2).unwrap();

        assert_eq!(manager.resolve_parse_action(&num, &shift, &expr), Ok(false));
        assert_eq!(manager.resolve_parse_action(&num, &expr, &term), Ok(false));
        assert_eq!(manager.resolve_parse_action(&num, &term_high, &shift), Ok(true));
        assert_eq!(manager.resolve_parse_action(&num, &expr, &term), Ok(false));
        assert_eq!(manager.resolve_parse_action(&num, &expr, &shift), Ok(true));
        assert_eq!(manager.resolve_parse_action(&num, &shift, &term_high), Ok(false));
        assert_eq!(manager.conflicts(), [
            "num: shift (precedence 0, 2) / reduce expr (precedence 0)",
            "num: reduce term (precedence 0) / reduce expr (precedence 0)",
            "num: shift (precedence 0, 2) / reduce term (precedence 2)",
            "num: reduce term (precedence 0) / reduce expr (precedence 0)",
        ]);
    }

    #[test]
    fn merge_orders_by_key() {
        let one = Precedences::single(1);
        let a = Conflict::shift_reduce("a", &one, "x", 1);
        let b = Conflict::shift_reduce("b", &one, "x", 1);
        let c = Conflict::shift_reduce("c", &one, "x", 1);
        let merged = merge_conflicts(vec![(7, vec![c.clone()]), (2, vec![a.clone(), b.clone()]), (5, vec![])]);
        assert_eq!(merged, [a, b, c]);
    }
}

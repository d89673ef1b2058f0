use std::collections::HashMap;
use std::fmt;

use crate::manager::{ConflictManager, Options};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Rule,
    Token,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolKind::Rule => f.write_str("rule"),
            SymbolKind::Token => f.write_str("token"),
        }
    }
}

/// A syntax rule or a lexical token, identified by name.
///
/// The declaration order used for tie-breaks is not stored here: it belongs to the
/// [`Grammar`] that declares the symbol, and is looked up with [`Grammar::order_index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    kind: SymbolKind,
    name: String,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Symbol {
        Symbol { kind, name: name.into() }
    }
    pub fn rule(name: impl Into<String>) -> Symbol {
        Symbol::new(SymbolKind::Rule, name)
    }
    pub fn token(name: impl Into<String>) -> Symbol {
        Symbol::new(SymbolKind::Token, name)
    }
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Definition of a rule or token. The resolver never looks inside these, they are
/// kept so the grammar can be handed on to the table builder unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Blank,
    Symbol(Symbol),
    Pattern(String),
    Seq(Vec<Rule>),
    Choice(Vec<Rule>),
}

impl Rule {
    pub fn sym(symbol: Symbol) -> Rule {
        Rule::Symbol(symbol)
    }
    pub fn pattern(regex: impl Into<String>) -> Rule {
        Rule::Pattern(regex.into())
    }
    pub fn seq(rules: impl IntoIterator<Item = Rule>) -> Rule {
        Rule::collapse(rules.into_iter().collect(), Rule::Seq)
    }
    pub fn choice(rules: impl IntoIterator<Item = Rule>) -> Rule {
        Rule::collapse(rules.into_iter().collect(), Rule::Choice)
    }

    fn collapse(mut rules: Vec<Rule>, wrap: fn(Vec<Rule>) -> Rule) -> Rule {
        match rules.len() {
            0 => Rule::Blank,
            1 => rules.pop().unwrap_or(Rule::Blank),
            _ => wrap(rules),
        }
    }

    /// Every symbol referenced by this definition, left to right, with repetitions.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut res = Vec::new();
        self.collect_symbols(&mut res);
        res
    }

    fn collect_symbols<'a>(&'a self, res: &mut Vec<&'a Symbol>) {
        match self {
            Rule::Blank | Rule::Pattern(_) => {}
            Rule::Symbol(s) => res.push(s),
            Rule::Seq(rs) | Rule::Choice(rs) => {
                for r in rs {
                    r.collect_symbols(res);
                }
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rule::Blank => f.write_str("<blank>"),
            Rule::Symbol(s) => write!(f, "{}", s),
            Rule::Pattern(p) => write!(f, "/{}/", p),
            Rule::Seq(rs) | Rule::Choice(rs) => {
                let sep = if let Rule::Seq(_) = self { " " } else { " | " };
                for (i, r) in rs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    match r {
                        Rule::Seq(_) | Rule::Choice(_) => write!(f, "({})", r)?,
                        _ => write!(f, "{}", r)?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// An ordered list of definitions, either all syntax rules or all lexical tokens.
///
/// The order is exactly the declaration order: nothing is sorted or deduplicated. Each
/// distinct name gets the position of its first definition as its order index, computed
/// once here.
#[derive(Debug, Clone)]
pub struct Grammar {
    kind: SymbolKind,
    definitions: Vec<(Symbol, Rule)>,
    order: HashMap<String, usize>,
}

impl Grammar {
    pub fn new<S: Into<String>>(kind: SymbolKind, definitions: impl IntoIterator<Item = (S, Rule)>) -> Grammar {
        let definitions: Vec<_> = definitions
            .into_iter()
            .map(|(name, rule)| (Symbol::new(kind, name), rule))
            .collect();
        let mut order = HashMap::new();
        for (i, (sym, _)) in definitions.iter().enumerate() {
            order.entry(sym.name.clone()).or_insert(i);
        }
        Grammar { kind, definitions, order }
    }
    pub fn syntax<S: Into<String>>(definitions: impl IntoIterator<Item = (S, Rule)>) -> Grammar {
        Grammar::new(SymbolKind::Rule, definitions)
    }
    pub fn lexical<S: Into<String>>(definitions: impl IntoIterator<Item = (S, Rule)>) -> Grammar {
        Grammar::new(SymbolKind::Token, definitions)
    }
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }
    pub fn definitions(&self) -> &[(Symbol, Rule)] {
        &self.definitions
    }
    pub fn len(&self) -> usize {
        self.definitions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
    pub fn order_index(&self, symbol: &Symbol) -> Option<usize> {
        if symbol.kind != self.kind {
            return None;
        }
        self.order.get(&symbol.name).copied()
    }
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.order_index(symbol).is_some()
    }
    /// Distinct symbols in order of first declaration.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.definitions
            .iter()
            .enumerate()
            .filter(move |(i, (s, _))| self.order.get(&s.name) == Some(i))
            .map(|(_, (s, _))| s)
    }
}

/// Display names used in diagnostics, when they differ from the declared name.
pub type SymbolNames = HashMap<Symbol, String>;

/// The syntax grammar, the lexical grammar and the display names of one language:
/// everything a [`ConflictManager`] is bound to.
#[derive(Debug, Clone)]
pub struct GrammarSet {
    pub syntax: Grammar,
    pub lexical: Grammar,
    pub names: SymbolNames,
}

impl GrammarSet {
    pub fn new(syntax: Grammar, lexical: Grammar, names: SymbolNames) -> GrammarSet {
        GrammarSet { syntax, lexical, names }
    }
    pub fn conflict_manager(&self) -> ConflictManager<'_> {
        self.conflict_manager_with(Options::default())
    }
    pub fn conflict_manager_with(&self, options: Options) -> ConflictManager<'_> {
        ConflictManager::with_options(&self.syntax, &self.lexical, self.names.clone(), options)
    }
}

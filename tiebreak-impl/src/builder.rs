use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use crate::decl::*;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Kind {
    Rule,
    Token,
}

fn error_span<T>(span: Span, msg: &'static str) -> syn::Result<T> {
    Err(syn::Error::new(span, msg))
}

//Declarations of one grammar, in source order
#[derive(Debug)]
pub struct Builder {
    rules: Vec<(Ident, Vec<Vec<Ident>>)>,
    tokens: Vec<(Ident, LitStr)>,
    aliases: Vec<(Ident, LitStr)>,
    kinds: HashMap<String, Kind>,
}

impl Builder {
    pub fn new_from_decls(decls: Vec<Decl>) -> syn::Result<Builder> {
        let mut b = Builder {
            rules: Vec::new(),
            tokens: Vec::new(),
            aliases: Vec::new(),
            kinds: HashMap::new(),
        };
        for decl in decls {
            b.parse_one_decl(decl)?;
        }
        b.check_references()?;
        Ok(b)
    }

    fn parse_one_decl(&mut self, decl: Decl) -> syn::Result<()> {
        match decl {
            Decl::Alias(id, name) => {
                self.aliases.push((id, name));
            }
            Decl::Rule { lhs, alternatives } => {
                self.define(&lhs, Kind::Rule)?;
                //Repeated definitions are kept: only the first one sets the order
                self.rules.push((lhs, alternatives));
            }
            Decl::Token { name, pattern } => {
                if pattern.value().is_empty() {
                    return error_span(pattern.span(), "Token pattern must not be empty"); //tested
                }
                self.define(&name, Kind::Token)?;
                self.tokens.push((name, pattern));
            }
        }
        Ok(())
    }

    fn define(&mut self, id: &Ident, kind: Kind) -> syn::Result<()> {
        match self.kinds.get(&id.to_string()) {
            Some(k) if *k != kind => error_span(id.span(), "Symbol defined both as rule and token"), //tested
            _ => {
                self.kinds.insert(id.to_string(), kind);
                Ok(())
            }
        }
    }

    fn check_references(&self) -> syn::Result<()> {
        for (_, alternatives) in &self.rules {
            for id in alternatives.iter().flatten() {
                if !self.kinds.contains_key(&id.to_string()) {
                    return error_span(id.span(), "Undefined symbol"); //tested
                }
            }
        }
        let mut seen = Vec::new();
        for (id, _) in &self.aliases {
            let name = id.to_string();
            if !self.kinds.contains_key(&name) {
                return error_span(id.span(), "Alias for an undefined symbol"); //tested
            }
            if seen.contains(&name) {
                return error_span(id.span(), "Duplicate alias"); //tested
            }
            seen.push(name);
        }
        Ok(())
    }

    fn symbol(&self, id: &Ident) -> TokenStream {
        let name = id.to_string();
        match self.kinds.get(&name) {
            Some(Kind::Token) => quote!(::tiebreak::Symbol::token(#name)),
            _ => quote!(::tiebreak::Symbol::rule(#name)),
        }
    }

    pub fn build(&self) -> syn::Result<TokenStream> {
        let rules = self.rules.iter().map(|(lhs, alternatives)| {
            let name = lhs.to_string();
            let alternatives = alternatives.iter().map(|seq| {
                let syms = seq.iter().map(|id| self.symbol(id));
                quote!(::tiebreak::Rule::seq(::std::vec![#(::tiebreak::Rule::sym(#syms)),*]))
            });
            quote!((#name, ::tiebreak::Rule::choice(::std::vec![#(#alternatives),*])))
        });
        let tokens = self.tokens.iter().map(|(name, pattern)| {
            let name = name.to_string();
            quote!((#name, ::tiebreak::Rule::pattern(#pattern)))
        });
        let aliases = self.aliases.iter().map(|(id, display)| {
            let sym = self.symbol(id);
            quote!(names.insert(#sym, ::std::string::String::from(#display));)
        });

        let expanded = quote! {
            {
                let rules: ::std::vec::Vec<(&str, ::tiebreak::Rule)> = ::std::vec![#(#rules),*];
                let tokens: ::std::vec::Vec<(&str, ::tiebreak::Rule)> = ::std::vec![#(#tokens),*];
                #[allow(unused_mut)]
                let mut names = ::tiebreak::SymbolNames::new();
                #(#aliases)*
                ::tiebreak::GrammarSet::new(
                    ::tiebreak::Grammar::syntax(rules),
                    ::tiebreak::Grammar::lexical(tokens),
                    names,
                )
            }
        };
        Ok(expanded)
    }
}

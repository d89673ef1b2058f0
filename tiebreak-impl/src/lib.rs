extern crate proc_macro;
extern crate proc_macro2;
#[macro_use]
extern crate syn;
#[macro_use]
extern crate quote;

mod decl;
mod builder;

use decl::*;

use syn::parse::{Parse, Result, Error, ParseStream};

#[proc_macro]
pub fn grammar(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let Decls(decls) = parse_macro_input!(input);
    let expanded = builder::Builder::new_from_decls(decls).and_then(|b| b.build());

    match expanded {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct Decls(Vec<Decl>);

impl Parse for Decls {
    fn parse(input: ParseStream) -> Result<Decls> {
        let mut decls = Vec::new();
        while !input.is_empty() {
            decls.push(input.parse()?);
        }
        Ok(Decls(decls))
    }
}

mod kw {
    custom_keyword!(alias);
}

impl Parse for Decl {
    fn parse(input: ParseStream) -> Result<Decl> {
        if input.peek(Token![%]) {
            input.parse::<Token![%]>()?;
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::alias) {
                // %alias id "name";
                input.parse::<kw::alias>()?;
                let id = input.parse()?;
                let name = input.parse()?;
                input.parse::<Token![;]>()?;
                Ok(Decl::Alias(id, name))
            } else {
                Err(lookahead.error())
            }
        } else {
            let name = input.parse::<Ident>().map_err(|e| Error::new(e.span(), "% or identifier expected"))?;
            if input.peek(Token![::]) {
                // rule: id ::= id1 id2 ... | id3 ... ;
                input.parse::<Token![::]>()?;
                input.parse::<Token![=]>()?;
                let mut alternatives = vec![Vec::new()];
                loop {
                    if input.peek(Token![;]) {
                        input.parse::<Token![;]>()?;
                        break;
                    }
                    if input.peek(Token![|]) {
                        input.parse::<Token![|]>()?;
                        alternatives.push(Vec::new());
                        continue;
                    }
                    let sym = input.parse::<Ident>().map_err(|e| Error::new(e.span(), "symbol, `|` or `;` expected"))?;
                    if let Some(seq) = alternatives.last_mut() {
                        seq.push(sym);
                    }
                }
                Ok(Decl::Rule {
                    lhs: name,
                    alternatives,
                })
            } else if input.peek(Token![=]) {
                // token: id = "regex";
                input.parse::<Token![=]>()?;
                let pattern = input.parse()?;
                input.parse::<Token![;]>()?;
                Ok(Decl::Token {
                    name,
                    pattern,
                })
            } else {
                Err(input.error("`::=` or `=` expected"))
            }
        }
    }
}

pub use syn::{Ident, LitStr};

#[derive(Debug)]
pub enum Decl {
    Alias(Ident, LitStr),
    Rule {
        lhs: Ident,
        alternatives: Vec<Vec<Ident>>,
    },
    Token {
        name: Ident,
        pattern: LitStr,
    },
}

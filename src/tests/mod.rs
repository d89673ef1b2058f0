use super::*;


//rule1 ::= rule2 token2, rule2 ::= token1
fn fixture() -> GrammarSet {
    grammar! {
        rule1 ::= rule2 token2;
        rule2 ::= token1;
        token1 = "[a-c]";
        token2 = "[b-d]";
    }
}

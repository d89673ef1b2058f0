extern crate tiebreak;
use tiebreak::*;

fn main() {
    let _ = grammar! {
        %alias nothing "x";
            //~^ ERROR Alias for an undefined symbol
        input ::= ;
    };

    let _ = grammar! {
        %alias input "a";
        %alias input "b";
            //~^ ERROR Duplicate alias
        input ::= ;
    };
}

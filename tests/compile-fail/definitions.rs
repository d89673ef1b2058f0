extern crate tiebreak;
use tiebreak::*;

fn main() {
    let _ = grammar! {
        input ::= foo;
               //~^ ERROR Undefined symbol
    };

    let _ = grammar! {
        input ::= num;
        num = "[0-9]+";
        num ::= input;
     //~^ ERROR Symbol defined both as rule and token
    };

    let _ = grammar! {
        input ::= num;
        num = "";
           //~^ ERROR Token pattern must not be empty
    };

    let _ = grammar! {
        input ::= num
        num = "[0-9]+";
          //~^ ERROR symbol, `|` or `;` expected
    };
}

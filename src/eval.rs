//! Evaluation of expressions under a variable assignment, and truth table generation

mod table;

use fxhash::FxHashMap;

use crate::expr::{constant_value, Expr};
use crate::Error;

pub use table::{TruthRow, TruthTable};

/// Values of the variables, by name
pub type SymbolTable = FxHashMap<char, bool>;

/// Evaluate an expression by structural recursion
///
/// Constants `0` and `1` need no entry in the symbol table.
pub fn evaluate(expr: &Expr, symbols: &SymbolTable) -> Result<bool, Error> {
    match expr {
        Expr::Var(c) => signal_value(*c, symbols),
        Expr::Not(a) => Ok(!evaluate(a, symbols)?),
        Expr::Binary(op, a, b) => {
            let va = evaluate(a, symbols)?;
            let vb = evaluate(b, symbols)?;
            Ok(op.apply(va, vb))
        }
    }
}

/// Value of a named signal: a constant or a variable from the symbol table
pub(crate) fn signal_value(name: char, symbols: &SymbolTable) -> Result<bool, Error> {
    match constant_value(name) {
        Some(v) => Ok(v),
        None => symbols
            .get(&name)
            .copied()
            .ok_or(Error::UnassignedVariable(name)),
    }
}

/// Symbol table of a truth table row
///
/// The row index is read as a binary number, the first variable being the most significant bit.
pub fn assignment(variables: &[char], index: usize) -> SymbolTable {
    let n = variables.len();
    variables
        .iter()
        .enumerate()
        .map(|(j, v)| (*v, (index >> (n - 1 - j)) & 1 != 0))
        .collect()
}

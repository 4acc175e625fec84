use std::fmt;

use itertools::Itertools;

/// Two-input boolean connectives
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BinaryOp {
    /// a and b
    And,
    /// a or b
    Or,
    /// not (a and b)
    Nand,
    /// not (a or b)
    Nor,
    /// a != b
    Xor,
    /// a == b
    Xnor,
}

impl BinaryOp {
    /// Canonical keyword spelling, as produced by the normalizer
    pub fn keyword(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            And => "and",
            Or => "or",
            Nand => "nand",
            Nor => "nor",
            Xor => "xor",
            Xnor => "xnor",
        }
    }

    /// Apply the connective to two values
    pub fn apply(&self, a: bool, b: bool) -> bool {
        use BinaryOp::*;
        match self {
            And => a && b,
            Or => a || b,
            Nand => !(a && b),
            Nor => !(a || b),
            Xor => a != b,
            Xnor => a == b,
        }
    }

    /// Returns whether the connective complements its output (Nand, Nor, Xnor)
    pub fn is_inverting(&self) -> bool {
        matches!(self, BinaryOp::Nand | BinaryOp::Nor | BinaryOp::Xnor)
    }

    /// The connective without its output complement: Nand becomes And, Nor becomes Or, Xnor becomes Xor
    pub fn uninverted(&self) -> BinaryOp {
        use BinaryOp::*;
        match self {
            Nand => And,
            Nor => Or,
            Xnor => Xor,
            op => *op,
        }
    }

    /// Binding strength, higher binds tighter
    pub(crate) fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Or | Nor => 1,
            Xor | Xnor => 2,
            And | Nand => 3,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Abstract syntax tree of a boolean expression
///
/// Variables are single lowercase letters; the digits `0` and `1` are constants.
/// The tree is never modified once built: the evaluator and the synthesizer only read it.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Expr {
    /// Variable or constant leaf
    Var(char),
    /// Complement of the operand
    Not(Box<Expr>),
    /// Two-input connective
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Create a variable (or constant) leaf
    pub fn var(name: char) -> Expr {
        Expr::Var(name)
    }

    /// Create a constant leaf
    pub fn constant(value: bool) -> Expr {
        Expr::Var(if value { '1' } else { '0' })
    }

    /// Create a complement
    pub fn not(operand: Expr) -> Expr {
        Expr::Not(Box::new(operand))
    }

    /// Create a two-input node
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    /// Create an And node
    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::And, left, right)
    }

    /// Create an Or node
    pub fn or(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Or, left, right)
    }

    /// Create a Nand node
    pub fn nand(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Nand, left, right)
    }

    /// Create a Nor node
    pub fn nor(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Nor, left, right)
    }

    /// Create a Xor node
    pub fn xor(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Xor, left, right)
    }

    /// Create a Xnor node
    pub fn xnor(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Xnor, left, right)
    }

    /// Returns the value of a constant leaf, None for anything else
    pub fn constant_value(&self) -> Option<bool> {
        match self {
            Expr::Var(c) => constant_value(*c),
            _ => None,
        }
    }

    /// Sorted, deduplicated variable names; constants are not variables
    pub fn variables(&self) -> Vec<char> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
            .into_iter()
            .filter(|c| c.is_ascii_lowercase())
            .sorted()
            .dedup()
            .collect()
    }

    fn collect_names(&self, names: &mut Vec<char>) {
        match self {
            Expr::Var(c) => names.push(*c),
            Expr::Not(a) => a.collect_names(names),
            Expr::Binary(_, a, b) => {
                a.collect_names(names);
                b.collect_names(names);
            }
        }
    }

    /// Number of nodes in the tree
    pub fn nb_nodes(&self) -> usize {
        match self {
            Expr::Var(_) => 1,
            Expr::Not(a) => 1 + a.nb_nodes(),
            Expr::Binary(_, a, b) => 1 + a.nb_nodes() + b.nb_nodes(),
        }
    }

    /// Length of the longest path from the root to a leaf, a single leaf having depth 1
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) => 1,
            Expr::Not(a) => 1 + a.depth(),
            Expr::Binary(_, a, b) => 1 + a.depth().max(b.depth()),
        }
    }

    /// Render the expression in LaTeX notation
    ///
    /// Complemented forms (Not, Nand, Nor, Xnor) are drawn with an overline.
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Var(c) => c.to_ascii_uppercase().to_string(),
            Expr::Not(a) => format!("\\overline{{{}}}", a.to_latex()),
            Expr::Binary(op, a, b) => {
                let inner = op.uninverted();
                let symbol = match inner {
                    BinaryOp::And => "\\cdot",
                    BinaryOp::Or => "+",
                    _ => "\\oplus",
                };
                let l = latex_operand(a, inner, false);
                let r = latex_operand(b, inner, true);
                if op.is_inverting() {
                    format!("\\overline{{{l} {symbol} {r}}}")
                } else {
                    format!("{l} {symbol} {r}")
                }
            }
        }
    }
}

/// Value of a constant name (`0` or `1`), None for variables
pub fn constant_value(c: char) -> Option<bool> {
    match c {
        '0' => Some(false),
        '1' => Some(true),
        _ => None,
    }
}

/// Whether a child of a binary node must be parenthesized when printed in infix form
fn needs_parens(child: &Expr, parent: BinaryOp, is_right: bool) -> bool {
    match child {
        Expr::Binary(op, _, _) => {
            if is_right {
                op.precedence() <= parent.precedence()
            } else {
                op.precedence() < parent.precedence()
            }
        }
        _ => false,
    }
}

fn latex_operand(child: &Expr, parent: BinaryOp, is_right: bool) -> String {
    // Overlined forms are already grouped
    let grouped = matches!(child, Expr::Binary(op, _, _) if op.is_inverting());
    if !grouped && needs_parens(child, parent, is_right) {
        format!("\\left({}\\right)", child.to_latex())
    } else {
        child.to_latex()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(c) => write!(f, "{c}"),
            Expr::Not(a) => {
                if matches!(**a, Expr::Binary(..)) {
                    write!(f, "!({a})")
                } else {
                    write!(f, "!{a}")
                }
            }
            Expr::Binary(op, a, b) => {
                if needs_parens(a, *op, false) {
                    write!(f, "({a})")?;
                } else {
                    write!(f, "{a}")?;
                }
                write!(f, " {op} ")?;
                if needs_parens(b, *op, true) {
                    write!(f, "({b})")
                } else {
                    write!(f, "{b}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables() {
        let e = Expr::or(
            Expr::and(Expr::var('c'), Expr::var('a')),
            Expr::not(Expr::xor(Expr::var('a'), Expr::constant(true))),
        );
        assert_eq!(e.variables(), vec!['a', 'c']);
        assert_eq!(e.nb_nodes(), 8);
        assert_eq!(e.depth(), 4);
        assert_eq!(Expr::constant(false).constant_value(), Some(false));
        assert_eq!(Expr::var('a').constant_value(), None);
    }

    #[test]
    fn test_display() {
        let a = Expr::var('a');
        let b = Expr::var('b');
        let c = Expr::var('c');
        let e = Expr::and(Expr::or(a.clone(), b.clone()), c.clone());
        assert_eq!(format!("{e}"), "(a or b) and c");
        let e = Expr::or(Expr::and(a.clone(), b.clone()), c.clone());
        assert_eq!(format!("{e}"), "a and b or c");
        let e = Expr::nand(a.clone(), Expr::nand(b.clone(), c.clone()));
        assert_eq!(format!("{e}"), "a nand (b nand c)");
        let e = Expr::not(Expr::not(Expr::xnor(a, b)));
        assert_eq!(format!("{e}"), "!!(a xnor b)");
    }

    #[test]
    fn test_latex() {
        let a = Expr::var('a');
        let b = Expr::var('b');
        let c = Expr::var('c');
        assert_eq!(Expr::nand(a.clone(), b.clone()).to_latex(), "\\overline{A \\cdot B}");
        assert_eq!(
            Expr::and(Expr::or(a.clone(), b.clone()), c.clone()).to_latex(),
            "\\left(A + B\\right) \\cdot C"
        );
        assert_eq!(
            Expr::and(Expr::nor(a.clone(), b.clone()), Expr::not(c)).to_latex(),
            "\\overline{A + B} \\cdot \\overline{C}"
        );
        assert_eq!(Expr::xor(a, b).to_latex(), "A \\oplus B");
    }

    #[test]
    fn test_connectives() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(BinaryOp::Nand.apply(a, b), !(a && b));
                assert_eq!(BinaryOp::Nor.apply(a, b), !(a || b));
                assert_eq!(BinaryOp::Xor.apply(a, b), a != b);
                assert_eq!(BinaryOp::Xnor.apply(a, b), a == b);
                for op in [BinaryOp::Nand, BinaryOp::Nor, BinaryOp::Xnor] {
                    assert_eq!(op.apply(a, b), !op.uninverted().apply(a, b));
                }
            }
        }
    }
}

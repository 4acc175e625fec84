//! De Morgan expansion into a form with only And, Or and literals
//!
//! The expansion pushes complements down to the leaves:
//! ```text
//!     !!x          = x
//!     !(a and b)   = !a or !b
//!     !(a or b)    = !a and !b
//!     a nand b     = !(a and b)
//!     a nor b      = !(a or b)
//!     a xor b      = a and !b or !a and b
//!     a xnor b     = a and b or !a and !b
//! ```
//! Complemented constants are folded, so that only variables may appear under a complement.

use std::collections::BTreeSet;

use crate::expr::{constant_value, BinaryOp, Expr};

/// Connective with the output complement removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    And,
    Or,
    Xor,
}

/// Split a connective into its uncomplemented base and whether it complements its output
fn split(op: BinaryOp) -> (Base, bool) {
    match op {
        BinaryOp::And => (Base::And, false),
        BinaryOp::Nand => (Base::And, true),
        BinaryOp::Or => (Base::Or, false),
        BinaryOp::Nor => (Base::Or, true),
        BinaryOp::Xor => (Base::Xor, false),
        BinaryOp::Xnor => (Base::Xor, true),
    }
}

fn expand_rec(expr: &Expr, negate: bool, inverted_inputs: &mut BTreeSet<char>) -> Expr {
    match expr {
        Expr::Var(c) => {
            if !negate {
                Expr::Var(*c)
            } else if let Some(v) = constant_value(*c) {
                Expr::constant(!v)
            } else {
                inverted_inputs.insert(*c);
                Expr::not(Expr::Var(*c))
            }
        }
        Expr::Not(a) => expand_rec(a, !negate, inverted_inputs),
        Expr::Binary(op, a, b) => {
            let (base, complemented) = split(*op);
            let negate = negate ^ complemented;
            let (a, b): (&Expr, &Expr) = (a, b);
            let mut e = |x: &Expr, n: bool| expand_rec(x, n, inverted_inputs);
            match (base, negate) {
                (Base::And, false) => Expr::and(e(a, false), e(b, false)),
                (Base::And, true) => Expr::or(e(a, true), e(b, true)),
                (Base::Or, false) => Expr::or(e(a, false), e(b, false)),
                (Base::Or, true) => Expr::and(e(a, true), e(b, true)),
                (Base::Xor, false) => {
                    let l = Expr::and(e(a, false), e(b, true));
                    let r = Expr::and(e(a, true), e(b, false));
                    Expr::or(l, r)
                }
                (Base::Xor, true) => {
                    let l = Expr::and(e(a, false), e(b, false));
                    let r = Expr::and(e(a, true), e(b, true));
                    Expr::or(l, r)
                }
            }
        }
    }
}

/// Rewrite an expression with only And, Or, variables and complemented variables
///
/// Each variable that appears complemented is recorded once in `inverted_inputs`.
pub fn expand(expr: &Expr, inverted_inputs: &mut BTreeSet<char>) -> Expr {
    expand_rec(expr, false, inverted_inputs)
}

/// Returns whether an expression only contains And, Or, variables and complemented variables
pub fn is_expanded(expr: &Expr) -> bool {
    match expr {
        Expr::Var(_) => true,
        Expr::Not(a) => matches!(**a, Expr::Var(_)) && a.constant_value().is_none(),
        Expr::Binary(BinaryOp::And | BinaryOp::Or, a, b) => is_expanded(a) && is_expanded(b),
        Expr::Binary(..) => false,
    }
}

/// Number of leaves of the expansion, for the expression and for its complement
fn leaf_counts(expr: &Expr) -> (u64, u64) {
    match expr {
        Expr::Var(_) => (1, 1),
        Expr::Not(a) => {
            let (p, n) = leaf_counts(a);
            (n, p)
        }
        Expr::Binary(op, a, b) => {
            let (ap, an) = leaf_counts(a);
            let (bp, bn) = leaf_counts(b);
            let (base, complemented) = split(*op);
            let (p, n) = match base {
                Base::And | Base::Or => (ap.saturating_add(bp), an.saturating_add(bn)),
                Base::Xor => {
                    let all = ap.saturating_add(an).saturating_add(bp).saturating_add(bn);
                    (all, all)
                }
            };
            if complemented {
                (n, p)
            } else {
                (p, n)
            }
        }
    }
}

/// Number of leaves that [`expand`] would produce, saturating instead of overflowing
///
/// Nested Xor grows exponentially, so this is computed without building the expansion.
pub fn expanded_size(expr: &Expr) -> u64 {
    leaf_counts(expr).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{assignment, evaluate};
    use crate::expr::generators::random::random_expr;
    use crate::expr::generators::testcases::parity;

    fn a() -> Expr {
        Expr::var('a')
    }

    fn b() -> Expr {
        Expr::var('b')
    }

    fn na() -> Expr {
        Expr::not(a())
    }

    fn nb() -> Expr {
        Expr::not(b())
    }

    fn expand_simple(e: &Expr) -> (Expr, BTreeSet<char>) {
        let mut inv = BTreeSet::new();
        let ret = expand(e, &mut inv);
        (ret, inv)
    }

    #[test]
    fn test_rules() {
        let cases = [
            (Expr::not(Expr::not(a())), a()),
            (Expr::not(Expr::and(a(), b())), Expr::or(na(), nb())),
            (Expr::not(Expr::or(a(), b())), Expr::and(na(), nb())),
            (Expr::not(Expr::nand(a(), b())), Expr::and(a(), b())),
            (Expr::not(Expr::nor(a(), b())), Expr::or(a(), b())),
            (Expr::nand(a(), b()), Expr::or(na(), nb())),
            (Expr::nor(a(), b()), Expr::and(na(), nb())),
            (
                Expr::xor(a(), b()),
                Expr::or(Expr::and(a(), nb()), Expr::and(na(), b())),
            ),
            (
                Expr::xnor(a(), b()),
                Expr::or(Expr::and(a(), b()), Expr::and(na(), nb())),
            ),
            (
                Expr::not(Expr::xor(a(), b())),
                Expr::or(Expr::and(a(), b()), Expr::and(na(), nb())),
            ),
            (
                Expr::not(Expr::xnor(a(), b())),
                Expr::or(Expr::and(a(), nb()), Expr::and(na(), b())),
            ),
        ];
        for (input, expected) in cases {
            let (e, _) = expand_simple(&input);
            assert_eq!(e, expected, "Expansion of {input}");
            assert!(is_expanded(&e));
        }
    }

    #[test]
    fn test_inverted_inputs() {
        let e = Expr::or(
            Expr::and(na(), b()),
            Expr::nor(a(), Expr::var('c')),
        );
        let (_, inv) = expand_simple(&e);
        assert_eq!(inv.into_iter().collect::<Vec<_>>(), vec!['a', 'c']);
        let (_, inv) = expand_simple(&Expr::and(a(), b()));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_constants_folded() {
        let (e, inv) = expand_simple(&Expr::nand(a(), Expr::constant(true)));
        assert_eq!(e, Expr::or(na(), Expr::constant(false)));
        assert_eq!(inv.len(), 1);
        assert!(!is_expanded(&Expr::not(Expr::constant(true))));
    }

    #[test]
    fn test_soundness() {
        for seed in 0..200 {
            let expr = random_expr(4, 5, seed);
            let vars = expr.variables();
            let (clean, inv) = expand_simple(&expr);
            assert!(is_expanded(&clean));
            assert!(inv.iter().all(|v| vars.contains(v)));
            for i in 0..(1 << vars.len()) {
                let s = assignment(&vars, i);
                assert_eq!(evaluate(&expr, &s), evaluate(&clean, &s), "{expr} at row {i}");
            }
        }
    }

    #[test]
    fn test_size() {
        for seed in 0..50 {
            let expr = random_expr(3, 5, seed);
            let (clean, _) = expand_simple(&expr);
            // Complemented leaves count as one leaf but two nodes
            let nb_not = count_not(&clean);
            assert_eq!(expanded_size(&expr) as usize, (clean.nb_nodes() - nb_not + 1) / 2);
        }
        assert_eq!(expanded_size(&parity(4)), 22);
        let long_chain = (0..200).fold(Expr::var('a'), |acc, _| Expr::xor(acc, Expr::var('a')));
        assert_eq!(expanded_size(&long_chain), u64::MAX);
    }

    fn count_not(e: &Expr) -> usize {
        match e {
            Expr::Var(_) => 0,
            Expr::Not(a) => 1 + count_not(a),
            Expr::Binary(_, a, b) => count_not(a) + count_not(b),
        }
    }
}

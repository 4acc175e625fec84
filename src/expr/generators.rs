//! Expression generators and templates

/// Random expressions, used to exercise the pipeline
pub mod random {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::expr::{BinaryOp, Expr};

    const OPS: [BinaryOp; 6] = [
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Nand,
        BinaryOp::Nor,
        BinaryOp::Xor,
        BinaryOp::Xnor,
    ];

    fn random_leaf(rng: &mut SmallRng, nb_vars: usize) -> Expr {
        if rng.gen_bool(0.05) {
            Expr::constant(rng.gen())
        } else {
            Expr::var((b'a' + rng.gen_range(0..nb_vars) as u8) as char)
        }
    }

    fn random_node(rng: &mut SmallRng, nb_vars: usize, depth: usize) -> Expr {
        if depth <= 1 || rng.gen_bool(0.2) {
            return random_leaf(rng, nb_vars);
        }
        let choice = rng.gen_range(0..=OPS.len());
        if choice == OPS.len() {
            Expr::not(random_node(rng, nb_vars, depth - 1))
        } else {
            let left = random_node(rng, nb_vars, depth - 1);
            let right = random_node(rng, nb_vars, depth - 1);
            Expr::binary(OPS[choice], left, right)
        }
    }

    /// Generate a random expression over the first `nb_vars` letters, at most `depth` levels deep
    pub fn random_expr(nb_vars: usize, depth: usize, seed: u64) -> Expr {
        assert!(nb_vars > 0 && nb_vars <= 26);
        assert!(depth > 0);
        let mut rng = SmallRng::seed_from_u64(seed);
        random_node(&mut rng, nb_vars, depth)
    }
}

/// Classic functions with a known structure
pub mod testcases {
    use crate::expr::Expr;

    fn letter(i: usize) -> Expr {
        assert!(i < 26);
        Expr::var((b'a' + i as u8) as char)
    }

    /// Xor chain over the first `len` letters
    pub fn parity(len: usize) -> Expr {
        assert!(len > 0);
        let mut ret = letter(0);
        for i in 1..len {
            ret = Expr::xor(ret, letter(i));
        }
        ret
    }

    /// Majority of three inputs: `a and b or b and c or a and c`
    pub fn majority3() -> Expr {
        let (a, b, c) = (letter(0), letter(1), letter(2));
        Expr::or(
            Expr::or(Expr::and(a.clone(), b.clone()), Expr::and(b, c.clone())),
            Expr::and(a, c),
        )
    }

    /// And-Or-Invert gate: `not (a and b or c)`
    pub fn and_or_invert() -> Expr {
        Expr::not(Expr::or(Expr::and(letter(0), letter(1)), letter(2)))
    }
}

#[cfg(test)]
mod tests {
    use super::random::random_expr;
    use super::testcases::*;

    #[test]
    fn test_random_deterministic() {
        for seed in 0..20 {
            let e1 = random_expr(4, 5, seed);
            let e2 = random_expr(4, 5, seed);
            assert_eq!(e1, e2);
            assert!(e1.depth() <= 5);
            assert!(e1.variables().iter().all(|v| *v >= 'a' && *v <= 'd'));
        }
    }

    #[test]
    fn test_testcases() {
        assert_eq!(parity(4).variables(), vec!['a', 'b', 'c', 'd']);
        assert_eq!(parity(1).nb_nodes(), 1);
        assert_eq!(majority3().to_string(), "a and b or b and c or a and c");
        assert_eq!(and_or_invert().to_string(), "!(a and b or c)");
    }
}

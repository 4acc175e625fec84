use std::fmt;

use itertools::Itertools;
use log::{debug, trace};
use volute::Lut;

use crate::eval::{assignment, evaluate};
use crate::expr::Expr;
use crate::Error;

/// One row of a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthRow {
    /// Index of the row, also the binary encoding of its inputs
    pub index: usize,
    /// Input values, in variable order
    pub inputs: Vec<bool>,
    /// Value of the expression
    pub output: bool,
}

/// Complete truth table of an expression
///
/// Rows are enumerated in binary counting order, the first variable being the most significant bit.
/// The output column is stored as a [`Lut`]: bit `i` is the output of row `i`, so that the Lut
/// variable `k` is the variable `n - 1 - k` of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    variables: Vec<char>,
    function: Lut,
}

impl TruthTable {
    /// Evaluate the expression on all assignments of the variables
    ///
    /// Each row is evaluated independently, with its own symbol table.
    pub fn build(expr: &Expr, variables: &[char], max_variables: usize) -> Result<TruthTable, Error> {
        if variables.len() > max_variables {
            return Err(Error::TooManyVariables {
                found: variables.len(),
                limit: max_variables,
            });
        }
        let mut function = Lut::zero(variables.len());
        for index in 0..function.num_bits() {
            let symbols = assignment(variables, index);
            let output = evaluate(expr, &symbols)?;
            trace!("Row {index}: {output}");
            if output {
                function.set_bit(index);
            }
        }
        debug!(
            "Truth table with {} rows over [{}]",
            function.num_bits(),
            variables.iter().join(", ")
        );
        Ok(TruthTable {
            variables: variables.to_vec(),
            function,
        })
    }

    /// Variables, in column order
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    /// Number of variables
    pub fn nb_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of rows, 2^n for n variables
    pub fn nb_rows(&self) -> usize {
        self.function.num_bits()
    }

    /// Output of the row at index i
    pub fn output(&self, i: usize) -> bool {
        assert!(i < self.nb_rows());
        self.function.value(i)
    }

    /// Row at index i
    pub fn row(&self, i: usize) -> TruthRow {
        let n = self.nb_variables();
        TruthRow {
            index: i,
            inputs: (0..n).map(|j| (i >> (n - 1 - j)) & 1 != 0).collect(),
            output: self.output(i),
        }
    }

    /// All rows, in order
    pub fn rows(&self) -> impl Iterator<Item = TruthRow> + '_ {
        (0..self.nb_rows()).map(|i| self.row(i))
    }

    /// Output column as a Lut
    pub fn function(&self) -> &Lut {
        &self.function
    }

    /// Returns whether the output is true for every row
    pub fn is_tautology(&self) -> bool {
        (0..self.nb_rows()).all(|i| self.output(i))
    }

    /// Returns whether the output is false for every row
    pub fn is_contradiction(&self) -> bool {
        (0..self.nb_rows()).all(|i| !self.output(i))
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self
            .variables
            .iter()
            .map(|v| v.to_ascii_uppercase())
            .join(" ");
        if header.is_empty() {
            writeln!(f, "Out")?;
        } else {
            writeln!(f, "{header} | Out")?;
        }
        for row in self.rows() {
            let inputs = row.inputs.iter().map(|b| u8::from(*b)).join(" ");
            if inputs.is_empty() {
                writeln!(f, "{}", u8::from(row.output))?;
            } else {
                writeln!(f, "{inputs} | {}", u8::from(row.output))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::generators::random::random_expr;
    use crate::expr::Expression;
    use crate::Error;

    use super::*;

    #[test]
    fn test_and_or() {
        let e = Expression::parse("A*B+C").unwrap();
        let t = e.truth_table().unwrap();
        assert_eq!(t.variables(), &['a', 'b', 'c']);
        assert_eq!(t.nb_rows(), 8);
        // a=1, b=1, c=0
        assert_eq!(t.row(0b110).inputs, vec![true, true, false]);
        assert!(t.output(0b110));
        assert!(!t.output(0b000));
        let ones: Vec<usize> = t.rows().filter(|r| r.output).map(|r| r.index).collect();
        assert_eq!(ones, vec![1, 3, 5, 6, 7]);
    }

    #[test]
    fn test_product_of_sums() {
        let e = Expression::parse("(A+B)*(C+D)").unwrap();
        let t = e.truth_table().unwrap();
        assert_eq!(t.nb_variables(), 4);
        assert_eq!(t.nb_rows(), 16);
        for r in t.rows() {
            let v = &r.inputs;
            assert_eq!(r.output, (v[0] || v[1]) && (v[2] || v[3]));
        }
    }

    #[test]
    fn test_xor_caret() {
        let e = Expression::parse("A^B").unwrap();
        assert_eq!(e.normalized(), "a xor b");
        let t = e.truth_table().unwrap();
        for r in t.rows() {
            assert_eq!(r.output, r.inputs[0] != r.inputs[1]);
        }
    }

    #[test]
    fn test_row_order() {
        for seed in 0..10 {
            let expr = random_expr(5, 4, seed);
            let vars = expr.variables();
            let t = TruthTable::build(&expr, &vars, 16).unwrap();
            let n = vars.len();
            assert_eq!(t.nb_rows(), 1 << n);
            for (i, r) in t.rows().enumerate() {
                assert_eq!(r.index, i);
                for (j, b) in r.inputs.iter().enumerate() {
                    assert_eq!(*b, (i >> (n - 1 - j)) & 1 == 1);
                }
            }
        }
    }

    #[test]
    fn test_constant_table() {
        let e = Expression::parse("1 or 0").unwrap();
        let t = e.truth_table().unwrap();
        assert_eq!(t.nb_rows(), 1);
        assert!(t.is_tautology());
        assert_eq!(format!("{t}"), "Out\n1\n");
        let t = Expression::parse("a and !a").unwrap().truth_table().unwrap();
        assert!(t.is_contradiction());
    }

    #[test]
    fn test_display() {
        let t = Expression::parse("a nand b").unwrap().truth_table().unwrap();
        assert_eq!(format!("{t}"), "A B | Out\n0 0 | 1\n0 1 | 1\n1 0 | 1\n1 1 | 0\n");
    }

    #[test]
    fn test_variable_limit() {
        let e = Expression::parse("a+b+c+d+e").unwrap();
        let expr = e.ast();
        assert_eq!(
            TruthTable::build(expr, e.variables(), 4),
            Err(Error::TooManyVariables { found: 5, limit: 4 })
        );
    }
}

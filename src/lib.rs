//! Boolean expressions, truth tables and complementary CMOS synthesis
//!
//! This crate parses boolean expressions written in the usual textbook notations, generates their
//! truth tables, and synthesizes a static CMOS implementation made of an NMOS pull-down network,
//! its dual PMOS pull-up network, and the inverters that the function needs.
//!
//! # Usage
//!
//! ```bash
//! # Show the parsed expression, its variables and its LaTeX rendering
//! boolcmos show "A*B + C'"
//! # Print the truth table
//! boolcmos table "(A+B)*(C+D)"
//! # Synthesize the transistor networks, and check them against the truth table
//! boolcmos cmos "A nand B" --verify
//! # Check the synthesis on random expressions
//! boolcmos fuzz --count 1000
//! ```
//!
//! # Notation
//!
//! Operators can be written as keywords or symbols, in any case:
//! * `not`, `!`, a trailing `'` or an overline for the complement;
//! * `and`, `&`, `*`, `·` for the conjunction;
//! * `or`, `|`, `+` for the disjunction;
//! * `xor`, `^`, `⊕` and `xnor`, `⊙`, `≡`;
//! * `nand`, `↑`, `⊼` and `nor`, `↓`, `⊽`.
//!
//! Variables are single letters, and `0` and `1` are constants.
//! From the loosest to the tightest, the precedence levels are Or/Nor, Xor/Xnor, And/Nand, then Not.
//!
//! # Pipeline
//!
//! The text is normalized to a keyword form, tokenized and parsed into an [`Expr`].
//! The syntax tree is then shared read-only by the [evaluator](eval) and the [CMOS synthesis](cmos):
//! ```
//! # use boolcmos::Expression;
//! let e = Expression::parse("A*B+C'").unwrap();
//! assert_eq!(e.normalized(), "a and b or c!");
//!
//! let table = e.truth_table().unwrap();
//! assert_eq!(table.nb_rows(), 8);
//!
//! let circuit = e.synthesize().unwrap();
//! assert!(circuit.needs_output_inverter);
//! assert_eq!(circuit.inverted_inputs.len(), 1);
//! boolcmos::cmos::verify(&circuit, &table).unwrap();
//! ```

#![warn(missing_docs)]

pub mod cmos;
pub mod error;
pub mod eval;
pub mod expr;

pub use cmos::{synthesize, CmosCircuit};
pub use error::Error;
pub use eval::{evaluate, TruthTable};
pub use expr::{Expr, Expression, Limits};

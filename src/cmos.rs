//! Complementary CMOS synthesis
//!
//! An expression is implemented as a single complementary stage: a pull-down network of NMOS
//! devices mirroring the And/Or structure of the function, and its dual pull-up network of PMOS devices.
//! Such a stage computes the complement of the function that seeded it, so an outermost inversion is
//! stripped when present, and an output inverter is added otherwise.
//! Complemented variables are supplied by one input inverter per variable.
//!
//! ```
//! # use boolcmos::Expression;
//! let circuit = Expression::parse("A nand B").unwrap().synthesize().unwrap();
//! assert!(!circuit.needs_output_inverter);
//! assert_eq!(circuit.pulldown.to_string(), "series(nmos a, nmos b)");
//! assert_eq!(circuit.pullup.to_string(), "parallel(pmos a, pmos b)");
//! ```

pub mod expand;
pub mod network;
pub mod sim;
pub mod stats;

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::expr::{Expr, Limits};
use crate::Error;

pub use expand::{expand, expanded_size, is_expanded};
pub use network::{build_pulldown, Device, Inverter, InverterInput, NetworkNode, TransistorKind};
pub use sim::verify;
pub use stats::{stats, CmosStats};

/// Result of the synthesis of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmosCircuit {
    /// Expanded function seeding the pull-down network; the stage computes its complement
    pub core: Expr,
    /// NMOS network between the stage output and ground, conducting when the core is true
    pub pulldown: NetworkNode,
    /// PMOS network between the supply and the stage output, dual of the pull-down network
    pub pullup: NetworkNode,
    /// Whether an inverter restores the polarity after the stage
    pub needs_output_inverter: bool,
    /// Variables whose complement is used by a device
    pub inverted_inputs: BTreeSet<char>,
}

impl CmosCircuit {
    /// One inverter per variable in `inverted_inputs`
    pub fn input_inverters(&self) -> Vec<Inverter> {
        self.inverted_inputs
            .iter()
            .map(|c| Inverter {
                input: InverterInput::Variable(*c),
            })
            .collect()
    }

    /// Inverter after the stage, if any
    pub fn output_inverter(&self) -> Option<Inverter> {
        if self.needs_output_inverter {
            Some(Inverter {
                input: InverterInput::Stage,
            })
        } else {
            None
        }
    }

    /// Transistor counts
    pub fn stats(&self) -> CmosStats {
        stats(self)
    }
}

impl fmt::Display for CmosCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Core: {}", self.core)?;
        writeln!(f, "Pull-down: {}", self.pulldown)?;
        writeln!(f, "Pull-up: {}", self.pullup)?;
        if self.inverted_inputs.is_empty() {
            writeln!(f, "Input inverters: none")?;
        } else {
            writeln!(f, "Input inverters: {}", self.input_inverters().iter().join(", "))?;
        }
        match self.output_inverter() {
            Some(inv) => writeln!(f, "Output inverter: {inv}"),
            None => writeln!(f, "Output inverter: none"),
        }
    }
}

/// Remove an outermost inversion
///
/// Returns the function to seed the pull-down network with, and whether an output inverter is
/// required: Not, Nand, Nor and Xnor are stripped to their uninverted form, other expressions are kept.
pub fn strip_output_inversion(expr: &Expr) -> (Expr, bool) {
    match expr {
        Expr::Not(a) => ((**a).clone(), false),
        Expr::Binary(op, a, b) if op.is_inverting() => (
            Expr::binary(op.uninverted(), (**a).clone(), (**b).clone()),
            false,
        ),
        _ => (expr.clone(), true),
    }
}

/// Synthesize a complementary CMOS circuit for an expression
///
/// Fails with [`Error::NetworkTooLarge`] before expanding if the pull-down network would
/// exceed `limits.max_devices`.
pub fn synthesize(expr: &Expr, limits: &Limits) -> Result<CmosCircuit, Error> {
    let (seed, needs_output_inverter) = strip_output_inversion(expr);
    debug!(
        "Seeding with {seed}, {}",
        if needs_output_inverter {
            "output inverter required"
        } else {
            "outer inversion stripped"
        }
    );
    let devices = expanded_size(&seed);
    if devices > limits.max_devices as u64 {
        return Err(Error::NetworkTooLarge {
            devices,
            limit: limits.max_devices,
        });
    }
    let mut inverted_inputs = BTreeSet::new();
    let core = expand(&seed, &mut inverted_inputs);
    let pulldown = build_pulldown(&core)?;
    let pullup = pulldown.dual();
    debug!(
        "Pull-down network with {} devices, inverted inputs [{}]",
        pulldown.nb_devices(),
        inverted_inputs.iter().join(", ")
    );
    Ok(CmosCircuit {
        core,
        pulldown,
        pullup,
        needs_output_inverter,
        inverted_inputs,
    })
}

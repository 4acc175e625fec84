//! Compute transistor statistics
//!
//! ```
//! # use boolcmos::Expression;
//! use boolcmos::cmos::stats::stats;
//! let circuit = Expression::parse("a xor b").unwrap().synthesize().unwrap();
//! let stats = stats(&circuit);
//!
//! // Four devices in each network, two input inverters and an output inverter
//! assert_eq!(stats.nb_nmos, 7);
//! assert_eq!(stats.nb_transistors(), 14);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::cmos::network::TransistorKind;
use crate::cmos::CmosCircuit;

/// Number of transistors and inverters in a circuit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CmosStats {
    /// Number of NMOS devices, inverters included
    pub nb_nmos: usize,
    /// Number of PMOS devices, inverters included
    pub nb_pmos: usize,
    /// Number of input inverters
    pub nb_input_inverters: usize,
    /// Whether there is an output inverter
    pub has_output_inverter: bool,
    /// Longest series chain in the pull-down network
    pub pulldown_stack: usize,
    /// Longest series chain in the pull-up network
    pub pullup_stack: usize,
}

impl CmosStats {
    /// Total number of transistors
    pub fn nb_transistors(&self) -> usize {
        self.nb_nmos + self.nb_pmos
    }

    /// Total number of inverters
    pub fn nb_inverters(&self) -> usize {
        self.nb_input_inverters + usize::from(self.has_output_inverter)
    }

    fn add(&mut self, kind: TransistorKind) {
        match kind {
            TransistorKind::Nmos => self.nb_nmos += 1,
            TransistorKind::Pmos => self.nb_pmos += 1,
        }
    }
}

impl fmt::Display for CmosStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Transistors: {}", self.nb_transistors())?;
        writeln!(f, "      nmos: {}", self.nb_nmos)?;
        writeln!(f, "      pmos: {}", self.nb_pmos)?;
        if self.nb_inverters() != 0 {
            writeln!(f, "  Inverters: {}", self.nb_inverters())?;
            if self.nb_input_inverters != 0 {
                writeln!(f, "      input: {}", self.nb_input_inverters)?;
            }
            if self.has_output_inverter {
                writeln!(f, "      output: 1")?;
            }
        }
        writeln!(f, "  Stack height:")?;
        writeln!(f, "      pull-down: {}", self.pulldown_stack)?;
        writeln!(f, "      pull-up: {}", self.pullup_stack)?;
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the circuit
pub fn stats(c: &CmosCircuit) -> CmosStats {
    let mut ret = CmosStats {
        nb_nmos: 0,
        nb_pmos: 0,
        nb_input_inverters: c.inverted_inputs.len(),
        has_output_inverter: c.needs_output_inverter,
        pulldown_stack: c.pulldown.stack_height(),
        pullup_stack: c.pullup.stack_height(),
    };
    for d in c.pulldown.devices().iter().chain(c.pullup.devices().iter()) {
        ret.add(d.kind);
    }
    let inverters = c.input_inverters().into_iter().chain(c.output_inverter());
    for inv in inverters {
        for kind in inv.devices() {
            ret.add(kind);
        }
    }
    ret
}
